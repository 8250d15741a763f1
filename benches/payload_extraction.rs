use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tmda_search::models::DatabaseType;
use tmda_search::normalize_response;

/// Generate a synthetic backend reply with N records wrapped in commentary
fn generate_reply(num_records: usize) -> String {
    let mut records = Vec::with_capacity(num_records);
    for i in 0..num_records {
        records.push(format!(
            r#"{{"productName": "Product {i}", "genericName": "Generic {i}",
                "manufacturer": "Maker {i}", "country": "Tanzania",
                "representativeOrHolder": "Rep {i}",
                "registrationNumber": "TZ{i:06}", "status": "Active",
                "productLink": "", "manufacturerLink": ""}}"#
        ));
    }

    format!(
        "Here is what I found in the register:\n\n```json\n[{}]\n```\n\nLet me know if you \
         need anything else.",
        records.join(",\n")
    )
}

fn bench_normalize_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_response");

    for size in [1, 10, 100, 1_000].iter() {
        let reply = generate_reply(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                normalize_response(black_box(&reply), DatabaseType::RegisteredDevices).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_response);
criterion_main!(benches);
