//! End-to-end checks of the prompt/normalizer contract through the public
//! API: what the prompt demands from the backend is exactly what the
//! normalizer accepts back.

use tmda_search::models::{DatabaseType, RegistrationStatus, SearchCategory, SearchRequest};
use tmda_search::{build_search_prompt, normalize_response};

#[test]
fn test_prompt_parameters_are_recoverable_from_text() {
    // Every combination of register and category must keep the query, the
    // category label and the register label verbatim in the prompt
    for database in DatabaseType::ALL {
        for category in SearchCategory::ALL {
            let request = SearchRequest::new("amoxicillin 250", category, database);
            let prompt = build_search_prompt(&request);

            assert!(prompt.contains("\"amoxicillin 250\""), "query lost for {:?}", database);
            assert!(prompt.contains(category.label()), "category lost for {:?}", category);
            assert!(prompt.contains(database.label()), "register lost for {:?}", database);
        }
    }
}

#[test]
fn test_reply_shaped_as_prompted_normalizes_cleanly() {
    // A well-behaved backend reply: commentary around a fenced block in the
    // exact schema the prompt asks for
    let reply = r#"I searched the register and found the following:

```json
[
  {
    "productName": "Panadol Extra",
    "genericName": "Paracetamol + Caffeine",
    "manufacturer": "GSK",
    "country": "United Kingdom",
    "representativeOrHolder": "GSK Tanzania Ltd",
    "registrationNumber": "TZ22/10/0123",
    "status": "Active",
    "dosageForm": "Tablet",
    "strength": "500mg/65mg",
    "productLink": "https://tmda.go.tz/products/123",
    "manufacturerLink": "https://gsk.com"
  }
]
```

These entries were current as of the last register update."#;

    let records = normalize_response(reply, DatabaseType::RegisteredMedicines).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].product_name, "Panadol Extra");
    assert_eq!(records[0].status, RegistrationStatus::Active);
    assert_eq!(records[0].dosage_form.as_deref(), Some("Tablet"));
}

#[test]
fn test_notified_register_records_are_always_notified() {
    let reply = r#"```json
[
  {"productName": "Digital Thermometer", "registrationNumber": "NTZ/01", "status": "Active"},
  {"productName": "Pulse Oximeter", "registrationNumber": "NTZ/02", "status": "Suspended"}
]
```"#;

    let records = normalize_response(reply, DatabaseType::NotifiedDevices).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.status == RegistrationStatus::Notified));
}

#[test]
fn test_device_records_never_carry_dosage_fields() {
    // Even when the backend ignores the prompt and sends them anyway
    let reply = r#"```json
[{"productName": "Syringe", "registrationNumber": "TZ/9", "status": "Active",
  "dosageForm": "n/a", "strength": "10ml"}]
```"#;

    let records = normalize_response(reply, DatabaseType::RegisteredDevices).unwrap();
    assert!(records[0].dosage_form.is_none());
    assert!(records[0].strength.is_none());
}

#[test]
fn test_partial_failure_keeps_good_records() {
    let reply = r#"```json
[
  {"productName": "Panadol", "registrationNumber": "TZ/1", "status": "Active"},
  {"genericName": "record without a product name", "registrationNumber": "TZ/2",
   "status": "Active"}
]
```"#;

    let records = normalize_response(reply, DatabaseType::RegisteredMedicines).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].product_name, "Panadol");
}

#[test]
fn test_prose_only_reply_means_no_matches() {
    let reply = "I checked the register thoroughly but found no entries matching that name.";
    let records = normalize_response(reply, DatabaseType::RegisteredDevices).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_truncated_payload_is_a_malformed_response() {
    let reply = "```json\n[{\"productName\": \"Panadol\", \"registrationNumber\"\n```";
    assert!(normalize_response(reply, DatabaseType::RegisteredDevices).is_err());
}
