//! Decodes an extracted payload into validated result records.
//!
//! Decoding is tolerant per record: an entry missing optional fields is
//! accepted, an entry missing a required field is dropped with a warning,
//! and only a payload that is not a JSON array at all fails the batch.

use serde::Deserialize;
use thiserror::Error;

use super::payload::{Payload, extract_payload};
use crate::models::{DatabaseType, RegistrationStatus, SearchResultItem};

/// The reply carried a payload block that is not a well-formed JSON array
#[derive(Debug, Clone, Error)]
#[error("payload is not a valid JSON array: {message}")]
pub struct MalformedPayload {
    pub message: String,
}

/// A record as the backend actually sent it, before validation. Every field
/// is optional here; requiredness is enforced in [`validate_record`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    generic_name: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    representative_or_holder: Option<String>,
    #[serde(default)]
    registration_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    dosage_form: Option<String>,
    #[serde(default)]
    strength: Option<String>,
    #[serde(default)]
    product_link: Option<String>,
    #[serde(default)]
    manufacturer_link: Option<String>,
}

/// Normalize a raw reply into validated result records.
///
/// A reply with no recognizable payload block means "no matches found" and
/// yields an empty list; a payload block that cannot be decoded as a JSON
/// array fails with [`MalformedPayload`]. Individual records that cannot be
/// validated are dropped rather than failing the batch.
pub fn normalize_response(
    raw: &str,
    database: DatabaseType,
) -> Result<Vec<SearchResultItem>, MalformedPayload> {
    match extract_payload(raw) {
        Payload::Missing => Ok(Vec::new()),
        Payload::Found(block) => decode_records(&block, database),
    }
}

/// Decode one payload block into records, dropping entries that fail
/// validation
fn decode_records(
    payload: &str,
    database: DatabaseType,
) -> Result<Vec<SearchResultItem>, MalformedPayload> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(payload)
        .map_err(|e| MalformedPayload { message: e.to_string() })?;

    let total = values.len();
    let mut records = Vec::with_capacity(total);
    for value in values {
        if let Some(record) = validate_record(value, database) {
            records.push(record);
        }
    }

    let dropped = total - records.len();
    if dropped > 0 {
        eprintln!("Warning: dropped {} of {} reply record(s) missing required fields", dropped, total);
    }

    Ok(records)
}

/// Validate one raw record, or `None` to drop it.
///
/// Required: a non-empty productName and registrationNumber, plus a usable
/// status (for the notified-devices register the status is forced to
/// `Notified` regardless of what the backend sent). Dosage fields are kept
/// only for the medicines register; other registers never carry them.
fn validate_record(value: serde_json::Value, database: DatabaseType) -> Option<SearchResultItem> {
    let raw: RawRecord = serde_json::from_value(value).ok()?;

    let product_name = non_empty(raw.product_name)?;
    let registration_number = non_empty(raw.registration_number)?;

    let status = match database {
        DatabaseType::NotifiedDevices => RegistrationStatus::Notified,
        _ => RegistrationStatus::parse(raw.status.as_deref()?)?,
    };

    let (dosage_form, strength) = match database {
        DatabaseType::RegisteredMedicines => (non_empty(raw.dosage_form), non_empty(raw.strength)),
        _ => (None, None),
    };

    Some(SearchResultItem {
        product_name,
        generic_name: raw.generic_name.unwrap_or_default(),
        manufacturer: raw.manufacturer.unwrap_or_default(),
        country: raw.country.unwrap_or_default(),
        representative_or_holder: raw.representative_or_holder.unwrap_or_default(),
        registration_number,
        status,
        dosage_form,
        strength,
        product_link: raw.product_link.unwrap_or_default(),
        manufacturer_link: raw.manufacturer_link.unwrap_or_default(),
    })
}

/// Trimmed field content, or `None` for a missing or blank field
fn non_empty(field: Option<String>) -> Option<String> {
    field.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
