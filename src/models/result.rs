use serde::{Deserialize, Serialize};

/// Registration status of a register entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Active,
    Expired,
    Suspended,
    Notified,
}

impl RegistrationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
            Self::Suspended => "Suspended",
            Self::Notified => "Notified",
        }
    }

    /// Parse a status token from the backend's payload (case-insensitive).
    /// Unknown tokens yield `None`; the caller decides whether to drop the
    /// record.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "suspended" => Some(Self::Suspended),
            "notified" => Some(Self::Notified),
            _ => None,
        }
    }
}

/// One entry of a search result set.
///
/// Results are AI-summarized, not authoritative: no uniqueness is enforced
/// and duplicates are allowed to pass through. The dosage fields are only
/// populated for the Registered Medicines register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub product_name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub country: String,
    pub representative_or_holder: String,
    pub registration_number: String,
    pub status: RegistrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    /// May be empty when the backend could not resolve a link
    #[serde(default)]
    pub product_link: String,
    #[serde(default)]
    pub manufacturer_link: String,
}

/// A web citation backing a search reply.
///
/// Produced once per search from the backend's grounding metadata and
/// replaced wholesale on the next search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}
