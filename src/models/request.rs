use serde::{Deserialize, Serialize};

/// The TMDA public registers that can be searched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseType {
    #[default]
    RegisteredDevices,
    NotifiedDevices,
    RegisteredMedicines,
}

impl DatabaseType {
    /// All registers, in the order they are offered in the UI
    pub const ALL: [DatabaseType; 3] =
        [Self::RegisteredDevices, Self::NotifiedDevices, Self::RegisteredMedicines];

    /// Human-readable register name, used in the UI and in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegisteredDevices => "Registered Medical Devices",
            Self::NotifiedDevices => "Notified Medical Devices",
            Self::RegisteredMedicines => "Registered Medicines",
        }
    }

    /// Stable token used when persisting the session
    pub fn encode(&self) -> &'static str {
        match self {
            Self::RegisteredDevices => "registered-devices",
            Self::NotifiedDevices => "notified-devices",
            Self::RegisteredMedicines => "registered-medicines",
        }
    }

    /// Decode a persisted token; unknown tokens fall back to the default
    /// register rather than failing the load
    pub fn decode(token: &str) -> Self {
        match token {
            "registered-devices" => Self::RegisteredDevices,
            "notified-devices" => Self::NotifiedDevices,
            "registered-medicines" => Self::RegisteredMedicines,
            _ => Self::default(),
        }
    }

    /// The register that follows this one in the UI cycle (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::RegisteredDevices => Self::NotifiedDevices,
            Self::NotifiedDevices => Self::RegisteredMedicines,
            Self::RegisteredMedicines => Self::RegisteredDevices,
        }
    }

    /// The register before this one in the UI cycle (wraps around)
    pub fn prev(&self) -> Self {
        match self {
            Self::RegisteredDevices => Self::RegisteredMedicines,
            Self::NotifiedDevices => Self::RegisteredDevices,
            Self::RegisteredMedicines => Self::NotifiedDevices,
        }
    }
}

/// The record field a query is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchCategory {
    #[default]
    ProductName,
    GenericName,
    Manufacturer,
    ManufacturingCountry,
    LocalRepresentativeHolder,
}

impl SearchCategory {
    /// All categories, in the order they are offered in the UI
    pub const ALL: [SearchCategory; 5] = [
        Self::ProductName,
        Self::GenericName,
        Self::Manufacturer,
        Self::ManufacturingCountry,
        Self::LocalRepresentativeHolder,
    ];

    /// Human-readable category name, used in the UI and in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductName => "Product Name",
            Self::GenericName => "Generic/Common Name",
            Self::Manufacturer => "Manufacturer",
            Self::ManufacturingCountry => "Manufacturing Country",
            Self::LocalRepresentativeHolder => "Local Representative/Holder",
        }
    }

    /// Stable token used when persisting the session
    pub fn encode(&self) -> &'static str {
        match self {
            Self::ProductName => "product-name",
            Self::GenericName => "generic-name",
            Self::Manufacturer => "manufacturer",
            Self::ManufacturingCountry => "manufacturing-country",
            Self::LocalRepresentativeHolder => "local-representative-holder",
        }
    }

    /// Decode a persisted token; unknown tokens fall back to the default
    /// category rather than failing the load
    pub fn decode(token: &str) -> Self {
        match token {
            "product-name" => Self::ProductName,
            "generic-name" => Self::GenericName,
            "manufacturer" => Self::Manufacturer,
            "manufacturing-country" => Self::ManufacturingCountry,
            "local-representative-holder" => Self::LocalRepresentativeHolder,
            _ => Self::default(),
        }
    }

    /// The category after this one in the UI cycle (wraps around)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The category before this one in the UI cycle (wraps around)
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A single search as submitted by the user.
///
/// Built fresh for every search and never mutated afterwards. The query is
/// trimmed on construction; rejecting empty queries is the caller's job and
/// happens before a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    category: SearchCategory,
    database: DatabaseType,
}

impl SearchRequest {
    pub fn new(query: &str, category: SearchCategory, database: DatabaseType) -> Self {
        Self { query: query.trim().to_string(), category, database }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> SearchCategory {
        self.category
    }

    pub fn database(&self) -> DatabaseType {
        self.database
    }
}
