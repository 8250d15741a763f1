//! Builds the natural-language instruction sent to the search backend.
//!
//! The prompt is a pure function of the request: it names the register, the
//! search category and the verbatim query, and pins down the JSON schema the
//! normalizer expects on the way back. It performs no I/O and has no error
//! conditions.

use crate::models::{DatabaseType, SearchRequest};

/// Fields every record must carry, in the order the backend is asked to emit
/// them
const COMMON_FIELDS: &str = "productName, genericName, manufacturer, country, \
     representativeOrHolder, registrationNumber, status, productLink, manufacturerLink";

/// Compose the instruction for one search.
///
/// The query, category label and register label all appear verbatim in the
/// output, so the parameters of a search can be read back from the prompt
/// text itself.
pub fn build_search_prompt(request: &SearchRequest) -> String {
    let register = request.database().label();
    let category = request.category().label();
    let query = request.query();

    let fields = match request.database() {
        DatabaseType::RegisteredMedicines => format!("{COMMON_FIELDS}, dosageForm, strength"),
        _ => COMMON_FIELDS.to_string(),
    };

    let status_rule = match request.database() {
        DatabaseType::NotifiedDevices => {
            "Every entry in this register is a notification, so set \"status\" to the literal \
             string \"Notified\" on every record."
        }
        _ => {
            "Set \"status\" to exactly one of \"Active\", \"Expired\" or \"Suspended\" on every \
             record."
        }
    };

    let dosage_rule = match request.database() {
        DatabaseType::RegisteredMedicines => {
            "Include the \"dosageForm\" and \"strength\" fields on every medicine record."
        }
        _ => "Omit the \"dosageForm\" and \"strength\" fields entirely; they do not apply to this \
             register.",
    };

    format!(
        "Search the Tanzania Medicines and Medical Devices Authority (TMDA) public register \
         \"{register}\" for entries whose {category} matches \"{query}\".\n\
         Reply with exactly one fenced ```json code block containing a JSON array of record \
         objects with these string fields: {fields}.\n\
         {status_rule}\n\
         {dosage_rule}\n\
         Use an empty string for any link you cannot resolve. \
         If no entries match, reply with an empty JSON array: []."
    )
}
