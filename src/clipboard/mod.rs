use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::SearchResultItem;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Render a result record as the multi-line text placed on the clipboard.
///
/// Optional and empty fields are left out so the copied text only contains
/// information the backend actually provided.
pub fn format_result(item: &SearchResultItem) -> String {
    let mut lines = vec![
        format!("Product: {}", item.product_name),
        format!("Generic name: {}", item.generic_name),
        format!("Manufacturer: {} ({})", item.manufacturer, item.country),
        format!("Representative/holder: {}", item.representative_or_holder),
        format!("Registration no: {}", item.registration_number),
        format!("Status: {}", item.status.label()),
    ];

    if let Some(form) = &item.dosage_form {
        lines.push(format!("Dosage form: {form}"));
    }
    if let Some(strength) = &item.strength {
        lines.push(format!("Strength: {strength}"));
    }
    if !item.product_link.is_empty() {
        lines.push(format!("Product link: {}", item.product_link));
    }
    if !item.manufacturer_link.is_empty() {
        lines.push(format!("Manufacturer link: {}", item.manufacturer_link));
    }

    lines.join("\n")
}

/// Internal copy with dependency injection (test use)
#[cfg(test)]
fn copy_with_provider(item: &SearchResultItem, provider: &mut dyn ClipboardProvider) -> Result<()> {
    provider.set_text(&format_result(item))
}

/// Copy a formatted result record to the system clipboard.
///
/// # Errors
///
/// Returns an error if the clipboard is unavailable (headless environment,
/// denied access) or the copy itself fails.
pub fn copy_result_to_clipboard(item: &SearchResultItem) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(&format_result(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationStatus;

    /// Mock clipboard for testing without system clipboard access
    struct MockClipboard {
        text: Option<String>,
        should_fail: bool,
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    fn medicine_item() -> SearchResultItem {
        SearchResultItem {
            product_name: "Panadol".to_string(),
            generic_name: "Paracetamol".to_string(),
            manufacturer: "GSK".to_string(),
            country: "United Kingdom".to_string(),
            representative_or_holder: "GSK Tanzania Ltd".to_string(),
            registration_number: "TZ22/123".to_string(),
            status: RegistrationStatus::Active,
            dosage_form: Some("Tablet".to_string()),
            strength: Some("500mg".to_string()),
            product_link: "https://example.org/panadol".to_string(),
            manufacturer_link: String::new(),
        }
    }

    #[test]
    fn test_copy_formats_full_record() {
        let mut mock = MockClipboard { text: None, should_fail: false };
        copy_with_provider(&medicine_item(), &mut mock).unwrap();

        let text = mock.text.unwrap();
        assert!(text.contains("Product: Panadol"));
        assert!(text.contains("Registration no: TZ22/123"));
        assert!(text.contains("Status: Active"));
        assert!(text.contains("Dosage form: Tablet"));
        assert!(text.contains("Strength: 500mg"));
        assert!(text.contains("Product link: https://example.org/panadol"));
        // Empty links are left out entirely
        assert!(!text.contains("Manufacturer link:"));
    }

    #[test]
    fn test_copy_device_record_omits_dosage_lines() {
        let item = SearchResultItem {
            dosage_form: None,
            strength: None,
            status: RegistrationStatus::Notified,
            ..medicine_item()
        };

        let mut mock = MockClipboard { text: None, should_fail: false };
        copy_with_provider(&item, &mut mock).unwrap();

        let text = mock.text.unwrap();
        assert!(!text.contains("Dosage form:"));
        assert!(!text.contains("Strength:"));
        assert!(text.contains("Status: Notified"));
    }

    #[test]
    fn test_copy_provider_failure_propagates() {
        let mut mock = MockClipboard { text: None, should_fail: true };
        let result = copy_with_provider(&medicine_item(), &mut mock);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Mock clipboard error"));
    }
}
