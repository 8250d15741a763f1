pub mod text;

pub use text::{sanitize_display_text, truncate_cell};
