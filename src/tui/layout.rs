use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Vertical screen layout for the search screen
pub struct AppLayout {
    pub form_area: Rect,
    pub results_area: Rect,
    pub sources_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create the layout:
    /// - Search form: 5 rows (register, category, query inside a border)
    /// - Results: remaining space (at least 5 rows)
    /// - Sources: 5 rows
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Search form
                Constraint::Min(5),    // Results
                Constraint::Length(5), // Sources
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            form_area: chunks[0],
            results_area: chunks[1],
            sources_area: chunks[2],
            status_area: chunks[3],
        }
    }
}
