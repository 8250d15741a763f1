use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table};

use super::app::{MessageType, SearchPhase, StatusMessage};
use super::layout::AppLayout;
use crate::models::{DatabaseType, SearchCategory, SearchResultItem, Source};
use crate::utils::{sanitize_display_text, truncate_cell};

/// Maximum characters per table cell before truncation
const MAX_CELL_CHARS: usize = 40;

const MUTED: Color = Color::Rgb(113, 113, 122);
const HIGHLIGHT_FG: Color = Color::Rgb(250, 250, 250);
const HIGHLIGHT_BG: Color = Color::Rgb(16, 185, 129);

/// Everything the renderer needs from the application state
pub struct RenderState<'a> {
    pub database: DatabaseType,
    pub category: SearchCategory,
    pub query: &'a str,
    pub phase: &'a SearchPhase,
    pub results: &'a [SearchResultItem],
    pub sources: &'a [Source],
    pub selected_idx: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_form(frame, layout.form_area, state);
    render_results(frame, layout.results_area, state);
    render_sources(frame, layout.sources_area, state.sources);
    render_status_bar(frame, layout.status_area, state);
}

fn render_form(frame: &mut Frame, area: Rect, state: &RenderState) {
    let label_style = Style::default().fg(MUTED);
    let lines = vec![
        Line::from(vec![
            Span::styled("Register: ", label_style),
            Span::styled(
                format!("◀ {} ▶", state.database.label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Category: ", label_style),
            Span::raw(format!("◀ {} ▶", state.category.label())),
        ]),
        Line::from(vec![
            Span::styled("Query:    ", label_style),
            Span::raw(state.query.to_string()),
            Span::styled("▏", Style::default().fg(MUTED)),
        ]),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" TMDA Database Search "),
    );
    frame.render_widget(form, area);
}

fn render_results(frame: &mut Frame, area: Rect, state: &RenderState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(format!(" Results ({}) ", state.results.len()));

    match state.phase {
        SearchPhase::Idle => {
            let hint = Paragraph::new("Select a register and enter a search term to begin.")
                .style(Style::default().fg(MUTED))
                .block(block);
            frame.render_widget(hint, area);
        }
        SearchPhase::Searching => {
            let spinner = Paragraph::new(format!("Searching {}...", state.database.label()))
                .style(Style::default().fg(MUTED))
                .block(block);
            frame.render_widget(spinner, area);
        }
        SearchPhase::Error(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(error, area);
        }
        SearchPhase::Success => {
            if state.results.is_empty() {
                let empty = Paragraph::new("No matching entries found.")
                    .style(Style::default().fg(MUTED))
                    .block(block);
                frame.render_widget(empty, area);
            } else {
                let table = results_table(state).block(block);
                frame.render_widget(table, area);
            }
        }
    }
}

/// Build the results table; the medicines register gets two extra columns
fn results_table<'a>(state: &RenderState<'a>) -> Table<'a> {
    let medicines = state.database == DatabaseType::RegisteredMedicines;

    let mut header_cells =
        vec!["Product", "Generic name", "Manufacturer", "Country", "Rep/Holder", "Reg. no"];
    if medicines {
        header_cells.push("Dosage");
        header_cells.push("Strength");
    }
    header_cells.push("Status");

    let header = Row::new(header_cells)
        .style(Style::default().fg(MUTED).add_modifier(Modifier::BOLD));

    let rows = state.results.iter().enumerate().map(|(idx, item)| {
        let mut cells = vec![
            cell(&item.product_name),
            cell(&item.generic_name),
            cell(&item.manufacturer),
            cell(&item.country),
            cell(&item.representative_or_holder),
            cell(&item.registration_number),
        ];
        if medicines {
            cells.push(cell(item.dosage_form.as_deref().unwrap_or("")));
            cells.push(cell(item.strength.as_deref().unwrap_or("")));
        }
        cells.push(cell(item.status.label()));

        let style = if idx == state.selected_idx {
            Style::default().fg(HIGHLIGHT_FG).bg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(cells).style(style)
    });

    let widths: Vec<Constraint> = if medicines {
        vec![
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(8),
            Constraint::Percentage(14),
            Constraint::Percentage(10),
            Constraint::Percentage(8),
            Constraint::Percentage(8),
            Constraint::Percentage(8),
        ]
    } else {
        vec![
            Constraint::Percentage(18),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Percentage(10),
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(10),
        ]
    };

    Table::new(rows, widths).header(header)
}

fn cell(text: &str) -> Cell<'static> {
    Cell::from(truncate_cell(&sanitize_display_text(text), MAX_CELL_CHARS))
}

fn render_sources(frame: &mut Frame, area: Rect, sources: &[Source]) {
    let items: Vec<ListItem> = sources
        .iter()
        .enumerate()
        .map(|(idx, source)| {
            let title = sanitize_display_text(&source.title);
            let uri = sanitize_display_text(&source.uri);
            let line = Line::from(vec![
                Span::styled(format!("{}. ", idx + 1), Style::default().fg(MUTED)),
                Span::raw(title),
                Span::styled(format!("  {}", uri), Style::default().fg(MUTED)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(format!(" Sources ({}) ", sources.len())),
    );
    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => Color::Green,
            MessageType::Error => Color::Red,
        };
        (message.text.clone(), Style::default().fg(color))
    } else {
        (
            "Enter search · Tab register · ←/→ category · ↑/↓ select · Ctrl-Y copy · Esc \
             clear · Ctrl-C quit"
                .to_string(),
            Style::default().fg(MUTED),
        )
    };

    let bar = Paragraph::new(text).style(style);
    frame.render_widget(bar, area);
}
