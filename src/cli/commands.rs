use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crate::client::{GeminiClient, GeminiConfig, SearchOutcome};
use crate::models::{DatabaseType, SearchCategory, SearchRequest, SearchResultItem};
use crate::session::{SessionState, get_session_dir, load_session, save_session};
use crate::utils::{sanitize_display_text, truncate_cell};

#[derive(Parser)]
#[command(name = "tmda-search")]
#[command(version = "0.1.0")]
#[command(about = "Search TMDA registered medicines and medical devices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one search and print the results
    Search {
        /// Search term
        query: String,
        /// Register to search
        #[arg(long, value_enum, default_value = "registered")]
        database: DatabaseArg,
        /// Record field the query is matched against
        #[arg(long, value_enum, default_value = "product")]
        category: CategoryArg,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the search inputs remembered from the last run
    Session,
}

/// CLI name for a register
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DatabaseArg {
    Registered,
    Notified,
    Medicines,
}

impl From<DatabaseArg> for DatabaseType {
    fn from(arg: DatabaseArg) -> Self {
        match arg {
            DatabaseArg::Registered => DatabaseType::RegisteredDevices,
            DatabaseArg::Notified => DatabaseType::NotifiedDevices,
            DatabaseArg::Medicines => DatabaseType::RegisteredMedicines,
        }
    }
}

/// CLI name for a search category
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Product,
    Generic,
    Manufacturer,
    Country,
    Holder,
}

impl From<CategoryArg> for SearchCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Product => SearchCategory::ProductName,
            CategoryArg::Generic => SearchCategory::GenericName,
            CategoryArg::Manufacturer => SearchCategory::Manufacturer,
            CategoryArg::Country => SearchCategory::ManufacturingCountry,
            CategoryArg::Holder => SearchCategory::LocalRepresentativeHolder,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { query, database, category, json }) => {
            run_search(&query, database.into(), category.into(), json)
        }
        Some(Commands::Session) => show_session(),
        None => run_interactive(),
    }
}

/// One-shot search for scripted use
fn run_search(
    query: &str,
    database: DatabaseType,
    category: SearchCategory,
    json: bool,
) -> Result<()> {
    // Validated before any configuration or network activity
    if query.trim().is_empty() {
        bail!("Please enter a search term.");
    }

    let request = SearchRequest::new(query, category, database);
    persist_inputs(&request);

    let config = GeminiConfig::from_env()?;
    let client = GeminiClient::new(config);

    eprintln!("Searching {}...", database.label());
    let outcome = client.search(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_results(&outcome, database);
    }

    Ok(())
}

/// Remember the inputs the same way the interactive screen does
fn persist_inputs(request: &SearchRequest) {
    if let Ok(dir) = get_session_dir() {
        let state = SessionState {
            database: request.database(),
            query: request.query().to_string(),
            category: request.category(),
        };
        let _ = save_session(&dir, &state);
    }
}

fn print_results(outcome: &SearchOutcome, database: DatabaseType) {
    if outcome.results.is_empty() {
        println!("No matching entries found.");
    } else {
        println!("{} result(s) from {}:", outcome.results.len(), database.label());
        println!();
        for (idx, item) in outcome.results.iter().enumerate() {
            print_result_line(idx + 1, item, database);
        }
    }

    if !outcome.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &outcome.sources {
            println!(
                "  {} <{}>",
                sanitize_display_text(&source.title),
                sanitize_display_text(&source.uri)
            );
        }
    }
}

fn print_result_line(idx: usize, item: &SearchResultItem, database: DatabaseType) {
    let name = truncate_cell(&sanitize_display_text(&item.product_name), 40);
    let generic = truncate_cell(&sanitize_display_text(&item.generic_name), 40);
    let manufacturer = truncate_cell(&sanitize_display_text(&item.manufacturer), 40);
    let country = truncate_cell(&sanitize_display_text(&item.country), 30);
    let reg_no = sanitize_display_text(&item.registration_number);

    println!("{:2}. {} — {}", idx, name, generic);
    println!("    Manufacturer: {} ({})", manufacturer, country);
    println!("    Registration: {} [{}]", reg_no, item.status.label());

    if database == DatabaseType::RegisteredMedicines
        && let (Some(form), Some(strength)) = (&item.dosage_form, &item.strength)
    {
        println!(
            "    Form: {} {}",
            sanitize_display_text(form),
            sanitize_display_text(strength)
        );
    }
    if !item.product_link.is_empty() {
        println!("    Link: {}", sanitize_display_text(&item.product_link));
    }
}

fn show_session() -> Result<()> {
    let session_dir = get_session_dir()?;
    let state = load_session(&session_dir);

    println!("Last-used search inputs");
    println!("=======================");
    println!("Register: {}", state.database.label());
    println!("Category: {}", state.category.label());
    if state.query.is_empty() {
        println!("Query:    (none)");
    } else {
        println!("Query:    {}", sanitize_display_text(&state.query));
    }

    Ok(())
}

fn run_interactive() -> Result<()> {
    // An unresolvable config directory only disables persistence; it never
    // blocks the search screen
    let session_dir = get_session_dir().ok();
    let initial = session_dir.as_deref().map(load_session).unwrap_or_default();

    let config = GeminiConfig::from_env()?;
    let client = GeminiClient::new(config);

    crate::tui::run_interactive(client, session_dir, initial)
}
