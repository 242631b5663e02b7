//! CLI administration tool for partner-map.
//!
//! Inspects the partner data file and runs searches without starting the
//! HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Validate the data file
//! cargo run --bin partner-admin -- check
//!
//! # Search like the map page does
//! cargo run --bin partner-admin -- search --region SP --city campinas
//!
//! # List filter values
//! cargo run --bin partner-admin -- facets
//! ```
//!
//! # Environment Variables
//!
//! - `DATA_FILE` (optional): Partner table path, overridable with `--file`
//! - `DATA_DELIMITER` (optional): Field delimiter, overridable with `--delimiter`

use partner_map::application::services::PartnerService;
use partner_map::config::Config;
use partner_map::domain::entities::PartnerRecord;
use partner_map::domain::filter::FilterSelection;
use partner_map::domain::markers::{self, PLACEHOLDER};
use partner_map::infrastructure::persistence::CsvPartnerRepository;
use partner_map::utils::phone::normalize_phone;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for inspecting partner-map data.
#[derive(Parser)]
#[command(name = "partner-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Partner data file (defaults to DATA_FILE or assistencia.csv)
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Single-character field delimiter (defaults to DATA_DELIMITER or ',')
    #[arg(short, long, global = true)]
    delimiter: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Validate the data file and report data quality issues
    Check,

    /// Filter partners and print their contact links
    Search {
        /// Region to include (repeatable; default: all)
        #[arg(short, long = "region")]
        regions: Vec<String>,

        /// Case-insensitive city substring
        #[arg(short, long)]
        city: Option<String>,

        /// Service tag to include (repeatable; default: all)
        #[arg(short, long = "service")]
        services: Vec<String>,
    },

    /// List regions and services found in the data file
    Facets,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?.with_data_source(cli.file, cli.delimiter);
    let delimiter = config
        .delimiter()
        .context("Delimiter must be a single ASCII character")?;

    let repository =
        Arc::new(CsvPartnerRepository::new(&config.data_file).with_delimiter(delimiter));
    let service = PartnerService::new(repository);

    match cli.command {
        Commands::Check => handle_check(&service).await?,
        Commands::Search {
            regions,
            city,
            services,
        } => {
            let selection = FilterSelection {
                regions: (!regions.is_empty()).then_some(regions),
                city,
                services: (!services.is_empty()).then_some(services),
            };
            handle_search(&service, &selection).await?
        }
        Commands::Facets => handle_facets(&service).await?,
    }

    Ok(())
}

/// Loads the table and reports rows the map cannot fully use.
///
/// Reports:
/// - Row count and missing columns
/// - Rows without valid coordinates (not drawn on the map)
/// - Rows without a usable phone number (link has no destination)
async fn handle_check(service: &PartnerService<CsvPartnerRepository>) -> Result<()> {
    println!("{}", "🔍 Data Check".bright_blue().bold());
    println!();

    let table = service
        .table()
        .await
        .map_err(|e| anyhow::anyhow!("Data unavailable: {}", e))?;

    println!("  Source: {}", table.source.cyan());
    println!("  Rows:   {}", table.len().to_string().bright_white().bold());
    println!();

    let warnings = table.column_warnings();
    if warnings.is_empty() {
        println!("{}", "  ✅ All expected columns present".green());
    } else {
        for warning in &warnings {
            println!("  {} {}", "⚠️".yellow(), warning.message.yellow());
        }
    }

    let unlocated: Vec<(usize, &PartnerRecord)> = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.coordinates().is_none())
        .collect();
    let no_phone: Vec<(usize, &PartnerRecord)> = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| normalize_phone(r.contact.as_deref().unwrap_or("")).is_empty())
        .collect();

    println!();
    print_issue_list("Rows without valid coordinates", &unlocated);
    print_issue_list("Rows without a usable phone", &no_phone);

    Ok(())
}

fn print_issue_list(title: &str, rows: &[(usize, &PartnerRecord)]) {
    if rows.is_empty() {
        println!("  {} {}: {}", "✅".green(), title, "none".green());
        return;
    }

    println!(
        "  {} {}: {}",
        "⚠️".yellow(),
        title,
        rows.len().to_string().yellow().bold()
    );
    for (index, record) in rows {
        // +2: header line and 1-based numbering.
        println!(
            "      line {:<5} {}",
            (index + 2).to_string().bright_black(),
            record.name.as_deref().unwrap_or(PLACEHOLDER)
        );
    }
}

/// Runs the same filter cycle as the map page and prints matches.
async fn handle_search(
    service: &PartnerService<CsvPartnerRepository>,
    selection: &FilterSelection,
) -> Result<()> {
    println!("{}", "🔧 Partner Search".bright_blue().bold());
    println!();

    let outcome = service
        .search(selection)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;

    for warning in &outcome.warnings {
        println!("  {} {}", "⚠️".yellow(), warning.message.yellow());
    }

    if outcome.is_empty() {
        println!("{}", "  No partners match the selected filters".yellow());
        return Ok(());
    }

    println!(
        "  {:<30} {:<24} {:<4} {}",
        "Name".bright_white().bold(),
        "City".bright_white().bold(),
        "UF".bright_white().bold(),
        "WhatsApp".bright_white().bold()
    );
    println!("  {}", "─".repeat(100).bright_black());

    for row in outcome.rows() {
        let located = if row.coordinates().is_some() {
            "".normal()
        } else {
            " (not on map)".bright_black()
        };
        println!(
            "  {:<30} {:<24} {:<4} {}{}",
            row.name.as_deref().unwrap_or(PLACEHOLDER).cyan(),
            row.city.as_deref().unwrap_or(PLACEHOLDER),
            row.region.as_deref().unwrap_or(PLACEHOLDER),
            markers::contact_link(row).bright_yellow(),
            located
        );
    }

    println!();
    println!(
        "  Total: {} ({} on map)",
        outcome.total.to_string().bright_white().bold(),
        outcome.mapped().to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Prints the values offered by the region and service filters.
async fn handle_facets(service: &PartnerService<CsvPartnerRepository>) -> Result<()> {
    println!("{}", "📋 Filter Values".bright_blue().bold());
    println!();

    let outcome = service
        .search(&FilterSelection::default())
        .await
        .map_err(|e| anyhow::anyhow!("Data unavailable: {}", e))?;

    println!("{}", "  Regions:".bright_white().bold());
    for region in &outcome.facets.regions {
        println!("    {}", region.cyan());
    }

    println!();
    match &outcome.facets.services {
        Some(services) => {
            println!("{}", "  Services:".bright_white().bold());
            for service in services {
                println!("    {}", service.cyan());
            }
        }
        None => println!("{}", "  Services: no values in the data file".yellow()),
    }
    println!();

    Ok(())
}
