// Calendar outline CLI
// Replays recorded calendar layouts and queries the calendar REST route

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use calendar_outline::dom::{content_container, CalendarDom};
use calendar_outline::models::filter::{DateRange, FilterState};
use calendar_outline::models::geometry::Rect;
use calendar_outline::models::settings::OutlineSettings;
use calendar_outline::services::border::compute_outlines;
use calendar_outline::services::filter::{CalendarApi, CalendarQuery, RestCalendarApi};
use calendar_outline::services::grid_metrics::grid_stylesheet;
use calendar_outline::services::settings::SettingsService;
use calendar_outline::services::shape::path::fmt_coord;
use calendar_outline::services::snapshot::load_snapshot;
use calendar_outline::utils::date::parse_date_input;

#[derive(Parser)]
#[command(name = "calendar-outline")]
#[command(about = "Draw day-group outlines for recorded calendar layouts")]
struct Cli {
    /// Settings file (defaults to outline.toml in the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the border overlay SVG of a layout snapshot
    Render { snapshot: PathBuf },
    /// Print the grid stylesheet for the configured grid defaults
    Css,
    /// Print each day group's shape classification as JSON
    Inspect { snapshot: PathBuf },
    /// Fetch one server-rendered calendar page and print its summary
    Fetch {
        /// Site base URL (overrides rest_base_url from the settings)
        #[arg(long)]
        base_url: Option<String>,

        #[arg(short, long)]
        search: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Taxonomy filter as taxonomy=term, repeatable
        #[arg(short, long)]
        term: Vec<String>,

        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        past: bool,
    },
}

#[derive(Serialize)]
struct GroupReport {
    calendar: usize,
    day: String,
    shape: String,
    events: usize,
    bounds: Rect,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(cli.config)?;

    match cli.command {
        Commands::Render { snapshot } => render(&snapshot, &settings),
        Commands::Inspect { snapshot } => inspect(&snapshot, &settings),
        Commands::Css => {
            print!("{}", grid_stylesheet(&settings.grid_defaults));
            Ok(())
        }
        Commands::Fetch {
            base_url,
            search,
            from,
            to,
            term,
            page,
            past,
        } => {
            let base_url = base_url
                .or_else(|| settings.rest_base_url.clone())
                .ok_or_else(|| anyhow!("No base URL: pass --base-url or set rest_base_url"))?;
            let query = CalendarQuery {
                search: search.unwrap_or_default(),
                date_range: DateRange::new(parse_date_arg(from)?, parse_date_arg(to)?),
                filters: parse_terms(&term)?,
                page,
                show_past: past,
            };
            fetch(&base_url, &query)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<OutlineSettings> {
    let service = match path {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_project_dirs()?,
    };
    service.load()
}

fn render(path: &std::path::Path, settings: &OutlineSettings) -> Result<()> {
    let (dom, roots) = load_snapshot(path)?.into_document();

    for root in roots {
        let area = dom.bounding_rect(content_container(&dom, root));
        let outlines = compute_outlines(&dom, root, &area, settings);
        println!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"dm-border-overlay\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" style=\"overflow: visible\">",
            w = fmt_coord(area.width),
            h = fmt_coord(area.height)
        );
        for outline in &outlines {
            println!("  {}", outline.to_svg().to_markup());
        }
        println!("</svg>");
    }
    Ok(())
}

fn inspect(path: &std::path::Path, settings: &OutlineSettings) -> Result<()> {
    let (dom, roots) = load_snapshot(path)?.into_document();

    let mut report = Vec::new();
    for (calendar, root) in roots.into_iter().enumerate() {
        let area = dom.bounding_rect(content_container(&dom, root));
        report.extend(
            compute_outlines(&dom, root, &area, settings)
                .into_iter()
                .map(|outline| GroupReport {
                    calendar,
                    day: outline.key,
                    shape: outline.case.to_string(),
                    events: outline.events.len(),
                    bounds: outline.shape.bounds(),
                }),
        );
    }

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

fn fetch(base_url: &str, query: &CalendarQuery) -> Result<()> {
    let api = RestCalendarApi::new(base_url)?;
    let response = api.fetch(query)?;
    println!(
        "page {} of {} ({} events)",
        response.pagination.current_page, response.pagination.max_pages, response.pagination.total_events
    );
    if !response.counter.is_empty() {
        println!("{}", response.counter);
    }
    Ok(())
}

fn parse_date_arg(value: Option<String>) -> Result<Option<chrono::NaiveDate>> {
    match value {
        None => Ok(None),
        Some(value) => parse_date_input(&value)
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DD", value)),
    }
}

fn parse_terms(terms: &[String]) -> Result<FilterState> {
    let mut filters = FilterState::new();
    for entry in terms {
        let (taxonomy, term) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid term filter '{}', expected taxonomy=term", entry))?;
        filters.set_term(taxonomy.trim(), term.trim(), true);
    }
    Ok(filters)
}
