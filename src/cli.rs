//! Command-line surface for `rrad`.
//!
//! Three commands: `list` (fetch, partition, render), `watch` (watchlist
//! CRUD), and `link` (offline: build the shareable query string for a set
//! of filters). Filter flags are shared so `list` and `link` always agree
//! on what a given combination means.

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::json;

use crate::api::ApiClient;
use crate::config::Config;
use crate::model::{ConfidenceLevel, Recall, Region};
use crate::query::{self, RecallQuery};
use crate::watch::partition_tracked;

#[derive(Parser, Debug)]
#[command(
    name = "rrad",
    version,
    about = "Search and track product safety recalls from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recalls matching the active filters, grouped by your watchlist.
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Emit a JSON envelope instead of the human view.
        #[arg(long)]
        json: bool,
    },
    /// Manage the watchlist of tracked brands/terms.
    Watch {
        #[command(subcommand)]
        command: WatchCommand,
    },
    /// Print the canonical query string for a set of filters (no network).
    Link {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum WatchCommand {
    /// Show tracked items.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Track a new item (substring-matched against recall brand/title).
    Add {
        value: String,
        /// Item kind as stored by the backend.
        #[arg(long, default_value = "BRAND")]
        kind: String,
    },
    /// Stop tracking an item by id.
    Rm { id: i64 },
}

/// Filter flags shared by `list` and `link`. Applied on top of `--from-link`
/// (when given) in a fixed order: decode, optional reset, then each flag.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text search term (matched server-side).
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Region: US or IN. Omit for all regions.
    #[arg(long, value_parser = parse_region)]
    pub region: Option<Region>,

    /// Status filter (repeatable): CONFIRMED, PROBABLE, WATCH.
    #[arg(long = "status", value_parser = parse_status)]
    pub status: Vec<ConfidenceLevel>,

    /// Signal-type filter (repeatable), e.g. "Recall", "Sample Failure".
    #[arg(long = "signal")]
    pub signal: Vec<String>,

    /// Inclusive start date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Inclusive end date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Preset: only the last N days (overrides --start/--end).
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,

    /// Start from a shared link's query string, then apply the other flags.
    #[arg(long = "from-link", value_name = "QUERYSTRING")]
    pub from_link: Option<String>,

    /// Clear refinements from --from-link (keeps region and query term).
    #[arg(long, requires = "from_link")]
    pub reset: bool,
}

impl FilterArgs {
    /// Build the canonical query these flags describe.
    pub fn to_query(&self, today: NaiveDate) -> RecallQuery {
        let mut q = self
            .from_link
            .as_deref()
            .map(query::decode)
            .unwrap_or_default();
        if self.reset {
            q = q.reset();
        }
        if let Some(text) = &self.query {
            q = q.set_free_text(Some(text));
        }
        if let Some(region) = self.region {
            q = q.set_region(Some(region));
        }
        for status in &self.status {
            q.statuses.insert(*status);
        }
        for signal in &self.signal {
            if !signal.trim().is_empty() {
                q.signal_types.insert(signal.clone());
            }
        }
        if let Some(start) = self.start {
            q = q.set_start_date(Some(start));
        }
        if let Some(end) = self.end {
            q = q.set_end_date(Some(end));
        }
        if let Some(days) = self.days {
            q = q.apply_preset(days, today);
        }
        q
    }
}

fn parse_region(s: &str) -> Result<Region, String> {
    s.parse()
}

fn parse_status(s: &str) -> Result<ConfidenceLevel, String> {
    s.parse()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

/// Dispatch a parsed invocation.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Command::List { filters, json } => {
            let q = filters.to_query(Utc::now().date_naive());
            let client = ApiClient::new(&config)?;
            let (recalls, watchlist) =
                tokio::try_join!(client.fetch_recalls(&q), client.fetch_watchlist())?;
            let has_watchlist = !watchlist.is_empty();
            let (tracked, other) = partition_tracked(recalls, &watchlist);
            if json {
                let envelope = json!({
                    "query": q,
                    "query_string": query::encode(&q),
                    "active_filter_count": q.active_filter_count(),
                    "tracked": tracked,
                    "other": other,
                });
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                render_listing(&q, &tracked, &other, has_watchlist);
            }
        }
        Command::Watch { command } => run_watch(command, &config).await?,
        Command::Link { filters } => {
            let q = filters.to_query(Utc::now().date_naive());
            println!("{}", query::encode(&q));
        }
    }
    Ok(())
}

async fn run_watch(command: WatchCommand, config: &Config) -> anyhow::Result<()> {
    let client = ApiClient::new(config)?;
    match command {
        WatchCommand::List { json } => {
            let items = client.fetch_watchlist().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No tracked items. Add one with: rrad watch add <value>");
            } else {
                for item in items {
                    let id = item.id.map_or("-".to_string(), |i| i.to_string());
                    println!("{:>6}  {:<8}  {}", id.dimmed(), item.kind, item.value.bold());
                }
            }
        }
        WatchCommand::Add { value, kind } => {
            let item = client.add_watchlist(&kind, &value).await?;
            match item.id {
                Some(id) => println!("Tracking '{}' ({} #{id})", item.value.bold(), item.kind),
                None => println!("Tracking '{}' ({})", item.value.bold(), item.kind),
            }
        }
        WatchCommand::Rm { id } => {
            client.delete_watchlist(id).await?;
            println!("Removed watchlist item #{id}");
        }
    }
    Ok(())
}

fn render_listing(query: &RecallQuery, tracked: &[Recall], other: &[Recall], grouped: bool) {
    let filters = query.active_filter_count();
    if filters > 0 {
        println!("{}", format!("{filters} active filter(s)").dimmed());
    }

    if grouped {
        println!(
            "{} ({})",
            "Matches your tracking".bold().underline(),
            tracked.len()
        );
        if tracked.is_empty() {
            println!("  {}", "no tracked items affected right now".dimmed());
        }
        for recall in tracked {
            print_recall(recall);
        }
        println!();
        println!("{}", "Latest verified safety recalls".bold().underline());
    }
    for recall in other {
        print_recall(recall);
    }

    if tracked.is_empty() && other.is_empty() {
        match &query.free_text {
            Some(term) => println!("No matches found for \"{term}\"."),
            None if query.is_empty() => println!("No recent recalls in the system."),
            None => println!("No recalls match the active filters."),
        }
    }
}

fn print_recall(recall: &Recall) {
    let status = match recall.confidence_level {
        ConfidenceLevel::Confirmed => recall.confidence_level.as_wire().red().bold(),
        ConfidenceLevel::Probable => recall.confidence_level.as_wire().yellow().bold(),
        ConfidenceLevel::Watch => recall.confidence_level.as_wire().cyan(),
    };
    let brand = recall.brand.as_deref().unwrap_or("Unknown Brand");
    println!(
        "  #{:<5} [{status}] {} — {} ({})",
        recall.id,
        recall.title.bold(),
        brand,
        recall.region
    );
    if let Some(hazard) = &recall.hazard_summary {
        let mut summary: String = hazard.chars().take(100).collect();
        if hazard.chars().count() > 100 {
            summary.push('…');
        }
        println!("         {}", summary.dimmed());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flags_build_the_expected_query() {
        let args = FilterArgs {
            query: Some("syrup".to_string()),
            region: Some(Region::Us),
            status: vec![ConfidenceLevel::Confirmed],
            signal: vec!["Recall".to_string()],
            start: Some(date("2025-01-01")),
            end: Some(date("2025-02-01")),
            ..Default::default()
        };
        let q = args.to_query(date("2025-06-30"));
        assert_eq!(
            query::encode(&q),
            "q=syrup&region=US&start_date=2025-01-01&end_date=2025-02-01&status=CONFIRMED&signal_type=Recall"
        );
    }

    #[test]
    fn days_preset_overrides_link_dates() {
        let args = FilterArgs {
            from_link: Some("start_date=2020-01-01&end_date=2020-02-01".to_string()),
            days: Some(7),
            ..Default::default()
        };
        let q = args.to_query(date("2025-06-30"));
        assert_eq!(q.start_date, Some(date("2025-06-23")));
        assert_eq!(q.end_date, Some(date("2025-06-30")));
    }

    #[test]
    fn reset_keeps_primary_navigation_from_link() {
        let args = FilterArgs {
            from_link: Some("q=tesla&region=US&status=CONFIRMED&start_date=2025-01-01".to_string()),
            reset: true,
            ..Default::default()
        };
        let q = args.to_query(date("2025-06-30"));
        assert_eq!(query::encode(&q), "q=tesla&region=US");
    }

    #[test]
    fn repeated_flags_do_not_double_insert() {
        let args = FilterArgs {
            status: vec![ConfidenceLevel::Watch, ConfidenceLevel::Watch],
            signal: vec!["Recall".to_string(), "Recall".to_string()],
            ..Default::default()
        };
        let q = args.to_query(date("2025-06-30"));
        assert_eq!(q.active_filter_count(), 2);
    }
}
