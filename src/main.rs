use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use superstore_dash::data::{cache, SourceEncoding};
use superstore_dash::report::HYPOTHESES;
use superstore_dash::{Dashboard, Dataset, FilterSelection, LoaderConfig};

/// Compute the Superstore dashboard aggregates and print them as JSON.
#[derive(Parser)]
#[command(name = "superstore-dash", version)]
struct Cli {
    /// Path to the order export.
    #[arg(env = "SUPERSTORE_CSV", default_value = superstore_dash::data::loader::DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// First order date to include (YYYY-MM-DD). Defaults to the earliest order.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last order date to include (YYYY-MM-DD). Defaults to the latest order.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Segment to include; repeat for several. Defaults to all.
    #[arg(long = "segment")]
    segments: Vec<String>,

    /// Category to include; repeat for several. Defaults to all.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Sub-category to include; repeat for several. Defaults to all.
    #[arg(long = "sub-category")]
    sub_categories: Vec<String>,

    /// Read the whole selection from a JSON file instead of the flags above.
    #[arg(long, conflicts_with_all = ["start", "end", "segments", "categories", "sub_categories"])]
    selection: Option<PathBuf>,

    /// Field delimiter of the export.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Decode the export as strict UTF-8 instead of Latin-1.
    #[arg(long)]
    utf8: bool,

    /// Print the hypotheses under test with their conclusions and exit.
    #[arg(long)]
    hypotheses: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn loader_config(&self) -> Result<LoaderConfig> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter '{}' is not a single ASCII byte", self.delimiter))?;
        Ok(LoaderConfig {
            path: self.data.clone(),
            delimiter,
            encoding: if self.utf8 {
                SourceEncoding::Utf8
            } else {
                SourceEncoding::Latin1
            },
        })
    }

    fn filter_selection(&self, dataset: &Dataset) -> Result<FilterSelection> {
        if let Some(path) = &self.selection {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading selection {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parsing selection {}", path.display()));
        }

        let mut selection = FilterSelection::everything(dataset);
        if let Some(start) = self.start {
            selection.start = start;
        }
        if let Some(end) = self.end {
            selection.end = end;
        }
        override_values(&mut selection.segments, &self.segments);
        override_values(&mut selection.categories, &self.categories);
        override_values(&mut selection.sub_categories, &self.sub_categories);
        Ok(selection)
    }
}

fn override_values(target: &mut BTreeSet<String>, values: &[String]) {
    if !values.is_empty() {
        *target = values.iter().cloned().collect();
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.hypotheses {
        for h in HYPOTHESES {
            println!("H{}. {}\n    {}", h.id, h.statement, h.conclusion);
        }
        return Ok(());
    }

    let config = cli.loader_config()?;
    let dataset = cache::load(&config)
        .inspect_err(|e| log::error!("Failed to load dataset: {e}"))
        .with_context(|| format!("loading {}", config.path.display()))?;

    let selection = cli.filter_selection(dataset)?;
    let dashboard = Dashboard::with_selection(dataset, selection);
    let report = dashboard.report();

    let json = if cli.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{json}");
    Ok(())
}
