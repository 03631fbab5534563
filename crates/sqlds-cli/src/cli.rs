//! sqlds command-line interface
//!
//! Inspects table columns of a SQLite database or a JSON fixture the way a
//! query editor's column picker would show them.

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use sqlds_core::{SqlDatasource, SqlQuery, TableTarget};
use sqlds_drivers::{FixtureDatasource, SqliteDatasource};
use sqlds_schema::{ClassifiedColumn, map_column_type_to_icon};
use sqlds_services::{ColumnService, ColumnsState, ServiceSettings};

#[derive(Debug, Parser)]
#[command(name = "sqlds", version, about = "Inspect SQL datasource columns")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "SQLDS_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write JSON logs to the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON fixture describing tables and their schema
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List a table's columns grouped by type, with icon hints
    Columns {
        /// Table name, optionally qualified as `dataset.table`
        table: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Only columns usable in ORDER BY
        #[arg(long)]
        orderable: bool,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List tables, optionally within a dataset
    Tables {
        /// Dataset to list
        dataset: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the icon for a declared column type
    Icon {
        /// Type token, e.g. TIMESTAMP
        data_type: String,
    },
}

fn open_datasource(source: &SourceArgs) -> Result<Box<dyn SqlDatasource>> {
    match (&source.db, &source.fixture) {
        (Some(db), _) => {
            let path = db.to_str().context("Database path is not valid UTF-8")?;
            Ok(Box::new(SqliteDatasource::open(path)?))
        }
        (None, Some(fixture)) => Ok(Box::new(FixtureDatasource::load(fixture)?)),
        (None, None) => bail!("either --db or --fixture is required"),
    }
}

/// Qualify a table with the datasource's first dataset when none is given
async fn resolve_target(datasource: &dyn SqlDatasource, table: &str) -> Result<TableTarget> {
    let target = TableTarget::parse(table);
    if target.dataset.is_some() {
        return Ok(target);
    }
    let datasets = datasource.datasets().await?;
    match datasets.into_iter().next() {
        Some(dataset) => {
            tracing::debug!(dataset = %dataset, table = %table, "using default dataset");
            Ok(target.with_dataset(dataset))
        }
        None => bail!("table must be qualified as dataset.table"),
    }
}

fn render_columns(columns: &[ClassifiedColumn], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(columns)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Column", "Icon"]);
            for column in columns {
                table.add_row(vec![
                    column.label.clone(),
                    column.icon.map_or_else(|| "-".to_string(), |i| i.to_string()),
                ]);
            }
            Ok(table.to_string())
        }
    }
}

async fn run(cli: Cli, settings: ServiceSettings) -> Result<()> {
    match cli.command {
        Command::Columns {
            table,
            source,
            orderable,
            format,
        } => {
            let datasource = open_datasource(&source)?;
            let target = resolve_target(datasource.as_ref(), &table).await?;
            let query = SqlQuery::new("cli")
                .with_dataset(target.dataset.clone().unwrap_or_default())
                .with_table(target.table.clone());

            let service = ColumnService::from_settings(&settings);
            let orderable = orderable || settings.orderable_default;
            match service
                .load_columns(datasource.as_ref(), &query, orderable)
                .await
            {
                ColumnsState::Loaded { columns } => {
                    println!("{}", render_columns(&columns, format)?);
                }
                ColumnsState::Failed { message } => bail!(message),
                ColumnsState::Idle => bail!("no table selected"),
            }
        }
        Command::Tables { dataset, source } => {
            let datasource = open_datasource(&source)?;
            let service = ColumnService::from_settings(&settings);
            for item in service
                .editor_tables(datasource.as_ref(), dataset.as_deref())
                .await?
            {
                println!("{}", item.completion.unwrap_or(item.name));
            }
        }
        Command::Icon { data_type } => {
            let icon = map_column_type_to_icon(&data_type);
            println!("{}", icon.map_or("-", |i| i.as_str()));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match ServiceSettings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut logging_config = if cli.verbose {
        logging::LoggingConfig::verbose()
    } else {
        logging::LoggingConfig::default()
    };
    if let Some(filter) = &settings.log_filter
        && !cli.verbose
    {
        logging_config = logging_config.with_filter(filter.clone());
    }
    if cli.log_file {
        logging_config = logging_config.with_json_logs();
    }
    let _log_guard = match logging::init(logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to initialize logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
