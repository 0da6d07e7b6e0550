use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use yeseria_app::{FormState, build_registry, pipeline, render, slots};
use yeseria_core::OperatorSlot;
use yeseria_core::report::ReportFilter;
use yeseria_core::store::factory::StoreConfig;
use yeseria_data::ReferenceLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Production capture for the plaster mold workshop.
///
/// Reads mold, defect-factor and operator sheets from a workbook
/// directory, validates submissions and keeps the FINAL production log
/// in the same workbook.
#[derive(Debug, Parser)]
#[command(name = "yeseria", version)]
struct Cli {
    /// Storage backend to use.
    #[arg(long, default_value = "csv")]
    backend: String,

    /// Workbook directory holding the reference sheets and the log.
    #[arg(long, default_value = "base_final")]
    workbook: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one production run and append it to the log.
    Submit {
        /// Production date (YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// Mold code from the Base_Produccion sheet.
        #[arg(long)]
        mold: String,

        /// Total molds produced by the run.
        #[arg(long)]
        quantity: String,

        /// Operator code; repeat for runs shared by several operators.
        /// Slots loaded this way carry no defect or rework data.
        #[arg(long = "operator")]
        operators: Vec<String>,

        /// CSV file with full operator slots (see `yeseria-app` docs).
        /// Rows come before any bare `--operator` codes.
        #[arg(long)]
        slots: Option<PathBuf>,
    },

    /// Print the full production log, newest first.
    List,

    /// Remove a saved batch by its exact timestamp.
    Delete {
        /// Batch timestamp as shown by `list` (YYYY-MM-DD HH:MM:SS).
        #[arg(long)]
        timestamp: String,

        /// Limit the removal to one operator of the batch.
        #[arg(long)]
        operator: Option<String>,
    },

    /// Real-worked production report over the log.
    Report {
        /// Inclusive start date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Inclusive end date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only this operator's records.
        #[arg(long)]
        operator: Option<String>,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("invalid timestamp '{s}', expected YYYY-MM-DD HH:MM:SS"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let store_config = StoreConfig {
        backend: cli.backend,
        workbook_path: cli.workbook.display().to_string(),
    };

    debug!("opening {} backend", store_config.backend);
    let registry = build_registry();
    let store = registry.create(&store_config).await?;

    match cli.command {
        Command::Submit {
            date,
            mold,
            quantity,
            operators,
            slots: slots_file,
        } => {
            let reference = ReferenceLoader::load_workbook(&cli.workbook)
                .with_context(|| format!("cannot load workbook: {}", cli.workbook.display()))?;

            let mut form_slots = match &slots_file {
                Some(path) => slots::load_slots_file(path)
                    .with_context(|| format!("cannot load slots: {}", path.display()))?,
                None => Vec::new(),
            };
            form_slots.extend(operators.into_iter().map(|code| OperatorSlot {
                code,
                ..Default::default()
            }));
            if form_slots.is_empty() {
                bail!("give at least one --operator or a --slots file");
            }

            let mut form = FormState::new();
            form.date = date;
            form.mold_code = mold;
            form.quantity_total = quantity;
            form.slots = form_slots;

            let submission = match form.to_submission() {
                Ok(submission) => submission,
                Err(()) => bail!("invalid form:\n  {}", form.errors.join("\n  ")),
            };

            let now = chrono::Local::now().naive_local();
            let records = pipeline::submit(&*store, &reference, &submission, now).await?;
            form.clear();

            println!("Guardado: {} registro(s)", records.len());
            print!("{}", render::batch_details(&records));
        }

        Command::List => {
            let records = pipeline::list(&*store).await?;
            if records.is_empty() {
                println!("El registro está vacío.");
            } else {
                print!("{}", render::log_table(&records));
            }
        }

        Command::Delete {
            timestamp,
            operator,
        } => {
            let recorded_at = parse_timestamp(&timestamp)?;
            let removed = pipeline::delete(&*store, recorded_at, operator.as_deref()).await?;
            if removed == 0 {
                println!("Ningún registro coincide con {timestamp}.");
            } else {
                println!("Eliminado(s): {removed} registro(s)");
            }
        }

        Command::Report { from, to, operator } => {
            let filter = ReportFilter {
                from,
                to,
                operator_code: operator,
            };
            let (rows, summary) = pipeline::report(&*store, &filter).await?;

            if rows.is_empty() {
                println!("Sin registros para el filtro indicado.");
            } else {
                print!("{}", render::report_table(&rows));
                if let Some(summary) = summary {
                    println!();
                    print!("{}", render::summary_block(&summary));
                }
            }
        }
    }

    Ok(())
}
