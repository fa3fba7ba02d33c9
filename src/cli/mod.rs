use crate::engine::{ensure_all, ensure_priority_only, plan_all};
use crate::registry::Registry;
use crate::unit::UnitState;
use crate::workspace::Workspace;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reconcile a project's configuration files against their declared state
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root to reconcile
    #[arg(short, long, env = "RIGGING_ROOT", default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update every managed configuration file
    Ensure {
        /// Only run units with priority above zero (bootstrap pass)
        #[arg(long)]
        priority_only: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what ensure would change, without writing
    Plan {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered providers in discovery order
    Providers,
}

/// Entry point shared by the stock binary and downstream tools.
///
/// Downstream crates build their own [`Registry`], register providers for the
/// files they manage, and hand it here; argument parsing, logging setup and
/// exit-status mapping are identical for every host. Any error bubbles up as
/// a single readable message and a non-zero exit.
pub async fn run(registry: Registry) -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let args = Args::parse();
    let workspace = Workspace::new(&args.root);

    match args.command {
        Command::Ensure { priority_only, json } => {
            let report = if priority_only {
                ensure_priority_only(&workspace, &registry).await?
            } else {
                ensure_all(&workspace, &registry).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            for path in &report.created {
                println!("created   {path}");
            }
            for path in &report.merged {
                println!("merged    {path}");
            }
            for path in &report.skipped {
                println!("skipped   {path}");
            }
            info!(
                created = report.created.len(),
                merged = report.merged.len(),
                unchanged = report.unchanged.len(),
                skipped = report.skipped.len(),
                "Reconciliation finished"
            );
        }
        Command::Plan { json } => {
            let plan = plan_all(&workspace, &registry).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            for entry in &plan.entries {
                let state = match entry.state {
                    UnitState::Missing => "missing",
                    UnitState::Stale => "stale",
                    UnitState::UpToDate => "ok",
                    UnitState::Unwanted => "unwanted",
                };
                println!("{state:<9} {}", entry.path);
            }
            if plan.is_clean() {
                println!("nothing to do");
            }
        }
        Command::Providers => {
            for name in registry.provider_order()? {
                println!("{name}");
            }
        }
    }

    Ok(())
}
