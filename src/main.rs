//! Sales workflow agent CLI: extract -> score -> actions/email -> track/export.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_workflow_agent::config::Config;
use sales_workflow_agent::crm_export;
use sales_workflow_agent::db_storage::RunStorage;
use sales_workflow_agent::models::{LeadRecord, ScoreResult};
use sales_workflow_agent::workflow::{run_lead_workflow, RunOptions};

#[derive(Parser)]
#[command(name = "sales-workflow-agent", version, about = "Sales workflow agent (CLI)")]
struct Cli {
    /// Path to config.json.
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Path to the lead schema JSON (used in the external extraction prompt).
    #[arg(long, global = true, default_value = "schemas/lead_schema.json")]
    schema: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run extraction + scoring + action/email generation.
    Run {
        /// Path to input text file.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Read input from stdin instead.
        #[arg(long)]
        stdin: bool,

        /// Output directory.
        #[arg(long)]
        out: PathBuf,

        /// SQLite DB path for tracking (optional).
        #[arg(long)]
        db: Option<String>,

        /// Name shown in the follow-up email signature.
        #[arg(long)]
        owner: Option<String>,

        /// ZH or BILINGUAL.
        #[arg(long)]
        lang: Option<String>,

        /// Lead source (e.g., inbound, event, referral).
        #[arg(long)]
        source: Option<String>,

        /// Optional lead id (otherwise auto-generated).
        #[arg(long)]
        lead_id: Option<String>,

        /// Disable PII redaction (NOT recommended).
        #[arg(long)]
        no_redact: bool,
    },

    /// Export a CRM payload from an output directory.
    ExportCrm {
        /// Output directory containing fields.json and scores.json.
        #[arg(long)]
        out: PathBuf,

        /// Export format.
        #[arg(long, default_value = "salesforce")]
        format: String,

        /// Output file path (default: <out>/crm_payload.json).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show recent runs from the tracking DB.
    History {
        /// SQLite DB path.
        #[arg(long)]
        db: String,

        /// Number of rows to show.
        #[arg(long, default_value = "10")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_workflow_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            stdin,
            out,
            db,
            owner,
            lang,
            source,
            lead_id,
            no_redact,
        } => {
            // Input-mode validation happens before any processing.
            let input_mode = match (stdin, input) {
                (true, Some(_)) => anyhow::bail!("Use only one: --input or --stdin."),
                (false, None) => anyhow::bail!("Either --input or --stdin is required."),
                (true, None) => None,
                (false, Some(path)) => Some(path),
            };

            let config = Config::load(&cli.config)?;
            let schema_json = std::fs::read_to_string(&cli.schema).map_err(|e| {
                anyhow::anyhow!("Failed to read schema {}: {}", cli.schema.display(), e)
            })?;

            let (raw_text, input_label) = match input_mode {
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    (buf.trim().to_string(), "stdin".to_string())
                }
                Some(path) => {
                    let text = std::fs::read_to_string(&path).map_err(|e| {
                        anyhow::anyhow!("Failed to read input {}: {}", path.display(), e)
                    })?;
                    (text.trim().to_string(), path.display().to_string())
                }
            };

            let opts = RunOptions {
                out_dir: out,
                db_path: db,
                owner,
                lang,
                source,
                lead_id,
                no_redact,
                input_label,
            };
            run_lead_workflow(&config, &schema_json, &raw_text, &opts).await?;
        }

        Commands::ExportCrm { out, format, output } => {
            let config = Config::load(&cli.config)?;

            if format.to_lowercase() != "salesforce" {
                anyhow::bail!("Unsupported format: {} (only 'salesforce' is supported)", format);
            }

            let fields_path = out.join("fields.json");
            let record: LeadRecord =
                serde_json::from_str(&std::fs::read_to_string(&fields_path).map_err(|e| {
                    anyhow::anyhow!("Failed to read {}: {}", fields_path.display(), e)
                })?)?;
            let scores_path = out.join("scores.json");
            let scores: ScoreResult =
                serde_json::from_str(&std::fs::read_to_string(&scores_path).map_err(|e| {
                    anyhow::anyhow!("Failed to read {}: {}", scores_path.display(), e)
                })?)?;

            let payload = crm_export::salesforce_payload(&record, &scores, &config);
            let out_path = output.unwrap_or_else(|| out.join("crm_payload.json"));
            std::fs::write(&out_path, serde_json::to_string_pretty(&payload)?)?;
            tracing::info!("CRM payload written to {}", out_path.display());
        }

        Commands::History { db, limit } => {
            let storage = RunStorage::connect(&db).await?;
            let rows = storage.fetch_history(limit).await?;
            if rows.is_empty() {
                println!("(no history)");
                return Ok(());
            }
            let headers = [
                "run_ts", "lead_id", "account", "industry", "fit", "intent", "stage", "out_dir",
            ];
            println!("{}", headers.join("\t"));
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    row.run_ts,
                    row.lead_id,
                    row.account_name,
                    row.industry,
                    row.fit_score,
                    row.intent_score,
                    row.stage,
                    row.out_dir
                );
            }
        }
    }

    Ok(())
}
