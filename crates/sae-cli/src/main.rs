use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use sae_cli::answers::FormAnswers;
use sae_cli::config::{self, LogFormat, SaeConfig};
use sae_cli::fill::{run_fill, FillReport};
use sae_cli::outbox::OutboxRepository;
use sae_core::models::PatientSnapshot;
use sae_core::validation::{validate_complete, validate_step};
use sae_core::wizard::Step;
use sae_session::{InMemoryPatientStore, Operator, SessionError};

#[derive(Parser)]
#[command(name = "sae")]
#[command(about = "Nursing assessment (SAE) workflow")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill and submit an SAE for a patient
    Fill {
        /// Patient snapshot (JSON)
        #[arg(long)]
        patient: PathBuf,
        /// Form answers (JSON)
        #[arg(long)]
        answers: PathBuf,
        /// Encounter to attach the record to (defaults to the patient's)
        #[arg(long)]
        triage: Option<String>,
    },
    /// Check form answers step by step
    Validate {
        /// Form answers (JSON)
        #[arg(long)]
        answers: PathBuf,
    },
    /// Show or create the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Init {
        #[arg(long)]
        coren: String,
        #[arg(long)]
        nurse_name: String,
        #[arg(long)]
        outbox: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = LogFormat::Text)]
        log_format: LogFormat,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}

fn load_or_default(path: &std::path::Path) -> Result<SaeConfig> {
    if path.exists() {
        config::load_config(path)
    } else {
        Ok(SaeConfig::new(Operator::default(), config::default_outbox_dir()?))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let cfg = load_or_default(&config_path)?;
    init_tracing(cfg.log_format);

    match cli.command {
        Commands::Fill {
            patient,
            answers,
            triage,
        } => {
            let contents = std::fs::read_to_string(&patient)
                .map_err(|e| eyre::eyre!("failed to read patient at {}: {e}", patient.display()))?;
            let patient = PatientSnapshot::from_json(&contents)?;
            let patient_id = patient.id.clone();
            let answers = FormAnswers::load(&answers)?;

            let mut store = InMemoryPatientStore::new();
            store.insert(patient);
            let repository = OutboxRepository::new(cfg.outbox_dir.clone());

            match run_fill(repository, store, &patient_id, triage, &cfg.operator, &answers).await {
                Ok(FillReport::Saved { id, updated }) => {
                    let verb = if updated { "updated" } else { "created" };
                    println!("SAE {verb}: {id}");
                }
                Ok(FillReport::Blocked { step, message }) => {
                    println!("Etapa {} ({}): {message}", step.number(), step.title());
                    std::process::exit(2);
                }
                Err(SessionError::Validation(errors)) => {
                    for error in errors {
                        println!("- {error}");
                    }
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Validate { answers } => {
            let record = FormAnswers::load(&answers)?.to_record();
            for step in Step::ALL {
                let check = validate_step(step.number(), &record);
                let status = if check.ok { "ok" } else { "pendente" };
                match check.message {
                    Some(message) => {
                        println!("{} {:<28} {status}: {message}", step.number(), step.title())
                    }
                    None => println!("{} {:<28} {status}", step.number(), step.title()),
                }
            }
            let complete = validate_complete(&record);
            println!("{}", serde_json::to_string_pretty(&complete)?);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            ConfigAction::Init {
                coren,
                nurse_name,
                outbox,
                log_format,
            } => {
                let outbox = match outbox {
                    Some(dir) => dir,
                    None => config::default_outbox_dir()?,
                };
                let mut new_cfg = SaeConfig::new(Operator { coren, nurse_name }, outbox);
                new_cfg.log_format = log_format;
                config::save_config(&new_cfg, &config_path)?;
                println!("config written to {}", config_path.display());
            }
        },
    }

    Ok(())
}
