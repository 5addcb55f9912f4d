// src/cli.rs
use crate::core::{ConfigManager, Overrides, ServiceClient};
use crate::form::AnalysisForm;
use crate::model_choice::MODEL_PRESETS;
use crate::render::{render_history, render_text};
use crate::sample::{sample_result, SAMPLE_JD, SAMPLE_RESUME};
use crate::types::DocumentUpload;
use crate::utils::{basename, is_document_file};
use crate::web::start_web_server;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "insightify")]
#[command(about = "Resume / job description match, suggestions and interview prep")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with `local` and `production` profiles (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the web UI
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a resume and a job description for analysis
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        jd: PathBuf,
        /// One of the preset generation models
        #[arg(long, conflicts_with = "custom_model", value_parser = PossibleValuesParser::new(MODEL_PRESETS.iter().copied()))]
        model: Option<String>,
        /// Any other model id
        #[arg(long)]
        custom_model: Option<String>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the illustrative result preview
    Sample,
    /// List the preset generation models
    Models,
    /// List recent analyses stored by the service
    History {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Download a checklist produced by an analysis
    Download {
        /// `checklist_file` value from an analysis result
        checklist_file: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let port = match &self.command {
            Command::Serve { port } => *port,
            _ => None,
        };
        Overrides {
            service_url: self.service_url.clone(),
            timeout_seconds: self.timeout,
            port,
        }
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load(cli.config.as_deref(), &cli.overrides())?;

    match cli.command {
        Command::Serve { .. } => start_web_server(&config).await,

        Command::Analyze {
            resume,
            jd,
            model,
            custom_model,
            json,
        } => {
            let client = service_client(&config)?;
            let mut form = AnalysisForm::new();
            form.select_resume(load_document(&resume).await?);
            form.select_jd(load_document(&jd).await?);

            if let Some(model) = model {
                form.select_preset(&model);
            } else if let Some(custom) = custom_model {
                form.select_custom();
                form.set_custom_text(&custom);
            }

            let result = form
                .submit(&client)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(result).context("Failed to encode result")?
                );
            } else {
                print!("{}", render_text(result, client.base_url()));
            }
            Ok(())
        }

        Command::Sample => {
            println!("Result Preview (illustrative)\n");
            print!("{}", render_text(&sample_result(), &config.service.service_url));
            println!("\nResume:\n{}\n\nJob Description:\n{}", SAMPLE_RESUME, SAMPLE_JD);
            Ok(())
        }

        Command::Models => {
            for preset in MODEL_PRESETS {
                println!("{}", preset);
            }
            Ok(())
        }

        Command::History { limit } => {
            let client = service_client(&config)?;
            let records = client
                .history(limit)
                .await
                .context("Failed to fetch analysis history")?;
            print!("{}", render_history(&records));
            Ok(())
        }

        Command::Download {
            checklist_file,
            output,
        } => {
            let client = service_client(&config)?;
            let bytes = client
                .download(&checklist_file)
                .await
                .with_context(|| format!("Failed to download {}", checklist_file))?;

            let output = output.unwrap_or_else(|| PathBuf::from(basename(&checklist_file)));
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write file: {}", output.display()))?;

            info!("Saved checklist ({} bytes) to {}", bytes.len(), output.display());
            println!("{}", output.display());
            Ok(())
        }
    }
}

fn service_client(config: &ConfigManager) -> Result<ServiceClient> {
    ServiceClient::new(
        &config.service.service_url,
        config.service.timeout_seconds,
    )
    .context("Failed to create HTTP client")
}

async fn load_document(path: &Path) -> Result<DocumentUpload> {
    if !is_document_file(&path.to_string_lossy()) {
        warn!("{} is not a .pdf or .txt file; sending it anyway", path.display());
    }
    DocumentUpload::from_path(path).await
}
