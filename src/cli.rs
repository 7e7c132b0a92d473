// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::core::{ConfigManager, Database, PortfolioStore};
use crate::mailer::SenderCredentials;
use crate::scraping::{JobBoard, JobSiteClient};
use crate::session::SessionState;
use crate::utils::validate_file_extension;

#[derive(Parser)]
#[command(name = "coldreach")]
#[command(about = "Generate cold emails and LinkedIn messages for job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve,
    /// List job posting URLs from the configured job board
    Jobs,
    /// Replace the portfolio with skills and projects from a resume (.pdf or .txt)
    Upload { file: PathBuf },
    /// Show the stored skills and projects
    Portfolio,
    /// Generate outreach for a job posting URL
    Generate {
        url: String,
        /// Send the generated email to this address
        #[arg(long, requires = "sender")]
        send_to: Option<String>,
        /// Sender address (password is read from SENDER_PASSWORD)
        #[arg(long)]
        sender: Option<String>,
    },
}

pub async fn handle_command(command: Command, config: ConfigManager) -> Result<()> {
    match command {
        Command::Serve => crate::start_web_server(config).await,

        Command::Jobs => {
            let board = JobSiteClient::new(config.job_board.clone())?;
            let urls = board.list_available_jobs().await?;
            info!("Found {} job postings", urls.len());
            for url in urls {
                println!("{}", url);
            }
            Ok(())
        }

        Command::Upload { file } => {
            let database = Database::new(&config.database_path).await?;
            let orchestrator = crate::build_orchestrator(&config, &database)?;

            let filename = file.display().to_string();
            let extension = validate_file_extension(&filename, &["pdf", "txt"])?;

            let report = if extension == "pdf" {
                let bytes = tokio::fs::read(&file)
                    .await
                    .with_context(|| format!("Failed to read {}", filename))?;
                orchestrator.upload_resume(&bytes).await?
            } else {
                let text = tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("Failed to read {}", filename))?;
                orchestrator.ingest_resume_text(&text).await?
            };

            info!(
                "✅ Stored {} skills and {} projects",
                report.skills_accepted, report.projects_accepted
            );
            if report.rejected() > 0 {
                warn!("{} malformed entries were skipped", report.rejected());
            }
            Ok(())
        }

        Command::Portfolio => {
            let database = Database::new(&config.database_path).await?;
            let snapshot = PortfolioStore::new(database.pool().clone()).read().await?;

            if snapshot.is_empty() {
                info!("No resume uploaded yet");
                return Ok(());
            }

            println!("Skills:");
            for skill in &snapshot.skills {
                println!("  - {}", skill);
            }
            println!("Projects:");
            for project in &snapshot.projects {
                println!("  - {}", project.replace('\n', "\n    "));
            }
            Ok(())
        }

        Command::Generate {
            url,
            send_to,
            sender,
        } => {
            let database = Database::new(&config.database_path).await?;
            let orchestrator = crate::build_orchestrator(&config, &database)?;

            let mut session = SessionState::default();
            let generated = orchestrator.generate(&mut session, &url).await?;

            for outreach in &generated {
                println!("=== {} ===", outreach.job.role);
                println!("Subject: {}\n", outreach.draft.email_subject);
                println!("{}\n", outreach.draft.email_body);
                println!("--- LinkedIn message ---");
                println!("{}\n", outreach.draft.linkedin_body);
            }

            if let (Some(recipient), Some(sender)) = (send_to, sender) {
                let credentials = SenderCredentials {
                    email: sender,
                    password: std::env::var("SENDER_PASSWORD").unwrap_or_default(),
                };

                if orchestrator.send(&session, &credentials, &recipient).await? {
                    info!("✅ Email sent to {}", recipient);
                } else {
                    error!("❌ Failed to send email. Please check your credentials and try again.");
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_with_send() {
        let cli = Cli::parse_from([
            "coldreach",
            "generate",
            "https://arc.dev/remote-jobs/details/1",
            "--send-to",
            "hr@example.org",
            "--sender",
            "me@example.com",
        ]);

        match cli.command {
            Some(Command::Generate {
                url,
                send_to,
                sender,
            }) => {
                assert_eq!(url, "https://arc.dev/remote-jobs/details/1");
                assert_eq!(send_to.as_deref(), Some("hr@example.org"));
                assert_eq!(sender.as_deref(), Some("me@example.com"));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_send_to_requires_sender() {
        let result = Cli::try_parse_from([
            "coldreach",
            "generate",
            "https://example.com",
            "--send-to",
            "hr@example.org",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["coldreach"]);
        assert!(cli.command.is_none());
    }
}
