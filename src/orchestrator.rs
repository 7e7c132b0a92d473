// src/orchestrator.rs
//! Wires scraping, the model pipeline, the portfolio store and the mailer into the
//! three user actions: resume upload, generate, send.

use std::sync::Arc;
use tracing::{error, info};

use crate::core::PortfolioStore;
use crate::error::{OutreachError, OutreachResult};
use crate::llm::ChatModel;
use crate::mailer::{Mailer, OutgoingEmail, SenderCredentials};
use crate::pipeline::PromptPipeline;
use crate::resume::ResumeExtractor;
use crate::scraping::JobBoard;
use crate::session::SessionState;
use crate::types::{GeneratedOutreach, OutreachDraft, PortfolioSnapshot, ReplaceReport};
use crate::utils::clean_text;

pub const MISSING_CREDENTIALS: &str = "Please fill in your email credentials.";
pub const MISSING_DRAFT: &str = "Please generate an email first before sending.";

#[derive(Clone)]
pub struct Orchestrator {
    board: Arc<dyn JobBoard>,
    pipeline: PromptPipeline,
    store: PortfolioStore,
    mailer: Arc<dyn Mailer>,
}

impl Orchestrator {
    pub fn new(
        board: Arc<dyn JobBoard>,
        model: Arc<dyn ChatModel>,
        store: PortfolioStore,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            board,
            pipeline: PromptPipeline::new(model),
            store,
            mailer,
        }
    }

    /// Replace the portfolio with what the model finds in a resume PDF
    pub async fn upload_resume(&self, pdf_bytes: &[u8]) -> OutreachResult<ReplaceReport> {
        let text = ResumeExtractor::extract_pdf_text(pdf_bytes)?;
        self.ingest_resume_text(&text).await
    }

    pub async fn ingest_resume_text(&self, resume_text: &str) -> OutreachResult<ReplaceReport> {
        let extraction = self
            .pipeline
            .extract_skills_and_projects(resume_text)
            .await?;
        self.store
            .replace_all(&extraction.skills, &extraction.projects)
            .await
    }

    pub async fn list_available_jobs(&self) -> OutreachResult<Vec<String>> {
        self.board.list_available_jobs().await
    }

    pub async fn portfolio(&self) -> OutreachResult<PortfolioSnapshot> {
        self.store.read().await
    }

    /// Draft an email and a LinkedIn message for every job found at `url`.
    ///
    /// Any failure aborts the whole action and leaves `session` untouched; on success
    /// the session keeps the draft of the last job.
    pub async fn generate(
        &self,
        session: &mut SessionState,
        url: &str,
    ) -> OutreachResult<Vec<GeneratedOutreach>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(OutreachError::Validation(
                "Please select or enter a job URL.".to_string(),
            ));
        }

        let raw_text = self.board.fetch_job_page(url).await?;
        let cleaned = clean_text(&raw_text);
        let jobs = self.pipeline.extract_jobs(&cleaned).await?;

        let mut generated = Vec::with_capacity(jobs.len());
        for mut job in jobs {
            job.fill_missing_role(&raw_text);

            let portfolio = self.store.read().await?;
            let email_body = self.pipeline.write_cold_email(&job, &portfolio).await?;
            let linkedin_body = self
                .pipeline
                .write_linkedin_message(&job, &portfolio)
                .await?;

            info!("Generated outreach for role: {}", job.role);

            generated.push(GeneratedOutreach {
                draft: OutreachDraft {
                    email_subject: job.email_subject(),
                    email_body,
                    linkedin_body,
                },
                job,
            });
        }

        if let Some(last) = generated.last() {
            session.draft = Some(last.draft.clone());
        }

        Ok(generated)
    }

    /// Send the session's draft. `Ok(false)` means the relay refused or was unreachable;
    /// the draft stays in the session either way.
    pub async fn send(
        &self,
        session: &SessionState,
        sender: &SenderCredentials,
        recipient: &str,
    ) -> OutreachResult<bool> {
        if !sender.is_complete() || recipient.trim().is_empty() {
            return Err(OutreachError::Validation(MISSING_CREDENTIALS.to_string()));
        }

        let draft = session
            .draft
            .as_ref()
            .ok_or_else(|| OutreachError::Validation(MISSING_DRAFT.to_string()))?;

        let email = OutgoingEmail {
            recipient: recipient.trim().to_string(),
            subject: draft.email_subject.clone(),
            body: draft.email_body.clone(),
        };

        match self.mailer.send(sender, &email).await {
            Ok(()) => Ok(true),
            Err(e) => {
                error!("Failed to send email: {}", e);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;
    use crate::pipeline::tests::ScriptedModel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubBoard {
        urls: Vec<String>,
        page: Option<String>,
    }

    #[async_trait]
    impl JobBoard for StubBoard {
        async fn list_available_jobs(&self) -> OutreachResult<Vec<String>> {
            Ok(self.urls.clone())
        }

        async fn fetch_job_page(&self, url: &str) -> OutreachResult<String> {
            self.page
                .clone()
                .ok_or_else(|| OutreachError::Network(format!("Failed to fetch {}", url)))
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        fail: bool,
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, _sender: &SenderCredentials, email: &OutgoingEmail) -> OutreachResult<()> {
            if self.fail {
                return Err(OutreachError::Delivery(
                    "535 Username and Password not accepted".to_string(),
                ));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    const PAGE: &str = "Job Title: Platform Engineer\n\nJob Description: Keep   the lights on";

    fn scripted(jobs_reply: &str) -> Arc<ScriptedModel> {
        Arc::new(ScriptedModel::new(vec![
            ("### PDF TEXT", r#"{"skills": ["Python", "SQL", 1], "projects": [{"name": "X", "description": "Y"}]}"#),
            ("### SCRAPED TEXT", jobs_reply),
            ("### EMAIL", "Subject: Hello\n\nI would love to join."),
            ("### MESSAGE", "Hi, let's talk!"),
        ]))
    }

    async fn orchestrator(
        model: Arc<ScriptedModel>,
        page: Option<&str>,
        mailer: Arc<RecordingMailer>,
    ) -> Orchestrator {
        let db = Database::in_memory().await.unwrap();
        let board = Arc::new(StubBoard {
            urls: vec!["https://arc.dev/remote-jobs/details/1".to_string()],
            page: page.map(str::to_string),
        });
        Orchestrator::new(board, model, PortfolioStore::new(db.pool().clone()), mailer)
    }

    fn sender() -> SenderCredentials {
        SenderCredentials {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resume_ingestion_replaces_portfolio() {
        let orchestrator =
            orchestrator(scripted("{}"), Some(PAGE), Arc::new(RecordingMailer::default())).await;

        let report = orchestrator.ingest_resume_text("resume text").await.unwrap();
        assert_eq!(report.skills_accepted, 2);
        assert_eq!(report.skills_rejected, 1);

        let snapshot = orchestrator.portfolio().await.unwrap();
        assert_eq!(snapshot.skills, vec!["Python", "SQL"]);
        assert_eq!(snapshot.projects, vec!["Project Name: X\nDescription: Y"]);
    }

    #[tokio::test]
    async fn test_generate_fills_role_and_keeps_last_draft() {
        let model = scripted(r#"[{"role": "", "skills": ["Kubernetes"]}, {"role": "SRE"}]"#);
        let orchestrator =
            orchestrator(model.clone(), Some(PAGE), Arc::new(RecordingMailer::default())).await;
        orchestrator.ingest_resume_text("resume").await.unwrap();

        let mut session = SessionState::default();
        let generated = orchestrator
            .generate(&mut session, " https://arc.dev/remote-jobs/details/1 ")
            .await
            .unwrap();

        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0].job.role, "Platform Engineer");
        assert_eq!(
            generated[0].draft.email_subject,
            "Application for Platform Engineer"
        );
        assert_eq!(generated[0].draft.email_body, "Subject: Hello\n\nI would love to join.");
        assert_eq!(generated[0].draft.linkedin_body, "Hi, let's talk!");
        assert_eq!(
            session.draft.as_ref().unwrap().email_subject,
            "Application for SRE"
        );

        // The model saw cleaned text and the stored portfolio
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts
            .iter()
            .any(|p| p.contains("Job Description: Keep the lights on")));
        assert!(prompts
            .iter()
            .any(|p| p.contains("### EMAIL") && p.contains("Python")));
    }

    #[tokio::test]
    async fn test_generate_parse_failure_leaves_session_untouched() {
        let orchestrator = orchestrator(
            scripted("I could not find any job."),
            Some(PAGE),
            Arc::new(RecordingMailer::default()),
        )
        .await;

        let mut session = SessionState::default();
        let err = orchestrator
            .generate(&mut session, "https://example.com/job")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Context too big. Unable to parse jobs.");
        assert!(session.draft.is_none());
    }

    #[tokio::test]
    async fn test_generate_propagates_network_errors() {
        let orchestrator =
            orchestrator(scripted("{}"), None, Arc::new(RecordingMailer::default())).await;

        let mut session = SessionState::default();
        let err = orchestrator
            .generate(&mut session, "https://example.com/job")
            .await
            .unwrap_err();
        assert!(matches!(err, OutreachError::Network(_)));
    }

    #[tokio::test]
    async fn test_send_requires_draft_and_credentials() {
        let orchestrator =
            orchestrator(scripted("{}"), Some(PAGE), Arc::new(RecordingMailer::default())).await;
        let session = SessionState::default();

        let err = orchestrator
            .send(&session, &sender(), "hr@example.org")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_DRAFT);

        let incomplete = SenderCredentials {
            email: "me@example.com".to_string(),
            password: String::new(),
        };
        let err = orchestrator
            .send(&session, &incomplete, "hr@example.org")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_CREDENTIALS);

        let err = orchestrator.send(&session, &sender(), "  ").await.unwrap_err();
        assert_eq!(err.to_string(), MISSING_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_send_delivers_generated_draft() {
        let mailer = Arc::new(RecordingMailer::default());
        let orchestrator =
            orchestrator(scripted(r#"{"role": "SRE"}"#), Some(PAGE), mailer.clone()).await;

        let mut session = SessionState::default();
        orchestrator
            .generate(&mut session, "https://example.com/job")
            .await
            .unwrap();

        let delivered = orchestrator
            .send(&session, &sender(), "hr@example.org")
            .await
            .unwrap();
        assert!(delivered);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Application for SRE");
        assert_eq!(sent[0].recipient, "hr@example.org");
    }

    #[tokio::test]
    async fn test_login_failure_reports_false_and_keeps_draft() {
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let orchestrator =
            orchestrator(scripted(r#"{"role": "SRE"}"#), Some(PAGE), mailer).await;

        let mut session = SessionState::default();
        orchestrator
            .generate(&mut session, "https://example.com/job")
            .await
            .unwrap();
        let before = session.draft.clone();

        let delivered = orchestrator
            .send(&session, &sender(), "hr@example.org")
            .await
            .unwrap();
        assert!(!delivered);
        assert_eq!(session.draft, before);
        assert!(session.draft.is_some());
    }

    #[tokio::test]
    async fn test_list_available_jobs_delegates_to_board() {
        let orchestrator =
            orchestrator(scripted("{}"), Some(PAGE), Arc::new(RecordingMailer::default())).await;
        assert_eq!(
            orchestrator.list_available_jobs().await.unwrap(),
            vec!["https://arc.dev/remote-jobs/details/1"]
        );
    }
}
