// src/pipeline.rs
//! The four prompt-templated model calls. Structured outputs go through JSON parsing;
//! free-text outputs are returned as the model wrote them.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{OutreachError, OutreachResult, ParseTarget};
use crate::llm::{prompts, ChatModel};
use crate::types::{JobPosting, PortfolioSnapshot};

/// Raw skills/projects as the model returned them; the store filters them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeExtraction {
    pub skills: Vec<Value>,
    pub projects: Vec<Value>,
}

#[derive(Clone)]
pub struct PromptPipeline {
    model: Arc<dyn ChatModel>,
}

impl PromptPipeline {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn extract_jobs(&self, cleaned_text: &str) -> OutreachResult<Vec<JobPosting>> {
        let response = self
            .model
            .complete(&prompts::extract_jobs_prompt(cleaned_text))
            .await?;

        let jobs = parse_jobs(&response).inspect_err(log_parse_failure)?;
        info!("Extracted {} job postings", jobs.len());
        Ok(jobs)
    }

    pub async fn extract_skills_and_projects(
        &self,
        resume_text: &str,
    ) -> OutreachResult<ResumeExtraction> {
        let response = self
            .model
            .complete(&prompts::extract_skills_prompt(resume_text))
            .await?;

        let extraction = parse_resume_extraction(&response).inspect_err(log_parse_failure)?;
        info!(
            "Extracted {} skills and {} projects from resume",
            extraction.skills.len(),
            extraction.projects.len()
        );
        Ok(extraction)
    }

    pub async fn write_cold_email(
        &self,
        job: &JobPosting,
        portfolio: &PortfolioSnapshot,
    ) -> OutreachResult<String> {
        let prompt = prompts::cold_email_prompt(&to_json(job), &to_json(portfolio));
        self.model.complete(&prompt).await
    }

    pub async fn write_linkedin_message(
        &self,
        job: &JobPosting,
        portfolio: &PortfolioSnapshot,
    ) -> OutreachResult<String> {
        let prompt = prompts::linkedin_message_prompt(&to_json(job), &to_json(portfolio));
        self.model.complete(&prompt).await
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn log_parse_failure(err: &OutreachError) {
    if let OutreachError::Parse { target, detail } = err {
        warn!("Model output rejected ({:?}): {}", target, detail);
    }
}

/// Parse a whole model answer as JSON. A single surrounding ``` fence is tolerated,
/// anything else around the JSON is not.
pub fn parse_json_response(response: &str) -> Result<Value, String> {
    let trimmed = response.trim();
    let body = match trimmed.strip_prefix("```") {
        Some(fenced) => {
            let fenced = fenced.strip_suffix("```").ok_or("unterminated code fence")?;
            // Drop the info string (`json`) on the opening fence line
            match fenced.split_once('\n') {
                Some((_, rest)) => rest,
                None => fenced,
            }
        }
        None => trimmed,
    };

    serde_json::from_str(body.trim()).map_err(|e| e.to_string())
}

pub fn parse_jobs(response: &str) -> OutreachResult<Vec<JobPosting>> {
    let fail = |detail: String| OutreachError::parse(ParseTarget::Jobs, detail);

    let items = match parse_json_response(response).map_err(fail)? {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => return Err(fail(format!("expected an object or a list, got {}", other))),
    };

    if items.is_empty() {
        return Err(fail("model returned an empty job list".to_string()));
    }

    items
        .into_iter()
        .map(|item| {
            if !item.is_object() {
                return Err(fail(format!("job entry is not an object: {}", item)));
            }
            serde_json::from_value::<JobPosting>(item).map_err(|e| fail(e.to_string()))
        })
        .collect()
}

pub fn parse_resume_extraction(response: &str) -> OutreachResult<ResumeExtraction> {
    let fail = |detail: String| OutreachError::parse(ParseTarget::SkillsAndProjects, detail);

    let Value::Object(mut object) = parse_json_response(response).map_err(fail)? else {
        return Err(fail("expected a JSON object".to_string()));
    };

    let mut take_list = |key: &str| -> OutreachResult<Vec<Value>> {
        match object.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(fail(format!("`{}` is not a list: {}", key, other))),
        }
    };

    let skills = take_list("skills")?;
    let projects = take_list("projects")?;
    Ok(ResumeExtraction { skills, projects })
}
