// src/types/job.rs
//! Job posting records extracted from scraped career pages

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_JOB_TITLE: &str = "Unknown Job Title";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

impl JobPosting {
    pub fn has_role(&self) -> bool {
        !self.role.trim().is_empty()
    }

    /// Fill an empty role from the first line of the raw page text (`Job Title: ...`)
    pub fn fill_missing_role(&mut self, raw_page_text: &str) {
        if self.has_role() {
            return;
        }

        let title = raw_page_text
            .split('\n')
            .next()
            .unwrap_or_default()
            .replace("Job Title:", "")
            .trim()
            .to_string();

        self.role = if title.is_empty() {
            UNKNOWN_JOB_TITLE.to_string()
        } else {
            title
        };
    }

    pub fn email_subject(&self) -> String {
        format!("Application for {}", self.role)
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// Models sometimes answer `"experience": 3` instead of a string
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

// ...and `"skills": "Rust"` instead of a list
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect(),
        other => {
            let text = value_to_text(other);
            if text.is_empty() {
                Vec::new()
            } else {
                vec![text]
            }
        }
    };
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_deserialization() {
        let job: JobPosting = serde_json::from_str(
            r#"{"role": "Backend Engineer", "experience": 3, "skills": "Rust", "description": null}"#,
        )
        .unwrap();

        assert_eq!(job.role, "Backend Engineer");
        assert_eq!(job.experience, "3");
        assert_eq!(job.skills, vec!["Rust".to_string()]);
        assert_eq!(job.description, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let job: JobPosting = serde_json::from_str(r#"{"skills": ["Go", 5]}"#).unwrap();
        assert!(!job.has_role());
        assert_eq!(job.skills, vec!["Go".to_string(), "5".to_string()]);
    }

    #[test]
    fn test_fill_missing_role() {
        let raw = "Job Title: Senior Rust Developer\n\nJob Description: Build things";

        let mut job = JobPosting::default();
        job.fill_missing_role(raw);
        assert_eq!(job.role, "Senior Rust Developer");
        assert_eq!(job.email_subject(), "Application for Senior Rust Developer");

        let mut job = JobPosting {
            role: "Data Engineer".to_string(),
            ..Default::default()
        };
        job.fill_missing_role(raw);
        assert_eq!(job.role, "Data Engineer");
    }

    #[test]
    fn test_fill_missing_role_with_blank_title() {
        let mut job = JobPosting {
            role: "   ".to_string(),
            ..Default::default()
        };
        job.fill_missing_role("Job Title: \n\nJob Description: ");
        assert_eq!(job.role, UNKNOWN_JOB_TITLE);
    }
}
