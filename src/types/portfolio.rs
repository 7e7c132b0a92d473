// src/types/portfolio.rs
//! Portfolio documents (skills and projects) derived from the uploaded resume

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const MAX_SNAPSHOT_SKILLS: i64 = 5;
pub const MAX_SNAPSHOT_PROJECTS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioKind {
    Skill,
    Project,
}

impl PortfolioKind {
    /// Value of the `doc_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioKind::Skill => "skill",
            PortfolioKind::Project => "project",
        }
    }

    /// Fresh document id scoped to this kind, e.g. `skill_<uuid>`
    pub fn new_document_id(&self) -> String {
        format!("{}_{}", self.as_str(), uuid::Uuid::new_v4())
    }
}

impl fmt::Display for PortfolioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioItem {
    Skill { text: String },
    Project { name: String, description: String },
}

impl PortfolioItem {
    /// Only string entries are skills; anything else is rejected
    pub fn skill_from_value(value: &Value) -> Option<Self> {
        value.as_str().map(|text| PortfolioItem::Skill {
            text: text.to_string(),
        })
    }

    /// Projects must be objects carrying both `name` and `description`
    pub fn project_from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let name = object.get("name")?;
        let description = object.get("description")?;

        Some(PortfolioItem::Project {
            name: scalar_text(name),
            description: scalar_text(description),
        })
    }

    pub fn kind(&self) -> PortfolioKind {
        match self {
            PortfolioItem::Skill { .. } => PortfolioKind::Skill,
            PortfolioItem::Project { .. } => PortfolioKind::Project,
        }
    }

    /// Text stored for this item
    pub fn document(&self) -> String {
        match self {
            PortfolioItem::Skill { text } => text.clone(),
            PortfolioItem::Project { name, description } => {
                format!("Project Name: {}\nDescription: {}", name, description)
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

impl PortfolioSnapshot {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.projects.is_empty()
    }
}

/// Outcome of replacing the stored portfolio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceReport {
    pub skills_accepted: usize,
    pub skills_rejected: usize,
    pub projects_accepted: usize,
    pub projects_rejected: usize,
}

impl ReplaceReport {
    pub fn rejected(&self) -> usize {
        self.skills_rejected + self.projects_rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_from_value() {
        assert_eq!(
            PortfolioItem::skill_from_value(&json!("Python")),
            Some(PortfolioItem::Skill {
                text: "Python".to_string()
            })
        );
        assert_eq!(PortfolioItem::skill_from_value(&json!(42)), None);
        assert_eq!(PortfolioItem::skill_from_value(&json!({"name": "SQL"})), None);
    }

    #[test]
    fn test_project_from_value() {
        let project = PortfolioItem::project_from_value(&json!({
            "name": "X",
            "description": "Y"
        }))
        .unwrap();
        assert_eq!(project.kind(), PortfolioKind::Project);
        assert_eq!(project.document(), "Project Name: X\nDescription: Y");

        assert_eq!(
            PortfolioItem::project_from_value(&json!({"name": "X"})),
            None
        );
        assert_eq!(
            PortfolioItem::project_from_value(&json!("X - a project")),
            None
        );
    }

    #[test]
    fn test_document_ids_are_scoped() {
        let id = PortfolioKind::Skill.new_document_id();
        assert!(id.starts_with("skill_"));
        assert_ne!(id, PortfolioKind::Skill.new_document_id());
        assert!(PortfolioKind::Project.new_document_id().starts_with("project_"));
    }
}
