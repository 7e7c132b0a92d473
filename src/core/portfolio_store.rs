// src/core/portfolio_store.rs
//! Persistent skills/projects store. Holds a single generation at a time.

use chrono::Utc;
use serde_json::Value;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::OutreachResult;
use crate::types::portfolio::{MAX_SNAPSHOT_PROJECTS, MAX_SNAPSHOT_SKILLS};
use crate::types::{PortfolioItem, PortfolioKind, PortfolioSnapshot, ReplaceReport};

#[derive(Clone)]
pub struct PortfolioStore {
    pool: SqlitePool,
}

impl PortfolioStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Drop every stored skill and project, then store the acceptable entries.
    ///
    /// Non-string skills and projects lacking `name` or `description` are rejected
    /// and only show up in the returned counts.
    pub async fn replace_all(
        &self,
        skills: &[Value],
        projects: &[Value],
    ) -> OutreachResult<ReplaceReport> {
        let skill_items: Vec<PortfolioItem> = skills
            .iter()
            .filter_map(PortfolioItem::skill_from_value)
            .collect();
        let project_items: Vec<PortfolioItem> = projects
            .iter()
            .filter_map(PortfolioItem::project_from_value)
            .collect();

        let report = ReplaceReport {
            skills_accepted: skill_items.len(),
            skills_rejected: skills.len() - skill_items.len(),
            projects_accepted: project_items.len(),
            projects_rejected: projects.len() - project_items.len(),
        };

        let mut tx = self.pool.begin().await?;

        for kind in [PortfolioKind::Skill, PortfolioKind::Project] {
            Self::delete_kind(&mut *tx, kind).await?;
        }

        for item in skill_items.iter().chain(project_items.iter()) {
            let kind = item.kind();
            sqlx::query(
                r#"
                INSERT INTO portfolio_documents (id, doc_type, document, created_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(kind.new_document_id())
            .bind(kind.as_str())
            .bind(item.document())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        if report.rejected() > 0 {
            warn!(
                "Dropped {} malformed skills and {} malformed projects from resume extraction",
                report.skills_rejected, report.projects_rejected
            );
        }
        info!(
            "Portfolio replaced: {} skills, {} projects",
            report.skills_accepted, report.projects_accepted
        );

        Ok(report)
    }

    /// Documents of one kind in insertion order, capped at `limit`
    pub async fn list_by_type(&self, kind: PortfolioKind, limit: i64) -> OutreachResult<Vec<String>> {
        let documents = sqlx::query_scalar::<_, String>(
            r#"
            SELECT document
            FROM portfolio_documents
            WHERE doc_type = ?
            ORDER BY rowid ASC
            LIMIT ?
            "#,
        )
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn delete_by_type(&self, kind: PortfolioKind) -> OutreachResult<u64> {
        Self::delete_kind(&self.pool, kind).await
    }

    async fn delete_kind<'e, E>(executor: E, kind: PortfolioKind) -> OutreachResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM portfolio_documents WHERE doc_type = ?")
            .bind(kind.as_str())
            .execute(executor)
            .await?;

        debug!("Deleted {} {} documents", result.rows_affected(), kind);
        Ok(result.rows_affected())
    }

    /// Up to 5 skills and 10 projects
    pub async fn read(&self) -> OutreachResult<PortfolioSnapshot> {
        let skills = self
            .list_by_type(PortfolioKind::Skill, MAX_SNAPSHOT_SKILLS)
            .await?;
        let projects = self
            .list_by_type(PortfolioKind::Project, MAX_SNAPSHOT_PROJECTS)
            .await?;

        Ok(PortfolioSnapshot { skills, projects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;
    use serde_json::json;

    async fn store() -> PortfolioStore {
        let db = Database::in_memory().await.unwrap();
        PortfolioStore::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_replace_then_read() {
        let store = store().await;

        let report = store
            .replace_all(
                &[json!("Python"), json!("SQL")],
                &[json!({"name": "X", "description": "Y"})],
            )
            .await
            .unwrap();

        assert_eq!(report.skills_accepted, 2);
        assert_eq!(report.projects_accepted, 1);
        assert_eq!(report.rejected(), 0);

        let mut snapshot = store.read().await.unwrap();
        snapshot.skills.sort();
        assert_eq!(snapshot.skills, vec!["Python", "SQL"]);
        assert_eq!(snapshot.projects, vec!["Project Name: X\nDescription: Y"]);
    }

    #[tokio::test]
    async fn test_replace_all_does_not_accumulate() {
        let store = store().await;

        store
            .replace_all(
                &[json!("Java"), json!("Spring")],
                &[json!({"name": "Old", "description": "Legacy app"})],
            )
            .await
            .unwrap();
        store
            .replace_all(&[json!("Rust")], &[])
            .await
            .unwrap();

        let snapshot = store.read().await.unwrap();
        assert_eq!(snapshot.skills, vec!["Rust"]);
        assert!(snapshot.projects.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_entries_are_dropped() {
        let store = store().await;

        let report = store
            .replace_all(
                &[json!("Go"), json!(7), json!({"skill": "Docker"}), json!(null)],
                &[
                    json!({"name": "Crawler", "description": "Scrapes pages"}),
                    json!({"name": "No description"}),
                    json!("Plain string project"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(report.skills_accepted, 1);
        assert_eq!(report.skills_rejected, 3);
        assert_eq!(report.projects_accepted, 1);
        assert_eq!(report.projects_rejected, 2);

        let snapshot = store.read().await.unwrap();
        assert_eq!(snapshot.skills, vec!["Go"]);
        assert_eq!(
            snapshot.projects,
            vec!["Project Name: Crawler\nDescription: Scrapes pages"]
        );
    }

    #[tokio::test]
    async fn test_read_is_capped() {
        let store = store().await;

        let skills: Vec<Value> = (0..12).map(|i| json!(format!("skill-{}", i))).collect();
        let projects: Vec<Value> = (0..15)
            .map(|i| json!({"name": format!("p{}", i), "description": "d"}))
            .collect();
        store.replace_all(&skills, &projects).await.unwrap();

        let snapshot = store.read().await.unwrap();
        assert_eq!(snapshot.skills.len(), 5);
        assert_eq!(snapshot.projects.len(), 10);

        // Everything is still stored, only the read is capped
        let all_skills = store.list_by_type(PortfolioKind::Skill, 100).await.unwrap();
        assert_eq!(all_skills.len(), 12);
    }

    #[tokio::test]
    async fn test_delete_by_type() {
        let store = store().await;
        store
            .replace_all(
                &[json!("A"), json!("B")],
                &[json!({"name": "P", "description": "D"})],
            )
            .await
            .unwrap();

        assert_eq!(store.delete_by_type(PortfolioKind::Skill).await.unwrap(), 2);

        let snapshot = store.read().await.unwrap();
        assert!(snapshot.skills.is_empty());
        assert_eq!(snapshot.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_all_clears_both_kinds_in_one_transaction() {
        let store = store().await;
        store
            .replace_all(
                &[json!("A")],
                &[json!({"name": "P", "description": "D"})],
            )
            .await
            .unwrap();

        store.replace_all(&[json!("B")], &[]).await.unwrap();

        assert_eq!(store.delete_by_type(PortfolioKind::Project).await.unwrap(), 0);
        assert_eq!(store.delete_by_type(PortfolioKind::Skill).await.unwrap(), 1);
        assert!(store.read().await.unwrap().is_empty());
    }
}
