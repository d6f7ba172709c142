//! Scan history model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use phishguard_core::{Modality, Verdict};

/// Content preview length in history listings
const PREVIEW_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub scan_type: String,
    pub content: String,
    pub classification: String,
    pub confidence: f32,
    pub explanation: Option<String>,
    pub highlighted_text: Option<String>,
    pub scan_date: DateTime<Utc>,
}

/// Listing form: content truncated so large email bodies do not dominate
/// the response
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    pub id: Uuid,
    pub scan_type: String,
    pub content: String,
    pub classification: String,
    pub confidence: f32,
    pub explanation: Option<String>,
    pub highlighted_text: Option<String>,
    pub scan_date: DateTime<Utc>,
}

/// Per-user aggregate counts
#[derive(Debug, Serialize, FromRow)]
pub struct ScanStats {
    pub total_scans: i64,
    pub safe_count: i64,
    pub malicious_count: i64,
    pub url_scans: i64,
    pub email_scans: i64,
}

impl ScanRecord {
    /// Append one scan to the caller's history
    pub async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        modality: Modality,
        content: &str,
        verdict: &Verdict,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ScanRecord>(
            r#"
            INSERT INTO scan_history
                (user_id, scan_type, content, classification, confidence,
                 explanation, highlighted_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(modality.as_str())
        .bind(content)
        .bind(verdict.classification.as_str())
        .bind(verdict.confidence)
        .bind(&verdict.explanation)
        .bind(&verdict.highlighted_text)
        .fetch_one(pool)
        .await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ScanRecord>(
            r#"
            SELECT * FROM scan_history
            WHERE user_id = $1
            ORDER BY scan_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Delete one of the caller's scans; false when it was not theirs
    pub async fn delete_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scan_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn stats_for_user(pool: &PgPool, user_id: Uuid) -> Result<ScanStats, sqlx::Error> {
        sqlx::query_as::<_, ScanStats>(
            r#"
            SELECT
                COUNT(*)                                                   AS total_scans,
                COUNT(*) FILTER (WHERE classification = 'safe')            AS safe_count,
                COUNT(*) FILTER (WHERE classification = 'malicious')       AS malicious_count,
                COUNT(*) FILTER (WHERE scan_type = 'url')                  AS url_scans,
                COUNT(*) FILTER (WHERE scan_type = 'email')                AS email_scans
            FROM scan_history
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub fn to_summary(&self) -> ScanSummary {
        ScanSummary {
            id: self.id,
            scan_type: self.scan_type.clone(),
            content: preview(&self.content),
            classification: self.classification.clone(),
            confidence: self.confidence,
            explanation: self.explanation.clone(),
            highlighted_text: self.highlighted_text.clone(),
            scan_date: self.scan_date,
        }
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_LENGTH {
        let truncated: String = content.chars().take(PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(250);
        let result = preview(&long);
        assert_eq!(result.chars().count(), PREVIEW_LENGTH + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_preview_keeps_short_content() {
        assert_eq!(preview("short"), "short");
        let exact = "b".repeat(PREVIEW_LENGTH);
        assert_eq!(preview(&exact), exact);
    }
}
