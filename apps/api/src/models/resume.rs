use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::screening::engine::AnalysisResult;

/// A stored upload and its analysis. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    /// Identity-provider user id of the uploader.
    pub user_id: String,
    pub file_name: String,
    /// Role name the résumé was scored against.
    pub role: String,
    pub analysis: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `ResumeStore::insert_resume`.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: String,
    pub file_name: String,
    pub role: String,
    pub analysis: AnalysisResult,
}
