use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job category and the keywords a résumé for it is expected to mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    /// Lowercase, ordered. The order is preserved in analysis results.
    pub keywords: Vec<String>,
}

/// A role that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub keywords: Vec<String>,
}

impl NewRole {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}
