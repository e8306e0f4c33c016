//! In-memory stand-ins for the external collaborators, used by unit and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::{AuthUser, IdentityVerifier};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::models::role::{NewRole, Role};
use crate::screening::extract::TextExtractor;
use crate::state::AppState;
use crate::store::{ResumeStore, RoleStore};

#[derive(Default)]
pub struct MemoryStore {
    roles: Mutex<Vec<Role>>,
    /// Insertion order, oldest first.
    resumes: Mutex<Vec<ResumeRecord>>,
}

impl MemoryStore {
    pub fn with_roles(roles: Vec<NewRole>) -> Self {
        let store = Self::default();
        store.roles.lock().unwrap().extend(roles.into_iter().map(to_role));
        store
    }
}

fn to_role(role: NewRole) -> Role {
    Role {
        id: Uuid::new_v4(),
        name: role.name,
        keywords: role.keywords,
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let mut roles = self.roles.lock().unwrap().clone();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_role(&self, name: &str) -> Result<Option<Role>, AppError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn count_roles(&self) -> Result<i64, AppError> {
        Ok(self.roles.lock().unwrap().len() as i64)
    }

    async fn insert_roles(&self, roles: &[NewRole]) -> Result<usize, AppError> {
        let mut stored = self.roles.lock().unwrap();
        let mut inserted = 0;
        for role in roles {
            if stored.iter().all(|r| r.name != role.name) {
                stored.push(to_role(role.clone()));
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn insert_resume(&self, resume: NewResume) -> Result<ResumeRecord, AppError> {
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            user_id: resume.user_id,
            file_name: resume.file_name,
            role: resume.role,
            analysis: resume.analysis,
            created_at: Utc::now(),
        };
        self.resumes.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_resumes(
        &self,
        user_id: &str,
        role: Option<&str>,
    ) -> Result<Vec<ResumeRecord>, AppError> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id && role.map_or(true, |name| r.role == name))
            .cloned()
            .collect())
    }
}

/// Accepts a fixed set of tokens.
#[derive(Default)]
pub struct StaticIdentity {
    users: HashMap<String, AuthUser>,
}

impl StaticIdentity {
    pub fn with_user(mut self, token: &str, user_id: &str) -> Self {
        self.users.insert(
            token.to_string(),
            AuthUser {
                id: user_id.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentity {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token.".to_string()))
    }
}

/// Treats the upload bytes as UTF-8 text.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, AppError> {
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

pub struct FailingExtractor;

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract(&self, _data: Bytes) -> Result<String, AppError> {
        Err(AppError::Extraction("corrupt document".to_string()))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        identity_url: "http://localhost:9999".to_string(),
        identity_api_key: "test-key".to_string(),
        port: 0,
        max_upload_bytes: 1024 * 1024,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    store: Arc<MemoryStore>,
    identity: StaticIdentity,
    extractor: Arc<dyn TextExtractor>,
) -> AppState {
    AppState {
        roles: store.clone(),
        resumes: store,
        identity: Arc::new(identity),
        extractor,
        config: test_config(),
    }
}
