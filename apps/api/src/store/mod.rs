//! Storage seams for roles and résumé records.
//!
//! `AppState` carries these as `Arc<dyn RoleStore>` / `Arc<dyn ResumeStore>`.
//! `PgStore` implements both over Postgres.

pub mod postgres;
pub mod seed;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::models::role::{NewRole, Role};

pub use postgres::PgStore;

#[async_trait]
pub trait RoleStore: Send + Sync {
    /// All roles, sorted by name ascending.
    async fn list_roles(&self) -> Result<Vec<Role>, AppError>;

    async fn find_role(&self, name: &str) -> Result<Option<Role>, AppError>;

    async fn count_roles(&self) -> Result<i64, AppError>;

    /// Inserts roles whose name is not taken yet. Returns how many were added.
    async fn insert_roles(&self, roles: &[NewRole]) -> Result<usize, AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn insert_resume(&self, resume: NewResume) -> Result<ResumeRecord, AppError>;

    /// Records owned by `user_id`, newest first, optionally restricted to one role.
    async fn list_resumes(
        &self,
        user_id: &str,
        role: Option<&str>,
    ) -> Result<Vec<ResumeRecord>, AppError>;
}
