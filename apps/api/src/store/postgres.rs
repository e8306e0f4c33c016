use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::models::role::{NewRole, Role};
use crate::screening::engine::AnalysisResult;
use crate::store::{ResumeStore, RoleStore};

/// Postgres-backed role and résumé store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ResumeRow {
    id: Uuid,
    user_id: String,
    file_name: String,
    role: String,
    analysis: Json<AnalysisResult>,
    created_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        ResumeRecord {
            id: row.id,
            user_id: row.user_id,
            file_name: row.file_name,
            role: row.role,
            analysis: row.analysis.0,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles =
            sqlx::query_as::<_, Role>("SELECT id, name, keywords FROM roles ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(roles)
    }

    async fn find_role(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role =
            sqlx::query_as::<_, Role>("SELECT id, name, keywords FROM roles WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(role)
    }

    async fn count_roles(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_roles(&self, roles: &[NewRole]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for role in roles {
            let result = sqlx::query(
                r#"
                INSERT INTO roles (id, name, keywords)
                VALUES ($1, $2, $3)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&role.name)
            .bind(&role.keywords)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn insert_resume(&self, resume: NewResume) -> Result<ResumeRecord, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, file_name, role, analysis)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, file_name, role, analysis, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.user_id)
        .bind(&resume.file_name)
        .bind(&resume.role)
        .bind(Json(&resume.analysis))
        .fetch_one(&self.pool)
        .await?;

        info!("Stored résumé {} for user {}", row.id, row.user_id);
        Ok(row.into())
    }

    async fn list_resumes(
        &self,
        user_id: &str,
        role: Option<&str>,
    ) -> Result<Vec<ResumeRecord>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT id, user_id, file_name, role, analysis, created_at
            FROM resumes
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR role = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }
}
