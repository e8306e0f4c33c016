use tracing::info;

use crate::errors::AppError;
use crate::models::role::NewRole;
use crate::store::RoleStore;

/// The role table a fresh deployment starts with.
pub fn default_roles() -> Vec<NewRole> {
    vec![
        NewRole::new(
            "Software Engineer",
            &["javascript", "react", "node", "python", "algorithm", "data structure"],
        ),
        NewRole::new(
            "Web Developer",
            &["html", "css", "javascript", "react", "angular", "vue"],
        ),
        NewRole::new(
            "Product Manager",
            &["roadmap", "agile", "scrum", "user story", "market research"],
        ),
        NewRole::new(
            "Data Scientist",
            &["python", "r", "sql", "machine learning", "tensorflow", "statistics"],
        ),
        NewRole::new(
            "UX Designer",
            &["figma", "sketch", "wireframe", "prototype", "user research"],
        ),
        NewRole::new(
            "Project Manager",
            &["gantt chart", "agile", "scrum", "budget", "pmp"],
        ),
        NewRole::new("Other", &[]),
    ]
}

/// Seeds the default roles when the store holds none. Returns how many were inserted.
pub async fn seed_default_roles(store: &dyn RoleStore) -> Result<usize, AppError> {
    if store.count_roles().await? > 0 {
        info!("Roles already present, skipping seed");
        return Ok(0);
    }

    let inserted = store.insert_roles(&default_roles()).await?;
    info!("Seeded {inserted} default roles");
    Ok(inserted)
}
