use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::Config;
use crate::screening::extract::TextExtractor;
use crate::store::{ResumeStore, RoleStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub roles: Arc<dyn RoleStore>,
    pub resumes: Arc<dyn ResumeStore>,
    /// Pluggable token verifier. Default: SupabaseIdentity.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Pluggable text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
