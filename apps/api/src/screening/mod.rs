// Résumé screening: text extraction, keyword analysis, accept/reject decision.
// The engine is pure; handlers own all I/O through the traits in `AppState`.

pub mod engine;
pub mod extract;
pub mod handlers;
