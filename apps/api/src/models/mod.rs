pub mod resume;
pub mod role;
