use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Coercion error: {0}")]
    Coercion(String),

    #[error("No symbols passed the completeness filter")]
    EmptyResult,
}
