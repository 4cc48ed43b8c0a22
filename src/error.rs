use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("max repair attempts ({limit}) exceeded")]
    AttemptsExhausted { limit: usize },
    #[error(transparent)]
    Unrepairable(#[from] serde_json::Error),
}
