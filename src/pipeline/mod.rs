pub mod stage1_load;
pub mod stage2_fit;
pub mod stage3_score;
pub mod stage4_composite;
pub mod stage5_report;

use crate::input::InputError;
use crate::metrics::ScoreError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
