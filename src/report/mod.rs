pub mod json;
pub mod md;

use crate::error::ScorerError;
use crate::types::report::{Explanation, ScoreResult};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(result: &ScoreResult, format: OutputFormat) -> Result<String, ScorerError> {
    match format {
        OutputFormat::Json => json::to_json(result).map_err(ScorerError::Json),
        OutputFormat::Md => Ok(md::to_markdown(result)),
    }
}

pub fn render_explanation(
    explanation: &Explanation,
    format: OutputFormat,
) -> Result<String, ScorerError> {
    match format {
        OutputFormat::Json => json::to_json(explanation).map_err(ScorerError::Json),
        OutputFormat::Md => Ok(md::explanation_to_markdown(explanation)),
    }
}
