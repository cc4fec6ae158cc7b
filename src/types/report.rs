use crate::model::components::ComponentScores;
use crate::model::tag::Tag;
use serde::Serialize;

/// Outcome of scoring one creative; field names are the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub prediction_score: f64,
    pub tag_label: Tag,
    pub component_scores: ComponentScores,
    #[serde(rename = "Z_score")]
    pub z_score: f64,
    pub context_used: ContextUsed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextUsed {
    pub industry: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Per-feature breakdown of a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub bias: f64,
    pub features: Vec<FeatureContribution>,
    pub result: ScoreResult,
}
