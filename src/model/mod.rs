pub mod components;
pub mod features;
pub mod linear;
pub mod tag;

use crate::error::Result;
use crate::keywords::Keywords;
use crate::types::description::{unwrap_envelope, CreativeDescription};
use crate::types::report::{ContextUsed, Explanation, FeatureContribution, ScoreResult};
use components::ComponentPartition;
use features::{FeatureId, FeatureVector};
use linear::{round_to, sigmoid, LinearModel};
use serde_json::Value;
use tag::TagThresholds;
use tracing::debug;

/// Everything the pipeline reads, fixed once built.
///
/// Share it behind an `Arc`; to reconfigure, build a new model and replace
/// the `Arc` so in-flight scoring keeps the set it started with.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    keywords: Keywords,
    linear: LinearModel,
    partition: ComponentPartition,
    thresholds: TagThresholds,
}

impl ScoringModel {
    pub fn new(
        keywords: Keywords,
        linear: LinearModel,
        partition: ComponentPartition,
        thresholds: TagThresholds,
    ) -> Result<Self> {
        partition.validate()?;
        thresholds.validate()?;
        Ok(Self {
            keywords,
            linear,
            partition,
            thresholds,
        })
    }

    pub fn linear(&self) -> &LinearModel {
        &self.linear
    }

    pub fn partition(&self) -> &ComponentPartition {
        &self.partition
    }

    pub fn thresholds(&self) -> TagThresholds {
        self.thresholds
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn features(&self, input: &Value) -> Result<(CreativeDescription, FeatureVector)> {
        let description = CreativeDescription::from_value(unwrap_envelope(input))?;
        let features = features::extract(&description, &self.keywords)?;
        Ok((description, features))
    }

    pub fn score(&self, input: &Value) -> Result<ScoreResult> {
        let (description, features) = self.features(input)?;
        Ok(self.score_features(&description, &features))
    }

    pub fn explain(&self, input: &Value) -> Result<Explanation> {
        let (description, features) = self.features(input)?;
        let contributions = features
            .iter()
            .map(|(id, value)| {
                let weight = self.linear.weight(id);
                FeatureContribution {
                    feature: id.name(),
                    label: id.label(),
                    value,
                    weight,
                    contribution: value * weight,
                }
            })
            .collect();
        Ok(Explanation {
            bias: self.linear.bias,
            features: contributions,
            result: self.score_features(&description, &features),
        })
    }

    fn score_features(
        &self,
        description: &CreativeDescription,
        features: &FeatureVector,
    ) -> ScoreResult {
        let z = self.linear.score(features);
        let prediction_score = round_to(sigmoid(z) * 100.0, 2);
        let tag = self.thresholds.classify(prediction_score);
        let component_scores = self.partition.decompose(features, &self.linear);
        debug!(
            z,
            prediction_score,
            tag = tag.label(),
            industry = %description.context.normalized_industry(),
            goal = %description.context.normalized_goal(),
            pain_point = features.get(FeatureId::PainPointMatch),
            incentive = features.get(FeatureId::IncentiveMatch),
            "scored creative"
        );

        ScoreResult {
            prediction_score,
            tag_label: tag,
            component_scores,
            z_score: round_to(z, 4),
            context_used: ContextUsed {
                industry: description.context.industry.clone(),
                goal: description.context.goal.clone(),
            },
        }
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            keywords: Keywords::default(),
            linear: LinearModel::default(),
            partition: ComponentPartition::default(),
            thresholds: TagThresholds::default(),
        }
    }
}
