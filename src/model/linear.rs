use super::features::{FeatureId, FeatureVector};
use std::collections::BTreeMap;

pub const DEFAULT_BIAS: f64 = 0.2109;

/// Logistic-regression coefficients; pain-point and incentive weights stay at
/// 0.0 until the model is retrained with them.
pub const DEFAULT_WEIGHTS: [(FeatureId, f64); 30] = [
    (FeatureId::PrimaryFocus, 0.54),
    (FeatureId::FramingCloseUp, 0.8262),
    (FeatureId::FramingMedium, -0.6153),
    (FeatureId::FramingFar, 0.0),
    (FeatureId::ProductSizeRatio, -0.2053),
    (FeatureId::Contrast, 0.2014),
    (FeatureId::Brightness, -0.5578),
    (FeatureId::TextBlocks, 0.7572),
    (FeatureId::TextDensity, 0.2358),
    (FeatureId::MainHeadline, 0.2109),
    (FeatureId::HierarchyClarity, 0.4218),
    (FeatureId::VisualNoise, 0.0027),
    (FeatureId::WhitespaceRatio, 0.0775),
    (FeatureId::CtaPresent, -0.0535),
    (FeatureId::DiscountWord, -1.3572),
    (FeatureId::QualityWord, 0.0),
    (FeatureId::GuaranteeWord, 0.023),
    (FeatureId::StyleStudio, -0.3199),
    (FeatureId::StyleUgc, 0.0),
    (FeatureId::StyleInfographic, 0.0032),
    (FeatureId::UgcSignals, 0.0),
    (FeatureId::StudioSignals, 0.1579),
    (FeatureId::HasHuman, -0.2343),
    (FeatureId::FaceVisible, -1.0468),
    (FeatureId::BackgroundClarity, 0.41),
    (FeatureId::EmotionSmiling, -0.6429),
    (FeatureId::MoodComfortable, 0.0),
    (FeatureId::PopRideKeyword, 0.0),
    (FeatureId::PainPointMatch, 0.0),
    (FeatureId::IncentiveMatch, 0.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub bias: f64,
    pub weights: BTreeMap<FeatureId, f64>,
}

impl Default for LinearModel {
    fn default() -> Self {
        Self {
            bias: DEFAULT_BIAS,
            weights: DEFAULT_WEIGHTS.into_iter().collect(),
        }
    }
}

impl LinearModel {
    /// A feature without a weight contributes nothing.
    pub fn weight(&self, id: FeatureId) -> f64 {
        self.weights.get(&id).copied().unwrap_or(0.0)
    }

    /// Weighted sum over `ids` only, without the bias.
    pub fn partial_score(&self, features: &FeatureVector, ids: &[FeatureId]) -> f64 {
        ids.iter()
            .map(|id| features.get(*id) * self.weight(*id))
            .sum()
    }

    /// Raw score `Z = bias + Σ value × weight` over every feature.
    pub fn score(&self, features: &FeatureVector) -> f64 {
        features
            .iter()
            .fold(self.bias, |z, (id, value)| z + value * self.weight(id))
    }
}

/// Logistic function that clamps to 0 or 1 where `exp` would overflow.
pub fn sigmoid(z: f64) -> f64 {
    let decay = (-z).exp();
    if !decay.is_finite() {
        return if z < 0.0 { 0.0 } else { 1.0 };
    }
    1.0 / (1.0 + decay)
}

/// Rounds the exact decimal value of `value` to `places` digits, so a stored
/// 59.99499... stays 59.99 instead of being scaled up into a tie.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}
