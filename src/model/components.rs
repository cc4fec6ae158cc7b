use super::features::{FeatureId, FeatureVector};
use super::linear::{round_to, sigmoid, LinearModel};
use crate::error::{Result, ScorerError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Hook,
    Hold,
    Ctr,
    Roas,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Hook,
        Component::Hold,
        Component::Ctr,
        Component::Roas,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::Hook => "Hook",
            Component::Hold => "Hold",
            Component::Ctr => "CTR",
            Component::Roas => "ROAS",
        }
    }

    /// Lower-case key used in configuration tables.
    pub fn config_key(self) -> &'static str {
        match self {
            Component::Hook => "hook",
            Component::Hold => "hold",
            Component::Ctr => "ctr",
            Component::Roas => "roas",
        }
    }

    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.config_key() == key)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub features: Vec<FeatureId>,
    pub max_score: f64,
}

/// Assignment of every feature to exactly one marketing dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPartition {
    specs: BTreeMap<Component, ComponentSpec>,
}

impl Default for ComponentPartition {
    fn default() -> Self {
        use FeatureId::*;
        let specs = [
            (
                Component::Hook,
                ComponentSpec {
                    features: vec![
                        PrimaryFocus,
                        FramingCloseUp,
                        FramingMedium,
                        FramingFar,
                        ProductSizeRatio,
                        Contrast,
                        Brightness,
                        StyleStudio,
                        StyleUgc,
                        StyleInfographic,
                        UgcSignals,
                        StudioSignals,
                    ],
                    max_score: 35.0,
                },
            ),
            (
                Component::Hold,
                ComponentSpec {
                    features: vec![
                        TextBlocks,
                        TextDensity,
                        MainHeadline,
                        HierarchyClarity,
                        VisualNoise,
                        WhitespaceRatio,
                    ],
                    max_score: 25.0,
                },
            ),
            (
                Component::Ctr,
                ComponentSpec {
                    features: vec![
                        CtaPresent,
                        DiscountWord,
                        QualityWord,
                        GuaranteeWord,
                        IncentiveMatch,
                    ],
                    max_score: 20.0,
                },
            ),
            (
                Component::Roas,
                ComponentSpec {
                    features: vec![
                        HasHuman,
                        FaceVisible,
                        BackgroundClarity,
                        EmotionSmiling,
                        MoodComfortable,
                        PopRideKeyword,
                        PainPointMatch,
                    ],
                    max_score: 30.0,
                },
            ),
        ];
        Self {
            specs: specs.into_iter().collect(),
        }
    }
}

impl ComponentPartition {
    /// Builds a partition and checks it before handing it out.
    pub fn new(specs: BTreeMap<Component, ComponentSpec>) -> Result<Self> {
        let partition = Self { specs };
        partition.validate()?;
        Ok(partition)
    }

    pub fn spec(&self, component: Component) -> Option<&ComponentSpec> {
        self.specs.get(&component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &ComponentSpec)> {
        self.specs.iter().map(|(component, spec)| (*component, spec))
    }

    /// Every component present, every feature owned by exactly one component.
    pub fn validate(&self) -> Result<()> {
        let missing = Component::ALL
            .iter()
            .filter(|component| !self.specs.contains_key(*component))
            .map(|component| component.name())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(ScorerError::InvalidPartition(format!(
                "missing component(s): {}",
                missing.join(", ")
            )));
        }

        let mut owner = BTreeMap::<FeatureId, Component>::new();
        for (component, spec) in &self.specs {
            if !spec.max_score.is_finite() || spec.max_score < 0.0 {
                return Err(ScorerError::InvalidPartition(format!(
                    "{component} max_score must be a non-negative number (found {})",
                    spec.max_score
                )));
            }
            for feature in &spec.features {
                if let Some(previous) = owner.insert(*feature, *component) {
                    return Err(ScorerError::InvalidPartition(format!(
                        "feature {feature} assigned to both {previous} and {component}"
                    )));
                }
            }
        }

        let unassigned = FeatureId::ALL
            .iter()
            .filter(|feature| !owner.contains_key(*feature))
            .map(|feature| feature.name())
            .collect::<Vec<_>>();
        if !unassigned.is_empty() {
            return Err(ScorerError::InvalidPartition(format!(
                "feature(s) not assigned to any component: {}",
                unassigned.join(", ")
            )));
        }
        Ok(())
    }

    pub fn decompose(&self, features: &FeatureVector, model: &LinearModel) -> ComponentScores {
        let mut scores = ComponentScores::default();
        for (component, spec) in self.iter() {
            let z = model.partial_score(features, &spec.features);
            let scaled = round_to(sigmoid(z) * spec.max_score, 2);
            scores.set(component, scaled);
        }
        scores
    }
}

/// Scaled sub-scores, serialized as `{"Hook", "Hold", "CTR", "ROAS"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComponentScores {
    #[serde(rename = "Hook")]
    pub hook: f64,
    #[serde(rename = "Hold")]
    pub hold: f64,
    #[serde(rename = "CTR")]
    pub ctr: f64,
    #[serde(rename = "ROAS")]
    pub roas: f64,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Hook => self.hook,
            Component::Hold => self.hold,
            Component::Ctr => self.ctr,
            Component::Roas => self.roas,
        }
    }

    fn set(&mut self, component: Component, value: f64) {
        match component {
            Component::Hook => self.hook = value,
            Component::Hold => self.hold = value,
            Component::Ctr => self.ctr = value,
            Component::Roas => self.roas = value,
        }
    }
}
