use crate::error::{Result, ScorerError};
use crate::keywords::Keywords;
use crate::model::components::{Component, ComponentPartition};
use crate::model::features::FeatureId;
use crate::model::linear::LinearModel;
use crate::model::tag::TagThresholds;
use crate::model::ScoringModel;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Overrides layered on top of the built-in scoring model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScorerConfig {
    pub model: Option<ModelConfig>,
    pub components: Option<BTreeMap<String, ComponentConfig>>,
    pub tags: Option<TagsConfig>,
    pub keywords: Option<KeywordsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub bias: Option<f64>,
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    pub features: Option<Vec<String>>,
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagsConfig {
    pub scale: Option<f64>,
    pub iterate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsConfig {
    pub incentive: Option<Vec<String>>,
    pub pain_points: Option<BTreeMap<String, Vec<String>>>,
}

impl ScorerConfig {
    pub fn linear_model(&self) -> Result<LinearModel> {
        let mut linear = LinearModel::default();
        let Some(model) = &self.model else {
            return Ok(linear);
        };
        if let Some(bias) = model.bias {
            linear.bias = bias;
        }
        for (name, weight) in model.weights.iter().flatten() {
            let id = FeatureId::from_name(name).ok_or_else(|| {
                ScorerError::ConfigParse(format!("model.weights contains unknown feature: {name}"))
            })?;
            linear.weights.insert(id, *weight);
        }
        Ok(linear)
    }

    pub fn partition(&self) -> Result<ComponentPartition> {
        let defaults = ComponentPartition::default();
        let mut specs = defaults
            .iter()
            .map(|(component, spec)| (component, spec.clone()))
            .collect::<BTreeMap<_, _>>();

        for (key, overrides) in self.components.iter().flatten() {
            let component = Component::from_config_key(key).ok_or_else(|| {
                ScorerError::ConfigParse(format!("components contains unknown component: {key}"))
            })?;
            let Some(spec) = specs.get_mut(&component) else {
                continue;
            };
            if let Some(max_score) = overrides.max_score {
                spec.max_score = max_score;
            }
            if let Some(names) = &overrides.features {
                spec.features = names
                    .iter()
                    .map(|name| {
                        FeatureId::from_name(name).ok_or_else(|| {
                            ScorerError::ConfigParse(format!(
                                "components.{key}.features contains unknown feature: {name}"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
            }
        }

        ComponentPartition::new(specs)
    }

    pub fn thresholds(&self) -> TagThresholds {
        let defaults = TagThresholds::default();
        match &self.tags {
            Some(tags) => TagThresholds {
                scale: tags.scale.unwrap_or(defaults.scale),
                iterate: tags.iterate.unwrap_or(defaults.iterate),
            },
            None => defaults,
        }
    }

    pub fn keywords(&self) -> Keywords {
        let mut keywords = Keywords::default();
        let Some(config) = &self.keywords else {
            return keywords;
        };
        if let Some(incentive) = &config.incentive {
            keywords.incentives = incentive.clone();
        }
        for (industry, phrases) in config.pain_points.iter().flatten() {
            keywords
                .pain_points
                .insert(industry.trim().to_lowercase(), phrases.clone());
        }
        keywords
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(model) = &self.model {
            if let Some(bias) = model.bias {
                if !bias.is_finite() {
                    return Err(ScorerError::ConfigParse(
                        "model.bias must be a finite number".to_string(),
                    ));
                }
            }
            let unknown = model
                .weights
                .iter()
                .flatten()
                .filter(|(name, _)| FeatureId::from_name(name).is_none())
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(ScorerError::ConfigParse(format!(
                    "model.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
            if let Some((name, _)) = model
                .weights
                .iter()
                .flatten()
                .find(|(_, weight)| !weight.is_finite())
            {
                return Err(ScorerError::ConfigParse(format!(
                    "model.weights.{name} must be a finite number"
                )));
            }
        }

        if let Some(keywords) = &self.keywords {
            let empty = keywords
                .incentive
                .iter()
                .flatten()
                .chain(keywords.pain_points.iter().flatten().flat_map(|(_, p)| p))
                .any(|phrase| phrase.trim().is_empty());
            if empty {
                return Err(ScorerError::ConfigParse(
                    "keywords entries must be non-empty phrases".to_string(),
                ));
            }
        }

        self.thresholds().validate()?;
        self.partition()?;
        Ok(())
    }

    pub fn build_model(&self) -> Result<ScoringModel> {
        self.validate()?;
        ScoringModel::new(
            self.keywords(),
            self.linear_model()?,
            self.partition()?,
            self.thresholds(),
        )
    }
}
