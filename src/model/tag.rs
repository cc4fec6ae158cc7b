use crate::error::{Result, ScorerError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tag {
    #[serde(rename = "to scale")]
    Scale,
    #[serde(rename = "to iterate")]
    Iterate,
    #[serde(rename = "to kill")]
    Kill,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::Scale => "to scale",
            Tag::Iterate => "to iterate",
            Tag::Kill => "to kill",
        }
    }
}

/// Lower bounds (inclusive) of the "to scale" and "to iterate" buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagThresholds {
    pub scale: f64,
    pub iterate: f64,
}

impl Default for TagThresholds {
    fn default() -> Self {
        Self {
            scale: 70.0,
            iterate: 60.0,
        }
    }
}

impl TagThresholds {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.scale) || !(0.0..=100.0).contains(&self.iterate) {
            return Err(ScorerError::ConfigParse(
                "tags thresholds must be between 0 and 100".to_string(),
            ));
        }
        if self.iterate > self.scale {
            return Err(ScorerError::ConfigParse(format!(
                "tags.iterate ({}) must not exceed tags.scale ({})",
                self.iterate, self.scale
            )));
        }
        Ok(())
    }

    pub fn classify(&self, score: f64) -> Tag {
        if score >= self.scale {
            Tag::Scale
        } else if score >= self.iterate {
            Tag::Iterate
        } else {
            Tag::Kill
        }
    }
}
