use crate::error::{Result, ScorerError};
use crate::keywords::{
    contains_any, Keywords, DISCOUNT_WORDS, GUARANTEE_WORDS, POP_RIDE_PHRASES, QUALITY_WORDS,
};
use crate::types::description::CreativeDescription;
use std::fmt;
use tracing::warn;

pub const FEATURE_COUNT: usize = 30;

const LEVELS: [(&str, f64); 3] = [("low", 0.0), ("medium", 1.0), ("high", 2.0)];
const CLARITY: [(&str, f64); 3] = [("unclear", 0.0), ("medium", 1.0), ("clear", 2.0)];
const BACKGROUND: [(&str, f64); 3] = [("clean", 0.0), ("medium", 1.0), ("busy", 2.0)];
const EMOTION: [(&str, f64); 3] = [("smiling", 1.0), ("neutral", 0.0), ("serious", 0.0)];

const FRAMINGS: [&str; 3] = ["close-up", "medium", "far"];
const CREATIVE_STYLES: [&str; 3] = ["studio", "ugc", "infographic"];

/// The 30 model inputs, declared in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureId {
    PrimaryFocus,
    FramingCloseUp,
    FramingMedium,
    FramingFar,
    ProductSizeRatio,
    Contrast,
    Brightness,
    TextBlocks,
    TextDensity,
    MainHeadline,
    HierarchyClarity,
    VisualNoise,
    WhitespaceRatio,
    CtaPresent,
    DiscountWord,
    QualityWord,
    GuaranteeWord,
    StyleStudio,
    StyleUgc,
    StyleInfographic,
    UgcSignals,
    StudioSignals,
    HasHuman,
    FaceVisible,
    BackgroundClarity,
    EmotionSmiling,
    MoodComfortable,
    PopRideKeyword,
    PainPointMatch,
    IncentiveMatch,
}

impl FeatureId {
    pub const ALL: [FeatureId; FEATURE_COUNT] = [
        FeatureId::PrimaryFocus,
        FeatureId::FramingCloseUp,
        FeatureId::FramingMedium,
        FeatureId::FramingFar,
        FeatureId::ProductSizeRatio,
        FeatureId::Contrast,
        FeatureId::Brightness,
        FeatureId::TextBlocks,
        FeatureId::TextDensity,
        FeatureId::MainHeadline,
        FeatureId::HierarchyClarity,
        FeatureId::VisualNoise,
        FeatureId::WhitespaceRatio,
        FeatureId::CtaPresent,
        FeatureId::DiscountWord,
        FeatureId::QualityWord,
        FeatureId::GuaranteeWord,
        FeatureId::StyleStudio,
        FeatureId::StyleUgc,
        FeatureId::StyleInfographic,
        FeatureId::UgcSignals,
        FeatureId::StudioSignals,
        FeatureId::HasHuman,
        FeatureId::FaceVisible,
        FeatureId::BackgroundClarity,
        FeatureId::EmotionSmiling,
        FeatureId::MoodComfortable,
        FeatureId::PopRideKeyword,
        FeatureId::PainPointMatch,
        FeatureId::IncentiveMatch,
    ];

    /// Identifier used by weight tables and configuration files.
    pub fn name(self) -> &'static str {
        match self {
            FeatureId::PrimaryFocus => "F1",
            FeatureId::FramingCloseUp => "F2",
            FeatureId::FramingMedium => "F3",
            FeatureId::FramingFar => "F4",
            FeatureId::ProductSizeRatio => "F5",
            FeatureId::Contrast => "F6",
            FeatureId::Brightness => "F7",
            FeatureId::TextBlocks => "F8",
            FeatureId::TextDensity => "F9",
            FeatureId::MainHeadline => "F10",
            FeatureId::HierarchyClarity => "F11",
            FeatureId::VisualNoise => "F12",
            FeatureId::WhitespaceRatio => "F13",
            FeatureId::CtaPresent => "F14",
            FeatureId::DiscountWord => "F15",
            FeatureId::QualityWord => "F16",
            FeatureId::GuaranteeWord => "F17",
            FeatureId::StyleStudio => "F18",
            FeatureId::StyleUgc => "F19",
            FeatureId::StyleInfographic => "F20",
            FeatureId::UgcSignals => "F21",
            FeatureId::StudioSignals => "F22",
            FeatureId::HasHuman => "F23",
            FeatureId::FaceVisible => "F24",
            FeatureId::BackgroundClarity => "F25",
            FeatureId::EmotionSmiling => "F26",
            FeatureId::MoodComfortable => "F27",
            FeatureId::PopRideKeyword => "F28",
            FeatureId::PainPointMatch => "F29_PainPointMatch",
            FeatureId::IncentiveMatch => "F30_IncentiveMatch",
        }
    }

    /// Short human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            FeatureId::PrimaryFocus => "primary focus on product",
            FeatureId::FramingCloseUp => "framing: close-up",
            FeatureId::FramingMedium => "framing: medium",
            FeatureId::FramingFar => "framing: far",
            FeatureId::ProductSizeRatio => "product size ratio",
            FeatureId::Contrast => "contrast level",
            FeatureId::Brightness => "brightness level",
            FeatureId::TextBlocks => "text blocks",
            FeatureId::TextDensity => "text density",
            FeatureId::MainHeadline => "main headline present",
            FeatureId::HierarchyClarity => "hierarchy clarity",
            FeatureId::VisualNoise => "visual noise level",
            FeatureId::WhitespaceRatio => "whitespace ratio",
            FeatureId::CtaPresent => "cta present",
            FeatureId::DiscountWord => "discount wording",
            FeatureId::QualityWord => "quality wording",
            FeatureId::GuaranteeWord => "guarantee wording",
            FeatureId::StyleStudio => "style: studio",
            FeatureId::StyleUgc => "style: ugc",
            FeatureId::StyleInfographic => "style: infographic",
            FeatureId::UgcSignals => "ugc signals",
            FeatureId::StudioSignals => "studio signals",
            FeatureId::HasHuman => "human visible",
            FeatureId::FaceVisible => "face visible",
            FeatureId::BackgroundClarity => "background clarity",
            FeatureId::EmotionSmiling => "smiling",
            FeatureId::MoodComfortable => "comfortable mood",
            FeatureId::PopRideKeyword => "pop/ride keyword",
            FeatureId::PainPointMatch => "industry pain point",
            FeatureId::IncentiveMatch => "purchase incentive",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Continuous features passed through unchanged from the description.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            FeatureId::ProductSizeRatio | FeatureId::TextBlocks | FeatureId::WhitespaceRatio
        )
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Feature values stored in [`FeatureId::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn get(&self, id: FeatureId) -> f64 {
        self.values[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        FeatureId::ALL
            .iter()
            .zip(self.values.iter())
            .map(|(id, value)| (*id, *value))
    }

    #[cfg(test)]
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }
}

/// Collects values in schema order and refuses anything else.
#[derive(Debug, Default)]
struct FeatureVectorBuilder {
    values: Vec<f64>,
}

impl FeatureVectorBuilder {
    fn push(&mut self, id: FeatureId, value: f64) -> Result<()> {
        let position = self.values.len();
        match FeatureId::ALL.get(position) {
            Some(expected) if *expected == id => {
                self.values.push(value);
                Ok(())
            }
            expected => Err(ScorerError::FeatureShapeMismatch {
                expected: format!(
                    "{} at position {}",
                    expected.map_or("end of vector", |id| id.name()),
                    position
                ),
                found: id.name().to_string(),
            }),
        }
    }

    fn push_one_hot(
        &mut self,
        ids: [FeatureId; 3],
        value: &str,
        categories: [&str; 3],
    ) -> Result<()> {
        for (id, category) in ids.into_iter().zip(categories) {
            self.push(id, flag(value == category))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<FeatureVector> {
        let values: [f64; FEATURE_COUNT] = self.values.try_into().map_err(|values: Vec<f64>| {
            ScorerError::FeatureShapeMismatch {
                expected: format!("{FEATURE_COUNT} features"),
                found: format!("{} features", values.len()),
            }
        })?;
        Ok(FeatureVector { values })
    }
}

/// Unmapped categories encode as 0 rather than failing.
fn ordinal(value: &str, table: &[(&str, f64)]) -> f64 {
    table
        .iter()
        .find(|(category, _)| *category == value)
        .map_or(0.0, |(_, encoded)| *encoded)
}

fn flag(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

pub fn extract(description: &CreativeDescription, keywords: &Keywords) -> Result<FeatureVector> {
    let words = description
        .text
        .visible_words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let industry = description.context.normalized_industry();
    let pain_point_match = match keywords.pain_points_for(&industry) {
        Some(phrases) => contains_any(&words, phrases),
        None => {
            warn!(industry = %industry, "industry has no pain-point dictionary");
            false
        }
    };

    let layout = &description.layout;
    let style = &description.style;
    let text = &description.text;
    let structure = &description.structure;
    let visuals = &description.visuals;
    let emotion = &description.emotion;

    let mut builder = FeatureVectorBuilder::default();
    builder.push(FeatureId::PrimaryFocus, flag(layout.primary_focus == "product"))?;
    builder.push_one_hot(
        [
            FeatureId::FramingCloseUp,
            FeatureId::FramingMedium,
            FeatureId::FramingFar,
        ],
        &layout.framing,
        FRAMINGS,
    )?;
    builder.push(FeatureId::ProductSizeRatio, layout.product_size_ratio)?;
    builder.push(FeatureId::Contrast, ordinal(&style.contrast_level, &LEVELS))?;
    builder.push(FeatureId::Brightness, ordinal(&style.brightness_level, &LEVELS))?;

    builder.push(FeatureId::TextBlocks, text.text_blocks)?;
    builder.push(FeatureId::TextDensity, ordinal(&text.text_density, &LEVELS))?;
    builder.push(FeatureId::MainHeadline, flag(text.main_headline_present))?;
    builder.push(
        FeatureId::HierarchyClarity,
        ordinal(&structure.hierarchy_clarity, &CLARITY),
    )?;
    builder.push(
        FeatureId::VisualNoise,
        ordinal(&structure.visual_noise_level, &LEVELS),
    )?;
    builder.push(FeatureId::WhitespaceRatio, structure.whitespace_ratio)?;

    builder.push(FeatureId::CtaPresent, flag(text.cta_present))?;
    builder.push(FeatureId::DiscountWord, flag(contains_any(&words, &DISCOUNT_WORDS)))?;
    builder.push(FeatureId::QualityWord, flag(contains_any(&words, &QUALITY_WORDS)))?;
    builder.push(
        FeatureId::GuaranteeWord,
        flag(contains_any(&words, &GUARANTEE_WORDS)),
    )?;

    builder.push_one_hot(
        [
            FeatureId::StyleStudio,
            FeatureId::StyleUgc,
            FeatureId::StyleInfographic,
        ],
        &style.creative_style,
        CREATIVE_STYLES,
    )?;
    builder.push(FeatureId::UgcSignals, flag(style.ugc_signals))?;
    builder.push(FeatureId::StudioSignals, flag(style.studio_signals))?;

    builder.push(FeatureId::HasHuman, flag(visuals.has_human))?;
    builder.push(FeatureId::FaceVisible, flag(visuals.face_visible))?;
    builder.push(
        FeatureId::BackgroundClarity,
        ordinal(&visuals.background_clarity, &BACKGROUND),
    )?;
    builder.push(
        FeatureId::EmotionSmiling,
        ordinal(&emotion.emotion_visible, &EMOTION),
    )?;
    builder.push(
        FeatureId::MoodComfortable,
        flag(emotion.mood.contains("comfortable")),
    )?;
    builder.push(
        FeatureId::PopRideKeyword,
        flag(contains_any(&words, &POP_RIDE_PHRASES)),
    )?;

    builder.push(FeatureId::PainPointMatch, flag(pain_point_match))?;
    builder.push(
        FeatureId::IncentiveMatch,
        flag(contains_any(&words, &keywords.incentives)),
    )?;

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::description::tests::sample;
    use serde_json::{json, Value};

    fn features_of(value: &Value) -> FeatureVector {
        let description = CreativeDescription::from_value(value).expect("should parse");
        extract(&description, &Keywords::default()).expect("should extract")
    }

    #[test]
    fn identifiers_are_unique_and_ordered() {
        for (position, id) in FeatureId::ALL.iter().enumerate() {
            assert_eq!(id.index(), position);
            assert_eq!(FeatureId::from_name(id.name()), Some(*id));
        }
        assert_eq!(FeatureId::ALL[28].name(), "F29_PainPointMatch");
        assert_eq!(FeatureId::ALL[29].name(), "F30_IncentiveMatch");
        assert_eq!(FeatureId::from_name("F31"), None);
    }

    #[test]
    fn sample_extracts_expected_values() {
        let features = features_of(&sample());
        assert_eq!(features.iter().count(), FEATURE_COUNT);

        let expected = [
            ("F1", 1.0),
            ("F2", 1.0),
            ("F3", 0.0),
            ("F4", 0.0),
            ("F5", 0.4),
            ("F6", 2.0),
            ("F7", 1.0),
            ("F8", 3.0),
            ("F9", 0.0),
            ("F10", 1.0),
            ("F11", 2.0),
            ("F12", 0.0),
            ("F13", 0.35),
            ("F14", 1.0),
            ("F15", 1.0),
            ("F16", 1.0),
            ("F17", 0.0),
            ("F18", 0.0),
            ("F19", 1.0),
            ("F20", 0.0),
            ("F21", 1.0),
            ("F22", 0.0),
            ("F23", 1.0),
            ("F24", 1.0),
            ("F25", 0.0),
            ("F26", 1.0),
            ("F27", 1.0),
            ("F28", 1.0),
            ("F29_PainPointMatch", 1.0),
            ("F30_IncentiveMatch", 1.0),
        ];
        let actual = features
            .iter()
            .map(|(id, value)| (id.name(), value))
            .collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn unmapped_categories_encode_as_zero() {
        let mut value = sample();
        value["layout"]["framing"] = json!("panoramic");
        value["style"]["contrast_level"] = json!("extreme");
        value["style"]["creative_style"] = json!("collage");
        value["visual_elements"]["background_clarity"] = json!("foggy");
        value["emotion_tone"]["emotion_visible"] = json!("surprised");

        let features = features_of(&value);
        for id in [
            FeatureId::FramingCloseUp,
            FeatureId::FramingMedium,
            FeatureId::FramingFar,
            FeatureId::Contrast,
            FeatureId::StyleStudio,
            FeatureId::StyleUgc,
            FeatureId::StyleInfographic,
            FeatureId::BackgroundClarity,
            FeatureId::EmotionSmiling,
        ] {
            assert_eq!(features.get(id), 0.0, "{id}");
        }
    }

    #[test]
    fn unknown_industry_never_matches_pain_points() {
        let mut value = sample();
        value["text_elements"]["visible_words"] = json!(["rides", "taille", "bug", "inconfort"]);
        for industry in ["unknown", "automotive", ""] {
            value["external_context"]["industry"] = json!(industry);
            assert_eq!(features_of(&value).get(FeatureId::PainPointMatch), 0.0);
        }
    }

    #[test]
    fn keyword_matching_ignores_case() {
        let mut upper = sample();
        upper["text_elements"]["visible_words"] = json!(["SALE", "Now"]);
        let mut lower = sample();
        lower["text_elements"]["visible_words"] = json!(["sale", "now"]);

        let upper = features_of(&upper);
        let lower = features_of(&lower);
        assert_eq!(
            upper.get(FeatureId::IncentiveMatch),
            lower.get(FeatureId::IncentiveMatch)
        );
        assert_eq!(upper.get(FeatureId::DiscountWord), 1.0);
        assert_eq!(lower.get(FeatureId::DiscountWord), 1.0);

        let mut shouted = sample();
        shouted["text_elements"]["visible_words"] = json!(["SHOP", "Now"]);
        assert_eq!(features_of(&shouted).get(FeatureId::IncentiveMatch), 1.0);
    }

    #[test]
    fn keyword_categories_match_independently() {
        let mut value = sample();
        value["text_elements"]["visible_words"] = json!(["garantie", "qualité", "deal"]);
        let features = features_of(&value);
        assert_eq!(features.get(FeatureId::GuaranteeWord), 1.0);
        assert_eq!(features.get(FeatureId::QualityWord), 1.0);
        assert_eq!(features.get(FeatureId::DiscountWord), 1.0);
        assert_eq!(features.get(FeatureId::IncentiveMatch), 1.0);
        assert_eq!(features.get(FeatureId::PopRideKeyword), 0.0);
    }

    #[test]
    fn pop_ride_phrase_may_span_joined_words() {
        let mut value = sample();
        value["text_elements"]["visible_words"] = json!(["Ride", "Moi"]);
        assert_eq!(features_of(&value).get(FeatureId::PopRideKeyword), 1.0);
    }

    #[test]
    fn builder_rejects_out_of_order_push() {
        let mut builder = FeatureVectorBuilder::default();
        let err = builder
            .push(FeatureId::Contrast, 1.0)
            .expect_err("contrast is not first");
        assert!(matches!(err, ScorerError::FeatureShapeMismatch { .. }));
        assert!(err.to_string().contains("F1 at position 0"));
    }

    #[test]
    fn builder_rejects_short_vector() {
        let mut builder = FeatureVectorBuilder::default();
        builder
            .push(FeatureId::PrimaryFocus, 1.0)
            .expect("first push is in order");
        let err = builder.finish().expect_err("one feature is not a full vector");
        assert!(err.to_string().contains("found 1 features"));
    }
}
