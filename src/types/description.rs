use crate::error::{Result, ScorerError};
use serde_json::{Map, Value};

/// Stand-in industry when `external_context.industry` is absent.
pub const UNKNOWN_INDUSTRY: &str = "unknown";

/// Key used by the HTTP-style envelope `{"vision_json": {...}}`.
pub const ENVELOPE_KEY: &str = "vision_json";

/// Typed view over the vision description of one creative.
///
/// Categorical fields keep the raw string; a non-string value becomes an
/// empty string and later encodes like any other unmapped category.
#[derive(Debug, Clone, PartialEq)]
pub struct CreativeDescription {
    pub layout: Layout,
    pub style: Style,
    pub text: TextElements,
    pub structure: StructuralCues,
    pub visuals: VisualElements,
    pub emotion: EmotionTone,
    pub context: ExternalContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub primary_focus: String,
    pub framing: String,
    pub product_size_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub contrast_level: String,
    pub brightness_level: String,
    pub creative_style: String,
    pub ugc_signals: bool,
    pub studio_signals: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElements {
    pub text_blocks: f64,
    pub text_density: String,
    pub main_headline_present: bool,
    pub cta_present: bool,
    pub visible_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuralCues {
    pub hierarchy_clarity: String,
    pub visual_noise_level: String,
    pub whitespace_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualElements {
    pub has_human: bool,
    pub face_visible: bool,
    pub background_clarity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionTone {
    pub emotion_visible: String,
    pub mood: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalContext {
    /// Verbatim from input, or [`UNKNOWN_INDUSTRY`].
    pub industry: String,
    pub goal: String,
}

impl ExternalContext {
    pub fn normalized_industry(&self) -> String {
        self.industry.trim().to_lowercase()
    }

    pub fn normalized_goal(&self) -> String {
        self.goal.trim().to_lowercase()
    }
}

impl CreativeDescription {
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| ScorerError::invalid("description", "a JSON object"))?;

        let layout = Section::require(root, "layout")?;
        let style = Section::require(root, "style")?;
        let text = Section::require(root, "text_elements")?;
        let structure = Section::require(root, "structural_cues")?;
        let visuals = Section::require(root, "visual_elements")?;
        let emotion = Section::require(root, "emotion_tone")?;
        let context = Section::require(root, "external_context")?;

        Ok(Self {
            layout: Layout {
                primary_focus: layout.category("primary_focus")?,
                framing: layout.category("framing")?,
                product_size_ratio: layout.optional_number("product_size_ratio")?,
            },
            style: Style {
                contrast_level: style.category("contrast_level")?,
                brightness_level: style.category("brightness_level")?,
                creative_style: style.category("creative_style")?,
                ugc_signals: style.flag("ugc_signals")?,
                studio_signals: style.flag("studio_signals")?,
            },
            text: TextElements {
                text_blocks: text.number("text_blocks")?,
                text_density: text.category("text_density")?,
                main_headline_present: text.flag("main_headline_present")?,
                cta_present: text.flag("cta_present")?,
                visible_words: text.words("visible_words")?,
            },
            structure: StructuralCues {
                hierarchy_clarity: structure.category("hierarchy_clarity")?,
                visual_noise_level: structure.category("visual_noise_level")?,
                whitespace_ratio: structure.optional_number("whitespace_ratio")?,
            },
            visuals: VisualElements {
                has_human: visuals.flag("has_human")?,
                face_visible: visuals.flag("face_visible")?,
                background_clarity: visuals.category("background_clarity")?,
            },
            emotion: EmotionTone {
                emotion_visible: emotion.category("emotion_visible")?,
                mood: emotion.category("mood")?,
            },
            context: ExternalContext {
                industry: context
                    .optional_text("industry")?
                    .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string()),
                goal: context.text("goal")?,
            },
        })
    }
}

/// Accepts either a bare description or the `{"vision_json": {...}}` envelope.
pub fn unwrap_envelope(value: &Value) -> &Value {
    match value.as_object() {
        Some(map) if !map.contains_key("layout") => map.get(ENVELOPE_KEY).unwrap_or(value),
        _ => value,
    }
}

struct Section<'a> {
    name: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    fn require(root: &'a Map<String, Value>, name: &'static str) -> Result<Self> {
        let fields = root
            .get(name)
            .ok_or_else(|| ScorerError::missing(name))?
            .as_object()
            .ok_or_else(|| ScorerError::invalid(name, "an object"))?;
        Ok(Self { name, fields })
    }

    fn path(&self, key: &str) -> String {
        format!("{}.{}", self.name, key)
    }

    fn get(&self, key: &str) -> Result<&'a Value> {
        self.fields
            .get(key)
            .ok_or_else(|| ScorerError::missing(self.path(key)))
    }

    fn category(&self, key: &str) -> Result<String> {
        Ok(self.get(key)?.as_str().unwrap_or_default().to_string())
    }

    fn text(&self, key: &str) -> Result<String> {
        self.get(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ScorerError::invalid(self.path(key), "a string"))
    }

    fn optional_text(&self, key: &str) -> Result<Option<String>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(ScorerError::invalid(self.path(key), "a string")),
        }
    }

    fn flag(&self, key: &str) -> Result<bool> {
        Ok(truthy(self.get(key)?))
    }

    fn number(&self, key: &str) -> Result<f64> {
        self.get(key)?
            .as_f64()
            .ok_or_else(|| ScorerError::invalid(self.path(key), "a number"))
    }

    fn optional_number(&self, key: &str) -> Result<f64> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(0.0),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| ScorerError::invalid(self.path(key), "a number")),
        }
    }

    fn words(&self, key: &str) -> Result<Vec<String>> {
        let items = self
            .get(key)?
            .as_array()
            .ok_or_else(|| ScorerError::invalid(self.path(key), "an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ScorerError::invalid(self.path(key), "an array of strings"))
            })
            .collect()
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
