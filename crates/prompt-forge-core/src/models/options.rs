// ABOUTME: Generation options model: a shared base of common fields plus a task-tagged union
// ABOUTME: Option enums parse leniently so unknown values are dropped instead of failing a load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a string does not name a known option value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOption {
    /// Option family, e.g. "tone"
    pub kind: &'static str,
    /// The rejected value
    pub value: String,
}

fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// Declares a closed option enum with a stable wire label per variant,
/// case-insensitive `FromStr` (with optional aliases) and `Display`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable wire label
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match normalize_label(s).as_str() {
                    $( $label $(| $alias)* => Ok(Self::$variant), )+
                    _ => Err(UnknownOption { kind: $kind, value: s.to_owned() }),
                }
            }
        }
    };
}

labeled_enum! {
    /// Kind of content the user is asking the model to produce
    TaskType, "task type" {
        /// Free-form assistance, no task-specific fields
        General => "general",
        /// Prose: stories, essays, poems
        Writing => "writing",
        /// Campaign and sales copy
        Marketing => "marketing",
        /// Source code
        Coding => "coding" | "code",
        /// Research summaries and reports
        Research => "research",
        /// Prompts for image generators
        Image => "image",
        /// Prompts for video generators
        Video => "video",
    }
}

labeled_enum! {
    /// Voice the output should be written in
    Tone, "tone" {
        /// Formal
        Formal => "formal",
        /// Casual
        Casual => "casual",
        /// Friendly
        Friendly => "friendly",
        /// Professional
        Professional => "professional",
        /// Persuasive
        Persuasive => "persuasive",
        /// Humorous
        Humorous => "humorous" | "funny",
        /// Authoritative
        Authoritative => "authoritative",
        /// Empathetic
        Empathetic => "empathetic",
    }
}

labeled_enum! {
    /// Target length of the output, expressed as a word range
    DetailLevel, "detail level" {
        /// 100-150 words
        Brief => "brief" | "short",
        /// 250-400 words
        Standard => "standard" | "normal" | "medium",
        /// 500-800 words
        Detailed => "detailed" | "long",
        /// 1000-1500 words
        Comprehensive => "comprehensive",
    }
}

impl DetailLevel {
    /// Inclusive word-count bounds for this level
    #[must_use]
    pub const fn word_range(&self) -> (u32, u32) {
        match self {
            Self::Brief => (100, 150),
            Self::Standard => (250, 400),
            Self::Detailed => (500, 800),
            Self::Comprehensive => (1000, 1500),
        }
    }

    /// Word range rendered as `"min-max words"`
    #[must_use]
    pub fn word_range_label(&self) -> String {
        let (min, max) = self.word_range();
        format!("{min}-{max} words")
    }
}

labeled_enum! {
    /// Structure of the model's reply
    OutputFormat, "output format" {
        /// Unstructured text
        Plain => "plain" | "text" | "plaintext",
        /// Markdown
        Markdown => "markdown" | "md",
        /// XML
        Xml => "xml",
        /// JSON
        Json => "json",
    }
}

labeled_enum! {
    /// Prose style for writing tasks
    WritingStyle, "writing style" {
        /// Descriptive
        Descriptive => "descriptive",
        /// Narrative
        Narrative => "narrative",
        /// Expository
        Expository => "expository",
        /// Persuasive
        Persuasive => "persuasive",
        /// Poetic
        Poetic => "poetic",
    }
}

labeled_enum! {
    /// Narrative perspective for writing tasks
    PointOfView, "point of view" {
        /// First person
        FirstPerson => "first-person" | "first",
        /// Second person
        SecondPerson => "second-person" | "second",
        /// Third person
        ThirdPerson => "third-person" | "third",
    }
}

labeled_enum! {
    /// Distribution channel for marketing copy
    MarketingChannel, "marketing channel" {
        /// Email campaign
        Email => "email",
        /// Social media post
        Social => "social" | "social-media",
        /// Landing page
        LandingPage => "landing-page" | "landing",
        /// Paid advertisement
        Ad => "ad" | "advertisement",
        /// Blog post
        Blog => "blog",
    }
}

labeled_enum! {
    /// Frame shape for image prompts
    AspectRatio, "aspect ratio" {
        /// Square
        Square => "1:1" | "square",
        /// Widescreen landscape
        Landscape => "16:9" | "landscape",
        /// Vertical portrait
        Portrait => "9:16" | "portrait",
        /// Classic photo
        Classic => "4:3",
        /// 35mm still
        Photo => "3:2",
    }
}

labeled_enum! {
    /// Visual style for image prompts
    StylePreset, "style preset" {
        /// Photorealistic
        Photorealistic => "photorealistic" | "realistic",
        /// Cinematic
        Cinematic => "cinematic",
        /// Digital illustration
        Illustration => "illustration",
        /// Anime
        Anime => "anime",
        /// Watercolor painting
        Watercolor => "watercolor",
        /// 3D render
        Render3d => "3d-render" | "3d",
        /// Pixel art
        PixelArt => "pixel-art",
    }
}

labeled_enum! {
    /// Camera motion for video prompts
    CameraMovement, "camera movement" {
        /// Locked-off shot
        Static => "static",
        /// Horizontal pan
        Pan => "pan",
        /// Vertical tilt
        Tilt => "tilt",
        /// Dolly in or out
        Dolly => "dolly",
        /// Tracking shot following the subject
        Tracking => "tracking",
        /// Handheld
        Handheld => "handheld",
        /// Aerial or drone shot
        Aerial => "aerial" | "drone",
        /// Optical zoom
        Zoom => "zoom",
    }
}

/// Lenient field deserializers: a value of the wrong shape becomes the
/// field's empty value instead of failing the whole options object.
mod lenient {
    use super::{Deserialize, Deserializer, FromStr};
    use serde::de::DeserializeOwned;
    use serde_json::Value;

    /// Optional enum field: anything that is not a recognised label is `None`
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(value)) => value.parse().map_or_else(
                |_| {
                    tracing::debug!(value = %value, "ignoring unknown option value");
                    None
                },
                Some,
            ),
            _ => None,
        })
    }

    /// Optional scalar field: a mistyped value is `None`
    pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| {
            serde_json::from_value(raw.clone())
                .map_err(|e| tracing::debug!(value = %raw, error = %e, "ignoring mistyped option"))
                .ok()
        }))
    }

    /// Boolean toggle: only a JSON `true` turns it on
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(matches!(Option::<Value>::deserialize(deserializer)?, Some(Value::Bool(true))))
    }

    /// String list: non-string items are dropped
    pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }
}

/// Fields shared by every task type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonOptions {
    /// Voice of the output
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub tone: Option<Tone>,
    /// Target length
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub detail: Option<DetailLevel>,
    /// Output structure
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub format: Option<OutputFormat>,
    /// Intended readers
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub audience: Option<String>,
    /// Natural language of the output
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub language: Option<String>,
    /// Free-form style rules, emitted as one directive
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient::strings"
    )]
    pub style_guidelines: Vec<String>,
    /// Sampling temperature forwarded to the model runtime
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub temperature: Option<f32>,
    /// Background material placed in its own prompt block
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub additional_context: Option<String>,
    /// Sample outputs placed in their own prompt block
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub examples: Option<String>,
}

/// Writing task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingOptions {
    /// Prose style
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub writing_style: Option<WritingStyle>,
    /// Narrative perspective
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub point_of_view: Option<PointOfView>,
}

/// Marketing task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingOptions {
    /// Distribution channel
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub channel: Option<MarketingChannel>,
    /// Action the reader should take
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub call_to_action: Option<String>,
    /// Brand personality description
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub brand_voice: Option<String>,
}

/// Coding task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingOptions {
    /// Target programming language
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub programming_language: Option<String>,
    /// Framework or library to build on
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub framework: Option<String>,
    /// Ask for unit tests alongside the code
    #[serde(default, deserialize_with = "lenient::flag")]
    pub include_tests: bool,
    /// Ask for inline comments
    #[serde(default, deserialize_with = "lenient::flag")]
    pub include_comments: bool,
}

/// Research task fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchOptions {
    /// Every claim must carry a citation
    #[serde(default, deserialize_with = "lenient::flag")]
    pub require_citations: bool,
    /// Citation style name, e.g. "APA"
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub citation_style: Option<String>,
    /// Period the research should focus on
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub time_frame: Option<String>,
}

/// Image prompt fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Frame shape
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub aspect_ratio: Option<AspectRatio>,
    /// Visual style
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub style_preset: Option<StylePreset>,
    /// Lighting description
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub lighting: Option<String>,
    /// Elements to keep out of the image
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub negative_prompt: Option<String>,
}

/// Video prompt fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOptions {
    /// Clip length in seconds
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub duration_secs: Option<u32>,
    /// Frames per second
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub frame_rate: Option<u32>,
    /// Camera motion
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub camera_movement: Option<CameraMovement>,
    /// Output resolution, e.g. "1080p"
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::value"
    )]
    pub resolution: Option<String>,
}

/// Task-specific fields, tagged by task type
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "taskType", rename_all = "camelCase")]
pub enum TaskOptions {
    /// No task-specific fields
    #[default]
    General,
    /// Writing fields
    Writing(WritingOptions),
    /// Marketing fields
    Marketing(MarketingOptions),
    /// Coding fields
    Coding(CodingOptions),
    /// Research fields
    Research(ResearchOptions),
    /// Image fields
    Image(ImageOptions),
    /// Video fields
    Video(VideoOptions),
}

impl TaskOptions {
    /// Empty task fields for the given task type
    #[must_use]
    pub fn empty(task_type: TaskType) -> Self {
        match task_type {
            TaskType::General => Self::General,
            TaskType::Writing => Self::Writing(WritingOptions::default()),
            TaskType::Marketing => Self::Marketing(MarketingOptions::default()),
            TaskType::Coding => Self::Coding(CodingOptions::default()),
            TaskType::Research => Self::Research(ResearchOptions::default()),
            TaskType::Image => Self::Image(ImageOptions::default()),
            TaskType::Video => Self::Video(VideoOptions::default()),
        }
    }

    /// Task fields of `task_type` read from a flat options object, dropping
    /// anything malformed
    fn from_value(task_type: TaskType, value: &Value) -> Self {
        fn fields<T: DeserializeOwned + Default>(value: &Value) -> T {
            serde_json::from_value(value.clone()).unwrap_or_default()
        }

        match task_type {
            TaskType::General => Self::General,
            TaskType::Writing => Self::Writing(fields(value)),
            TaskType::Marketing => Self::Marketing(fields(value)),
            TaskType::Coding => Self::Coding(fields(value)),
            TaskType::Research => Self::Research(fields(value)),
            TaskType::Image => Self::Image(fields(value)),
            TaskType::Video => Self::Video(fields(value)),
        }
    }

    /// Task type this variant belongs to
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        match self {
            Self::General => TaskType::General,
            Self::Writing(_) => TaskType::Writing,
            Self::Marketing(_) => TaskType::Marketing,
            Self::Coding(_) => TaskType::Coding,
            Self::Research(_) => TaskType::Research,
            Self::Image(_) => TaskType::Image,
            Self::Video(_) => TaskType::Video,
        }
    }
}

/// Everything that shapes one composition besides the input and system prompt
///
/// Serialized flat: common fields and task fields share one JSON object,
/// with `taskType` as the discriminator. Reading never fails on option
/// values: a missing or unknown `taskType` reads as `general` and mistyped
/// fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationOptions {
    /// Fields shared by every task type
    #[serde(flatten)]
    pub common: CommonOptions,
    /// Task-specific fields
    #[serde(flatten)]
    pub task: TaskOptions,
}

impl<'de> Deserialize<'de> for GenerationOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(Self::from_value(&value)),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(json_kind(&other)),
                &"an options object",
            )),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl GenerationOptions {
    fn from_value(value: &Value) -> Self {
        let task_type = match value.get("taskType") {
            Some(Value::String(label)) => label.parse().unwrap_or_else(|_| {
                tracing::debug!(task_type = %label, "unknown task type, using general");
                TaskType::General
            }),
            _ => TaskType::General,
        };
        Self {
            common: serde_json::from_value(value.clone()).unwrap_or_default(),
            task: TaskOptions::from_value(task_type, value),
        }
    }

    /// Options for a task type with nothing else set
    #[must_use]
    pub fn for_task(task_type: TaskType) -> Self {
        Self {
            common: CommonOptions::default(),
            task: TaskOptions::empty(task_type),
        }
    }

    /// Task type carried by these options
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task.task_type()
    }

    /// Set the tone
    #[must_use]
    pub const fn with_tone(mut self, tone: Tone) -> Self {
        self.common.tone = Some(tone);
        self
    }

    /// Set the detail level
    #[must_use]
    pub const fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.common.detail = Some(detail);
        self
    }

    /// Set the output format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.common.format = Some(format);
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.common.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!("Formal".parse::<Tone>(), Ok(Tone::Formal));
        assert_eq!(
            " landing page ".parse::<MarketingChannel>(),
            Ok(MarketingChannel::LandingPage)
        );
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert!("shouty".parse::<Tone>().is_err());
    }

    #[test]
    fn test_detail_word_ranges() {
        assert_eq!(DetailLevel::Brief.word_range_label(), "100-150 words");
        assert_eq!(DetailLevel::Comprehensive.word_range(), (1000, 1500));
    }

    #[test]
    fn test_flat_json_shape() {
        let options = GenerationOptions::for_task(TaskType::Writing)
            .with_tone(Tone::Formal)
            .with_detail(DetailLevel::Brief);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["taskType"], "writing");
        assert_eq!(value["tone"], "formal");
        assert_eq!(value["detail"], "brief");
    }

    #[test]
    fn test_unknown_values_are_dropped() {
        let json = r#"{"taskType":"image","tone":"sarcastic","format":"markdown","aspectRatio":42}"#;
        let options: GenerationOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.task_type(), TaskType::Image);
        assert_eq!(options.common.tone, None);
        assert_eq!(options.common.format, Some(OutputFormat::Markdown));
        assert_eq!(options.task, TaskOptions::Image(ImageOptions::default()));
    }

    #[test]
    fn test_missing_or_unknown_task_type_reads_as_general() {
        let options: GenerationOptions = serde_json::from_str(r#"{"tone":"formal"}"#).unwrap();
        assert_eq!(options.task_type(), TaskType::General);
        assert_eq!(options.common.tone, Some(Tone::Formal));

        let options: GenerationOptions =
            serde_json::from_str(r#"{"taskType":"poetry","detail":"brief"}"#).unwrap();
        assert_eq!(options.task_type(), TaskType::General);
        assert_eq!(options.common.detail, Some(DetailLevel::Brief));

        let options: GenerationOptions = serde_json::from_str(r#"{"taskType":"Code"}"#).unwrap();
        assert_eq!(options.task_type(), TaskType::Coding);
    }

    #[test]
    fn test_mistyped_fields_are_dropped() {
        let json = r#"{
            "taskType": "video",
            "durationSecs": "10",
            "frameRate": 24,
            "temperature": "hot",
            "audience": 7,
            "styleGuidelines": ["short sentences", 3],
            "resolution": "4k"
        }"#;
        let options: GenerationOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.common.temperature, None);
        assert_eq!(options.common.audience, None);
        assert_eq!(options.common.style_guidelines, ["short sentences"]);
        let TaskOptions::Video(video) = options.task else {
            panic!("expected video options");
        };
        assert_eq!(video.duration_secs, None);
        assert_eq!(video.frame_rate, Some(24));
        assert_eq!(video.resolution.as_deref(), Some("4k"));

        let coding: GenerationOptions =
            serde_json::from_str(r#"{"taskType":"coding","includeTests":"yes","includeComments":true}"#)
                .unwrap();
        assert_eq!(
            coding.task,
            TaskOptions::Coding(CodingOptions {
                include_comments: true,
                ..CodingOptions::default()
            })
        );
    }

    #[test]
    fn test_non_object_options_are_rejected() {
        assert!(serde_json::from_str::<GenerationOptions>("[1, 2]").is_err());
        assert_eq!(
            serde_json::from_str::<GenerationOptions>("null").unwrap(),
            GenerationOptions::default()
        );
    }
}
