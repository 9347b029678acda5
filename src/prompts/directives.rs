// ABOUTME: Directive builders mapping each option value to one imperative sentence
// ABOUTME: Pure lookup tables; unset or blank values contribute nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Directive Builders
//!
//! Each option key yields at most one [`Directive`]. Common options come
//! first in a fixed order, followed by the fields of the active task type.
//! Directives address disjoint aspects of the output, so their order only
//! affects where they appear in the prompt.

use crate::models::{
    AspectRatio, CameraMovement, CodingOptions, CommonOptions, DetailLevel, GenerationOptions,
    ImageOptions, MarketingChannel, MarketingOptions, OutputFormat, PointOfView, ResearchOptions,
    StylePreset, TaskOptions, Tone, VideoOptions, WritingOptions, WritingStyle,
};
use serde::Serialize;

/// One instruction sentence contributed by one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Option key that produced it (camelCase, as serialized)
    pub key: &'static str,
    /// Sentence placed in the prompt
    pub text: String,
}

impl Directive {
    fn new(key: &'static str, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

/// Trimmed value, or `None` when unset or blank
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// All directives for `options`, common fields first
#[must_use]
pub fn build_directives(options: &GenerationOptions) -> Vec<Directive> {
    let mut directives = common_directives(&options.common);
    directives.extend(task_directives(&options.task));
    directives
}

/// Directives for the fields shared by every task type
#[must_use]
pub fn common_directives(common: &CommonOptions) -> Vec<Directive> {
    [
        common.tone.map(tone_directive),
        common.detail.map(detail_directive),
        common.format.map(format_directive),
        audience_directive(common.audience.as_ref()),
        language_directive(common.language.as_ref()),
        style_guidelines_directive(&common.style_guidelines),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Directives for the active task type's fields
#[must_use]
pub fn task_directives(task: &TaskOptions) -> Vec<Directive> {
    match task {
        TaskOptions::General => Vec::new(),
        TaskOptions::Writing(writing) => writing_directives(writing),
        TaskOptions::Marketing(marketing) => marketing_directives(marketing),
        TaskOptions::Coding(coding) => coding_directives(coding),
        TaskOptions::Research(research) => research_directives(research),
        TaskOptions::Image(image) => image_directives(image),
        TaskOptions::Video(video) => video_directives(video),
    }
}

/// Tone sentence
#[must_use]
pub fn tone_directive(tone: Tone) -> Directive {
    let text = match tone {
        Tone::Formal => "Use a formal tone with precise vocabulary and no slang or contractions.",
        Tone::Casual => "Use a casual, conversational tone, as if talking to a friend.",
        Tone::Friendly => "Use a warm and approachable tone.",
        Tone::Professional => "Use a professional tone that is clear, confident and businesslike.",
        Tone::Persuasive => "Use a persuasive tone that builds a compelling case for action.",
        Tone::Humorous => "Use a light, humorous tone with tasteful wit where it fits.",
        Tone::Authoritative => "Use an authoritative tone that conveys expertise and certainty.",
        Tone::Empathetic => {
            "Use an empathetic tone that acknowledges the reader's feelings and perspective."
        }
    };
    Directive::new("tone", text)
}

/// Length sentence with the numeric word range
#[must_use]
pub fn detail_directive(detail: DetailLevel) -> Directive {
    Directive::new(
        "detail",
        format!(
            "The response must be {} long; stay inside this range.",
            detail.word_range_label()
        ),
    )
}

/// Structure sentence
#[must_use]
pub fn format_directive(format: OutputFormat) -> Directive {
    let text = match format {
        OutputFormat::Plain => "Return plain text only, with no Markdown, HTML or code fences.",
        OutputFormat::Markdown => {
            "Format the response in Markdown, using headings, lists and emphasis where they aid readability."
        }
        OutputFormat::Xml => "Structure the response as well-formed XML with a single root element.",
        OutputFormat::Json => {
            "Return the response as valid JSON only, with no commentary outside the JSON."
        }
    };
    Directive::new("format", text)
}

/// Audience sentence
#[must_use]
pub fn audience_directive(audience: Option<&String>) -> Option<Directive> {
    non_blank(audience)
        .map(|audience| Directive::new("audience", format!("Write for this audience: {audience}.")))
}

/// Output language sentence
#[must_use]
pub fn language_directive(language: Option<&String>) -> Option<Directive> {
    non_blank(language)
        .map(|language| Directive::new("language", format!("Write the response in {language}.")))
}

/// Free-form style rules folded into one sentence
#[must_use]
pub fn style_guidelines_directive(guidelines: &[String]) -> Option<Directive> {
    let rules: Vec<&str> = guidelines
        .iter()
        .map(|rule| rule.trim().trim_end_matches('.'))
        .filter(|rule| !rule.is_empty())
        .collect();
    if rules.is_empty() {
        return None;
    }
    Some(Directive::new(
        "styleGuidelines",
        format!("Follow these style guidelines: {}.", rules.join("; ")),
    ))
}

/// Writing task directives
#[must_use]
pub fn writing_directives(writing: &WritingOptions) -> Vec<Directive> {
    let style = writing.writing_style.map(|style| {
        let text = match style {
            WritingStyle::Descriptive => "Use a descriptive style rich in sensory detail.",
            WritingStyle::Narrative => "Use a narrative style that unfolds as a sequence of events.",
            WritingStyle::Expository => "Use an expository style that explains clearly and logically.",
            WritingStyle::Persuasive => "Use a persuasive style that argues toward a clear position.",
            WritingStyle::Poetic => "Use a poetic style with imagery, rhythm and careful word choice.",
        };
        Directive::new("writingStyle", text)
    });
    let point_of_view = writing.point_of_view.map(|pov| {
        let text = match pov {
            PointOfView::FirstPerson => "Write in the first person (I, we).",
            PointOfView::SecondPerson => "Write in the second person, addressing the reader as you.",
            PointOfView::ThirdPerson => "Write in the third person.",
        };
        Directive::new("pointOfView", text)
    });
    [style, point_of_view].into_iter().flatten().collect()
}

/// Marketing task directives
#[must_use]
pub fn marketing_directives(marketing: &MarketingOptions) -> Vec<Directive> {
    let channel = marketing.channel.map(|channel| {
        let text = match channel {
            MarketingChannel::Email => {
                "Write it as a marketing email with a subject line and a scannable body."
            }
            MarketingChannel::Social => {
                "Write it as a social media post: short, punchy and easy to share."
            }
            MarketingChannel::LandingPage => {
                "Write it as landing page copy with a headline, supporting sections and a closing pitch."
            }
            MarketingChannel::Ad => "Write it as advertisement copy that fits a small ad slot.",
            MarketingChannel::Blog => "Write it as a blog post with an engaging introduction.",
        };
        Directive::new("channel", text)
    });
    let call_to_action = non_blank(marketing.call_to_action.as_ref()).map(|cta| {
        Directive::new(
            "callToAction",
            format!("End with this call to action: {cta}."),
        )
    });
    let brand_voice = non_blank(marketing.brand_voice.as_ref())
        .map(|voice| Directive::new("brandVoice", format!("Match this brand voice: {voice}.")));
    [channel, call_to_action, brand_voice]
        .into_iter()
        .flatten()
        .collect()
}

/// Coding task directives
#[must_use]
pub fn coding_directives(coding: &CodingOptions) -> Vec<Directive> {
    let language = non_blank(coding.programming_language.as_ref()).map(|language| {
        Directive::new(
            "programmingLanguage",
            format!("Write the code in {language}."),
        )
    });
    let framework = non_blank(coding.framework.as_ref()).map(|framework| {
        Directive::new(
            "framework",
            format!("Build on {framework} and follow its conventions."),
        )
    });
    let tests = coding.include_tests.then(|| {
        Directive::new(
            "includeTests",
            "Include unit tests that cover the main behaviour and edge cases.",
        )
    });
    let comments = coding.include_comments.then(|| {
        Directive::new(
            "includeComments",
            "Add concise comments explaining non-obvious logic.",
        )
    });
    [language, framework, tests, comments]
        .into_iter()
        .flatten()
        .collect()
}

/// Research task directives
#[must_use]
pub fn research_directives(research: &ResearchOptions) -> Vec<Directive> {
    let citations = research.require_citations.then(|| {
        Directive::new(
            "requireCitations",
            "Cite a credible source for every factual claim.",
        )
    });
    let style = non_blank(research.citation_style.as_ref()).map(|style| {
        Directive::new(
            "citationStyle",
            format!("Format citations in {style} style."),
        )
    });
    let time_frame = non_blank(research.time_frame.as_ref()).map(|period| {
        Directive::new(
            "timeFrame",
            format!("Focus on sources and developments from {period}."),
        )
    });
    [citations, style, time_frame]
        .into_iter()
        .flatten()
        .collect()
}

/// Image prompt directives
#[must_use]
pub fn image_directives(image: &ImageOptions) -> Vec<Directive> {
    let aspect = image.aspect_ratio.map(|ratio| {
        let shape = match ratio {
            AspectRatio::Square => "square",
            AspectRatio::Landscape => "widescreen landscape",
            AspectRatio::Portrait => "vertical portrait",
            AspectRatio::Classic | AspectRatio::Photo => "standard photo",
        };
        Directive::new(
            "aspectRatio",
            format!("Compose for a {} ({shape}) frame.", ratio.as_str()),
        )
    });
    let style = image.style_preset.map(|preset| {
        let text = match preset {
            StylePreset::Photorealistic => {
                "Render it photorealistically, as if captured with a professional camera."
            }
            StylePreset::Cinematic => "Give it a cinematic look with dramatic framing and colour grading.",
            StylePreset::Illustration => "Render it as a clean digital illustration.",
            StylePreset::Anime => "Render it in an anime art style.",
            StylePreset::Watercolor => "Render it as a watercolor painting with soft, bleeding edges.",
            StylePreset::Render3d => "Render it as a polished 3D scene.",
            StylePreset::PixelArt => "Render it as pixel art with a limited palette.",
        };
        Directive::new("stylePreset", text)
    });
    let lighting = non_blank(image.lighting.as_ref())
        .map(|lighting| Directive::new("lighting", format!("Lighting: {lighting}.")));
    let negative = non_blank(image.negative_prompt.as_ref()).map(|excluded| {
        Directive::new(
            "negativePrompt",
            format!("Keep these out of the image: {excluded}."),
        )
    });
    [aspect, style, lighting, negative]
        .into_iter()
        .flatten()
        .collect()
}

/// Video prompt directives
#[must_use]
pub fn video_directives(video: &VideoOptions) -> Vec<Directive> {
    let duration = video.duration_secs.filter(|secs| *secs > 0).map(|secs| {
        Directive::new(
            "durationSecs",
            format!("Describe a clip lasting about {secs} seconds."),
        )
    });
    let frame_rate = video.frame_rate.filter(|fps| *fps > 0).map(|fps| {
        Directive::new("frameRate", format!("Target {fps} frames per second."))
    });
    let camera = video.camera_movement.map(|movement| {
        let text = match movement {
            CameraMovement::Static => "Keep the camera static on a locked-off shot.",
            CameraMovement::Pan => "Use a slow horizontal pan.",
            CameraMovement::Tilt => "Use a vertical tilt to reveal the subject.",
            CameraMovement::Dolly => "Use a smooth dolly move toward or away from the subject.",
            CameraMovement::Tracking => "Use a tracking shot that follows the subject.",
            CameraMovement::Handheld => "Use handheld camera movement for an immediate feel.",
            CameraMovement::Aerial => "Use an aerial drone shot.",
            CameraMovement::Zoom => "Use a gradual zoom.",
        };
        Directive::new("cameraMovement", text)
    });
    let resolution = non_blank(video.resolution.as_ref())
        .map(|resolution| Directive::new("resolution", format!("Output resolution: {resolution}.")));
    [duration, frame_rate, camera, resolution]
        .into_iter()
        .flatten()
        .collect()
}
