// ABOUTME: Clap flags for generation options, layered over a preset and raw JSON
// ABOUTME: Precedence is preset, then --options-json, then individual flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Args;
use prompt_forge::errors::{AppError, AppResult};
use prompt_forge::models::{
    DetailLevel, GenerationOptions, OutputFormat, TaskOptions, TaskType, Tone,
};
use prompt_forge::studio::PromptStudio;

/// Flags shared by commands that take generation options
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Start from a saved preset (defaults to the user's default preset)
    #[arg(long)]
    pub preset: Option<String>,

    /// Full options as JSON, e.g. '{"taskType":"image","aspectRatio":"16:9"}'
    #[arg(long)]
    pub options_json: Option<String>,

    /// Task type
    #[arg(long)]
    pub task: Option<TaskType>,

    /// Tone
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Detail level (brief, standard, detailed, comprehensive)
    #[arg(long)]
    pub detail: Option<DetailLevel>,

    /// Output format (plain, markdown, xml, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Intended audience
    #[arg(long)]
    pub audience: Option<String>,

    /// Output language
    #[arg(long)]
    pub language: Option<String>,

    /// Style rule, repeatable
    #[arg(long = "style")]
    pub style_guidelines: Vec<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Background material
    #[arg(long)]
    pub context: Option<String>,

    /// Sample outputs to imitate
    #[arg(long)]
    pub examples: Option<String>,
}

impl OptionArgs {
    /// Whether any option flag was given
    fn has_overrides(&self) -> bool {
        self.options_json.is_some()
            || self.task.is_some()
            || self.tone.is_some()
            || self.detail.is_some()
            || self.format.is_some()
            || self.audience.is_some()
            || self.language.is_some()
            || !self.style_guidelines.is_empty()
            || self.temperature.is_some()
            || self.context.is_some()
            || self.examples.is_some()
    }

    /// Options from the flags alone, without consulting presets
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `--options-json` is not a JSON object
    pub fn apply(&self, base: GenerationOptions) -> AppResult<GenerationOptions> {
        let mut options = match &self.options_json {
            Some(raw) => serde_json::from_str::<GenerationOptions>(raw).map_err(|e| {
                AppError::invalid_input(format!("--options-json is not valid: {e}"))
            })?,
            None => base,
        };

        if let Some(task) = self.task {
            if task != options.task_type() {
                options.task = TaskOptions::empty(task);
            }
        }
        let common = &mut options.common;
        if let Some(tone) = self.tone {
            common.tone = Some(tone);
        }
        if let Some(detail) = self.detail {
            common.detail = Some(detail);
        }
        if let Some(format) = self.format {
            common.format = Some(format);
        }
        if let Some(audience) = &self.audience {
            common.audience = Some(audience.clone());
        }
        if let Some(language) = &self.language {
            common.language = Some(language.clone());
        }
        if !self.style_guidelines.is_empty() {
            common.style_guidelines.clone_from(&self.style_guidelines);
        }
        if let Some(temperature) = self.temperature {
            common.temperature = Some(temperature);
        }
        if let Some(context) = &self.context {
            common.additional_context = Some(context.clone());
        }
        if let Some(examples) = &self.examples {
            common.examples = Some(examples.clone());
        }
        Ok(options)
    }

    /// Options layered over the named preset, or the user's default preset
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown preset, `InvalidInput` for
    /// bad JSON, or a storage error
    pub async fn resolve(&self, studio: &PromptStudio, user: &str) -> AppResult<GenerationOptions> {
        let base = match &self.preset {
            Some(id) => studio.presets().get(user, id).await?.options,
            None if self.has_overrides() => GenerationOptions::default(),
            None => studio.presets().default_preset(user).await?.options,
        };
        self.apply(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_json() {
        let args = OptionArgs {
            options_json: Some(r#"{"taskType":"writing","tone":"casual"}"#.into()),
            tone: Some(Tone::Formal),
            ..OptionArgs::default()
        };
        let options = args.apply(GenerationOptions::default()).unwrap();
        assert_eq!(options.task_type(), TaskType::Writing);
        assert_eq!(options.common.tone, Some(Tone::Formal));
    }

    #[test]
    fn test_changing_task_resets_task_fields() {
        let base: GenerationOptions =
            serde_json::from_str(r#"{"taskType":"image","aspectRatio":"16:9"}"#).unwrap();
        let args = OptionArgs {
            task: Some(TaskType::Video),
            ..OptionArgs::default()
        };
        let options = args.apply(base).unwrap();
        assert_eq!(options.task, TaskOptions::empty(TaskType::Video));
    }
}
