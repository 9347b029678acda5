// ABOUTME: Normalizes raw model output before it is shown or stored
// ABOUTME: Drops echoed word-count lines and re-fences structured formats with a labeled block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::OutputFormat;
use regex::{Regex, RegexSet, RegexSetBuilder};

/// Lines the model adds to report its own length
const META_LINE_PATTERNS: &[&str] = &[
    r"^\W*word\s*count\W*[:=\-]?\s*(?:approx\.?\s*|approximately\s*|about\s*|~)?\d+",
    r"^\W*(?:total\s+)?words?\s*[:=]\s*\d+",
    r"^\W*\(?\s*(?:approx\.?\s*|approximately\s+|about\s+|~)?\d+\s+words?\s*\)?\W*$",
    r"^\W*(?:this|the)\s+(?:response|text|piece|answer|output)\s+(?:is|contains|has)\s+(?:approximately\s+|about\s+|exactly\s+|roughly\s+)?\d+\s+words",
];

/// Compiled clean-up rules
#[derive(Debug, Clone)]
pub struct ResponseCleaner {
    meta_lines: RegexSet,
    outer_fence: Regex,
}

impl ResponseCleaner {
    /// Compile the clean-up patterns
    ///
    /// # Errors
    ///
    /// Returns an internal error if a built-in pattern fails to compile
    pub fn new() -> AppResult<Self> {
        let meta_lines = RegexSetBuilder::new(META_LINE_PATTERNS)
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::internal(format!("invalid meta-line pattern: {e}")))?;
        let outer_fence = Regex::new(r"(?s)\A```[A-Za-z0-9_+\-]*[ \t]*\r?\n(.*?)\r?\n?```\s*\z")
            .map_err(|e| AppError::internal(format!("invalid fence pattern: {e}")))?;
        Ok(Self {
            meta_lines,
            outer_fence,
        })
    }

    /// Remove lines echoing word-count metadata
    #[must_use]
    pub fn strip_meta_lines(&self, raw: &str) -> String {
        raw.lines()
            .filter(|line| !self.meta_lines.is_match(line.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Remove one fence wrapping the whole text, if present
    #[must_use]
    pub fn strip_outer_fence<'a>(&self, text: &'a str) -> &'a str {
        self.outer_fence
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map_or(text, |body| body.as_str())
    }

    /// Clean `raw` and, for structured formats, wrap it in a fence labeled
    /// with the format; plain or unspecified formats are returned unfenced
    #[must_use]
    pub fn post_process(&self, raw: &str, format: Option<OutputFormat>) -> String {
        let cleaned = self.strip_meta_lines(raw);
        let body = self.strip_outer_fence(cleaned.trim()).trim();
        match format {
            Some(format @ (OutputFormat::Markdown | OutputFormat::Xml | OutputFormat::Json)) => {
                format!("```{}\n{body}\n```", format.as_str())
            }
            Some(OutputFormat::Plain) | None => body.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> ResponseCleaner {
        ResponseCleaner::new().unwrap()
    }

    #[test]
    fn test_meta_lines_removed() {
        let raw = "Rain taps the glass.\nWord count: 132\n(148 words)\nThis response contains approximately 140 words.\nThe end.";
        assert_eq!(
            cleaner().strip_meta_lines(raw),
            "Rain taps the glass.\nThe end."
        );
    }

    #[test]
    fn test_prose_mentioning_words_is_kept() {
        let raw = "She spoke 40 words a minute.\nWords matter.";
        assert_eq!(cleaner().strip_meta_lines(raw), raw);
    }

    #[test]
    fn test_refence_replaces_model_fence() {
        let raw = "```md\n# Title\n\nBody\n```";
        assert_eq!(
            cleaner().post_process(raw, Some(OutputFormat::Markdown)),
            "```markdown\n# Title\n\nBody\n```"
        );
    }

    #[test]
    fn test_plain_is_not_fenced() {
        let raw = "  Just text.\nWord count: 3  ";
        assert_eq!(
            cleaner().post_process(raw, Some(OutputFormat::Plain)),
            "Just text."
        );
    }

    #[test]
    fn test_inner_fences_survive() {
        let raw = "Intro\n```rust\nfn main() {}\n```\nOutro";
        assert_eq!(cleaner().post_process(raw, None), raw);
    }
}
