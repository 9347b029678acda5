// ABOUTME: Heuristic screening of user input before composition
// ABOUTME: Flags likely prompt-injection attempts and accidental low-content messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ClassifierConfig;
use crate::errors::{AppError, AppResult};
use regex::{RegexSet, RegexSetBuilder};
use std::collections::HashSet;

/// Outcome of screening one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    /// Safe to compose
    Accepted,
    /// Matches an injection pattern
    Injection,
    /// Too short or conversational, with no sign of what to produce
    LowContent,
}

/// Compiled form of a [`ClassifierConfig`]
#[derive(Debug, Clone)]
pub struct InputClassifier {
    injection: RegexSet,
    conversational: RegexSet,
    intent_keywords: HashSet<String>,
    min_words: usize,
}

fn compile(patterns: &[String], list: &str) -> AppResult<RegexSet> {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::config_invalid(format!("invalid {list} pattern: {e}")).with_source(e))
}

impl InputClassifier {
    /// Compile the patterns in `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if any pattern is not a valid regex
    pub fn new(config: &ClassifierConfig) -> AppResult<Self> {
        let intent_keywords = config
            .prompt_intent_keywords
            .iter()
            .chain(&config.creative_intent_keywords)
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        Ok(Self {
            injection: compile(&config.injection_patterns, "injection")?,
            conversational: compile(&config.conversational_patterns, "conversational")?,
            intent_keywords,
            min_words: config.min_words,
        })
    }

    /// Classify trimmed, non-empty input
    ///
    /// Injection checks win over everything else. Input is low-content when
    /// it carries no intent keyword and is either small talk or shorter than
    /// the word threshold.
    #[must_use]
    pub fn classify(&self, input: &str) -> InputClass {
        let input = input.trim();
        if self.injection.is_match(input) {
            return InputClass::Injection;
        }

        let words: Vec<String> = input
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();

        if words.iter().any(|word| self.is_intent_keyword(word)) {
            return InputClass::Accepted;
        }
        if words.len() < self.min_words || self.conversational.is_match(input) {
            return InputClass::LowContent;
        }
        InputClass::Accepted
    }

    /// Whole-word match, allowing a plain `s` plural
    fn is_intent_keyword(&self, word: &str) -> bool {
        self.intent_keywords.contains(word)
            || word
                .strip_suffix('s')
                .is_some_and(|singular| self.intent_keywords.contains(singular))
    }
}
