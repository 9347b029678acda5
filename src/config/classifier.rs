// ABOUTME: Pattern lists used to screen user input for injection attempts and low-content messages
// ABOUTME: Treated as tunable data with built-in defaults, optionally loaded from a JSON file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input screening rules
///
/// Regex patterns are matched case-insensitively against the trimmed input.
/// Keywords are matched against whole words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Inputs matching any of these are rejected as injection attempts
    pub injection_patterns: Vec<String>,
    /// Small talk that is rejected unless an intent keyword is present
    pub conversational_patterns: Vec<String>,
    /// Words signalling the user wants a prompt or artifact produced
    pub prompt_intent_keywords: Vec<String>,
    /// Words signalling a creative subject
    pub creative_intent_keywords: Vec<String>,
    /// Inputs shorter than this many words need an intent keyword
    pub min_words: usize,
}

const INJECTION_PATTERNS: &[&str] = &[
    r"\bignore\s+(?:all\s+|any\s+)?(?:of\s+)?(?:the\s+|your\s+)?(?:previous|prior|above|earlier|preceding)\s+(?:instructions|prompts?|rules|directions|context)",
    r"\bdisregard\s+(?:all\s+|any\s+)?(?:the\s+|your\s+)?(?:previous|prior|above|earlier|system)\s+(?:instructions|prompts?|rules)",
    r"\bforget\s+(?:all\s+|everything\s+)?(?:about\s+)?(?:your|the|previous|prior)\s+(?:instructions|rules|guidelines|training)",
    r"\b(?:reveal|show|print|repeat|output|leak|display)\s+(?:me\s+)?(?:your|the)\s+(?:system\s+prompt|hidden\s+instructions|initial\s+instructions|instructions\s+above)",
    r"\byou\s+are\s+now\s+(?:in\s+)?(?:developer|dan|jailbreak|unrestricted|god)\b",
    r"\bpretend\s+(?:that\s+)?you\s+(?:have\s+no|are\s+not\s+bound\s+by)\s+(?:rules|restrictions|guidelines)",
    r"\boverride\s+(?:your|the|all)\s+(?:safety\s+)?(?:instructions|rules|guidelines|restrictions)",
    r"</?\s*system\s*>",
];

const CONVERSATIONAL_PATTERNS: &[&str] = &[
    r"^(?:hi|hello|hey|yo|hiya|thanks|thank\s+you|thx|ok|okay|cool|nice|yes|no|nope|yep|test|testing|lol|hmm+)[\s!.?]*$",
    r"^how\s+are\s+you\b",
    r"^what(?:'s|\s+is)\s+up\b",
    r"^good\s+(?:morning|afternoon|evening|night)\b",
];

const PROMPT_INTENT_KEYWORDS: &[&str] = &[
    "prompt", "write", "create", "generate", "draft", "describe", "explain", "summarize",
    "summarise", "design", "build", "make", "compose", "list", "outline", "plan", "translate",
    "rewrite", "improve", "code", "function", "script", "image", "video", "picture", "email",
    "post", "article", "essay", "report", "blog", "tweet",
];

const CREATIVE_INTENT_KEYWORDS: &[&str] = &[
    "poem", "story", "song", "lyrics", "haiku", "sonnet", "scene", "character", "landscape",
    "portrait", "illustration", "logo", "slogan", "tagline", "campaign", "ad", "novel",
    "screenplay", "dialogue", "painting",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|item| (*item).to_owned()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            injection_patterns: owned(INJECTION_PATTERNS),
            conversational_patterns: owned(CONVERSATIONAL_PATTERNS),
            prompt_intent_keywords: owned(PROMPT_INTENT_KEYWORDS),
            creative_intent_keywords: owned(CREATIVE_INTENT_KEYWORDS),
            min_words: 4,
        }
    }
}

impl ClassifierConfig {
    /// Load a JSON override file; missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config_invalid(format!("cannot read {}: {e}", path.display())).with_source(e)
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::config_invalid(format!("invalid classifier file {}: {e}", path.display()))
                .with_source(e)
        })
    }
}
