// ABOUTME: Guideline paragraph for each task type, placed in the TASK section of a prompt
// ABOUTME: General mode carries the broadest guidance; the rest narrow it to one artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::TaskType;

/// Guideline paragraph for `task_type`
#[must_use]
pub const fn task_guideline(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::General => {
            "Respond to the user's request directly and completely. Prefer concrete, specific \
             content over generic advice, and organize it so it can be used as-is."
        }
        TaskType::Writing => {
            "Write an original piece of prose or verse based on the user's request. Use vivid, \
             specific language, vary sentence rhythm, and give the piece a clear beginning and \
             ending."
        }
        TaskType::Marketing => {
            "Write marketing copy for the product or idea in the user's request. Lead with the \
             strongest benefit, speak to the reader's needs, and keep every claim specific and \
             believable."
        }
        TaskType::Coding => {
            "Write working code that solves the user's request. Choose clear names, handle \
             errors and edge cases, and keep explanations short and after the code."
        }
        TaskType::Research => {
            "Produce a research summary answering the user's request. Separate established \
             findings from open questions, and state the limits of the evidence."
        }
        TaskType::Image => {
            "Write a single prompt for an image generation model that depicts the user's \
             request. Describe subject, setting, composition, colour and mood in concrete visual \
             terms."
        }
        TaskType::Video => {
            "Write a single prompt for a video generation model that depicts the user's \
             request. Describe the subject, the action over time, the setting, and how the shot \
             is framed."
        }
    }
}
