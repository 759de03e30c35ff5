//! Prompt analyzer: keyword scoring of a text against every persona.

use serde::Serialize;
use tracing::trace;

use crate::persona::{PersonaId, PersonaRegistry};

/// Category reported when no persona keyword matched.
pub const GENERAL_CATEGORY: &str = "general";

/// Outcome of scoring one text against the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Matched keywords across all personas, first occurrence order, no duplicates.
    pub detected_keywords: Vec<&'static str>,

    /// Keyword-match strength of the best persona, in `[0, 1]`.
    pub confidence: f64,

    /// Best-matching persona, or `None` for the general category.
    pub category: Option<PersonaId>,
}

impl AnalysisResult {
    /// Display label of the category (`general` when nothing matched).
    pub fn category_label(&self) -> &'static str {
        self.category.map(|id| id.slug()).unwrap_or(GENERAL_CATEGORY)
    }
}

/// Builds the text every matcher scans: prompt and optional context joined
/// by a single space, lower-cased.
pub fn full_text(prompt: &str, context: Option<&str>) -> String {
    format!("{} {}", prompt, context.unwrap_or("")).to_lowercase()
}

/// Scores texts against the persona registry.
#[derive(Debug, Clone)]
pub struct PromptAnalyzer {
    registry: PersonaRegistry,
    saturation_matches: u32,
}

impl PromptAnalyzer {
    /// `saturation_matches` is the match count at which confidence reaches 1.0.
    pub fn new(registry: PersonaRegistry, saturation_matches: u32) -> Self {
        Self {
            registry,
            saturation_matches: saturation_matches.max(1),
        }
    }

    /// Analyze a text already prepared with [`full_text`].
    ///
    /// Only a strictly greater match count replaces the current best, so
    /// ties go to the persona declared first in the registry.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let mut detected_keywords: Vec<&'static str> = Vec::new();
        let mut max_matches = 0usize;
        let mut category = None;

        for persona in self.registry.personas() {
            let matches: Vec<&'static str> = persona
                .keywords
                .iter()
                .copied()
                .filter(|keyword| text.contains(&keyword.to_lowercase()))
                .collect();

            if matches.is_empty() {
                continue;
            }

            trace!(persona = %persona.id, matches = matches.len(), "Persona keywords matched");

            if matches.len() > max_matches {
                max_matches = matches.len();
                category = Some(persona.id);
            }

            for keyword in matches {
                if !detected_keywords.contains(&keyword) {
                    detected_keywords.push(keyword);
                }
            }
        }

        let confidence = (max_matches as f64 / self.saturation_matches as f64).min(1.0);

        AnalysisResult {
            detected_keywords,
            confidence,
            category,
        }
    }
}
