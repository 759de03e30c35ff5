//! Persona selector: confidence floor over analyzer output.

use crate::persona::{Persona, PersonaRegistry};

use super::analyzer::AnalysisResult;

/// Decides whether a single persona applies to an analysis.
#[derive(Debug, Clone)]
pub struct PersonaSelector {
    registry: PersonaRegistry,
    threshold: f64,
}

impl PersonaSelector {
    pub fn new(registry: PersonaRegistry, threshold: f64) -> Self {
        Self {
            registry,
            threshold,
        }
    }

    /// The persona for `analysis`, or `None` when confidence is below the
    /// floor or nothing matched (general category).
    pub fn select(&self, analysis: &AnalysisResult) -> Option<&'static Persona> {
        if analysis.confidence < self.threshold {
            return None;
        }

        analysis.category.map(|id| self.registry.get(id))
    }
}
