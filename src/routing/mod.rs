//! Routing core: persona matching, workflow detection and prompt composition.
//!
//! Everything here is synchronous and pure: each call reads only the static
//! registry tables and its own inputs.

pub mod analyzer;
pub mod builder;
pub mod selector;
pub mod workflow;

pub use analyzer::{full_text, AnalysisResult, PromptAnalyzer};
pub use builder::PromptBuilder;
pub use selector::PersonaSelector;
pub use workflow::{WorkflowDetector, WorkflowResult};

use tracing::debug;

use crate::config::RoutingSettings;
use crate::error::Result;
use crate::persona::{Persona, PersonaRegistry};

/// How a set of personas was chosen for a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A multi-persona workflow fired.
    Workflow(WorkflowResult),
    /// A single persona cleared the confidence floor.
    Single {
        persona: &'static Persona,
        analysis: AnalysisResult,
    },
    /// Nothing applies.
    Nothing(AnalysisResult),
}

impl Selection {
    /// The personas to apply, in order. Empty for [`Selection::Nothing`].
    pub fn personas(&self) -> Vec<&'static Persona> {
        match self {
            Selection::Workflow(workflow) => workflow.personas.clone(),
            Selection::Single { persona, .. } => vec![*persona],
            Selection::Nothing(_) => Vec::new(),
        }
    }
}

/// The analyzer, detector, selector, and builder wired to one set of settings.
#[derive(Debug, Clone)]
pub struct Router {
    registry: PersonaRegistry,
    analyzer: PromptAnalyzer,
    detector: WorkflowDetector,
    selector: PersonaSelector,
    builder: PromptBuilder,
}

impl Router {
    pub fn new(registry: PersonaRegistry, settings: &RoutingSettings) -> Self {
        Self {
            registry,
            analyzer: PromptAnalyzer::new(registry, settings.saturation_matches),
            detector: WorkflowDetector::new(registry, settings.workflow_min_triggers),
            selector: PersonaSelector::new(registry, settings.selection_threshold),
            builder: PromptBuilder::new(),
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// Score `prompt` (plus optional context) against every persona.
    pub fn analyze(&self, prompt: &str, context: Option<&str>) -> AnalysisResult {
        self.analyzer.analyze(&full_text(prompt, context))
    }

    /// Scan `prompt` (plus optional context) for a multi-persona workflow.
    pub fn detect_workflow(&self, prompt: &str, context: Option<&str>) -> WorkflowResult {
        self.detector.detect(&full_text(prompt, context))
    }

    /// Apply the confidence floor to an analysis.
    pub fn select(&self, analysis: &AnalysisResult) -> Option<&'static Persona> {
        self.selector.select(analysis)
    }

    /// Workflow detection first, then single-persona analysis.
    pub fn route(&self, prompt: &str, context: Option<&str>) -> Selection {
        let workflow = self.detect_workflow(prompt, context);
        if workflow.is_workflow {
            debug!(
                workflow = workflow.description.unwrap_or_default(),
                triggers = ?workflow.triggers,
                "Workflow detected"
            );
            return Selection::Workflow(workflow);
        }

        let analysis = self.analyze(prompt, context);
        match self.select(&analysis) {
            Some(persona) => {
                debug!(
                    persona = %persona.id,
                    confidence = analysis.confidence,
                    keywords = ?analysis.detected_keywords,
                    "Persona selected"
                );
                Selection::Single { persona, analysis }
            }
            None => {
                debug!(
                    confidence = analysis.confidence,
                    category = analysis.category_label(),
                    "No persona selected"
                );
                Selection::Nothing(analysis)
            }
        }
    }

    /// Compose the enhanced prompt for the given personas.
    pub fn build(
        &self,
        prompt: &str,
        personas: &[&Persona],
        context: Option<&str>,
    ) -> Result<String> {
        self.builder.build(prompt, personas, context)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(PersonaRegistry::new(), &RoutingSettings::default())
    }
}
