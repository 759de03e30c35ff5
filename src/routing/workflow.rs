//! Workflow detector: multi-persona sequences triggered by word combinations.

use serde::Serialize;
use tracing::trace;

use crate::persona::{Persona, PersonaRegistry};

/// Outcome of scanning a text against the workflow pattern table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowResult {
    /// Whether a pattern fired.
    pub is_workflow: bool,

    /// Description of the pattern that fired.
    pub description: Option<&'static str>,

    /// Trigger words of the firing pattern found in the text, in pattern order.
    pub triggers: Vec<&'static str>,

    /// Resolved persona sequence of the firing pattern.
    pub personas: Vec<&'static Persona>,
}

impl WorkflowResult {
    /// The result when no pattern fires.
    pub fn none() -> Self {
        Self {
            is_workflow: false,
            description: None,
            triggers: Vec::new(),
            personas: Vec::new(),
        }
    }
}

/// Scans texts against the workflow pattern table.
#[derive(Debug, Clone)]
pub struct WorkflowDetector {
    registry: PersonaRegistry,
    min_triggers: usize,
}

impl WorkflowDetector {
    pub fn new(registry: PersonaRegistry, min_triggers: usize) -> Self {
        Self {
            registry,
            min_triggers: min_triggers.max(1),
        }
    }

    /// Detect a workflow in a text prepared with `analyzer::full_text`.
    ///
    /// Patterns are tried in table order and the first one with at least
    /// `min_triggers` triggers present wins; there is no scoring across
    /// patterns.
    pub fn detect(&self, text: &str) -> WorkflowResult {
        for pattern in self.registry.workflow_patterns() {
            let found: Vec<&'static str> = pattern
                .triggers
                .iter()
                .copied()
                .filter(|trigger| text.contains(&trigger.to_lowercase()))
                .collect();

            trace!(
                workflow = pattern.description,
                found = found.len(),
                "Workflow pattern checked"
            );

            if found.len() >= self.min_triggers {
                return WorkflowResult {
                    is_workflow: true,
                    description: Some(pattern.description),
                    triggers: found,
                    personas: self.registry.resolve(pattern.sequence),
                };
            }
        }

        WorkflowResult::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaId;
    use crate::routing::analyzer::full_text;

    fn detector() -> WorkflowDetector {
        WorkflowDetector::new(PersonaRegistry::new(), 2)
    }

    fn ids(result: &WorkflowResult) -> Vec<PersonaId> {
        result.personas.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_review_and_fix() {
        let result = detector().detect(&full_text("Please review and fix this function", None));
        assert!(result.is_workflow);
        assert_eq!(result.description, Some("Code review followed by fixes"));
        assert_eq!(result.triggers, vec!["review", "and", "fix"]);
        assert_eq!(ids(&result), vec![PersonaId::CodeReviewer, PersonaId::SeniorDev]);
    }

    #[test]
    fn test_first_pattern_wins() {
        // Fires both "analyze, then, implement" and "design, and, implement"
        let result = detector().detect(&full_text(
            "Analyze the logs then design and implement a fix",
            None,
        ));
        assert_eq!(result.description, Some("Analysis followed by implementation"));
        assert_eq!(ids(&result), vec![PersonaId::DataAnalyst, PersonaId::SeniorDev]);
    }

    #[test]
    fn test_single_trigger_does_not_fire() {
        let result = detector().detect(&full_text("review this", None));
        assert_eq!(result, WorkflowResult::none());
    }

    #[test]
    fn test_no_triggers() {
        let result = detector().detect(&full_text("what is the weather", None));
        assert!(!result.is_workflow);
        assert!(result.description.is_none());
        assert!(result.triggers.is_empty());
        assert!(result.personas.is_empty());
    }

    #[test]
    fn test_substring_triggers() {
        // "and" is found inside "handle", "fix" inside "prefix"
        let result = detector().detect(&full_text("handle the prefix", None));
        assert!(result.is_workflow);
        assert_eq!(result.triggers, vec!["and", "fix"]);
    }

    #[test]
    fn test_context_can_complete_a_workflow() {
        let result = detector().detect(&full_text("debug the parser", Some("and document it")));
        assert!(result.is_workflow);
        assert_eq!(ids(&result), vec![PersonaId::ProblemSolver, PersonaId::TechWriter]);
    }

    #[test]
    fn test_higher_threshold() {
        let strict = WorkflowDetector::new(PersonaRegistry::new(), 3);
        assert!(!strict.detect(&full_text("review and ship", None)).is_workflow);
        assert!(strict.detect(&full_text("review and fix", None)).is_workflow);
    }
}
