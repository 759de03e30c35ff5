//! Core types for the persona system.
//!
//! A persona is a keyword-tagged behavioral template: when a task mentions
//! enough of its keywords, the task is rewritten to carry the persona's
//! command token and context paragraph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Persona Identifier
// ─────────────────────────────────────────────────────────────────

/// The registered personas, in registry order.
///
/// Declaration order is significant: it is the order the analyzer walks the
/// registry in, and therefore the tie-break when two personas match the
/// same number of keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaId {
    SeniorDev,
    CodeReviewer,
    SoftwareArchitect,
    DevopsEngineer,
    DataAnalyst,
    BusinessAnalyst,
    CreativeWriter,
    TechWriter,
    ProblemSolver,
    SecurityExpert,
}

impl PersonaId {
    /// Number of registered personas.
    pub const COUNT: usize = 10;

    /// Registry key used in tool arguments and CLI args.
    pub fn slug(&self) -> &'static str {
        match self {
            PersonaId::SeniorDev => "senior-dev",
            PersonaId::CodeReviewer => "code-reviewer",
            PersonaId::SoftwareArchitect => "software-architect",
            PersonaId::DevopsEngineer => "devops-engineer",
            PersonaId::DataAnalyst => "data-analyst",
            PersonaId::BusinessAnalyst => "business-analyst",
            PersonaId::CreativeWriter => "creative-writer",
            PersonaId::TechWriter => "tech-writer",
            PersonaId::ProblemSolver => "problem-solver",
            PersonaId::SecurityExpert => "security-expert",
        }
    }

    /// All persona identifiers in registry order.
    pub fn all() -> &'static [PersonaId; PersonaId::COUNT] {
        &[
            PersonaId::SeniorDev,
            PersonaId::CodeReviewer,
            PersonaId::SoftwareArchitect,
            PersonaId::DevopsEngineer,
            PersonaId::DataAnalyst,
            PersonaId::BusinessAnalyst,
            PersonaId::CreativeWriter,
            PersonaId::TechWriter,
            PersonaId::ProblemSolver,
            PersonaId::SecurityExpert,
        ]
    }

    /// Position of this persona in the registry table.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Comma-separated list of every valid slug, for help and error text.
    pub fn valid_slugs() -> String {
        PersonaId::all()
            .iter()
            .map(|id| id.slug())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    /// Registry keys match exactly; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaId::all()
            .iter()
            .copied()
            .find(|id| id.slug() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown persona '{}'. Valid: {}",
                    s,
                    PersonaId::valid_slugs()
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// A registered persona. Defined once in the static registry, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Registry key.
    pub id: PersonaId,

    /// Human-readable display name.
    pub name: &'static str,

    /// Trigger keywords, matched case-insensitively as substrings.
    pub keywords: &'static [&'static str],

    /// Invocation command token (e.g. `/dev`).
    pub command: &'static str,

    /// Short description shown in listings.
    pub description: &'static str,

    /// Behavioral context paragraph prepended to enhanced prompts.
    pub context: &'static str,
}

// ─────────────────────────────────────────────────────────────────
// Workflow Pattern
// ─────────────────────────────────────────────────────────────────

/// A multi-persona pattern fired when enough of its trigger words appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowPattern {
    /// Trigger words, matched case-insensitively as substrings.
    pub triggers: &'static [&'static str],

    /// Personas to apply, in order.
    pub sequence: &'static [PersonaId],

    /// Human-readable description of the workflow.
    pub description: &'static str,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
