//! Bundled persona registry and workflow pattern table.

use std::collections::HashSet;

use crate::error::{Error, Result};

use super::types::{Persona, PersonaId, WorkflowPattern};

// ─────────────────────────────────────────────────────────────────
// Static Tables
// ─────────────────────────────────────────────────────────────────

/// Registry table, indexed by `PersonaId::index()`.
static PERSONAS: [Persona; PersonaId::COUNT] = [
    Persona {
        id: PersonaId::SeniorDev,
        name: "Senior Developer",
        keywords: &[
            "code",
            "programming",
            "development",
            "function",
            "class",
            "algorithm",
            "debug",
            "refactor",
            "implement",
            "build",
            "create",
            "fix",
            "bug",
        ],
        command: "/dev",
        description: "Expert software developer for coding tasks, debugging, and implementation",
        context: "You are a Senior Developer with 10+ years of experience. You write clean, efficient, well-documented code and follow best practices. You consider performance, security, and maintainability in all solutions.",
    },
    Persona {
        id: PersonaId::CodeReviewer,
        name: "Code Reviewer",
        keywords: &[
            "review",
            "audit",
            "quality",
            "best practices",
            "security",
            "performance",
            "analyze",
            "check",
            "validate",
            "inspect",
        ],
        command: "/review",
        description: "Thorough code review and quality assessment specialist",
        context: "You are an expert Code Reviewer focused on code quality, security, performance, and best practices. You provide detailed feedback with specific suggestions for improvement.",
    },
    Persona {
        id: PersonaId::SoftwareArchitect,
        name: "Software Architect",
        keywords: &[
            "architecture",
            "design",
            "system",
            "structure",
            "patterns",
            "scalability",
            "microservices",
            "api",
            "database",
            "infrastructure",
        ],
        command: "/architect",
        description: "System design and architectural guidance expert",
        context: "You are a Software Architect who designs scalable, maintainable systems. You think about high-level structure, design patterns, technology choices, and long-term evolution of systems.",
    },
    Persona {
        id: PersonaId::DevopsEngineer,
        name: "DevOps Engineer",
        keywords: &[
            "deploy",
            "deployment",
            "ci/cd",
            "docker",
            "kubernetes",
            "aws",
            "cloud",
            "pipeline",
            "automation",
            "infrastructure",
        ],
        command: "/devops",
        description: "DevOps and infrastructure automation specialist",
        context: "You are a DevOps Engineer expert in CI/CD, containerization, cloud platforms, and infrastructure automation. You focus on reliable, automated deployment pipelines.",
    },
    Persona {
        id: PersonaId::DataAnalyst,
        name: "Data Analyst",
        keywords: &[
            "data",
            "analysis",
            "statistics",
            "visualization",
            "insights",
            "metrics",
            "csv",
            "database",
            "query",
            "chart",
        ],
        command: "/analyze",
        description: "Data analysis and statistical insights specialist",
        context: "You are a Data Analyst expert in statistical analysis, data visualization, and extracting actionable insights from data. You use appropriate tools and methods for data exploration.",
    },
    Persona {
        id: PersonaId::BusinessAnalyst,
        name: "Business Analyst",
        keywords: &[
            "business",
            "requirements",
            "process",
            "workflow",
            "stakeholder",
            "user story",
            "specification",
            "analysis",
        ],
        command: "/business",
        description: "Business process analysis and requirements specialist",
        context: "You are a Business Analyst who bridges technical and business teams. You excel at gathering requirements, documenting processes, and translating business needs into technical specifications.",
    },
    Persona {
        id: PersonaId::CreativeWriter,
        name: "Creative Writer",
        keywords: &[
            "write",
            "story",
            "content",
            "creative",
            "narrative",
            "blog",
            "article",
            "copy",
            "marketing",
        ],
        command: "/write",
        description: "Creative writing and content creation specialist",
        context: "You are a Creative Writer with expertise in storytelling, content creation, and engaging writing. You adapt your tone and style to the target audience and purpose.",
    },
    Persona {
        id: PersonaId::TechWriter,
        name: "Technical Writer",
        keywords: &[
            "documentation",
            "manual",
            "guide",
            "tutorial",
            "explain",
            "how-to",
            "readme",
            "api docs",
        ],
        command: "/doc",
        description: "Technical documentation and guide creation specialist",
        context: "You are a Technical Writer who creates clear, comprehensive documentation. You structure information logically and write for your target audience's technical level.",
    },
    Persona {
        id: PersonaId::ProblemSolver,
        name: "Problem Solver",
        keywords: &[
            "problem",
            "solve",
            "issue",
            "troubleshoot",
            "solution",
            "error",
            "help",
            "fix",
        ],
        command: "/solve",
        description: "General problem solving and troubleshooting specialist",
        context: "You are a Problem Solver who approaches challenges systematically. You break down complex problems, consider multiple solutions, and provide clear step-by-step guidance.",
    },
    Persona {
        id: PersonaId::SecurityExpert,
        name: "Security Expert",
        keywords: &[
            "security",
            "vulnerability",
            "penetration",
            "encryption",
            "authentication",
            "authorization",
            "threat",
            "secure",
        ],
        command: "/security",
        description: "Cybersecurity and security assessment specialist",
        context: "You are a Security Expert focused on identifying vulnerabilities, implementing security best practices, and ensuring robust security measures in systems and code.",
    },
];

/// Workflow patterns, checked in order; the first one that fires wins.
static WORKFLOW_PATTERNS: [WorkflowPattern; 5] = [
    WorkflowPattern {
        triggers: &["analyze", "then", "implement"],
        sequence: &[PersonaId::DataAnalyst, PersonaId::SeniorDev],
        description: "Analysis followed by implementation",
    },
    WorkflowPattern {
        triggers: &["review", "and", "fix"],
        sequence: &[PersonaId::CodeReviewer, PersonaId::SeniorDev],
        description: "Code review followed by fixes",
    },
    WorkflowPattern {
        triggers: &["debug", "and", "document"],
        sequence: &[PersonaId::ProblemSolver, PersonaId::TechWriter],
        description: "Debugging followed by documentation",
    },
    WorkflowPattern {
        triggers: &["design", "and", "implement"],
        sequence: &[PersonaId::SoftwareArchitect, PersonaId::SeniorDev],
        description: "Architecture design followed by implementation",
    },
    WorkflowPattern {
        triggers: &["secure", "and", "review"],
        sequence: &[PersonaId::SecurityExpert, PersonaId::CodeReviewer],
        description: "Security analysis followed by code review",
    },
];

// ─────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────

/// Read-only view over the bundled persona and workflow tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaRegistry;

impl PersonaRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All personas in registry order.
    pub fn personas(&self) -> &'static [Persona] {
        &PERSONAS
    }

    /// All workflow patterns in table order.
    pub fn workflow_patterns(&self) -> &'static [WorkflowPattern] {
        &WORKFLOW_PATTERNS
    }

    /// The persona registered under `id`.
    pub fn get(&self, id: PersonaId) -> &'static Persona {
        &PERSONAS[id.index()]
    }

    /// Look up a persona by registry key. Unknown keys yield `None`.
    pub fn find(&self, slug: &str) -> Option<&'static Persona> {
        slug.parse::<PersonaId>().ok().map(|id| self.get(id))
    }

    /// Resolve a workflow sequence into persona records, preserving order.
    pub fn resolve(&self, sequence: &[PersonaId]) -> Vec<&'static Persona> {
        sequence.iter().map(|id| self.get(*id)).collect()
    }

    /// Check the table invariants. Run once at startup.
    ///
    /// `min_triggers` is the workflow activation threshold; a pattern with
    /// fewer triggers than that could never fire.
    pub fn validate(&self, min_triggers: usize) -> Result<()> {
        let mut commands = HashSet::new();

        for (i, persona) in PERSONAS.iter().enumerate() {
            if persona.id.index() != i {
                return Err(Error::registry_invalid(format!(
                    "persona '{}' is at position {} but its identifier expects {}",
                    persona.id,
                    i,
                    persona.id.index()
                )));
            }
            if persona.keywords.is_empty() {
                return Err(Error::registry_invalid(format!(
                    "persona '{}' has no keywords",
                    persona.id
                )));
            }
            if persona.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::registry_invalid(format!(
                    "persona '{}' has an empty keyword",
                    persona.id
                )));
            }
            if !commands.insert(persona.command) {
                return Err(Error::registry_invalid(format!(
                    "command '{}' is registered more than once",
                    persona.command
                )));
            }
        }

        for pattern in WORKFLOW_PATTERNS.iter() {
            if pattern.sequence.is_empty() {
                return Err(Error::registry_invalid(format!(
                    "workflow '{}' has an empty persona sequence",
                    pattern.description
                )));
            }
            if pattern.triggers.len() < min_triggers {
                return Err(Error::registry_invalid(format!(
                    "workflow '{}' has {} triggers but {} are required to fire",
                    pattern.description,
                    pattern.triggers.len(),
                    min_triggers
                )));
            }
        }

        Ok(())
    }
}
