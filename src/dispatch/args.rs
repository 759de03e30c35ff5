//! Tool argument types, shared by the MCP adapter and `call`.

use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct EnhancePromptRequest {
    #[schemars(description = "The original prompt to enhance")]
    pub prompt: String,
    #[schemars(description = "Additional context about the task")]
    pub context: Option<String>,
    #[schemars(
        description = "Force a specific persona: senior-dev, code-reviewer, software-architect, devops-engineer, data-analyst, business-analyst, creative-writer, tech-writer, problem-solver, security-expert"
    )]
    pub force_persona: Option<String>,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SuggestPersonaRequest {
    #[schemars(description = "The prompt to analyze")]
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct DetectWorkflowRequest {
    #[schemars(description = "The prompt to analyze for workflow patterns")]
    pub prompt: String,
}
