//! The four router operations and generic `(tool name, arguments)` dispatch.
//!
//! Every operation returns a [`ToolOutput`]; no path here is fatal.

pub mod args;
pub mod format;

pub use args::{DetectWorkflowRequest, EnhancePromptRequest, SuggestPersonaRequest};

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoutingSettings;
use crate::error::{Error, Result};
use crate::persona::{Persona, PersonaRegistry};
use crate::routing::Router;

// ─────────────────────────────────────────────────────────────────
// Tool Names
// ─────────────────────────────────────────────────────────────────

/// Operations exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    EnhancePrompt,
    SuggestPersona,
    ListPersonas,
    DetectWorkflow,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::EnhancePrompt => "enhance_prompt",
            ToolName::SuggestPersona => "suggest_persona",
            ToolName::ListPersonas => "list_personas",
            ToolName::DetectWorkflow => "detect_workflow",
        }
    }

    pub fn all() -> &'static [ToolName] {
        &[
            ToolName::EnhancePrompt,
            ToolName::SuggestPersona,
            ToolName::ListPersonas,
            ToolName::DetectWorkflow,
        ]
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ToolName::all()
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| Error::unknown_operation(s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Tool Output
// ─────────────────────────────────────────────────────────────────

/// Text content blocks plus an error flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<String>,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            is_error: false,
        }
    }

    /// A usable text result flagged as an error.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            is_error: true,
        }
    }

    /// All content blocks joined by newlines.
    pub fn joined(&self) -> String {
        self.content.join("\n")
    }
}

// ─────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────

/// Stateless front for the routing core.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    pub fn new(settings: &RoutingSettings) -> Self {
        Self {
            router: Router::new(PersonaRegistry::new(), settings),
        }
    }

    /// Rewrite `prompt` for the chosen persona(s).
    ///
    /// An unknown `force_persona` is ignored. With no persona the prompt
    /// comes back unchanged; on a fault it comes back unchanged with the
    /// error flag set.
    pub fn enhance(
        &self,
        prompt: &str,
        context: Option<&str>,
        force_persona: Option<&str>,
    ) -> ToolOutput {
        let personas: Vec<&Persona> = match force_persona.and_then(|slug| self.forced(slug)) {
            Some(persona) => vec![persona],
            None => self.router.route(prompt, context).personas(),
        };

        if personas.is_empty() {
            debug!("No persona applies, passing prompt through");
            return ToolOutput::text(prompt);
        }

        self.compose(prompt, &personas, context)
    }

    /// Build the enhanced prompt for an already chosen persona list.
    pub(crate) fn compose(
        &self,
        prompt: &str,
        personas: &[&Persona],
        context: Option<&str>,
    ) -> ToolOutput {
        match self.router.build(prompt, personas, context) {
            Ok(text) => ToolOutput::text(text),
            Err(e) => {
                warn!(error = %e.format_for_log(), "Enhancement failed, returning original prompt");
                ToolOutput::error(prompt)
            }
        }
    }

    fn forced(&self, slug: &str) -> Option<&'static Persona> {
        let persona = self.router.registry().find(slug);
        match persona {
            Some(p) => debug!(persona = %p.id, "Using forced persona"),
            None => debug!(requested = slug, "Ignoring unknown forced persona"),
        }
        persona
    }

    /// Read-only recommendation for `prompt`.
    pub fn suggest(&self, prompt: &str) -> ToolOutput {
        ToolOutput::text(format::suggestion(&self.router.route(prompt, None)))
    }

    /// Every registered persona, in registry order.
    pub fn list(&self) -> ToolOutput {
        ToolOutput::text(format::persona_list(self.router.registry().personas()))
    }

    /// Workflow report for `prompt`, independent of enhancement.
    pub fn detect_workflow(&self, prompt: &str) -> ToolOutput {
        ToolOutput::text(format::workflow_analysis(
            &self.router.detect_workflow(prompt, None),
        ))
    }

    /// Run a tool by name with JSON arguments.
    pub fn call(&self, name: &str, arguments: &serde_json::Value) -> Result<ToolOutput> {
        let tool: ToolName = name.parse()?;
        debug!(tool = %tool, "Dispatching tool call");

        match tool {
            ToolName::EnhancePrompt => {
                let req: EnhancePromptRequest = parse_arguments(tool, arguments)?;
                Ok(self.enhance(
                    &req.prompt,
                    req.context.as_deref(),
                    req.force_persona.as_deref(),
                ))
            }
            ToolName::SuggestPersona => {
                let req: SuggestPersonaRequest = parse_arguments(tool, arguments)?;
                Ok(self.suggest(&req.prompt))
            }
            ToolName::ListPersonas => Ok(self.list()),
            ToolName::DetectWorkflow => {
                let req: DetectWorkflowRequest = parse_arguments(tool, arguments)?;
                Ok(self.detect_workflow(&req.prompt))
            }
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(tool: ToolName, arguments: &serde_json::Value) -> Result<T> {
    serde_json::from_value(arguments.clone())
        .map_err(|e| Error::invalid_arguments(tool.as_str(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaId;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::default()
    }

    #[test]
    fn test_tool_name_round_trip() {
        for tool in ToolName::all() {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), *tool);
        }
        assert!(matches!(
            "enhance".parse::<ToolName>(),
            Err(Error::UnknownOperation { .. })
        ));
    }

    #[test]
    fn test_forced_security_expert() {
        let d = dispatcher();
        let security = PersonaRegistry::new().get(PersonaId::SecurityExpert);
        for prompt in ["write a poem about cats", "", "docker kubernetes deploy"] {
            let out = d.enhance(prompt, None, Some("security-expert"));
            assert!(!out.is_error);
            let text = out.joined();
            assert!(text.starts_with("/security\n\n"), "prompt {:?}", prompt);
            assert!(text.contains(security.context));
            assert!(text.ends_with(&format!("**Task**: {}", prompt)));
        }
    }

    #[test]
    fn test_unknown_forced_persona_falls_through() {
        let d = dispatcher();
        let forced = d.enhance("Set up a Docker pipeline", None, Some("wizard"));
        let auto = d.enhance("Set up a Docker pipeline", None, None);
        assert_eq!(forced, auto);
        assert!(forced.joined().starts_with("/devops"));
    }

    #[test]
    fn test_weather_passes_through() {
        let out = dispatcher().enhance("what is the weather", None, None);
        assert_eq!(out, ToolOutput::text("what is the weather"));
    }

    #[test]
    fn test_enhance_workflow() {
        let out = dispatcher().enhance("Please review and fix this function", None, None);
        assert!(out.joined().starts_with("/review /dev\n\n"));
    }

    #[test]
    fn test_enhance_uses_context_for_matching() {
        let d = dispatcher();
        let out = d.enhance("help me out", Some("docker kubernetes"), None);
        let text = out.joined();
        assert!(text.starts_with("/devops\n\n"));
        assert!(text.contains("**Additional Context**: docker kubernetes\n\n"));
        assert!(text.ends_with("**Task**: help me out"));
    }

    #[test]
    fn test_compose_failure_returns_original_flagged() {
        let d = dispatcher();
        let out = d.compose("keep this exactly", &[], Some("extra"));
        assert_eq!(out, ToolOutput::error("keep this exactly"));
        assert!(out.is_error);
        assert_eq!(out.joined(), "keep this exactly");
    }

    #[test]
    fn test_compose_success_matches_enhance() {
        let d = dispatcher();
        let security = PersonaRegistry::new().get(PersonaId::SecurityExpert);
        let composed = d.compose("write a poem", &[security], None);
        assert_eq!(composed, d.enhance("write a poem", None, Some("security-expert")));
    }

    #[test]
    fn test_list_has_every_persona_once() {
        let text = dispatcher().list().joined();
        let registry = PersonaRegistry::new();
        assert_eq!(text.lines().filter(|l| l.starts_with("• ")).count(), PersonaId::COUNT);
        for persona in registry.personas() {
            let entry = format!("• **{}** ({}): ", persona.name, persona.command);
            assert_eq!(text.matches(&entry).count(), 1, "entry {:?}", entry);
        }
    }

    #[test]
    fn test_suggest_is_idempotent() {
        let d = dispatcher();
        for prompt in ["Please review and fix this function", "docker deploy", "hello"] {
            assert_eq!(d.suggest(prompt), d.suggest(prompt));
        }
    }

    #[test]
    fn test_suggest_workflow_text() {
        let text = dispatcher().suggest("Please review and fix this function").joined();
        assert_eq!(
            text,
            "🔄 **Workflow Detected**: Code review followed by fixes\n📋 **Sequence**: Code Reviewer (/review) → Senior Developer (/dev)\n🔍 **Trigger Words**: review, and, fix"
        );
    }

    #[test]
    fn test_detect_workflow_text() {
        let text = dispatcher()
            .detect_workflow("design and implement a cache")
            .joined();
        assert!(text.contains("**Is Workflow**: true\n"));
        assert!(text.contains("**Type**: Architecture design followed by implementation\n"));
        assert!(text.ends_with("**Personas**: Software Architect → Senior Developer"));
    }

    #[test]
    fn test_call_routes_by_name() {
        let d = dispatcher();
        let out = d
            .call("enhance_prompt", &json!({ "prompt": "what is the weather" }))
            .unwrap();
        assert_eq!(out.joined(), "what is the weather");

        let out = d.call("list_personas", &serde_json::Value::Null).unwrap();
        assert!(out.joined().starts_with("📚"));
    }

    #[test]
    fn test_call_unknown_tool() {
        let err = dispatcher().call("delete_everything", &json!({})).unwrap_err();
        assert!(matches!(err, Error::UnknownOperation { ref name } if name == "delete_everything"));
    }

    #[test]
    fn test_call_missing_prompt() {
        let err = dispatcher().call("suggest_persona", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArguments { ref operation, .. } if operation == "suggest_persona"
        ));
    }
}
