//! Prompt builder: composes the persona-augmented prompt text.
//!
//! The layout is consumed verbatim downstream, so separators are exact:
//!
//! ```text
//! {commands joined by ' '}\n\n
//! {contexts joined by '\n\n'}\n\n
//! [**Additional Context**: {context}\n\n]
//! **Task**: {prompt}
//! ```

use crate::error::{Error, Result};
use crate::persona::Persona;

/// Stateless composer for enhanced prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Compose the enhanced prompt. The original prompt is carried verbatim.
    pub fn build(
        &self,
        prompt: &str,
        personas: &[&Persona],
        context: Option<&str>,
    ) -> Result<String> {
        if personas.is_empty() {
            return Err(Error::EmptySelection);
        }

        let commands = personas
            .iter()
            .map(|p| p.command)
            .collect::<Vec<_>>()
            .join(" ");
        let contexts = personas
            .iter()
            .map(|p| p.context)
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut enhanced = format!("{}\n\n{}\n\n", commands, contexts);

        if let Some(extra) = context.filter(|c| !c.is_empty()) {
            enhanced.push_str(&format!("**Additional Context**: {}\n\n", extra));
        }

        enhanced.push_str(&format!("**Task**: {}", prompt));

        Ok(enhanced)
    }
}
