//! Human-readable renderings of routing results.

use crate::persona::Persona;
use crate::routing::{Selection, WorkflowResult};

pub const NO_RECOMMENDATION: &str =
    "No specific persona recommended. General problem-solving approach suggested.";

/// Summary text for `suggest_persona`.
pub fn suggestion(selection: &Selection) -> String {
    match selection {
        Selection::Workflow(workflow) => {
            let sequence = workflow
                .personas
                .iter()
                .map(|p| format!("{} ({})", p.name, p.command))
                .collect::<Vec<_>>()
                .join(" → ");
            format!(
                "🔄 **Workflow Detected**: {}\n📋 **Sequence**: {}\n🔍 **Trigger Words**: {}",
                workflow.description.unwrap_or_default(),
                sequence,
                workflow.triggers.join(", ")
            )
        }
        Selection::Single { persona, analysis } => format!(
            "🎯 **Recommended Persona**: {}\n🔧 **Command**: {}\n📋 **Description**: {}\n🔍 **Detected Keywords**: {}\n📊 **Confidence**: {:.2}",
            persona.name,
            persona.command,
            persona.description,
            analysis.detected_keywords.join(", "),
            analysis.confidence
        ),
        Selection::Nothing(_) => NO_RECOMMENDATION.to_string(),
    }
}

/// Registry enumeration for `list_personas`.
pub fn persona_list(personas: &[Persona]) -> String {
    let lines = personas
        .iter()
        .map(|p| format!("• **{}** ({}): {}", p.name, p.command, p.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!("📚 **Available Personas**:\n\n{}", lines)
}

/// Raw workflow report for `detect_workflow`.
pub fn workflow_analysis(workflow: &WorkflowResult) -> String {
    let personas = workflow
        .personas
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(" → ");
    format!(
        "🔍 **Workflow Analysis**:\n\n**Is Workflow**: {}\n**Type**: {}\n**Triggers**: {}\n**Personas**: {}",
        workflow.is_workflow,
        workflow.description.unwrap_or("Single task"),
        workflow.triggers.join(", "),
        personas
    )
}
