//! Prompt-hook mode: enhance a prompt read from stdin and print it.
//!
//! Input is either a JSON object, whose string `prompt` field is the prompt,
//! or plain text. Whatever happens, the hook prints a usable prompt.

use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::config::HookSettings;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};

/// Pull the prompt out of raw hook input.
///
/// A JSON object without a string `prompt` yields the raw input untouched.
/// Anything that is not a JSON object is plain text and gets trimmed.
pub fn extract_prompt(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(payload)) => match payload.get("prompt") {
            Some(serde_json::Value::String(prompt)) => prompt.clone(),
            _ => raw.to_string(),
        },
        _ => raw.trim().to_string(),
    }
}

/// Whether `prompt` is worth enhancing under `settings`.
pub fn should_enhance(prompt: &str, settings: &HookSettings) -> bool {
    if prompt.chars().count() < settings.min_prompt_chars {
        return false;
    }
    !settings
        .skip_prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && prompt.starts_with(prefix.as_str()))
}

/// Enhanced text for one hook invocation. Never fails.
pub fn process(raw: &str, dispatcher: &Dispatcher, settings: &HookSettings) -> String {
    let prompt = extract_prompt(raw);

    if !should_enhance(&prompt, settings) {
        debug!(chars = prompt.chars().count(), "Skipping enhancement");
        return prompt;
    }

    let output = dispatcher.enhance(&prompt, None, None);
    if output.is_error {
        warn!("Enhancement reported an error, echoing original prompt");
    }
    output.joined()
}

/// Read all of `input`, write the resulting prompt line to `output`.
pub fn run<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    dispatcher: &Dispatcher,
    settings: &HookSettings,
) -> Result<()> {
    let mut raw = String::new();
    let text = match input.read_to_string(&mut raw) {
        Ok(_) => process(&raw, dispatcher, settings),
        Err(e) => {
            warn!(error = %e, "Failed to read hook input");
            String::new()
        }
    };

    writeln!(output, "{}", text).map_err(|e| Error::IoWrite {
        path: "<stdout>".into(),
        source: e,
    })?;
    output.flush().map_err(Error::Io)
}
