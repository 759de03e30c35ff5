//! Configuration system for the persona router
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_ROUTER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main router configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// MCP server identity
    pub server: ServerSettings,

    /// Matching thresholds
    pub routing: RoutingSettings,

    /// Prompt-hook behavior
    pub hook: HookSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// MCP server identity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server name advertised to MCP clients
    pub name: String,

    /// Usage instructions advertised to MCP clients
    pub instructions: String,
}

/// Matching thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Minimum confidence for a single persona to be selected (0.0-1.0)
    pub selection_threshold: f64,

    /// Keyword matches at which confidence saturates at 1.0
    pub saturation_matches: u32,

    /// Trigger words a workflow pattern needs before it fires
    pub workflow_min_triggers: usize,
}

/// Prompt-hook settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    /// Prompts shorter than this (in characters) pass through untouched
    pub min_prompt_chars: usize,

    /// Prompts starting with any of these pass through untouched
    pub skip_prefixes: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "persona-router".to_string(),
            instructions: "Selects the best persona(s) for a task and rewrites the prompt with \
                           the persona's command and context. Use enhance_prompt to rewrite, \
                           suggest_persona or detect_workflow to inspect, list_personas to browse."
                .to_string(),
        }
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            selection_threshold: 0.25,
            saturation_matches: 2,
            workflow_min_triggers: 2,
        }
    }
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            min_prompt_chars: 10,
            skip_prefixes: vec!["/".to_string(), "@".to_string(), "help".to_string()],
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl RouterConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| {
                Error::config_parse(format!("{}: {}", path.display(), e.message()), e)
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            Some(PathBuf::from("persona-router.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("persona-router").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".persona-router").join("config.toml")),
            // System config (Linux)
            Some(PathBuf::from("/etc/persona-router/config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server settings
        if let Ok(val) = std::env::var("PERSONA_ROUTER_SERVER_NAME") {
            self.server.name = val;
        }

        // Routing settings
        if let Ok(val) = std::env::var("PERSONA_ROUTER_SELECTION_THRESHOLD") {
            if let Ok(n) = val.parse() {
                self.routing.selection_threshold = n;
            }
        }
        if let Ok(val) = std::env::var("PERSONA_ROUTER_SATURATION_MATCHES") {
            if let Ok(n) = val.parse() {
                self.routing.saturation_matches = n;
            }
        }
        if let Ok(val) = std::env::var("PERSONA_ROUTER_WORKFLOW_MIN_TRIGGERS") {
            if let Ok(n) = val.parse() {
                self.routing.workflow_min_triggers = n;
            }
        }

        // Hook settings
        if let Ok(val) = std::env::var("PERSONA_ROUTER_HOOK_MIN_CHARS") {
            if let Ok(n) = val.parse() {
                self.hook.min_prompt_chars = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("PERSONA_ROUTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_ROUTER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_ROUTER_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let threshold = self.routing.selection_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::config_field_invalid(
                "routing.selection_threshold",
                format!("selection_threshold must be between 0.0 and 1.0, got {}", threshold),
            ));
        }

        if self.routing.saturation_matches == 0 {
            return Err(Error::config_field_invalid(
                "routing.saturation_matches",
                "saturation_matches must be at least 1",
            ));
        }

        if self.routing.workflow_min_triggers == 0 {
            return Err(Error::config_field_invalid(
                "routing.workflow_min_triggers",
                "workflow_min_triggers must be at least 1",
            ));
        }

        if self.server.name.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "server.name",
                "server name cannot be empty",
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".persona-router")
                .join("config.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Persona Router Configuration

[server]
# Server name advertised to MCP clients
name = "persona-router"

[routing]
# Minimum confidence for a single persona to be selected (0.0-1.0)
selection_threshold = 0.25

# Keyword matches at which confidence saturates at 1.0
saturation_matches = 2

# Trigger words a workflow pattern needs before it fires
workflow_min_triggers = 2

[hook]
# Prompts shorter than this (in characters) pass through untouched
min_prompt_chars = 10

# Prompts starting with any of these pass through untouched
skip_prefixes = ["/", "@", "help"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.persona-router/logs/router.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.server.name, "persona-router");
        assert_eq!(config.routing.selection_threshold, 0.25);
        assert_eq!(config.routing.saturation_matches, 2);
        assert_eq!(config.routing.workflow_min_triggers, 2);
        assert_eq!(config.hook.min_prompt_chars, 10);
        assert_eq!(config.hook.skip_prefixes, vec!["/", "@", "help"]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_override() {
        env::set_var("PERSONA_ROUTER_SELECTION_THRESHOLD", "0.5");
        env::set_var("PERSONA_ROUTER_WORKFLOW_MIN_TRIGGERS", "3");
        env::set_var("PERSONA_ROUTER_LOG_LEVEL", "debug");

        let mut config = RouterConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.routing.selection_threshold, 0.5);
        assert_eq!(config.routing.workflow_min_triggers, 3);
        assert_eq!(config.logging.level, "debug");

        env::remove_var("PERSONA_ROUTER_SELECTION_THRESHOLD");
        env::remove_var("PERSONA_ROUTER_WORKFLOW_MIN_TRIGGERS");
        env::remove_var("PERSONA_ROUTER_LOG_LEVEL");
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let mut config = RouterConfig::default();
        config.routing.selection_threshold = 1.5;
        assert!(config.validate().is_err());
        config.routing.selection_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_saturation() {
        let mut config = RouterConfig::default();
        config.routing.saturation_matches = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigValidation { field: Some(ref f), .. } if f == "routing.saturation_matches"
        ));
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = RouterConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(RouterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = RouterConfig::default();
        config.logging.file = Some("~/logs/router.log".to_string());
        config.expand_paths();

        assert!(!config.logging.file.unwrap().contains('~'));
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: RouterConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.routing.selection_threshold, 0.25);
        assert_eq!(config.hook.skip_prefixes, vec!["/", "@", "help"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config_str = r#"
[routing]
selection_threshold = 0.5

[hook]
min_prompt_chars = 5
"#;

        let config: RouterConfig = toml::from_str(config_str).unwrap();

        assert_eq!(config.routing.selection_threshold, 0.5);
        assert_eq!(config.routing.saturation_matches, 2);
        assert_eq!(config.hook.min_prompt_chars, 5);
        assert_eq!(config.hook.skip_prefixes, vec!["/", "@", "help"]);
        assert_eq!(config.server.name, "persona-router");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = RouterConfig::load(Some("/nonexistent/persona-router.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        init_config(Some(path_str), false).unwrap();
        assert!(path.exists());
        assert!(init_config(Some(path_str), false).is_err());
        assert!(init_config(Some(path_str), true).is_ok());
    }
}
