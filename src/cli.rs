//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the persona router.

use clap::{Parser, Subcommand};

/// Persona Router - picks expert personas for prompts
///
/// Scores a prompt against a fixed set of expert personas, detects
/// multi-persona workflows, and rewrites the prompt with the chosen
/// persona's command and context. Runs as an MCP server, a prompt hook,
/// or one-shot commands.
#[derive(Parser, Debug)]
#[command(name = "persona-router")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PERSONA_ROUTER_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Enhance a prompt with the best persona(s)
    Enhance {
        /// The prompt to enhance
        prompt: String,

        /// Additional context about the task
        #[arg(long)]
        context: Option<String>,

        /// Force a persona by id (e.g. security-expert)
        #[arg(short, long)]
        persona: Option<String>,
    },

    /// Recommend a persona or workflow without changing the prompt
    Suggest {
        /// The prompt to analyze
        prompt: String,
    },

    /// List all personas
    List,

    /// Report workflow detection for a prompt
    Workflow {
        /// The prompt to analyze
        prompt: String,
    },

    /// Invoke a tool by name with JSON arguments
    Call {
        /// Tool name: enhance_prompt, suggest_persona, list_personas, detect_workflow
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Prompt-hook mode: read a prompt on stdin, print the enhanced prompt
    Hook,

    /// Display version and build information
    Version {
        /// Print a single line
        #[arg(short, long)]
        short: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}
