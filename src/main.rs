//! Persona Router - expert persona selection for prompts
//!
//! Entry point for the `persona-router` binary: an MCP stdio server,
//! a prompt hook, and one-shot commands over the same routing core.

mod cli;
mod config;
mod dispatch;
mod error;
mod hook;
mod logging;
mod persona;
mod routing;
mod server;
mod version;

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::config::RouterConfig;
use crate::dispatch::{Dispatcher, ToolName, ToolOutput};
use crate::error::{Error, Result};
use crate::persona::PersonaRegistry;
use crate::server::PersonaRouterServer;

fn main() {
    let cli = Cli::parse();

    // run() has returned by now, so log guards are dropped and flushed
    match run(cli) {
        Ok(0) => {}
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    }
}

/// Run the selected command and return the process exit status.
fn run(cli: Cli) -> Result<i32> {
    // Commands that don't need configuration
    match &cli.command {
        Commands::Version { short } => {
            let info = version::build_info();
            if *short {
                println!("{}", info.short_version());
            } else {
                print!("{}", info);
            }
            return Ok(0);
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand.clone(), cli.config.as_deref())?;
            return Ok(0);
        }
        Commands::Hook => {
            run_hook(&cli)?;
            return Ok(0);
        }
        _ => {}
    }

    let config = RouterConfig::load(cli.config.as_deref())?;

    // Held until run() returns; dropping them flushes the file appender
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    PersonaRegistry::new().validate(config.routing.workflow_min_triggers)?;
    let dispatcher = Dispatcher::new(&config.routing);

    match cli.command {
        Commands::Serve => run_server(dispatcher, config).map(|()| 0),
        Commands::Enhance {
            prompt,
            context,
            persona,
        } => emit(dispatcher.enhance(&prompt, context.as_deref(), persona.as_deref())),
        Commands::Suggest { prompt } => emit(dispatcher.suggest(&prompt)),
        Commands::List => emit(dispatcher.list()),
        Commands::Workflow { prompt } => emit(dispatcher.detect_workflow(&prompt)),
        Commands::Call { tool, args } => {
            let tool: ToolName = tool.parse()?;
            let arguments: serde_json::Value = serde_json::from_str(&args)
                .map_err(|e| Error::invalid_arguments(tool.as_str(), e.to_string()))?;
            emit(dispatcher.call(tool.as_str(), &arguments)?)
        }
        Commands::Version { .. } | Commands::Config { .. } | Commands::Hook => {
            // Already handled above
            unreachable!();
        }
    }
}

/// Print a tool result. An error-flagged result still prints, with status 1.
fn emit(output: ToolOutput) -> Result<i32> {
    println!("{}", output.joined());
    Ok(exit_status(&output))
}

fn exit_status(output: &ToolOutput) -> i32 {
    if output.is_error {
        1
    } else {
        0
    }
}

/// Run the MCP server until the client disconnects
fn run_server(dispatcher: Dispatcher, config: RouterConfig) -> Result<()> {
    let build = version::build_info();
    info!(
        version = %build.full_version(),
        name = %config.server.name,
        "Starting persona router"
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(PersonaRouterServer::new(dispatcher, config.server).serve_stdio())
}

/// Hook mode never fails on content: a bad config falls back to defaults.
fn run_hook(cli: &Cli) -> Result<()> {
    let loaded = RouterConfig::load(cli.config.as_deref()).and_then(|config| {
        PersonaRegistry::new().validate(config.routing.workflow_min_triggers)?;
        Ok(config)
    });

    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (RouterConfig::default(), Some(e)),
    };

    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet).ok();
    if let Some(e) = load_error {
        warn!(error = %e.format_for_log(), "Using default configuration for hook");
    }

    let dispatcher = Dispatcher::new(&config.routing);
    hook::run(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        &dispatcher,
        &config.hook,
    )
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = RouterConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration written to {}", written.display());
        }
        ConfigSubcommand::Validate => {
            let cfg = RouterConfig::load(config_path)?;
            PersonaRegistry::new().validate(cfg.routing.workflow_min_triggers)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
