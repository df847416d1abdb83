use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use game_encyclopedia::config::{Config, Credentials, ScreenScraperCredentials};
use game_encyclopedia::mcp::McpServer;
use game_encyclopedia::tools::{ToolContext, ToolExecutor};

const PROJECT_NAME: &str = "game-encyclopedia";

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROJECT_NAME)
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", PROJECT_NAME));

    // stdout belongs to the MCP protocol, so logs only ever go to the file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        Some(Commands::Tools) => {
            // listing needs no API keys
            let with_retro = ScreenScraperCredentials::from_env().is_some();
            list_tools(&ToolExecutor::standard(with_retro));
            Ok(())
        }
        Some(Commands::Call { tool, args }) => {
            let ctx = connect(config)?;
            call_tool(&ToolExecutor::for_context(&ctx), &ctx, tool, args).await
        }
        None | Some(Commands::Serve) => serve(config, connect(config)?).await,
    }
}

fn connect(config: &Config) -> Result<ToolContext> {
    let credentials = Credentials::from_env().context("Missing credentials")?;
    info!("Loaded credentials: {:?}", credentials);

    ToolContext::from_config(config, &credentials).context("Failed to build upstream clients")
}

async fn serve(config: &Config, ctx: ToolContext) -> Result<()> {
    let server = McpServer::new(config.server.name.clone(), ToolExecutor::for_context(&ctx), ctx);
    server.run_stdio().await.context("MCP server failed")?;
    Ok(())
}

fn list_tools(executor: &ToolExecutor) {
    for def in executor.definitions() {
        println!("{}", def.name.green().bold());
        println!("    {}", def.description);
    }
}

async fn call_tool(executor: &ToolExecutor, ctx: &ToolContext, tool: &str, args: &str) -> Result<()> {
    let input: serde_json::Value = serde_json::from_str(args).context("--args must be a JSON object")?;
    info!("One-shot call of {}", tool);

    let result = executor.execute(tool, input, ctx).await;
    if result.is_error {
        eprintln!("{}", result.content.red());
        eyre::bail!("Tool {} failed", tool);
    }
    println!("{}", result.content);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Local .env is optional
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging
    setup_logging(&config, cli.is_verbose()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
