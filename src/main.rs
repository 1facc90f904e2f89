//! video-dash - browse a video catalog in your terminal
//!
//! Lists and searches videos served by the catalog API, one page at a time.

use std::env;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use video_dash::core::api::ApiClient;
use video_dash::core::controller::Controller;
use video_dash::core::session::Session;
use video_dash::logging;
use video_dash::storage::config::{self, API_BASE_ENV};
use video_dash::ui::prompt::{self, HELP, PromptInput};
use video_dash::ui::render::{loading_spinner, render_view};
use video_dash::utils::paths::get_config_path;

/// Browse and search a video catalog API from your terminal.
#[derive(Parser, Debug)]
#[command(name = "video-dash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start with this search query
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Catalog API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Print one page and exit
    #[arg(long)]
    once: bool,

    /// Log filter, e.g. "debug" or "video_dash=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Edit the configuration file
    #[arg(short, long)]
    edit: bool,
}

/// Wait for the outstanding fetch with a spinner, then draw the dashboard
async fn settle_and_render(session: &mut Session) {
    if session.controller().is_loading() {
        let spinner = loading_spinner();
        session.settle().await;
        spinner.finish_and_clear();
    }
    println!("\n{}\n", render_view(session.controller()));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A broken config file must not block --edit
    let file_config = if cli.edit {
        config::load_config_or_default_from(&get_config_path()).await
    } else {
        config::load_config().await?
    };

    let directive = logging::resolve_directive(
        cli.log_level.as_deref(),
        env::var("RUST_LOG").ok(),
        &file_config.log_level,
    );
    logging::init(&directive);

    // Handle --edit flag
    if cli.edit {
        config::edit_config(&file_config.editor).await?;
        return Ok(());
    }

    let env_base = env::var(API_BASE_ENV).ok();
    let cfg = config::resolve(file_config, cli.api_base.clone(), env_base)?;
    let client = ApiClient::new(&cfg)?;

    match client.health().await {
        Ok(status) => {
            info!(base = client.base(), message = %status.message, "catalog API reachable")
        }
        Err(e) => warn!(base = client.base(), error = %e, "catalog API health check failed"),
    }

    let controller = Controller::with_query(&cli.query.join(" "));
    let mut session = Session::new(Arc::new(client), controller);

    session.start();
    settle_and_render(&mut session).await;

    if cli.once {
        return Ok(());
    }

    println!("{}", "Type ? for help.".dimmed());

    loop {
        let input = tokio::task::spawn_blocking(prompt::read_line).await?;

        let commands = match input {
            PromptInput::Run(commands) => commands,
            PromptInput::Help => {
                println!("{}", HELP);
                continue;
            }
            PromptInput::Unknown(message) => {
                eprintln!("{} {}", "Error:".red(), message);
                continue;
            }
        };

        let mut running = true;
        for command in commands {
            if !session.dispatch(command) {
                running = false;
                break;
            }
        }
        if !running {
            break;
        }

        settle_and_render(&mut session).await;
    }

    Ok(())
}
