//! CLI command definitions, routing, and tracing setup.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokyon_consultant::{ChatSession, ConsultantClient};
use tokyon_content::ContentService;
use tokyon_leads::{LeadAdapter, LeadSubmission, SubmissionError};
use tokyon_shared::{AppConfig, init_config, load_config};
use tokyon_web::AppState;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Tokyon: lead capture and consultant backend for the agency site.
#[derive(Parser)]
#[command(
    name = "tokyon",
    version,
    about = "Serve the Tokyon site APIs, submit leads, and talk to the consultant.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the HTTP API.
    Serve {
        /// Interface to bind (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Submit a single lead to the configured pipe.
    Submit {
        /// Company name.
        #[arg(long)]
        company: String,

        /// Contact e-mail.
        #[arg(long)]
        email: String,

        /// Phone or WhatsApp.
        #[arg(long, default_value = "")]
        phone: String,

        /// Free-text challenge description.
        #[arg(long, default_value = "")]
        challenge: String,
    },

    /// Talk to the strategy consultant in the terminal.
    Chat,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "tokyon=info,tower_http=info",
        1 => "tokyon=debug,tower_http=debug",
        _ => "tokyon=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { host, port } => cmd_serve(host, port).await,
        Command::Submit {
            company,
            email,
            phone,
            challenge,
        } => {
            let lead = LeadSubmission {
                company,
                email,
                phone,
                challenge,
            };
            cmd_submit(&lead).await
        }
        Command::Chat => cmd_chat().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;

    let host = host.unwrap_or(config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| eyre!("invalid listen address '{host}:{port}': {e}"))?;

    let leads = LeadAdapter::from_config(&config.pipefy)?;
    let consultant = ConsultantClient::from_config(&config.consultant)?;
    let content = ContentService::from_config(&config.content)?;

    info!(%addr, cms = content.has_cms(), "starting HTTP API");
    println!("Serving on http://{addr}");

    tokyon_web::serve(addr, AppState::new(leads, consultant, content)).await?;
    Ok(())
}

async fn cmd_submit(lead: &LeadSubmission) -> Result<()> {
    let config = load_config()?;
    let adapter = LeadAdapter::from_config(&config.pipefy)?;

    info!(company = %lead.company, "submitting lead");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(format!("Sending lead for {} to Pipefy", lead.company));

    let outcome = adapter.submit(lead).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(id) => {
            println!();
            println!("  Lead created successfully!");
            println!("  Card:    {id}");
            println!("  Company: {}", lead.company);
            println!();
            Ok(())
        }
        Err(SubmissionError::Misconfigured { message }) => Err(eyre!(
            "{message}. Set the {} and {} environment variables.",
            config.pipefy.token_env,
            config.pipefy.pipe_id_env
        )),
        Err(e) => Err(e.into()),
    }
}

async fn cmd_chat() -> Result<()> {
    let config = load_config()?;
    let client = ConsultantClient::from_config(&config.consultant)?;
    let mut session = ChatSession::new();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Tokyon consultant. Type /reset to start over, /quit to leave.");

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();

        match message {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                session.clear();
                println!("(conversation cleared)");
                continue;
            }
            _ => {}
        }

        let reply = client.send_message(&mut session, message).await;
        println!("\n{reply}\n");
    }

    info!(turns = session.turns().len(), "chat session ended");
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
