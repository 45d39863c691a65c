use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lead_bootstrap::{AppConfig, logging, signals};
use lead_capture::LeadCaptureModule;
use lead_capture_sdk::LeadField;
use lead_form::{FormController, FormError, HttpFormTransport};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Lead Capture Server - records booking form leads in a Google Sheet
#[derive(Parser)]
#[command(name = "lead-capture-server")]
#[command(about = "Lead Capture Server - records booking form leads in a Google Sheet")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration, print it with secrets redacted and exit
    Check,
    /// Fill in the booking form and send it to a running server
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// Base URL of the server hosting `/api/submit-form`
    #[arg(long, default_value = "http://localhost:3000")]
    server_url: String,

    #[arg(long)]
    full_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// WhatsApp number in international form, e.g. +14155551234
    #[arg(long)]
    whatsapp: Option<String>,

    #[arg(long)]
    business_goals: Option<String>,

    /// Service of interest: automation, visual or both
    #[arg(long)]
    service: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    logging::init_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
        Commands::Submit(args) => submit_form(args).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let module = LeadCaptureModule::from_app_config(&config)?;
    let app = module.router();

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Lead Capture Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await?;

    tracing::info!("Lead Capture Server stopped");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    LeadCaptureModule::from_app_config(config)?;
    println!("Configuration is valid");
    println!("{}", config.to_redacted_json()?);
    Ok(())
}

async fn submit_form(args: SubmitArgs) -> Result<()> {
    let transport = HttpFormTransport::new(&args.server_url)?;
    let mut form = FormController::new();

    let fields = [
        (LeadField::FullName, args.full_name),
        (LeadField::Email, args.email),
        (LeadField::Whatsapp, args.whatsapp),
        (LeadField::BusinessGoals, args.business_goals),
        (LeadField::ServiceType, args.service),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set_field(field, value)?;
        }
    }

    match form.submit(&transport).await {
        Ok(receipt) => {
            println!(
                "Submitted at {} ({} row(s) added)",
                receipt.submitted_at, receipt.rows_added
            );
            Ok(())
        }
        Err(FormError::Invalid(count)) => {
            for (field, message) in form.field_errors() {
                eprintln!("{field}: {message}");
            }
            anyhow::bail!("{count} field(s) need attention")
        }
        Err(e) => Err(e.into()),
    }
}
