use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use interaction_logger::{
    FormSnapshot, HostDocument, HttpTransport, Outcome, Reload, SubmitEvent, Tone, attach,
    dom::STATUS_ID,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_appender::rolling;
use util::config;

/// Log a learning interaction, the same way the dashboard form does.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Student id, exactly as typed into the form
    #[arg(long, allow_hyphen_values = true)]
    student_id: String,
    /// Content id, as selected in the form
    #[arg(long, allow_hyphen_values = true)]
    content_id: String,
    /// Score; leave empty to send null
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    score: String,
    /// Time spent in seconds; leave empty to send null
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    time_spent: String,
    /// Mark the content as completed
    #[arg(long)]
    completed: bool,
    /// Server base URL. Defaults to API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
}

/// Reload hook for a terminal: there is no page, so just say so.
struct TerminalReload;

impl Reload for TerminalReload {
    fn reload(&self) {
        println!("{}", "Reloading page...".dimmed());
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = init_logging(&config::log_file());

    let transport = match &args.base_url {
        Some(url) => HttpTransport::new(url),
        None => HttpTransport::from_config(),
    }
    .context("invalid server base URL")?;

    let document = HostDocument::interaction_page(&FormSnapshot {
        student_id: args.student_id,
        content_id: args.content_id,
        score: args.score,
        time_spent: args.time_spent,
        completed: args.completed,
    });

    let Some(handler) = attach(&document, Arc::new(transport), Arc::new(TerminalReload))
        .context("binding interaction form")?
    else {
        bail!("interaction form missing from host document");
    };

    let mut event = SubmitEvent::new();
    let submission = handler.submit(&mut event).await;

    let status = document.status(STATUS_ID)?;
    let text = status.text();
    match submission.outcome.status_message().tone {
        Tone::Success => println!("{}", text.green()),
        Tone::Failure => eprintln!("{}", text.red()),
    }

    if let Some(reload) = submission.reload {
        reload.await.context("waiting for page reload")?;
    }

    Ok(match submission.outcome {
        Outcome::Logged { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn init_logging(log_file: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = config::log_to_stdout().then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(config::log_level())
        .unwrap_or_else(|_| EnvFilter::new("interaction_logger=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
