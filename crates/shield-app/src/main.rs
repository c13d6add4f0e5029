//! `shield` binary - composition root.
//!
//! 1. Parse arguments and load configuration from TOML
//! 2. Overlay EmailJS credentials from the environment and CLI overrides
//! 3. Install the tracing subscriber
//! 4. Run the chat REPL, send a quote request, or print the local log

mod cli;
mod repl;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use shield_chat::{render_plain, ChatError, ChatSession, ConversationTurn, MessageClassifier};
use shield_core::config::ShieldConfig;
use shield_core::error::{Result, ShieldError};
use shield_intake::RawFile;
use shield_quote::{DispatchOutcome, LocalSubmissionLog, QuoteFields, QuoteForm, SubmissionDispatcher};

use crate::cli::{CliArgs, Command, QuoteArgs};
use crate::repl::{parse_line, ReplCommand, HELP};

const QUOTE_CONFIRMATION: &str =
    "Thanks! Your quote request has been received. Ryan will get back to you shortly.";

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_assistant(turn: &ConversationTurn) {
    if let Some(text) = &turn.text {
        println!("\nassistant: {}\n", render_plain(text));
    }
}

/// Read each path, reporting unreadable files and keeping the rest.
async fn read_files(paths: &[PathBuf]) -> Vec<RawFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match RawFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read photo");
                println!("Could not read {}: {}", path.display(), e);
            }
        }
    }
    files
}

async fn run_chat(config: &ShieldConfig) -> Result<()> {
    let classifier = Arc::new(MessageClassifier::new());
    let mut session = ChatSession::from_config(config, classifier);
    if let Some(turn) = session.greet() {
        print_assistant(turn);
    }
    println!("(type /help for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            ReplCommand::Message(text) => {
                if text.is_empty() && session.pending_images().is_empty() {
                    continue;
                }
                println!("...");
                match session.send(&text).await {
                    Ok(turn) => print_assistant(turn),
                    Err(ChatError::EmptyMessage) => {}
                    Err(e) => println!("{e}"),
                }
            }
            ReplCommand::Attach(paths) => {
                let files = read_files(&paths).await;
                for rejection in session.attach(files).await {
                    println!("! {rejection}");
                }
                println!("{}", session.tray().hint());
            }
            ReplCommand::Remove(index) => match session.remove_image(index) {
                Some(image) => println!("Removed {}", image.name),
                None => println!("No photo number {}", index + 1),
            },
            ReplCommand::Photos => {
                if session.pending_images().is_empty() {
                    println!("No photos attached.");
                }
                for (i, image) in session.pending_images().iter().enumerate() {
                    println!("  {}. {} ({})", i + 1, image.name, image.media_type);
                }
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Invalid(msg) => println!("{msg}"),
        }
    }

    tracing::info!(turns = session.transcript().len(), "Chat ended");
    Ok(())
}

async fn run_quote(config: &ShieldConfig, args: QuoteArgs) -> Result<()> {
    let mut form = QuoteForm::from_config(config);
    form.fields = QuoteFields {
        name: args.name,
        phone: args.phone,
        email: args.email,
        vehicle: args.vehicle,
        color: args.color,
        service_type: args.service,
        description: args.description,
    };

    let files = read_files(&args.photos).await;
    for rejection in form.attach(files).await {
        println!("! {rejection}");
    }

    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(errors) => {
            for (field, err) in &errors.errors {
                println!("{field}: {err}");
            }
            return Err(errors.into());
        }
    };

    let dispatcher = SubmissionDispatcher::from_config(config, &config.general.data_path());
    let outcome = dispatcher.send(&submission).await;
    if outcome == DispatchOutcome::NotCaptured {
        tracing::warn!("Quote request was not captured by any store");
    }
    tracing::info!(%outcome, "Quote dispatch finished");

    // The customer always sees the confirmation.
    println!("{QUOTE_CONFIRMATION}");
    Ok(())
}

async fn run_submissions(config: &ShieldConfig) -> Result<()> {
    let log = LocalSubmissionLog::in_dir(
        &config.general.data_path(),
        &config.notifications.fallback_file,
    );
    let records = log.load().await.map_err(ShieldError::from)?;
    if records.is_empty() {
        println!("No locally saved submissions in {}", log.path().display());
        return Ok(());
    }
    for record in &records {
        println!(
            "{}  {}  {}  {}  {}  {} photo(s)",
            record.saved_at.format("%Y-%m-%d %H:%M"),
            record.name,
            record.phone,
            record.vehicle,
            record.service_type,
            record.images.len()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = ShieldConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    args.apply_overrides(&mut config);

    init_tracing(&config.general.log_level);
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    let result = match args.command {
        Command::Chat => run_chat(&config).await,
        Command::Quote(quote) => run_quote(&config, quote).await,
        Command::Submissions => run_submissions(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
