use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use kolam_application::{ConversationSession, ConversationView, ScrollViewport, SubmitOutcome};
use kolam_core::transcript::{Message, MessageRole};
use kolam_infrastructure::{ConfigBasedUserService, ConfigService};

const COMMANDS: &[(&str, &str)] = &[
    ("/latest", "jump back to the newest message"),
    ("/history", "print the whole conversation again"),
    ("/help", "show this help"),
];

/// Slash commands starting with `prefix`; empty unless `prefix` is a bare command word.
fn matching_commands(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
    let is_command = prefix.starts_with('/') && !prefix.contains(' ');
    COMMANDS
        .iter()
        .map(|(cmd, _)| *cmd)
        .filter(move |cmd| is_command && cmd.starts_with(prefix))
}

/// CLI helper for rustyline: slash-command completion, hints and highlighting.
#[derive(Clone, Default)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = matching_commands(&line[..pos])
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') || parse_chip_pick(line).is_some() {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        matching_commands(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// A terminal always shows the newest output, so scrolling is immediate.
struct TerminalViewport;

impl ScrollViewport for TerminalViewport {
    fn scroll_to_bottom(&self) -> kolam_core::Result<()> {
        tracing::trace!("[Repl] terminal already at bottom");
        Ok(())
    }
}

fn print_message(message: &Message, suggestion_limit: usize) {
    match message.role() {
        MessageRole::User => {
            println!("{}", format!("> {}", message.body()).green());
        }
        MessageRole::Assistant => {
            if let Some(category) = message.category() {
                println!("{}", format!("[{}]", category).bright_magenta());
            }
            for line in message.body().lines() {
                println!("{}", line.bright_blue());
            }
            for (i, chip) in message.displayed_suggestions(suggestion_limit).iter().enumerate() {
                println!("  {}", format!("#{} {}", i + 1, chip).yellow());
            }
        }
    }
    println!();
}

/// Prints messages as they are published, plus a composing indicator.
async fn render_view(mut rx: watch::Receiver<ConversationView>, suggestion_limit: usize) {
    let mut printed = 0;
    let mut was_composing = false;

    loop {
        {
            let view = rx.borrow_and_update();
            for message in view.messages.iter().skip(printed) {
                // User lines are echoed by the input loop already
                if message.is_assistant() {
                    print_message(message, suggestion_limit);
                }
            }
            printed = view.messages.len();

            if view.composing && !was_composing {
                println!("{}", "kolam companion is composing...".bright_black());
            }
            was_composing = view.composing;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

/// Parses `#N` (1-based) into a chip pick; anything else is ordinary text.
fn parse_chip_pick(line: &str) -> Option<usize> {
    line.strip_prefix('#')?
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
}

fn print_help() {
    println!("{}", "Ask about kolam, tell me how much time you have, or:".bright_black());
    for (cmd, about) in COMMANDS {
        println!("  {} {}", cmd.bright_cyan(), about.bright_black());
    }
    println!("  {} {}", "#N".bright_cyan(), "pick suggestion N from the last reply".bright_black());
    println!("  {} {}", "quit".bright_cyan(), "leave the conversation".bright_black());
    println!();
}

/// Sends the `n`-th (1-based) displayed suggestion of the newest assistant message.
async fn choose_numbered(session: &ConversationSession, n: usize) -> kolam_core::Result<SubmitOutcome> {
    let view = session.view();
    let message_id = view
        .messages
        .iter()
        .rev()
        .find(|m| m.is_assistant())
        .map(|m| m.id())
        .ok_or_else(|| kolam_core::KolamError::not_found("message", "assistant"))?;
    session.choose_suggestion(message_id, n - 1).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let config_service = match std::env::args().nth(1) {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = config_service.get_config();
    let user_service = ConfigBasedUserService::new(config_service);
    let session = ConversationSession::from_config(&user_service, &config);
    session.attach_viewport(Arc::new(TerminalViewport));

    let renderer = tokio::spawn(render_view(
        session.subscribe(),
        session.suggestion_display_limit(),
    ));

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== Kolam Companion ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let result = match trimmed {
                    "/help" => {
                        print_help();
                        continue;
                    }
                    "/latest" => {
                        session.jump_to_latest().await;
                        continue;
                    }
                    "/history" => {
                        for message in session.snapshot().await {
                            print_message(&message, session.suggestion_display_limit());
                        }
                        continue;
                    }
                    _ => match parse_chip_pick(trimmed) {
                        Some(n) => choose_numbered(&session, n).await,
                        None => session.submit(trimmed).await,
                    },
                };

                match result {
                    Ok(SubmitOutcome::Accepted { message_id, .. }) => {
                        if let Some(message) = session.view().messages.iter().find(|m| m.id() == message_id) {
                            println!("{}", format!("> {}", message.body()).green());
                        }
                    }
                    Ok(SubmitOutcome::Ignored) => {}
                    Err(e) if e.is_not_found() => {
                        println!("{}", "No such suggestion.".yellow());
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Error: {}", e).red());
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    session.shutdown().await;
    drop(session);
    let _ = renderer.await;

    Ok(())
}
