use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vocalc::config::Config;
use vocalc::history::LedgerEvent;
use vocalc::normalize::normalize;
use vocalc::session::{Session, SessionEvent};

#[derive(Parser)]
#[command(name = "vocalc", version, about = "Voice and keyboard arithmetic calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single phrase or expression and exit
    Eval { phrase: String },
    /// Normalize a phrase without evaluating it
    Normalize { phrase: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Some(Command::Eval { phrase }) => {
            let mut session = Session::new(&config);
            match session.submit(&phrase) {
                SessionEvent::Result { expression, value } => {
                    println!("{expression} = {value}");
                }
                _ => {
                    eprintln!("Invalid expression!");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Some(Command::Normalize { phrase }) => {
            println!("{}", normalize(&phrase));
            Ok(())
        }
        None => run_session(config),
    }
}

/// Interactive session: each line is a phrase ("five plus three") or an
/// expression ("5 + 3"); slash commands cover history and clipboard actions.
fn run_session(config: Config) -> Result<()> {
    let (ledger_tx, ledger_rx) = flume::unbounded::<LedgerEvent>();
    let mut session = Session::new(&config).with_ledger_observer(ledger_tx);

    // stdin reader thread feeding the session loop
    let (input_tx, input_rx) = flume::unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    println!("vocalc - type an expression or a phrase like \"five plus three\".");
    println!("/help lists commands.");
    print_prompt(&config.prompt);

    while let Ok(line) = input_rx.recv() {
        let line = line.trim();
        if line.is_empty() {
            print_prompt(&config.prompt);
            continue;
        }

        if line.starts_with('/') {
            match slash_command(line, &session, config.history_display) {
                ReplAction::Quit => break,
                ReplAction::Message(msg) => println!("{msg}"),
            }
        } else {
            render_event(session.submit(line));
            let mut changed = false;
            while ledger_rx.try_recv().is_ok() {
                changed = true;
            }
            if changed {
                render_history(&session, config.history_display);
            }
        }
        print_prompt(&config.prompt);
    }

    Ok(())
}

fn print_prompt(prompt: &str) {
    print!("{prompt}");
    let _ = io::stdout().flush();
}

fn render_event(event: SessionEvent) {
    match event {
        SessionEvent::Result { expression, value } => {
            println!("Expression: {expression}");
            println!("Result: {value}");
        }
        SessionEvent::Invalid { expression } => {
            println!("Expression: {expression}");
            println!("Invalid expression!");
        }
        SessionEvent::Empty => {}
        SessionEvent::Transcription(err) => eprintln!("{err}"),
        SessionEvent::Listening | SessionEvent::Idle => {}
    }
}

fn render_history(session: &Session, limit: usize) {
    for (idx, entry) in session.history().take(limit).enumerate() {
        println!("  {idx}: {} = {}", entry.expression, entry.value);
    }
}

enum ReplAction {
    Quit,
    Message(String),
}

fn slash_command(line: &str, session: &Session, history_display: usize) -> ReplAction {
    let mut parts = line[1..].splitn(2, ' ');
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "quit" | "exit" | "q" => ReplAction::Quit,
        "history" => {
            if session.history_len() == 0 {
                return ReplAction::Message("History is empty.".to_string());
            }
            let mut out = String::new();
            for (idx, entry) in session.history().take(history_display).enumerate() {
                out.push_str(&format!("  {idx}: {} = {}\n", entry.expression, entry.value));
            }
            ReplAction::Message(out.trim_end().to_string())
        }
        "use" => match arg.parse::<usize>() {
            Ok(index) => match session.replay(index) {
                Ok(entry) => ReplAction::Message(format!(
                    "Expression: {}\nResult: {}",
                    entry.expression, entry.value
                )),
                Err(e) => ReplAction::Message(e.to_string()),
            },
            Err(_) => ReplAction::Message("Usage: /use <index>".to_string()),
        },
        "copy" => copy_last_result(session),
        "help" | "commands" => ReplAction::Message(
            "\
Commands:
  /history      Show past computations (newest first)
  /use <n>      Show history entry n again (0 = most recent)
  /copy         Copy the last result to the clipboard
  /quit         Exit"
                .to_string(),
        ),
        _ => ReplAction::Message(format!("Unknown command: /{cmd} (try /help)")),
    }
}

#[cfg(feature = "clipboard")]
fn copy_last_result(session: &Session) -> ReplAction {
    let entry = match session.replay(0) {
        Ok(entry) => entry,
        Err(e) => return ReplAction::Message(e.to_string()),
    };
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(entry.value.to_string())) {
        Ok(()) => ReplAction::Message("Copied!".to_string()),
        Err(e) => ReplAction::Message(format!("Clipboard error: {e}")),
    }
}

#[cfg(not(feature = "clipboard"))]
fn copy_last_result(_session: &Session) -> ReplAction {
    ReplAction::Message("Clipboard support not built in (enable the clipboard feature).".to_string())
}
