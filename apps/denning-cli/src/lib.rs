//! Shared plumbing for the `denning` and `denning-ingest` binaries.

use std::io::{self, BufRead, Write};
use std::path::Path;

use denning_agent::Agent;
use denning_core::{Config, Settings};
use tracing_subscriber::EnvFilter;

pub const PROMPT: &str = "[Denning] Ask your question > ";
pub const BANNER: &str = "-- Welcome to Denning: answers grounded purely in law --";
const FRAME_TOP: &str = "==================== Denning's Answer ====================";
const FRAME_BOTTOM: &str = "==========================================================";

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

/// `--config <path>` when given, environment layering otherwise.
pub fn load_settings(config: Option<&Path>) -> denning_core::Result<Settings> {
    match config {
        Some(path) => Config::from_path(path)?.settings(),
        None => Config::load()?.settings(),
    }
}

pub fn load_agent(config: Option<&Path>) -> Result<Agent, denning_agent::AgentError> {
    match config {
        Some(path) => Agent::from_config_path(path),
        None => Agent::load(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Status,
    Ask(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "exit" | "quit" => Self::Exit,
            "status" | "state" | "what are you working on?" => Self::Status,
            _ => Self::Ask(trimmed.to_string()),
        }
    }
}

/// Read questions until `exit`/`quit` or end of input.
pub fn run_repl(agent: &mut Agent, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "Agent initialized successfully. Type 'exit' or 'quit' to end.")?;
    let mut lines = input.lines();
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        match ReplCommand::parse(&line) {
            ReplCommand::Exit => break,
            ReplCommand::Status => writeln!(out, "Agent Status: {}", agent.get_status())?,
            ReplCommand::Ask(question) => {
                writeln!(out, "Thinking...")?;
                let answer = agent.handle_query(&question);
                writeln!(out, "\n{FRAME_TOP}\n{answer}\n{FRAME_BOTTOM}")?;
            }
        }
    }
    writeln!(out, "Exiting Denning. Goodbye.")?;
    Ok(())
}
