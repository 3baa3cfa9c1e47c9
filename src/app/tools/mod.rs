//! One console front-end per `toolshed` subcommand.

pub mod barcode;
pub mod captcha;
pub mod chem;
pub mod finance;
pub mod mandelbrot;
pub mod password;
pub mod pomoban;
pub mod ports;
pub mod todo;
pub mod words;

use crate::app::prompt::Prompter;
use crate::config::cli::Command;
use crate::config::ToolshedConfig;
use crate::utils::error::{ErrorCategory, Result};
use std::io::{BufRead, Write};

pub async fn run(command: Command, config: &ToolshedConfig) -> Result<()> {
    tracing::debug!("Running {:?}", command);
    match command {
        Command::Ports(args) => ports::run(&args, &config.ports, &mut std::io::stdout()),
        Command::Todo(args) => todo::run(&args, config),
        Command::Password(args) => password::run(&args),
        Command::Chem(args) => chem::run(&args.action, &mut std::io::stdout()),
        Command::Finance => finance::run(config),
        Command::Mandelbrot(args) => mandelbrot::run(&args),
        Command::Pomoban(args) => pomoban::run(&args, config).await,
        Command::Words(args) => words::run(&args),
        Command::Barcode(args) => barcode::run(&args),
        Command::Captcha(args) => captcha::run(&args),
    }
}

/// Prints the outcome of a menu action. Input errors are shown and the menu continues;
/// anything else ends the session.
pub(crate) fn report<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    outcome: Result<String>,
) -> Result<()> {
    match outcome {
        Ok(message) => prompter.say(format!("✅ {}", message)),
        Err(e) if e.category() == ErrorCategory::Input => prompter.say(format!("❌ {}", e)),
        Err(e) => Err(e),
    }
}
