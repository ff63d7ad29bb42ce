mod auth;
mod donation;
mod project;

use std::io::{self, BufRead, Write};

use super::cli::Command;
use super::error::CommandError;
use super::output::Printer;
use super::state::AppState;

pub async fn run(command: Command, state: &AppState, printer: &Printer) -> Result<(), CommandError> {
    match command {
        Command::Login { username, password } => auth::login(state, printer, username, password).await,
        Command::Register {
            username,
            email,
            password,
        } => auth::register(state, printer, username, email, password).await,
        Command::Logout => auth::logout(state, printer).await,
        Command::Status => auth::status(state, printer).await,
        Command::Projects { action } => project::projects(state, printer, action).await,
        Command::Support { project } => project::support(state, printer, project).await,
        Command::Comments { action } => project::comments(state, printer, action).await,
        Command::Dashboard => project::dashboard(state, printer).await,
        Command::Donate { project, amount } => donation::donate(state, printer, project, amount).await,
        Command::Donations => donation::history(state, printer).await,
    }
}

/// Prompt on stderr and read one line from stdin
fn read_line(prompt: &str) -> Result<String, CommandError> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
