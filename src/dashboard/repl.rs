//! Interactive terminal front end
//!
//! Reads commands line by line and redraws the dashboard after every
//! command and every fetch completion. Input and fetches are multiplexed
//! on the caller's task, so a slow resource never blocks typing.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::controller::DashboardController;
use super::view::render;
use crate::error::Result;

/// A line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the login form with the text after `login`
    Login(String),
    /// Log out
    Logout,
    /// Redraw the current frame
    Show,
    /// List commands
    Help,
    /// Leave the dashboard
    Quit,
    /// Anything else
    Unknown(String),
}

/// Parse one input line
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "login" => Command::Login(rest.to_string()),
        "logout" => Command::Logout,
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

const HELP: &str = "Commands: login <username>, logout, show, help, quit";

/// Run the dashboard against `input` until `quit` or end of input.
///
/// At end of input, outstanding fetches are awaited and a final frame is
/// drawn, so piped sessions still show their results.
pub async fn run_session<R, W>(
    controller: &mut DashboardController,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    draw(controller, out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed with {} fetches in flight", controller.in_flight());
                    controller.settle().await;
                    draw(controller, out)?;
                    return Ok(());
                };

                match parse_command(&line) {
                    Command::Login(identity) => {
                        controller.submit_login(&identity);
                    }
                    Command::Logout => controller.logout(),
                    Command::Show => {}
                    Command::Help => {
                        writeln!(out, "{HELP}")?;
                        continue;
                    }
                    Command::Quit => return Ok(()),
                    Command::Unknown(text) => {
                        writeln!(out, "Unknown command: {text}. {HELP}")?;
                        continue;
                    }
                }
                draw(controller, out)?;
            }
            Some(_) = controller.next_completion(), if controller.in_flight() > 0 => {
                draw(controller, out)?;
            }
        }
    }
}

fn draw<W: Write>(controller: &DashboardController, out: &mut W) -> Result<()> {
    writeln!(out, "{}", render(controller.state()))?;
    out.flush()?;
    Ok(())
}
