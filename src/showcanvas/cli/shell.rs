//! Interactive session: one controller, many commands.
//!
//! Each line is parsed into a [`ShellCommand`], dispatched to the controller, and
//! answered with a fresh render of the current view.

use super::render::{render_error, render_loading, render_messages, render_view};
use colored::Colorize;
use showcanvas::auth::{BearerToken, CredentialProvider};
use showcanvas::canvas::CanvasSink;
use showcanvas::catalog::Catalog;
use showcanvas::commands::ShowSelector;
use showcanvas::controller::{ActionOutcome, Controller};
use showcanvas::error::Result;
use showcanvas::layout::LayoutKind;
use std::io::{BufRead, Write};

const PROMPT: &str = "showcanvas> ";

const HELP: &str = "\
Commands:
  login <token>    connect with the token from the browser sign-in
  search [text]    filter the list by title or venue (no text clears it)
  open <n|id>      open a show from the list
  back             return to the list
  poster           insert the show details
  grid             insert the performer grid
  refresh          reload your shows
  dismiss          clear the error message
  logout           forget the session
  help             this text
  quit             leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum ShellCommand {
    Login(String),
    Search(String),
    Open(ShowSelector),
    Back,
    Insert(LayoutKind),
    Refresh,
    Dismiss,
    Logout,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub(super) fn parse_line(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "login" if rest.is_empty() => return Err("usage: login <token>".to_string()),
        "login" => ShellCommand::Login(rest.to_string()),
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "open" | "o" => ShellCommand::Open(rest.parse().map_err(|e| format!("{}", e))?),
        "back" | "b" => ShellCommand::Back,
        "poster" | "grid" => ShellCommand::Insert(word.parse()?),
        "refresh" | "r" => ShellCommand::Refresh,
        "dismiss" | "d" => ShellCommand::Dismiss,
        "logout" => ShellCommand::Logout,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };
    Ok(Some(command))
}

/// Run the session until `quit` or end of input.
pub(super) fn run<C, P, K, R, W>(
    controller: &mut Controller<C, P>,
    canvas: &mut K,
    api_url: &str,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    C: Catalog,
    P: CredentialProvider,
    K: CanvasSink,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", render_view(controller, api_url))?;

    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                write!(out, "{}", render_error(&message))?;
                continue;
            }
        };

        let ignored = match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            ShellCommand::Login(token) => {
                write!(out, "{}", render_loading())?;
                is_ignored(&controller.complete_login(BearerToken::new(token)))
            }
            ShellCommand::Refresh => {
                write!(out, "{}", render_loading())?;
                is_ignored(&controller.refresh())
            }
            ShellCommand::Search(query) => is_ignored(&controller.search(&query)),
            ShellCommand::Open(selector) => is_ignored(&controller.select(&selector)),
            ShellCommand::Back => is_ignored(&controller.back()),
            ShellCommand::Logout => is_ignored(&controller.logout()),
            ShellCommand::Dismiss => {
                controller.dismiss_error();
                false
            }
            ShellCommand::Insert(kind) => match controller.insert(kind, canvas) {
                ActionOutcome::Completed(report) => {
                    write!(out, "{}", render_messages(&report.messages))?;
                    false
                }
                ActionOutcome::Failed => false,
                ActionOutcome::Ignored => true,
            },
        };

        if ignored {
            writeln!(out, "{}", "Not available here.".dimmed())?;
        }
        write!(out, "{}", render_view(controller, api_url))?;
    }
    Ok(())
}

fn is_ignored<T>(outcome: &ActionOutcome<T>) -> bool {
    matches!(outcome, ActionOutcome::Ignored)
}
