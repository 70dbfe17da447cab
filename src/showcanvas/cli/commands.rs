//! # CLI Layer
//!
//! This module is **one possible UI client** for showcanvas; a design-editor plugin
//! would be another. It is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: builds `AppContext` with the controller and configuration
//! - `handle_*()`: per-command handlers that drive the controller and print the view
//!
//! One-shot commands replay the controller from scratch: `view 2` is `start`, an
//! optional `search`, then `select`. A failed action surfaces the controller's error
//! message as the process error.

use super::logging::{Verbosity, init_subscriber};
use super::render::{
    print_messages, render_loading, render_placements, render_unauthenticated, render_uploads,
    render_view,
};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use showcanvas::auth::{BearerToken, CredentialProvider, FileCredentials};
use showcanvas::canvas::fs::DesignFile;
use showcanvas::canvas::memory::RecordingCanvas;
use showcanvas::catalog::http::HttpCatalog;
use showcanvas::commands::{CmdMessage, ShowSelector};
use showcanvas::config::{AppPaths, KEYS, ShowCanvasConfig};
use showcanvas::controller::{ActionOutcome, Controller, View};
use showcanvas::error::{Result, ShowCanvasError};
use showcanvas::layout::LayoutKind;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;

struct AppContext {
    controller: Controller<HttpCatalog, FileCredentials>,
    config: ShowCanvasConfig,
    paths: AppPaths,
}

impl AppContext {
    /// Turn an action outcome into a `Result`, using the controller's error banner.
    fn finish<T>(&self, outcome: ActionOutcome<T>) -> Result<T> {
        match outcome {
            ActionOutcome::Completed(value) => Ok(value),
            ActionOutcome::Failed => Err(ShowCanvasError::ActionFailed(
                self.controller.error().unwrap_or("action failed").to_string(),
            )),
            ActionOutcome::Ignored => Err(ShowCanvasError::InvalidState(
                "action not available in the current view".to_string(),
            )),
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Login { token }) => handle_login(&mut ctx, token),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::View { show, search }) => handle_view(&mut ctx, &show, search),
        Some(Commands::Insert {
            show,
            layout,
            design,
            dry_run,
            search,
        }) => handle_insert(&mut ctx, &show, layout, design, dry_run, search),
        Some(Commands::Shell) => handle_shell(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_home(&mut ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let paths = AppPaths::discover()?;
    let config = ShowCanvasConfig::load(&paths.config_dir)?
        .with_env_overrides(|key| std::env::var(key).ok());
    debug!(
        config_dir = %paths.config_dir.display(),
        api_url = %config.api_url,
        "initialized context"
    );

    let controller = Controller::new(
        HttpCatalog::new(config.api_url.clone()),
        FileCredentials::new(paths.data_dir.clone()),
    );
    Ok(AppContext {
        controller,
        config,
        paths,
    })
}

/// Start the controller and land on the list, optionally searched.
fn open_list(ctx: &mut AppContext, search: Option<&str>) -> Result<()> {
    if ctx.controller.credentials().token().is_none() {
        return Err(ShowCanvasError::NotAuthenticated);
    }
    if std::io::stderr().is_terminal() {
        eprint!("{}", render_loading());
    }

    let outcome = ctx.controller.start();
    ctx.finish(outcome)?;

    if let Some(query) = search {
        let outcome = ctx.controller.search(query);
        ctx.finish(outcome)?;
    }
    Ok(())
}

/// Open the list and then the selected show.
fn open_show(ctx: &mut AppContext, show: &str, search: Option<&str>) -> Result<()> {
    let selector: ShowSelector = show.parse()?;
    open_list(ctx, search)?;
    let outcome = ctx.controller.select(&selector);
    ctx.finish(outcome)
}

fn handle_home(ctx: &mut AppContext) -> Result<()> {
    if ctx.controller.credentials().token().is_some() {
        return handle_list(ctx, None);
    }
    print!("{}", render_view(&ctx.controller, &ctx.config.api_url));
    Ok(())
}

fn handle_login(ctx: &mut AppContext, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            print!("{}", render_unauthenticated(&ctx.config.api_url));
            eprint!("Paste the token from the browser: ");
            std::io::stderr().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            line
        }
    };
    let token = token.trim();
    if token.is_empty() {
        return Err(ShowCanvasError::InvalidState("no token given".to_string()));
    }

    let outcome = ctx.controller.complete_login(BearerToken::new(token));
    let count = ctx.finish(outcome)?;
    debug!(count, "signed in");

    print_messages(&[CmdMessage::success("Connected to Dragvertising")]);
    print!("{}", render_view(&ctx.controller, &ctx.config.api_url));
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let outcome = ctx.controller.logout();
    ctx.finish(outcome)?;
    print_messages(&[CmdMessage::success("Disconnected from Dragvertising")]);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    open_list(ctx, search.as_deref())?;
    print!("{}", render_view(&ctx.controller, &ctx.config.api_url));
    Ok(())
}

fn handle_view(ctx: &mut AppContext, show: &str, search: Option<String>) -> Result<()> {
    open_show(ctx, show, search.as_deref())?;
    print!("{}", render_view(&ctx.controller, &ctx.config.api_url));
    Ok(())
}

fn handle_insert(
    ctx: &mut AppContext,
    show: &str,
    layout: Option<LayoutKind>,
    design: Option<PathBuf>,
    dry_run: bool,
    search: Option<String>,
) -> Result<()> {
    open_show(ctx, show, search.as_deref())?;
    let kind = layout.unwrap_or(ctx.config.default_layout);

    if dry_run {
        let mut canvas = RecordingCanvas::new();
        let outcome = ctx.controller.insert(kind, &mut canvas);
        let report = ctx.finish(outcome)?;

        print!("{}", render_uploads(canvas.uploads()));
        print!("{}", render_placements(canvas.placed()));
        print_messages(&report.messages);
        return Ok(());
    }

    let path = design.unwrap_or_else(|| ctx.config.design_path.clone());
    let mut canvas = DesignFile::new(path);
    let outcome = ctx.controller.insert(kind, &mut canvas);
    let report = ctx.finish(outcome)?;

    print_messages(&report.messages);
    print_messages(&[CmdMessage::info(format!(
        "{} elements written to {}",
        report.placed,
        canvas.path().display()
    ))]);
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    if ctx.controller.credentials().token().is_some() {
        eprint!("{}", render_loading());
    }
    // a failed fetch is shown as the view's error banner
    let _ = ctx.controller.start();
    if matches!(ctx.controller.view(), View::Unauthenticated) {
        debug!("no stored session, starting signed out");
    }

    let mut canvas = DesignFile::new(ctx.config.design_path.clone());
    let stdin = std::io::stdin();
    shell::run(
        &mut ctx.controller,
        &mut canvas,
        &ctx.config.api_url,
        stdin.lock(),
        &mut std::io::stdout(),
    )
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            // environment overrides must not leak into the file
            let mut stored = ShowCanvasConfig::load(&ctx.paths.config_dir)?;
            stored.set(&key, &value)?;
            stored.save(&ctx.paths.config_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} = {}",
                key,
                stored.get(&key)?
            ))]);
        }
    }
    Ok(())
}
