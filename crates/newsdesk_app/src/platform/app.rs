use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use newsdesk_core::{update, AppState, Msg, Page, ViewState};
use newsdesk_logging::newsdesk_debug;

use super::config::{AppConfig, BASE_URL_ENV};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::input::{self, Command as LineCommand};
use super::ui::render;
use crate::cli::{Cli, Command};

/// How long the loop waits for input or engine events before looking again.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(
        LogDestination::from_flag(cli.log_file),
        logging::level_for(cli.verbose),
    );

    let config = AppConfig::load(cli.config.as_deref())?
        .with_base_url_override(std::env::var(BASE_URL_ENV).ok());

    if cli.command == Command::Config {
        println!("{}", config.to_ron()?);
        return Ok(ExitCode::SUCCESS);
    }

    let runner = EffectRunner::new(config.dispatch_settings())
        .context("failed to start the request engine")?;
    let mut session = Session::new(runner, io::stdout().lock());

    match cli.command.submission() {
        Some((page, fields)) => {
            let succeeded = session.run_once(page, fields)?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            session.run_interactive(spawn_stdin_reader())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Owns the app state and threads every message through `update`.
pub struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies one message and runs its effects. Returns whether the state changed.
    fn dispatch_msg(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    fn submit(&mut self, page: Page, fields: Vec<(String, String)>) -> io::Result<()> {
        for (field, value) in fields {
            self.dispatch_msg(Msg::FieldChanged { page, field, value });
        }
        self.dispatch_msg(Msg::Submitted(page));

        if self.state.page(page).view_state() == &ViewState::Loading {
            writeln!(self.out, "[{page}] Loading...")
        } else {
            self.render(page)
        }
    }

    /// Feeds settled responses into the state and renders the pages they changed.
    fn pump(&mut self, timeout: Duration) -> io::Result<()> {
        for msg in self.runner.poll(timeout) {
            let page = match &msg {
                Msg::ResponseReceived { page, .. } => Some(*page),
                _ => None,
            };
            if self.dispatch_msg(msg) {
                if let Some(page) = page {
                    self.render(page)?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, page: Page) -> io::Result<()> {
        let view = self.state.view();
        if let Some(page_view) = view.page(page) {
            writeln!(self.out, "{}", render::render_page(page_view))?;
        }
        self.out.flush()
    }

    /// Submits one form and waits for it to settle. Returns false on the Error state.
    pub fn run_once(&mut self, page: Page, fields: Vec<(String, String)>) -> io::Result<bool> {
        self.submit(page, fields)?;
        while self.state.page(page).view_state() == &ViewState::Loading {
            self.pump(TICK)?;
        }
        Ok(!matches!(
            self.state.page(page).view_state(),
            ViewState::Error(_)
        ))
    }

    /// Reads commands until `quit` or end of input. Responses render as they land.
    pub fn run_interactive(&mut self, lines: mpsc::Receiver<String>) -> io::Result<()> {
        writeln!(self.out, "{}", input::HELP)?;
        loop {
            match lines.recv_timeout(TICK) {
                Ok(line) => match input::parse_line(&line) {
                    Ok(Some(LineCommand::Quit)) => break,
                    Ok(Some(command)) => self.handle_command(command)?,
                    Ok(None) => {}
                    Err(message) => writeln!(self.out, "{message}")?,
                },
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    newsdesk_debug!("input closed; waiting for pending requests");
                    while self.state.is_busy() {
                        self.pump(TICK)?;
                    }
                    break;
                }
            }
            self.pump(Duration::ZERO)?;
        }
        self.out.flush()
    }

    fn handle_command(&mut self, command: LineCommand) -> io::Result<()> {
        match command {
            LineCommand::Submit { page, fields } => self.submit(page, fields),
            LineCommand::Show(page) => self.render(page),
            LineCommand::Help => writeln!(self.out, "{}", input::HELP),
            LineCommand::Quit => Ok(()),
        }
    }
}
