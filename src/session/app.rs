//! The interactive fix loop (impure shell).

use super::events::{CrosstermEvents, EventSource};
use super::gate::{SessionGate, SessionPermit};
use super::prompt::{Prompt, PromptOutcome};
use super::state::{Mode, SessionState, Tone};
use super::theme::Theme;
use super::view;
use crate::config::ResolvedConfig;
use crate::config::keybindings::KeyBindings;
use crate::layout;
use crate::model::{Command, PatchError, SessionError};
use crate::patch::{ApplyEvent, ApplySummary, PatchQueue, Progress, spawn_apply};
use crate::source::{CorrectionStream, Handoff, InputSource, spawn_reader};
use crossbeam::channel::{self, Receiver, RecvError, select};
use crossterm::{
    ExecutableCommand,
    event::{Event, KeyEvent, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use tracing::{debug, error, info, warn};

/// Session settings taken from configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Horizontal padding inside the frame.
    pub margin: u16,
    /// Status log capacity.
    pub status_lines: usize,
    /// Use colors.
    pub color: bool,
    /// Key to command table.
    pub key_bindings: KeyBindings,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            margin: 3,
            status_lines: 5,
            color: true,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl From<&ResolvedConfig> for SessionOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            margin: config.margin,
            status_lines: config.status_lines,
            color: config.color,
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Whether the loop keeps going after handling something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One wake-up of the loop.
enum Step {
    Upstream(Result<crate::model::IngestionError, RecvError>),
    Input(Result<io::Result<Event>, RecvError>),
    Handoff(Result<Handoff, RecvError>),
    Apply(Result<ApplyEvent, RecvError>),
}

/// An interactive fix session drawing to `B`.
pub struct FixSession<B: Backend> {
    terminal: Terminal<B>,
    state: SessionState,
    theme: Theme,
    margin: u16,
    key_bindings: KeyBindings,
    apply: Option<Receiver<ApplyEvent>>,
    apply_error: Option<PatchError>,
    input_closed: bool,
}

impl<B: Backend> FixSession<B> {
    /// A session with an empty list, drawing to `terminal`.
    pub fn new(terminal: Terminal<B>, options: SessionOptions) -> Self {
        Self {
            terminal,
            state: SessionState::new(options.status_lines),
            theme: Theme::new(options.color),
            margin: options.margin,
            key_bindings: options.key_bindings,
            apply: None,
            apply_error: None,
            input_closed: false,
        }
    }

    /// Session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run until the user quits, input ends, or something fails.
    ///
    /// Waits on upstream errors, terminal events, ingestion hand-off, and
    /// apply progress at once; every wake-up that changes something redraws.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Ingestion`] when the correction stream fails
    /// - [`SessionError::Patch`] after an acknowledged apply failure
    /// - [`SessionError::Terminal`] on terminal I/O failure
    pub fn run(
        &mut self,
        stream: CorrectionStream,
        events: &mut dyn EventSource,
        _permit: &SessionPermit<'_>,
    ) -> Result<(), SessionError> {
        let CorrectionStream {
            mut handoff,
            errors: mut upstream,
        } = stream;
        let mut input = events.start()?;

        info!("Fix session started");
        self.draw()?;

        loop {
            let apply = self.apply.clone().unwrap_or_else(channel::never);
            let step = select! {
                recv(upstream) -> msg => Step::Upstream(msg),
                recv(input) -> msg => Step::Input(msg),
                recv(handoff) -> msg => Step::Handoff(msg),
                recv(apply) -> msg => Step::Apply(msg),
            };

            let flow = match step {
                Step::Upstream(Ok(err)) => {
                    error!(error = %err, "Correction stream failed, ending session");
                    return Err(SessionError::Ingestion(err));
                }
                Step::Upstream(Err(_)) => {
                    upstream = channel::never();
                    continue;
                }
                Step::Input(Ok(Ok(event))) => self.handle_event(event)?,
                Step::Input(Ok(Err(e))) => return Err(SessionError::Terminal(e)),
                Step::Input(Err(_)) => {
                    debug!("Input closed");
                    input = channel::never();
                    self.input_closed = true;
                    if matches!(self.state.mode(), Mode::Applying) {
                        Flow::Continue
                    } else {
                        self.acknowledge()?
                    }
                }
                Step::Handoff(Ok(Handoff::Loaded(m))) => {
                    self.state.push(m);
                    Flow::Continue
                }
                Step::Handoff(Ok(Handoff::Finished)) => {
                    info!(
                        misspellings = self.state.misspellings().len(),
                        "All corrections loaded"
                    );
                    self.state.finish_loading();
                    Flow::Continue
                }
                Step::Handoff(Err(_)) => {
                    handoff = channel::never();
                    continue;
                }
                Step::Apply(Ok(event)) => self.handle_apply_event(event)?,
                Step::Apply(Err(_)) => {
                    self.apply = None;
                    continue;
                }
            };

            match flow {
                Flow::Quit => {
                    info!("Fix session ended");
                    return Ok(());
                }
                Flow::Continue => self.draw()?,
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<Flow, SessionError> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            _ => Ok(Flow::Continue),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Flow, SessionError> {
        match self.state.mode() {
            Mode::Browse => Ok(self
                .key_bindings
                .get(key)
                .map_or(Flow::Continue, |command| self.execute(command))),
            Mode::Prompt(_) => Ok(self.handle_prompt_key(key)),
            Mode::Applying => Ok(Flow::Continue),
            Mode::Acknowledge => self.acknowledge(),
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Flow {
        let Mode::Prompt(prompt) = self.state.mode_mut() else {
            return Flow::Continue;
        };
        let command = prompt.command();
        let outcome = prompt.handle_key(key);

        match outcome {
            PromptOutcome::Pending => {}
            PromptOutcome::Invalid(err) => {
                self.state
                    .status_mut()
                    .push(Tone::Error, format!("{}, try again", err));
            }
            PromptOutcome::Cancelled => {
                info!(?command, "Prompt cancelled");
                return Flow::Quit;
            }
            PromptOutcome::Choice(choice) => {
                self.state.set_mode(Mode::Browse);
                let result = match command {
                    Command::ReplaceAll => self.state.replace_all(choice),
                    _ => self.state.replace(choice),
                };
                if let Err(err) = result {
                    self.state.status_mut().push(Tone::Error, err.to_string());
                }
            }
            PromptOutcome::Text(text) => {
                self.state.set_mode(Mode::Browse);
                match command {
                    Command::EditAll => self.state.edit_all(text),
                    _ => self.state.edit(text),
                }
            }
        }
        Flow::Continue
    }

    fn execute(&mut self, command: Command) -> Flow {
        debug!(?command, index = self.state.index(), "Command");
        match command {
            Command::Next => self.state.next(),
            Command::Previous => self.state.previous(),
            Command::NextUndefined => self.state.next_undefined(),
            Command::Ignore => self.state.ignore(),
            Command::IgnoreAll => self.state.ignore_all(),
            Command::Replace | Command::ReplaceAll => {
                let Some(current) = self.state.current() else {
                    return Flow::Continue;
                };
                if current.suggestions.is_empty() {
                    let message = format!("no suggestions for '{}'", current.word);
                    self.state.status_mut().push(Tone::Warning, message);
                } else {
                    let prompt = Prompt::integer(command, 1, current.suggestions.len());
                    self.state.set_mode(Mode::Prompt(prompt));
                }
            }
            Command::Edit | Command::EditAll => {
                if self.state.current().is_some() {
                    self.state.set_mode(Mode::Prompt(Prompt::text(command)));
                }
            }
            Command::Apply => self.start_apply(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn start_apply(&mut self) {
        let queue = PatchQueue::from_misspellings(self.state.misspellings());
        info!(items = queue.len(), "Applying corrections");

        let status = self.state.status_mut();
        status.clear();
        match spawn_apply(queue) {
            Ok(rx) => {
                status.push(Tone::Success, "applying changes");
                self.apply = Some(rx);
                self.state.set_mode(Mode::Applying);
            }
            Err(e) => {
                error!(error = %e, "Could not start apply worker");
                status.push(Tone::Error, format!("could not start apply: {}", e));
            }
        }
    }

    fn handle_apply_event(&mut self, event: ApplyEvent) -> Result<Flow, SessionError> {
        match event {
            ApplyEvent::Progress(progress) => {
                let tone = match progress {
                    Progress::Replaced { .. } => Tone::Info,
                    Progress::Mismatch { .. } => Tone::Warning,
                };
                self.state.status_mut().push(tone, progress.to_string());
            }
            ApplyEvent::Failed(err) => {
                warn!(error = %err, "Apply aborted");
                self.state.status_mut().push(Tone::Error, err.to_string());
                self.apply_error = Some(err);
            }
            ApplyEvent::Done(summary) => {
                let status = self.state.status_mut();
                status.push(Tone::Success, done_message(&summary));
                status.push(Tone::Info, "press any key to continue");
                self.state.set_mode(Mode::Acknowledge);
                if self.input_closed {
                    return self.acknowledge();
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Leave acknowledge mode. A failed apply ends the session here.
    fn acknowledge(&mut self) -> Result<Flow, SessionError> {
        self.state.set_mode(Mode::Browse);
        if let Some(err) = self.apply_error.take() {
            return Err(SessionError::Patch(err));
        }
        if self.input_closed {
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self) -> Result<(), SessionError> {
        let state = &self.state;
        let theme = &self.theme;
        let margin = self.margin;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let node = view::compose(state, theme, margin, area.width, area.height);
            layout::draw(frame, &node);
        })?;
        Ok(())
    }
}

fn done_message(summary: &ApplySummary) -> String {
    let mut message = format!(
        "done: {} replaced, {} mismatched",
        summary.replaced, summary.mismatched
    );
    if summary.unprocessed > 0 {
        message.push_str(&format!(", {} not processed", summary.unprocessed));
    }
    message
}

/// Run an interactive session on the real terminal.
///
/// Takes the session permit first, so a second concurrent call fails before
/// touching the terminal. The terminal is restored whatever the outcome.
///
/// # Errors
///
/// [`SessionError::AlreadyRunning`] if `gate` is taken, otherwise whatever
/// [`FixSession::run`] returns.
pub fn run_fix(
    source: &InputSource,
    options: SessionOptions,
    gate: &SessionGate,
) -> Result<(), SessionError> {
    let permit = gate.acquire()?;
    let stream = spawn_reader(source.open()?)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut session = FixSession::new(terminal, options);
    let mut events = CrosstermEvents::new();
    let result = session.run(stream, &mut events, &permit);

    // Stop the pump before handing the terminal back.
    drop(events);
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
