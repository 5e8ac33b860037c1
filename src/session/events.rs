//! Terminal event delivery.
//!
//! The interactive loop never reads the terminal itself. An [`EventSource`]
//! hands it a channel of events: [`CrosstermEvents`] pumps the real terminal
//! from a helper thread, [`ScriptedEvents`] replays a fixed list for tests.

use crossbeam::channel::{self, Receiver};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

/// How long the pump waits for input before rechecking its stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Something that delivers terminal events to the session loop.
///
/// The channel closing means no more input will ever arrive.
pub trait EventSource {
    /// Start delivering events.
    fn start(&mut self) -> io::Result<Receiver<io::Result<Event>>>;
}

/// Reads the real terminal on a helper thread.
///
/// Dropping the source stops and joins the thread.
#[derive(Default)]
pub struct CrosstermEvents {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CrosstermEvents {
    /// A source that has not started yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSource for CrosstermEvents {
    fn start(&mut self) -> io::Result<Receiver<io::Result<Event>>> {
        let (tx, rx) = channel::unbounded();
        let stop = Arc::clone(&self.stop);

        let handle = thread::Builder::new()
            .name("typofix-events".into())
            .spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let next = match event::poll(POLL_INTERVAL) {
                        Ok(false) => continue,
                        Ok(true) => event::read(),
                        Err(e) => Err(e),
                    };
                    let failed = next.is_err();
                    if let Err(e) = &next {
                        error!(error = %e, "Terminal read failed");
                    }
                    if tx.send(next).is_err() || failed {
                        break;
                    }
                }
                debug!("Event pump stopped");
            })?;

        self.handle = Some(handle);
        Ok(rx)
    }
}

impl Drop for CrosstermEvents {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Replays a fixed sequence of events, then closes the channel.
///
/// Each event is delayed by `interval` so background work started by earlier
/// events (ingestion, apply) gets a chance to land first.
#[derive(Debug, Clone)]
pub struct ScriptedEvents {
    events: Vec<Event>,
    interval: Duration,
}

impl ScriptedEvents {
    /// Replay `events` with a short pause before each.
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            interval: Duration::from_millis(20),
        }
    }

    /// Replay plain key presses, one per character.
    pub fn keys(keys: &str) -> Self {
        Self::new(
            keys.chars()
                .map(|c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
                .collect(),
        )
    }

    /// Change the pause before each event.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl EventSource for ScriptedEvents {
    fn start(&mut self) -> io::Result<Receiver<io::Result<Event>>> {
        let (tx, rx) = channel::unbounded();
        let events = std::mem::take(&mut self.events);
        let interval = self.interval;

        thread::Builder::new()
            .name("typofix-script".into())
            .spawn(move || {
                for ev in events {
                    thread::sleep(interval);
                    if tx.send(Ok(ev)).is_err() {
                        return;
                    }
                }
            })?;

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_events_arrive_in_order_then_close() {
        let mut source = ScriptedEvents::keys("ab").with_interval(Duration::ZERO);
        let rx = source.start().unwrap();

        let got: Vec<Event> = rx.iter().map(|e| e.unwrap()).collect();
        assert_eq!(
            got,
            vec![
                Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
                Event::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)),
            ]
        );
    }

    #[test]
    fn scripted_source_is_single_use() {
        let mut source = ScriptedEvents::keys("a").with_interval(Duration::ZERO);
        assert_eq!(source.start().unwrap().iter().count(), 1);
        assert_eq!(source.start().unwrap().iter().count(), 0);
    }
}
