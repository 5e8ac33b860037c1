//! At most one interactive session at a time.

use crate::model::SessionError;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Single-permit gate guarding the terminal.
///
/// Owned by the caller and shared by reference with whoever may start a
/// session; nothing global is involved.
#[derive(Debug, Default)]
pub struct SessionGate {
    taken: AtomicBool,
}

impl SessionGate {
    /// An open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the permit.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyRunning`] while another permit is alive.
    pub fn acquire(&self) -> Result<SessionPermit<'_>, SessionError> {
        self.taken
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| {
                warn!("Refusing to start a second fix session");
                SessionError::AlreadyRunning
            })?;
        Ok(SessionPermit { gate: self })
    }

    /// True while a permit is alive.
    pub fn is_taken(&self) -> bool {
        self.taken.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the session gate. Released on drop.
#[derive(Debug)]
pub struct SessionPermit<'a> {
    gate: &'a SessionGate,
}

impl Drop for SessionPermit<'_> {
    fn drop(&mut self) {
        self.gate.taken.store(false, Ordering::Release);
    }
}
