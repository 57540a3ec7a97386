use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PickPlaceState {
    #[default]
    Idle,
    Picking,
    Placing,
}

impl fmt::Display for PickPlaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickPlaceState::Idle => write!(f, "idle"),
            PickPlaceState::Picking => write!(f, "picking"),
            PickPlaceState::Placing => write!(f, "placing"),
        }
    }
}

/// Guards every transition between `PickPlaceState`s
///
/// Allowed: `Idle -> Picking`, `Idle -> Placing`, `Picking -> Placing` and
/// anything back to `Idle`.
#[derive(Debug, Default)]
pub struct PickPlaceStateMachine {
    state: Mutex<PickPlaceState>,
}

impl PickPlaceStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PickPlaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PickPlaceState {
        *self.lock()
    }

    pub fn is_busy(&self) -> bool {
        self.state() != PickPlaceState::Idle
    }

    /// Move to `requested`, or `Error::Busy` if the transition is not allowed
    pub fn transition(&self, requested: PickPlaceState) -> Result<()> {
        let mut state = self.lock();
        let allowed = matches!(
            (*state, requested),
            (PickPlaceState::Idle, PickPlaceState::Picking)
                | (PickPlaceState::Idle, PickPlaceState::Placing)
                | (PickPlaceState::Picking, PickPlaceState::Placing)
                | (_, PickPlaceState::Idle)
        );
        if !allowed {
            return Err(Error::Busy {
                state: *state,
                requested,
            });
        }
        debug!("{} -> {}", *state, requested);
        *state = requested;
        Ok(())
    }

    /// Back to `Idle` from any state, returns the previous state
    pub fn abort(&self) -> PickPlaceState {
        let mut state = self.lock();
        let previous = *state;
        *state = PickPlaceState::Idle;
        previous
    }

    /// Start an attempt in `requested`; the machine returns to `Idle` when
    /// the returned guard is dropped.
    pub fn begin(&self, requested: PickPlaceState) -> Result<AttemptGuard<'_>> {
        if requested == PickPlaceState::Idle {
            return Err(Error::Busy {
                state: self.state(),
                requested,
            });
        }
        self.transition(requested)?;
        Ok(AttemptGuard { machine: self })
    }
}

/// Keeps the machine busy for the duration of one attempt
#[derive(Debug)]
pub struct AttemptGuard<'a> {
    machine: &'a PickPlaceStateMachine,
}

impl AttemptGuard<'_> {
    pub fn advance(&self, requested: PickPlaceState) -> Result<()> {
        self.machine.transition(requested)
    }

    pub fn state(&self) -> PickPlaceState {
        self.machine.state()
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let previous = self.machine.abort();
        debug!("{} -> {}", previous, PickPlaceState::Idle);
    }
}
