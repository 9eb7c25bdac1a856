//! Transformation session state machine

use std::fmt;
use thiserror::Error;

/// Transformation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformState {
    #[default]
    Idle,
    Capturing,
    Dispatching,
    Replacing,
    Failed,
}

impl TransformState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Dispatching => "dispatching",
            Self::Replacing => "replacing",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: TransformState,
    pub action: String,
}

/// Transformation session entity.
///
/// State machine:
///   IDLE -> CAPTURING (begin_capture)
///   CAPTURING -> DISPATCHING (begin_dispatch)
///   DISPATCHING -> REPLACING (begin_replace)
///   REPLACING -> IDLE (complete)
///   CAPTURING | DISPATCHING | REPLACING -> FAILED (fail)
///   FAILED -> IDLE (reset)
#[derive(Debug, Default)]
pub struct TransformSession {
    state: TransformState,
}

impl TransformSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: TransformState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> TransformState {
        self.state
    }

    /// Check if ready for a trigger
    pub fn is_idle(&self) -> bool {
        self.state == TransformState::Idle
    }

    fn transition(
        &mut self,
        from: &[TransformState],
        to: TransformState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if !from.contains(&self.state) {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Transition from IDLE to CAPTURING
    pub fn begin_capture(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[TransformState::Idle],
            TransformState::Capturing,
            "begin capture",
        )
    }

    /// Transition from CAPTURING to DISPATCHING
    pub fn begin_dispatch(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[TransformState::Capturing],
            TransformState::Dispatching,
            "dispatch",
        )
    }

    /// Transition from DISPATCHING to REPLACING
    pub fn begin_replace(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[TransformState::Dispatching],
            TransformState::Replacing,
            "replace selection",
        )
    }

    /// Transition from REPLACING to IDLE
    pub fn complete(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(&[TransformState::Replacing], TransformState::Idle, "complete")
    }

    /// Transition from any active state to FAILED
    pub fn fail(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(
            &[
                TransformState::Capturing,
                TransformState::Dispatching,
                TransformState::Replacing,
            ],
            TransformState::Failed,
            "fail",
        )
    }

    /// Transition from FAILED to IDLE
    pub fn reset(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(&[TransformState::Failed], TransformState::Idle, "reset")
    }
}
