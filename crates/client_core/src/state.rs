//! The per-submission state machine.

use shared::protocol::PredictionResult;
use thiserror::Error;

/// Exactly one of these is active. `Succeeded` and `Failed` are settled
/// states: the trigger is available again and the next `Submit` discards them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    Submit,
    Resolved(PredictionResult),
    Rejected(String),
}

impl SubmissionEvent {
    fn name(&self) -> &'static str {
        match self {
            SubmissionEvent::Submit => "submit",
            SubmissionEvent::Resolved(_) => "resolved",
            SubmissionEvent::Rejected(_) => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply '{event}' while {state}")]
pub struct IllegalTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl SubmissionState {
    pub fn transition(self, event: SubmissionEvent) -> Result<Self, IllegalTransition> {
        match (self, event) {
            (SubmissionState::Submitting, SubmissionEvent::Resolved(result)) => {
                Ok(SubmissionState::Succeeded(result))
            }
            (SubmissionState::Submitting, SubmissionEvent::Rejected(message)) => {
                Ok(SubmissionState::Failed(message))
            }
            (SubmissionState::Submitting, event) => Err(IllegalTransition {
                state: "submitting",
                event: event.name(),
            }),
            (_, SubmissionEvent::Submit) => Ok(SubmissionState::Submitting),
            (state, event) => Err(IllegalTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded(_) => "succeeded",
            SubmissionState::Failed(_) => "failed",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub fn results_visible(&self) -> bool {
        matches!(self, SubmissionState::Succeeded(_))
    }

    pub fn error_visible(&self) -> bool {
        matches!(self, SubmissionState::Failed(_))
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
