//! Session status enumeration and lifecycle predicates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Booked by the trainer, awaiting confirmation.
    Pending,
    /// Confirmed; the member has been notified.
    Confirmed,
    /// Held and completed; the backend debits the linked subscription.
    Completed,
    /// Called off before it took place. The record is kept.
    Cancelled,
    /// The member did not show up. Set by the attendance system.
    NoShow,
}

impl SessionStatus {
    /// Whether a session in this status occupies the trainer's time.
    ///
    /// Completed, cancelled, and no-show sessions are history, not
    /// occupancy, and never participate in conflict checks.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether this status is terminal (no further trainer-driven
    /// transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// The pure state machine: whether a direct transition to `target`
    /// is legal.
    pub fn can_transition_to(&self, target: SessionStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = gymdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" | "noshow" => Ok(Self::NoShow),
            _ => Err(gymdesk_core::AppError::validation(format!(
                "Invalid session status: '{s}'. Expected one of: pending, confirmed, completed, cancelled, no_show"
            ))),
        }
    }
}
