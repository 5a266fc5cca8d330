//! Actor-facing session lifecycle transitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use gymdesk_core::error::AppError;
use gymdesk_core::result::AppResult;
use gymdesk_entity::session::SessionStatus;

/// A transition a trainer can request for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Pending → Confirmed. The member is notified by the backend.
    Confirm,
    /// Confirmed → Completed. The backend debits the linked subscription.
    Complete,
    /// Pending/Confirmed → Cancelled. Frees the trainer's slot; the
    /// record is kept.
    Cancel,
    /// Remove the record entirely. No state-machine precondition beyond
    /// the record existing; distinct from cancelling.
    Delete,
}

impl TransitionKind {
    /// The status the session ends up in, or `None` for record removal.
    pub fn target_status(&self) -> Option<SessionStatus> {
        match self {
            Self::Confirm => Some(SessionStatus::Confirmed),
            Self::Complete => Some(SessionStatus::Completed),
            Self::Cancel => Some(SessionStatus::Cancelled),
            Self::Delete => None,
        }
    }

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirm" => Ok(Self::Confirm),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::validation(format!(
                "Invalid transition: '{s}'. Expected one of: confirm, complete, cancel, delete"
            ))),
        }
    }
}

/// The transitions legal from a status, in display order.
///
/// UIs render only these, so illegal actions are never offered rather
/// than failing on click.
pub fn allowed_transitions(status: SessionStatus) -> &'static [TransitionKind] {
    match status {
        SessionStatus::Pending => &[
            TransitionKind::Confirm,
            TransitionKind::Cancel,
            TransitionKind::Delete,
        ],
        SessionStatus::Confirmed => &[
            TransitionKind::Complete,
            TransitionKind::Cancel,
            TransitionKind::Delete,
        ],
        SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::NoShow => {
            &[TransitionKind::Delete]
        }
    }
}

/// Guard a requested transition against the session's current status.
pub fn ensure_allowed(status: SessionStatus, kind: TransitionKind) -> AppResult<()> {
    match kind.target_status() {
        None => Ok(()),
        Some(target) if status.can_transition_to(target) => Ok(()),
        Some(_) => Err(AppError::transition(format!(
            "Cannot {kind} a {status} session"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_only_from_pending() {
        assert!(ensure_allowed(SessionStatus::Pending, TransitionKind::Confirm).is_ok());
        assert!(ensure_allowed(SessionStatus::Confirmed, TransitionKind::Confirm).is_err());
        assert!(ensure_allowed(SessionStatus::Cancelled, TransitionKind::Confirm).is_err());
    }

    #[test]
    fn test_complete_only_from_confirmed() {
        assert!(ensure_allowed(SessionStatus::Confirmed, TransitionKind::Complete).is_ok());
        assert!(ensure_allowed(SessionStatus::Pending, TransitionKind::Complete).is_err());
        assert!(ensure_allowed(SessionStatus::Cancelled, TransitionKind::Complete).is_err());
        assert!(ensure_allowed(SessionStatus::NoShow, TransitionKind::Complete).is_err());
    }

    #[test]
    fn test_cancel_from_either_active_status() {
        assert!(ensure_allowed(SessionStatus::Pending, TransitionKind::Cancel).is_ok());
        assert!(ensure_allowed(SessionStatus::Confirmed, TransitionKind::Cancel).is_ok());
        assert!(ensure_allowed(SessionStatus::Completed, TransitionKind::Cancel).is_err());
    }

    #[test]
    fn test_delete_has_no_status_precondition() {
        for status in [
            SessionStatus::Pending,
            SessionStatus::Confirmed,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
            SessionStatus::NoShow,
        ] {
            assert!(ensure_allowed(status, TransitionKind::Delete).is_ok());
        }
    }

    #[test]
    fn test_terminal_statuses_offer_only_delete() {
        assert_eq!(
            allowed_transitions(SessionStatus::Cancelled),
            &[TransitionKind::Delete]
        );
        assert_eq!(
            allowed_transitions(SessionStatus::NoShow),
            &[TransitionKind::Delete]
        );
    }

    #[test]
    fn test_transition_error_kind() {
        let err = ensure_allowed(SessionStatus::Cancelled, TransitionKind::Complete).unwrap_err();
        assert_eq!(err.kind, gymdesk_core::error::ErrorKind::Transition);
    }
}
