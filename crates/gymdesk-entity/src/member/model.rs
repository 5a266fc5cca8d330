//! Member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gymdesk_core::types::id::MemberId;
use gymdesk_core::types::reference::Identified;

use crate::subscription::Subscription;

/// A gym member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact e-mail, if on file.
    pub email: Option<String>,
    /// Contact phone number, if on file.
    pub phone: Option<String>,
    /// When the member joined.
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identified for Member {
    type Id = MemberId;

    fn entity_id(&self) -> MemberId {
        self.id
    }

    fn display_label(&self) -> String {
        self.full_name()
    }
}

/// A member joined with their subscriptions, as returned by the
/// booking-roster endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    /// The member record.
    pub member: Member,
    /// The member's subscriptions, active or not.
    pub subscriptions: Vec<Subscription>,
}
