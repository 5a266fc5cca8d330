//! Subscription entity model.
//!
//! Subscriptions are read-only to the scheduling engine. The backend
//! decrements `sessions_remaining` when a session completes; the engine
//! only reads the balance to filter bookable members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use gymdesk_core::types::id::{MemberId, SubscriptionId};

/// The kind of plan a subscription carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    /// Gym access only; carries no personal-training sessions.
    Membership,
    /// Personal-training sessions only.
    PersonalTraining,
    /// Gym access plus personal-training sessions.
    Combo,
}

impl SubscriptionType {
    /// Whether this plan type carries personal-training sessions.
    pub fn bears_personal_training(&self) -> bool {
        matches!(self, Self::PersonalTraining | Self::Combo)
    }

    /// Return the type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::PersonalTraining => "personal_training",
            Self::Combo => "combo",
        }
    }
}

impl fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrative status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In force.
    Active,
    /// Temporarily paused by the member.
    Frozen,
    /// Past its end date.
    Expired,
    /// Terminated before its end date.
    Cancelled,
}

/// A member's subscription with its remaining paid-session balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription identifier.
    pub id: SubscriptionId,
    /// The member the subscription belongs to.
    pub member_id: MemberId,
    /// The plan type.
    pub subscription_type: SubscriptionType,
    /// Administrative status.
    pub status: SubscriptionStatus,
    /// Paid personal-training sessions left on this subscription.
    pub sessions_remaining: u32,
    /// When the subscription started.
    pub started_at: DateTime<Utc>,
    /// When the subscription expires, if bounded.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Whether this subscription makes its member bookable: an active,
    /// personal-training-bearing plan with sessions left.
    pub fn counts_toward_booking(&self) -> bool {
        self.subscription_type.bears_personal_training()
            && self.status == SubscriptionStatus::Active
            && self.sessions_remaining > 0
    }
}
