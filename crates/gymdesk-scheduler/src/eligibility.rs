//! Booking eligibility over subscription balances.
//!
//! A member is bookable iff at least one subscription is an active,
//! personal-training-bearing plan with sessions left. The rules here are
//! advisory: which subscription actually gets debited is decided by the
//! backend on completion.

use gymdesk_entity::member::MemberProfile;

/// Sum of remaining sessions across the member's qualifying
/// subscriptions. Shown to the trainer on the booking form.
pub fn remaining_session_balance(profile: &MemberProfile) -> u32 {
    profile
        .subscriptions
        .iter()
        .filter(|subscription| subscription.counts_toward_booking())
        .map(|subscription| subscription.sessions_remaining)
        .sum()
}

/// Whether the member can be offered for booking at all.
pub fn is_bookable(profile: &MemberProfile) -> bool {
    profile
        .subscriptions
        .iter()
        .any(|subscription| subscription.counts_toward_booking())
}

/// Keep only bookable members. Members with no balance are excluded
/// entirely, not merely disabled.
pub fn filter_bookable(profiles: Vec<MemberProfile>) -> Vec<MemberProfile> {
    profiles.into_iter().filter(is_bookable).collect()
}
