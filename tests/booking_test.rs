//! Integration tests for booking submission and eligibility.

mod helpers;

use gymdesk_core::error::ErrorKind;
use gymdesk_entity::session::SessionStatus;
use gymdesk_entity::subscription::{SubscriptionStatus, SubscriptionType};
use gymdesk_gateway::ScheduleGateway;
use gymdesk_scheduler::{SessionCandidate, TransitionKind};

use helpers::{TestApp, candidate_at, member_with_subscription, tomorrow_at};

#[tokio::test]
async fn test_overlapping_candidate_is_rejected_with_the_blocking_session() {
    let app = TestApp::new();
    let tab = app.open_tab().await;

    // Confirmed session at 09:00 for 60 minutes.
    let session = tab.service.submit_candidate(candidate_at(9, 60)).await.unwrap();
    tab.service
        .request_transition(session.id, TransitionKind::Confirm)
        .await
        .unwrap();

    // Candidate at 09:30 for 30 minutes lands inside it.
    let mut halfway = candidate_at(9, 30);
    halfway.starts_at = tomorrow_at(9) + chrono::Duration::minutes(30);

    let conflict = tab
        .service
        .conflict_preview(&halfway, chrono::Utc::now())
        .await
        .unwrap()
        .expect("30-minute candidate inside the hour must conflict");
    assert_eq!(conflict.blocking.id, session.id);

    let err = tab.service.submit_candidate(halfway).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("already booked"));
}

#[tokio::test]
async fn test_back_to_back_candidate_is_accepted() {
    let app = TestApp::new();
    let tab = app.open_tab().await;

    tab.service.submit_candidate(candidate_at(9, 60)).await.unwrap();

    // Touches the 10:00 boundary; half-open intervals do not overlap.
    let session = tab.service.submit_candidate(candidate_at(10, 30)).await.unwrap();
    assert_eq!(session.status, SessionStatus::Pending);
}

#[tokio::test]
async fn test_malformed_candidates_fail_validation_before_any_conflict_check() {
    let app = TestApp::new();
    let tab = app.open_tab().await;

    let mut zero_duration = candidate_at(9, 60);
    zero_duration.duration_minutes = 0;
    let err = tab.service.submit_candidate(zero_duration).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let mut in_the_past = candidate_at(9, 60);
    in_the_past.starts_at = chrono::Utc::now() - chrono::Duration::days(1);
    let err = tab.service.submit_candidate(in_the_past).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_member_with_no_personal_training_balance_is_excluded() {
    let app = TestApp::new();

    // Active Combo with zero balance plus an active plain Membership:
    // neither qualifies, so the member is excluded entirely.
    app.gateway
        .seed_member({
            let mut profile = member_with_subscription(
                "Hana Abe",
                SubscriptionType::Combo,
                SubscriptionStatus::Active,
                0,
            );
            let mut membership = profile.subscriptions[0].clone();
            membership.id = gymdesk_core::types::id::SubscriptionId::new();
            membership.subscription_type = SubscriptionType::Membership;
            membership.sessions_remaining = 10;
            profile.subscriptions.push(membership);
            profile
        })
        .await;
    app.gateway
        .seed_member(member_with_subscription(
            "Ken Oda",
            SubscriptionType::PersonalTraining,
            SubscriptionStatus::Active,
            4,
        ))
        .await;

    let tab = app.open_tab().await;
    let members = tab.service.eligible_members().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].member.first_name, "Ken");
}

#[tokio::test]
async fn test_duplicate_submission_while_in_flight_is_not_racy() {
    let app = TestApp::new();
    let tab = app.open_tab().await;

    // Dispatch the same candidate twice concurrently; op-level
    // backpressure lets exactly one reach the backend.
    let candidate: SessionCandidate = candidate_at(9, 60);
    let (first, second) = tokio::join!(
        tab.service.submit_candidate(candidate.clone()),
        tab.service.submit_candidate(candidate),
    );

    let failures = [&first, &second]
        .iter()
        .filter(|result| result.is_err())
        .count();
    assert_eq!(failures, 1, "exactly one submission must be rejected");
    let err = first.err().or(second.err()).unwrap();
    assert!(matches!(err.kind, ErrorKind::Busy | ErrorKind::Conflict));

    let sessions = app
        .gateway
        .list_sessions_for_trainer(app.trainer_id)
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
}
