//! Push-event subscription contract.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::ScheduleEvent;
use crate::result::AppResult;

/// A single frame delivered by a push source.
#[derive(Debug, Clone)]
pub enum PushFrame {
    /// A schedule event arrived.
    Event(ScheduleEvent),
    /// The transport (re)connected. Events may have been missed while
    /// disconnected, so consumers must perform one unconditional refresh.
    Reconnected,
}

/// Trait for push-event transports (WebSocket, in-memory hub).
///
/// A source delivers every frame it receives; actor scoping is the
/// consumer's responsibility, so the component stays testable with an
/// explicit identity instead of ambient auth state.
#[async_trait]
pub trait PushSource: Send + Sync + std::fmt::Debug + 'static {
    /// Open a subscription and return the frame receiver.
    ///
    /// The receiver yields [`PushFrame::Reconnected`] after every
    /// successful (re)connection, including the first.
    async fn subscribe(&self) -> AppResult<mpsc::Receiver<PushFrame>>;
}
