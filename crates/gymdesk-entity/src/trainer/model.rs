//! Trainer entity model.

use serde::{Deserialize, Serialize};

use gymdesk_core::types::id::TrainerId;
use gymdesk_core::types::reference::Identified;

/// A personal trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    /// Unique trainer identifier.
    pub id: TrainerId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Training specialty shown on the booking form, if any.
    pub specialty: Option<String>,
}

impl Trainer {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identified for Trainer {
    type Id = TrainerId;

    fn entity_id(&self) -> TrainerId {
        self.id
    }

    fn display_label(&self) -> String {
        self.full_name()
    }
}
