//! Branch entity model.

use serde::{Deserialize, Serialize};

use gymdesk_core::types::id::BranchId;
use gymdesk_core::types::reference::Identified;

/// A gym branch where sessions take place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique branch identifier.
    pub id: BranchId,
    /// Branch name.
    pub name: String,
    /// Street address, if on file.
    pub address: Option<String>,
}

impl Identified for Branch {
    type Id = BranchId;

    fn entity_id(&self) -> BranchId {
        self.id
    }

    fn display_label(&self) -> String {
        self.name.clone()
    }
}
