//! Polymorphic entity references.
//!
//! The backend sometimes serializes a participant as a bare UUID and
//! sometimes as an embedded profile object, depending on whether the
//! endpoint performed a join. [`Ref`] models both shapes as one tagged
//! union with a single [`Ref::label`] resolver, so display code never has
//! to duck-type the payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Implemented by entities that can appear behind a [`Ref`].
pub trait Identified {
    /// The typed identifier of the entity.
    type Id: Copy + Eq + std::hash::Hash + fmt::Debug + fmt::Display;

    /// Return the entity's identifier.
    fn entity_id(&self) -> Self::Id;

    /// Return the human-readable label for the entity.
    fn display_label(&self) -> String;
}

/// A reference to an entity: either a bare identifier or the embedded
/// entity itself.
///
/// Deserialization is untagged: an object deserializes as `Embedded`,
/// a UUID string as `Id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(bound(
    serialize = "T: Serialize, T::Id: Serialize",
    deserialize = "T: Deserialize<'de>, T::Id: Deserialize<'de>"
))]
pub enum Ref<T: Identified> {
    /// The full entity was embedded in the payload.
    Embedded(T),
    /// Only the identifier was present.
    Id(T::Id),
}

impl<T: Identified> Ref<T> {
    /// Return the referenced entity's identifier, whichever shape is held.
    pub fn id(&self) -> T::Id {
        match self {
            Self::Embedded(entity) => entity.entity_id(),
            Self::Id(id) => *id,
        }
    }

    /// Return the embedded entity, if present.
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Self::Embedded(entity) => Some(entity),
            Self::Id(_) => None,
        }
    }

    /// Resolve a display label for the reference.
    ///
    /// Falls back to the identifier string when only a bare id is held.
    pub fn label(&self) -> String {
        match self {
            Self::Embedded(entity) => entity.display_label(),
            Self::Id(id) => id.to_string(),
        }
    }

    /// Whether the reference holds an embedded entity.
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::MemberId;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestMember {
        id: MemberId,
        name: String,
    }

    impl Identified for TestMember {
        type Id = MemberId;

        fn entity_id(&self) -> MemberId {
            self.id
        }

        fn display_label(&self) -> String {
            self.name.clone()
        }
    }

    #[test]
    fn test_bare_id_deserializes_as_id() {
        let id = MemberId::new();
        let json = format!("\"{id}\"");
        let parsed: Ref<TestMember> = serde_json::from_str(&json).unwrap();
        assert!(!parsed.is_embedded());
        assert_eq!(parsed.id(), id);
        assert_eq!(parsed.label(), id.to_string());
    }

    #[test]
    fn test_object_deserializes_as_embedded() {
        let member = TestMember {
            id: MemberId::new(),
            name: "Mika Tanaka".to_string(),
        };
        let json = serde_json::to_string(&member).unwrap();
        let parsed: Ref<TestMember> = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_embedded());
        assert_eq!(parsed.id(), member.id);
        assert_eq!(parsed.label(), "Mika Tanaka");
    }

    #[test]
    fn test_serialize_roundtrip_preserves_shape() {
        let bare: Ref<TestMember> = Ref::Id(MemberId::new());
        let json = serde_json::to_string(&bare).unwrap();
        let back: Ref<TestMember> = serde_json::from_str(&json).unwrap();
        assert_eq!(bare, back);
    }
}
