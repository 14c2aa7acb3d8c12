//! Contributors and ownership checks

use super::types::ContributorId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
    pub display_name: String,
    pub is_curator: bool,
}

impl Contributor {
    pub fn new(id: ContributorId, display_name: impl Into<String>) -> Self {
        Contributor {
            id,
            display_name: display_name.into(),
            is_curator: false,
        }
    }

    pub fn curator(id: ContributorId, display_name: impl Into<String>) -> Self {
        Contributor {
            id,
            display_name: display_name.into(),
            is_curator: true,
        }
    }

    /// True if this contributor created the entity, or may act on anyone's behalf
    pub fn is_owner_or_curator(&self, owner: Option<ContributorId>) -> bool {
        self.is_curator || owner == Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_or_curator() {
        let alice = Contributor::new(ContributorId::random(), "Alice");
        let curator = Contributor::curator(ContributorId::random(), "Cora");

        assert!(alice.is_owner_or_curator(Some(alice.id)));
        assert!(!alice.is_owner_or_curator(Some(curator.id)));
        assert!(!alice.is_owner_or_curator(None));
        assert!(curator.is_owner_or_curator(Some(alice.id)));
        assert!(curator.is_owner_or_curator(None));
    }
}
