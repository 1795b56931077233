//! Categorized output of the relation suggestion service.

use crate::model::entity::EntityField;
use serde::{Deserialize, Serialize};

/// Suggestion bucket; each maps onto one relation field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionCategory {
    Organizations,
    People,
    Vendors,
}

impl SuggestionCategory {
    pub const ALL: [SuggestionCategory; 3] = [Self::Organizations, Self::People, Self::Vendors];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organizations => "organizations",
            Self::People => "people",
            Self::Vendors => "vendors",
        }
    }

    /// Relation field that receives suggestions of this category.
    pub fn target_field(self) -> EntityField {
        match self {
            Self::Organizations => EntityField::RelatedOrganizations,
            Self::People => EntityField::RelatedPeople,
            Self::Vendors => EntityField::RelatedVendors,
        }
    }
}

/// Related names proposed for one entity description. Any list may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntitySuggestions {
    pub organizations: Vec<String>,
    pub people: Vec<String>,
    pub vendors: Vec<String>,
}

impl RelatedEntitySuggestions {
    pub fn get(&self, category: SuggestionCategory) -> &[String] {
        match category {
            SuggestionCategory::Organizations => &self.organizations,
            SuggestionCategory::People => &self.people,
            SuggestionCategory::Vendors => &self.vendors,
        }
    }

    pub fn is_empty(&self) -> bool {
        SuggestionCategory::ALL
            .iter()
            .all(|category| self.get(*category).is_empty())
    }

    /// Total number of suggestions across all categories.
    pub fn total(&self) -> usize {
        SuggestionCategory::ALL
            .iter()
            .map(|category| self.get(*category).len())
            .sum()
    }
}
