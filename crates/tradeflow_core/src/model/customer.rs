//! Customer record.

use crate::model::entity::{Entity, EntityId, EntityKind, EntityProfile};
use serde::{Deserialize, Serialize};

/// A customer as stored by both backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Empty until the repository assigns one.
    #[serde(default)]
    pub id: EntityId,
    #[serde(flatten)]
    pub profile: EntityProfile,
}

impl Customer {
    /// Creates an unsaved customer; the id is assigned on first create.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            profile: EntityProfile::new(name, email),
        }
    }

    /// Creates a customer with a caller-provided id (imports, fixtures).
    pub fn with_id(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            profile: EntityProfile::new(name, email),
        }
    }
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn profile(&self) -> &EntityProfile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut EntityProfile {
        &mut self.profile
    }

    fn seed_records() -> Vec<Self> {
        vec![
            Customer {
                id: "c3f1a9e2-4b7d-4c21-9a0e-1d2b3c4d5e6f".to_string(),
                profile: EntityProfile {
                    name: "Globex Corporation".to_string(),
                    email: "purchasing@globex.example".to_string(),
                    phone: Some("555-0101".to_string()),
                    address: Some("42 Market St, Springfield, IL 62701".to_string()),
                    notes: Some("Long-standing account. Orders industrial components quarterly.".to_string()),
                    related_organizations: vec!["Springfield Chamber of Commerce".to_string()],
                    related_people: vec!["Hank Scorpio (CEO)".to_string()],
                    related_vendors: vec!["SupplyCo Global".to_string()],
                },
            },
            Customer {
                id: "c7d8e9f0-1a2b-4c3d-8e4f-5a6b7c8d9e0f".to_string(),
                profile: EntityProfile {
                    name: "Initech Solutions".to_string(),
                    email: "office@initech.example".to_string(),
                    phone: Some("555-0202".to_string()),
                    address: Some("1 Office Park Dr, Austin, TX 73301".to_string()),
                    notes: Some("Software consultancy evaluating a branding refresh.".to_string()),
                    related_organizations: vec!["Austin Tech Council".to_string()],
                    related_people: vec!["Bill Lumbergh (Operations)".to_string()],
                    related_vendors: vec!["Creative Design Agency".to_string()],
                },
            },
        ]
    }

    fn suggestion_input(&self) -> String {
        let profile = &self.profile;
        format!(
            "Name: {}, Email: {}, Address: {}, Notes: {}",
            profile.name,
            profile.email,
            profile.address.as_deref().unwrap_or_default(),
            profile.notes.as_deref().unwrap_or_default(),
        )
    }
}
