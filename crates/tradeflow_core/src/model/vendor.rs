//! Vendor record.
//!
//! Vendors share the customer profile and add supplier metadata.

use crate::model::entity::{optional_text, Entity, EntityField, EntityId, EntityKind, EntityProfile};
use serde::{Deserialize, Serialize};

/// A vendor as stored by both backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Empty until the repository assigns one.
    #[serde(default)]
    pub id: EntityId,
    #[serde(flatten)]
    pub profile: EntityProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person_name: Option<String>,
}

impl Vendor {
    /// Creates an unsaved vendor; the id is assigned on first create.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            profile: EntityProfile::new(name, email),
            ..Self::default()
        }
    }

    pub fn with_id(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(name, email)
        }
    }
}

impl Entity for Vendor {
    const KIND: EntityKind = EntityKind::Vendor;

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

    fn text_field(&self, field: EntityField) -> Option<&str> {
        match field {
            EntityField::Industry => self.industry.as_deref(),
            EntityField::ContactPersonName => self.contact_person_name.as_deref(),
            other => self.profile.text(other),
        }
    }

    fn set_text_field(&mut self, field: EntityField, value: &str) -> bool {
        match field {
            EntityField::Industry => self.industry = optional_text(value),
            EntityField::ContactPersonName => self.contact_person_name = optional_text(value),
            other => return self.profile.set_text(other, value),
        }
        true
    }

    fn seed_records() -> Vec<Self> {
        vec![
            Vendor {
                id: "v1a2b3c4-d5e6-f789-0123-456789abcdef".to_string(),
                profile: EntityProfile {
                    name: "SupplyCo Global".to_string(),
                    email: "sales@supplyco.global".to_string(),
                    phone: Some("555-0404".to_string()),
                    address: Some("789 Logistics Rd, Warehouse City, TX 75001".to_string()),
                    notes: Some("Bulk supplier of industrial components. Known for reliability.".to_string()),
                    related_organizations: vec![
                        "Manufacturing United".to_string(),
                        "Global Trade Association".to_string(),
                    ],
                    related_people: vec!["John Smith (Procurement Head at Client X)".to_string()],
                    related_vendors: vec![
                        "Parts Unlimited".to_string(),
                        "Raw Materials Inc.".to_string(),
                    ],
                },
                industry: Some("Logistics & Supply Chain".to_string()),
                contact_person_name: Some("Sarah Connor".to_string()),
            },
            Vendor {
                id: "v0f9e8d7-c6b5-a493-8271-fedcba098765".to_string(),
                profile: EntityProfile {
                    name: "Creative Design Agency".to_string(),
                    email: "hello@creativedesign.io".to_string(),
                    phone: Some("555-0505".to_string()),
                    address: Some("101 Art Block, Studio City, NY 10001".to_string()),
                    notes: Some("Specializes in branding and digital marketing for tech startups.".to_string()),
                    related_organizations: vec![
                        "Startup Hub NYC".to_string(),
                        "Digital Nomads Network".to_string(),
                    ],
                    related_people: vec!["Lisa Ray (CEO of Startup Y)".to_string()],
                    related_vendors: vec!["PrintFast Co.".to_string(), "StockPhoto Pro".to_string()],
                },
                industry: Some("Marketing & Advertising".to_string()),
                contact_person_name: Some("Mike Angelo".to_string()),
            },
        ]
    }

    fn suggestion_input(&self) -> String {
        let profile = &self.profile;
        format!(
            "Vendor Name: {}, Email: {}, Address: {}, Notes: {}, Industry: {}",
            profile.name,
            profile.email,
            profile.address.as_deref().unwrap_or_default(),
            profile.notes.as_deref().unwrap_or_default(),
            self.industry.as_deref().unwrap_or_default(),
        )
    }
}
