//! Shared entity contract, kinds and field validation.
//!
//! # Responsibility
//! - Describe what every storable record must expose to storage and views.
//! - Validate the contact fields common to customers and vendors.
//!
//! # Invariants
//! - An empty `id` means "not assigned yet"; the repository fills it.
//! - `name` holds at least two characters after trimming.
//! - `email` matches a basic `local@domain.tld` shape without whitespace.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Client-generated identifier, unique within one entity collection.
///
/// Kept as text: seeded and imported records are not required to be UUIDs.
pub type EntityId = String;

const NAME_MIN_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// The two record collections managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Customer,
    Vendor,
}

impl EntityKind {
    /// Namespaced key of the serialized collection in the local store.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Customer => "tradeflow_customers",
            Self::Vendor => "tradeflow_vendors",
        }
    }

    /// Collection name in the document store.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::Vendor => "vendors",
        }
    }

    /// Stable lowercase id used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
        }
    }

    /// Capitalized label used in notification titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Vendor => "Vendor",
        }
    }

    /// Display name used when a record's own name is no longer available.
    pub fn fallback_name(self) -> &'static str {
        match self {
            Self::Customer => "The customer",
            Self::Vendor => "The vendor",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable fields, named after their wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityField {
    Name,
    Email,
    Phone,
    Address,
    Notes,
    Industry,
    ContactPersonName,
    RelatedOrganizations,
    RelatedPeople,
    RelatedVendors,
}

impl EntityField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Notes => "notes",
            Self::Industry => "industry",
            Self::ContactPersonName => "contactPersonName",
            Self::RelatedOrganizations => "relatedOrganizations",
            Self::RelatedPeople => "relatedPeople",
            Self::RelatedVendors => "relatedVendors",
        }
    }
}

/// One rejected field with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: EntityField,
    pub message: String,
}

/// Every field-level problem found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: EntityField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the first error reported for `field`, if any.
    pub fn for_field(&self, field: EntityField) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    pub fn has_field(&self, field: EntityField) -> bool {
        self.for_field(field).is_some()
    }

    /// `Ok(())` when nothing was reported, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field.as_str(), error.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Contact and relation fields shared by customers and vendors.
///
/// Flattened into the owning record on the wire, so stored JSON keeps one
/// flat object per entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// General notes; also the main input for relation suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub related_organizations: Vec<String>,
    #[serde(default)]
    pub related_people: Vec<String>,
    #[serde(default)]
    pub related_vendors: Vec<String>,
}

impl EntityProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Appends every violated rule to `errors`.
    pub fn validate_into(&self, errors: &mut ValidationErrors) {
        if self.name.trim().chars().count() < NAME_MIN_CHARS {
            errors.push(EntityField::Name, "Name must be at least 2 characters.");
        }
        if !is_valid_email(&self.email) {
            errors.push(EntityField::Email, "Invalid email address.");
        }
    }

    /// Reads one scalar field. Returns `None` for fields the profile does
    /// not own and for unset optional fields.
    pub fn text(&self, field: EntityField) -> Option<&str> {
        match field {
            EntityField::Name => Some(self.name.as_str()),
            EntityField::Email => Some(self.email.as_str()),
            EntityField::Phone => self.phone.as_deref(),
            EntityField::Address => self.address.as_deref(),
            EntityField::Notes => self.notes.as_deref(),
            _ => None,
        }
    }

    /// Writes one scalar field; blank optional values are stored as `None`.
    ///
    /// Returns `false` when the profile does not own `field`.
    pub fn set_text(&mut self, field: EntityField, value: &str) -> bool {
        match field {
            EntityField::Name => self.name = value.to_string(),
            EntityField::Email => self.email = value.to_string(),
            EntityField::Phone => self.phone = optional_text(value),
            EntityField::Address => self.address = optional_text(value),
            EntityField::Notes => self.notes = optional_text(value),
            _ => return false,
        }
        true
    }

    pub fn related(&self, field: EntityField) -> Option<&[String]> {
        match field {
            EntityField::RelatedOrganizations => Some(&self.related_organizations),
            EntityField::RelatedPeople => Some(&self.related_people),
            EntityField::RelatedVendors => Some(&self.related_vendors),
            _ => None,
        }
    }

    pub fn related_mut(&mut self, field: EntityField) -> Option<&mut Vec<String>> {
        match field {
            EntityField::RelatedOrganizations => Some(&mut self.related_organizations),
            EntityField::RelatedPeople => Some(&mut self.related_people),
            EntityField::RelatedVendors => Some(&mut self.related_vendors),
            _ => None,
        }
    }
}

/// Contract every persisted record type fulfils.
pub trait Entity:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned
{
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: EntityId);

    fn profile(&self) -> &EntityProfile;

    fn profile_mut(&mut self) -> &mut EntityProfile;

    /// Example records written by the local backend on first access.
    fn seed_records() -> Vec<Self>;

    /// Free-text description handed to the suggestion service.
    fn suggestion_input(&self) -> String;

    fn name(&self) -> &str {
        &self.profile().name
    }

    fn has_id(&self) -> bool {
        !self.id().trim().is_empty()
    }

    /// Reads a scalar field by name. Kinds with extra fields override this.
    fn text_field(&self, field: EntityField) -> Option<&str> {
        self.profile().text(field)
    }

    /// Writes a scalar field by name; returns `false` for unknown fields.
    fn set_text_field(&mut self, field: EntityField, value: &str) -> bool {
        self.profile_mut().set_text(field, value)
    }

    /// Validates every field and reports all failures at once.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.profile().validate_into(&mut errors);
        errors.into_result()
    }
}

/// Returns whether `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, optional_text, EntityField, EntityProfile, ValidationErrors};

    #[test]
    fn email_pattern_accepts_plain_addresses_only() {
        assert!(is_valid_email("a@acme.com"));
        assert!(is_valid_email("sales.team+eu@supplyco.global"));
        assert!(!is_valid_email("acme.com"));
        assert!(!is_valid_email("a@acme"));
        assert!(!is_valid_email("a b@acme.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn profile_validation_reports_every_failing_field() {
        let profile = EntityProfile::new(" A ", "not-an-email");
        let mut errors = ValidationErrors::new();
        profile.validate_into(&mut errors);

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field(EntityField::Name));
        assert!(errors.has_field(EntityField::Email));
        assert_eq!(
            errors.to_string(),
            "name: Name must be at least 2 characters.; email: Invalid email address."
        );
    }

    #[test]
    fn set_text_maps_blank_optional_values_to_none() {
        let mut profile = EntityProfile::new("Acme", "a@acme.com");
        assert!(profile.set_text(EntityField::Phone, "  555-0101 "));
        assert_eq!(profile.phone.as_deref(), Some("555-0101"));
        assert!(profile.set_text(EntityField::Phone, "   "));
        assert_eq!(profile.phone, None);
        assert!(!profile.set_text(EntityField::Industry, "Retail"));
        assert_eq!(optional_text(""), None);
    }
}
