//! Create/edit form state for one entity.
//!
//! # Responsibility
//! - Hold raw field text while the user edits, including relation lists as
//!   comma-separated text.
//! - Turn that text back into a validated record on submit.
//! - Carry the latest relation suggestions and merge picked ones into the
//!   relation fields.
//!
//! # Invariants
//! - A form opened from an existing record keeps that record's id; submit
//!   becomes an update because the id matches, not because of a mode flag.
//! - A failed suggestion request never changes field text.

use crate::model::entity::{Entity, EntityField, ValidationErrors};
use crate::model::suggestion::{RelatedEntitySuggestions, SuggestionCategory};
use crate::service::suggestion::{suggest_for_entity, SuggestionError, SuggestionService};

const RELATION_FIELDS: [EntityField; 3] = [
    EntityField::RelatedOrganizations,
    EntityField::RelatedPeople,
    EntityField::RelatedVendors,
];

/// Editable draft of one customer or vendor.
#[derive(Debug, Clone)]
pub struct EntityForm<E: Entity> {
    draft: E,
    related_organizations: String,
    related_people: String,
    related_vendors: String,
    suggestions: Option<RelatedEntitySuggestions>,
}

impl<E: Entity> EntityForm<E> {
    /// Opens an empty form; submitting it creates a new record.
    pub fn create() -> Self {
        Self {
            draft: E::default(),
            related_organizations: String::new(),
            related_people: String::new(),
            related_vendors: String::new(),
            suggestions: None,
        }
    }

    /// Opens a form pre-filled from `entity`; submitting it updates that record.
    pub fn edit(entity: &E) -> Self {
        let mut form = Self::create();
        form.draft = entity.clone();
        for field in RELATION_FIELDS {
            let joined = join_relation_list(entity.profile().related(field).unwrap_or_default());
            if let Some(slot) = form.relation_text_mut(field) {
                *slot = joined;
            }
        }
        form
    }

    /// Id of the record being edited, `None` for a create form.
    pub fn entity_id(&self) -> Option<&str> {
        self.draft.has_id().then(|| self.draft.id())
    }

    pub fn is_edit(&self) -> bool {
        self.entity_id().is_some()
    }

    /// Current text of `field`; empty when unset.
    pub fn text(&self, field: EntityField) -> &str {
        match field {
            EntityField::RelatedOrganizations => &self.related_organizations,
            EntityField::RelatedPeople => &self.related_people,
            EntityField::RelatedVendors => &self.related_vendors,
            other => self.draft.text_field(other).unwrap_or_default(),
        }
    }

    /// Sets the text of `field`; returns `false` if this kind has no such field.
    pub fn set_text(&mut self, field: EntityField, value: impl Into<String>) -> bool {
        let value = value.into();
        if let Some(slot) = self.relation_text_mut(field) {
            *slot = value;
            return true;
        }
        self.draft.set_text_field(field, &value)
    }

    pub fn suggestions(&self) -> Option<&RelatedEntitySuggestions> {
        self.suggestions.as_ref()
    }

    /// Appends one picked suggestion to the matching relation field.
    pub fn add_suggestion(&mut self, category: SuggestionCategory, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.relation_text_mut(category.target_field()) {
            if slot.trim().is_empty() {
                *slot = value.to_string();
            } else {
                slot.push_str(", ");
                slot.push_str(value);
            }
        }
    }

    /// Asks `service` for relation suggestions based on the current draft.
    ///
    /// Previous suggestions are cleared first. Field text is left untouched
    /// whether the call succeeds or fails.
    pub fn request_suggestions<S>(
        &mut self,
        service: &S,
    ) -> Result<&RelatedEntitySuggestions, SuggestionError>
    where
        S: SuggestionService + ?Sized,
    {
        self.suggestions = None;
        let suggestions = suggest_for_entity(service, &self.draft)?;
        Ok(&*self.suggestions.insert(suggestions))
    }

    /// Builds the record described by the form and validates it.
    ///
    /// Relation text is split on commas, trimmed, and empty items dropped.
    pub fn to_entity(&self) -> Result<E, ValidationErrors> {
        let mut entity = self.draft.clone();
        for field in RELATION_FIELDS {
            let items = split_relation_text(self.text(field));
            if let Some(list) = entity.profile_mut().related_mut(field) {
                *list = items;
            }
        }
        entity.validate()?;
        Ok(entity)
    }

    fn relation_text_mut(&mut self, field: EntityField) -> Option<&mut String> {
        match field {
            EntityField::RelatedOrganizations => Some(&mut self.related_organizations),
            EntityField::RelatedPeople => Some(&mut self.related_people),
            EntityField::RelatedVendors => Some(&mut self.related_vendors),
            _ => None,
        }
    }
}

/// Splits comma-separated relation text into trimmed, non-empty labels.
pub fn split_relation_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins relation labels for display in a single text input.
pub fn join_relation_list(items: &[String]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::{join_relation_list, split_relation_text, EntityForm};
    use crate::model::entity::EntityField;
    use crate::model::suggestion::SuggestionCategory;
    use crate::model::vendor::Vendor;

    #[test]
    fn relation_text_splits_and_drops_blanks() {
        assert_eq!(
            split_relation_text(" Org A, ,Org B,,  Org A "),
            vec!["Org A".to_string(), "Org B".to_string(), "Org A".to_string()]
        );
        assert!(split_relation_text("  ").is_empty());
        assert_eq!(
            join_relation_list(&["x".to_string(), "y".to_string()]),
            "x, y"
        );
    }

    #[test]
    fn edit_form_prefills_every_field() {
        let mut vendor = Vendor::with_id("v-1", "SupplyCo", "sales@supplyco.global");
        vendor.industry = Some("Logistics".to_string());
        vendor.profile.related_vendors = vec!["Parts Unlimited".to_string(), "Raw Inc.".to_string()];

        let form = EntityForm::edit(&vendor);
        assert!(form.is_edit());
        assert_eq!(form.entity_id(), Some("v-1"));
        assert_eq!(form.text(EntityField::Industry), "Logistics");
        assert_eq!(form.text(EntityField::RelatedVendors), "Parts Unlimited, Raw Inc.");
        assert_eq!(form.text(EntityField::Phone), "");
        assert_eq!(form.to_entity().unwrap(), vendor);
    }

    #[test]
    fn add_suggestion_appends_to_target_relation() {
        let mut form = EntityForm::<Vendor>::create();
        form.add_suggestion(SuggestionCategory::People, "Jane Doe");
        form.add_suggestion(SuggestionCategory::People, "John Roe");
        form.add_suggestion(SuggestionCategory::Vendors, "  ");

        assert_eq!(form.text(EntityField::RelatedPeople), "Jane Doe, John Roe");
        assert_eq!(form.text(EntityField::RelatedVendors), "");
    }
}
