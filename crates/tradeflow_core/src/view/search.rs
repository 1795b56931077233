//! Case-insensitive search over the displayed contact fields.

use crate::model::entity::Entity;

/// Returns whether `entity` matches `term` on name, email, phone or address.
///
/// An empty term matches everything.
pub fn matches_search<E: Entity>(entity: &E, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    let profile = entity.profile();
    [
        Some(profile.name.as_str()),
        Some(profile.email.as_str()),
        profile.phone.as_deref(),
        profile.address.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|value| value.to_lowercase().contains(&needle))
}

/// Filters `entities` by `term`, keeping their order. Never touches storage.
pub fn filter_entities<E: Entity>(entities: &[E], term: &str) -> Vec<E> {
    entities
        .iter()
        .filter(|entity| matches_search(*entity, term))
        .cloned()
        .collect()
}
