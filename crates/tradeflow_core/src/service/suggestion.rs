//! Relation suggestion service contract.
//!
//! # Responsibility
//! - Map a free-text entity description to categorized related names.
//! - Build the fixed prompt and decode the fixed JSON response schema for
//!   transports that talk to a hosted model.
//!
//! # Invariants
//! - The call is single-shot: no retries, no multi-step orchestration.
//! - Failures never touch persistence; callers decide how to surface them.

use crate::model::entity::Entity;
use crate::model::suggestion::RelatedEntitySuggestions;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROMPT_PREAMBLE: &str = "Based on the following customer data, suggest related organizations, people, and vendors. Return the results as a JSON object with the arrays \"organizations\", \"people\" and \"vendors\".";

/// Suggestion failure, isolated from persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// Neither a name nor notes were provided to describe the entity.
    InputNeeded,
    /// Transport or model failure.
    Unavailable(String),
    /// Response did not match the `{organizations, people, vendors}` schema.
    InvalidResponse(String),
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNeeded => write!(f, "a name or notes are required for suggestions"),
            Self::Unavailable(message) => write!(f, "suggestion service unavailable: {message}"),
            Self::InvalidResponse(message) => {
                write!(f, "invalid suggestion response: {message}")
            }
        }
    }
}

impl Error for SuggestionError {}

/// Maps an entity description to related organization/people/vendor names.
pub trait SuggestionService {
    fn suggest(&self, input: &str) -> Result<RelatedEntitySuggestions, SuggestionError>;
}

impl<F> SuggestionService for F
where
    F: Fn(&str) -> Result<RelatedEntitySuggestions, SuggestionError>,
{
    fn suggest(&self, input: &str) -> Result<RelatedEntitySuggestions, SuggestionError> {
        self(input)
    }
}

/// Suggestion service over a raw prompt-in, text-out model transport.
///
/// The transport receives the full prompt and returns the model's raw text
/// or a transport error message.
pub struct PromptSuggestionService<T> {
    transport: T,
}

impl<T> PromptSuggestionService<T>
where
    T: Fn(&str) -> Result<String, String>,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T> SuggestionService for PromptSuggestionService<T>
where
    T: Fn(&str) -> Result<String, String>,
{
    fn suggest(&self, input: &str) -> Result<RelatedEntitySuggestions, SuggestionError> {
        let prompt = build_suggestion_prompt(input);
        let raw = (self.transport)(&prompt).map_err(SuggestionError::Unavailable)?;
        parse_suggestion_response(&raw)
    }
}

/// Builds the model prompt for one entity description.
pub fn build_suggestion_prompt(input: &str) -> String {
    format!("{PROMPT_PREAMBLE}\n\nCustomer Data: {input}")
}

/// Decodes a model response into the three suggestion lists.
///
/// Accepts a bare JSON object or one wrapped in a fenced code block.
pub fn parse_suggestion_response(raw: &str) -> Result<RelatedEntitySuggestions, SuggestionError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|inner| inner.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(body).map_err(|err| SuggestionError::InvalidResponse(err.to_string()))
}

/// Requests suggestions for `entity`, enforcing the name-or-notes precondition.
pub fn suggest_for_entity<E, S>(
    service: &S,
    entity: &E,
) -> Result<RelatedEntitySuggestions, SuggestionError>
where
    E: Entity,
    S: SuggestionService + ?Sized,
{
    let profile = entity.profile();
    let has_notes = profile
        .notes
        .as_deref()
        .is_some_and(|notes| !notes.trim().is_empty());
    if profile.name.trim().is_empty() && !has_notes {
        return Err(SuggestionError::InputNeeded);
    }

    match service.suggest(&entity.suggestion_input()) {
        Ok(suggestions) => {
            info!(
                "event=suggest module=service status=ok kind={} count={}",
                E::KIND,
                suggestions.total()
            );
            Ok(suggestions)
        }
        Err(err) => {
            warn!(
                "event=suggest module=service status=error kind={} error={}",
                E::KIND,
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_suggestion_prompt, parse_suggestion_response, SuggestionError};

    #[test]
    fn prompt_embeds_entity_description() {
        let prompt = build_suggestion_prompt("Name: Acme, Email: a@acme.com");
        assert!(prompt.ends_with("Customer Data: Name: Acme, Email: a@acme.com"));
    }

    #[test]
    fn response_parsing_accepts_fenced_json() {
        let raw = "```json\n{\"organizations\":[\"Org A\"],\"people\":[],\"vendors\":[\"V\"]}\n```";
        let parsed = parse_suggestion_response(raw).unwrap();
        assert_eq!(parsed.organizations, vec!["Org A".to_string()]);
        assert!(parsed.people.is_empty());
        assert_eq!(parsed.vendors, vec!["V".to_string()]);
    }

    #[test]
    fn response_parsing_requires_all_categories() {
        let err = parse_suggestion_response("{\"organizations\":[]}").unwrap_err();
        assert!(matches!(err, SuggestionError::InvalidResponse(_)));
    }
}
