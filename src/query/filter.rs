//! Predicate compilation and record matching
//!
//! Each non-reserved query parameter becomes one [`Predicate`]. Identifier,
//! enum, URL and hostname fields match by exact, case-sensitive equality;
//! `label` and `description` are searched with an unanchored, case-sensitive
//! regex, so `label=Garish` finds "Garish Punk" while `label=^Garish$` does
//! not.
//!
//! Failure modes degrade to "matches nothing" rather than errors: an
//! unknown field name, an unset optional field, and a pattern that does not
//! compile (or exceeds the configured size bound) all produce an empty
//! result, keeping the listing surface always-successful.

use regex::{Regex, RegexBuilder};

use crate::model::{FieldValue, Resource};
use crate::registry::config::RegistryConfig;

use super::params::QueryParams;

/// One compiled filter predicate
#[derive(Debug, Clone)]
pub(crate) struct Predicate {
    name: String,
    value: String,
    /// None when the value is not usable as a pattern; text fields then
    /// never match
    pattern: Option<Regex>,
}

/// Compile every filter parameter in `params`
pub(crate) fn compile(params: &QueryParams, config: &RegistryConfig) -> Vec<Predicate> {
    params
        .filters()
        .map(|(name, value)| Predicate {
            pattern: RegexBuilder::new(value)
                .size_limit(config.regex_size_limit)
                .build()
                .ok(),
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

impl Predicate {
    /// Whether `record` satisfies this predicate
    pub(crate) fn matches<T: Resource>(&self, record: &T) -> bool {
        match record.field(&self.name) {
            None => false,
            Some(FieldValue::Exact(v)) => v.as_ref() == self.value.as_str(),
            Some(FieldValue::Text(v)) => match &self.pattern {
                Some(re) => re.is_match(v),
                None => false,
            },
        }
    }
}
