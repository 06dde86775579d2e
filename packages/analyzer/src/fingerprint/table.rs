//! Ordered fingerprint table.

use crate::types::{PropertyBag, ResolvedType, WebPartType};

/// A set of required property keys identifying one web part type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintRule {
    /// Keys that must all be present in the property bag.
    pub required_keys: Vec<String>,
    /// Type reported when the rule matches.
    pub web_part_type: WebPartType,
}

impl FingerprintRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(
        web_part_type: WebPartType,
        required_keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            required_keys: required_keys.into_iter().map(Into::into).collect(),
            web_part_type,
        }
    }

    /// Check whether every required key is present (exact, case-sensitive).
    #[must_use]
    pub fn matches(&self, properties: &PropertyBag) -> bool {
        self.required_keys
            .iter()
            .all(|key| properties.contains_key(key))
    }
}

/// Ordered list of fingerprint rules.
///
/// Rule order is part of the contract: [`resolve`](Self::resolve) returns the
/// first rule that matches, so broader fingerprints must come last.
#[derive(Debug, Clone, Default)]
pub struct FingerprintTable {
    rules: Vec<FingerprintRule>,
}

impl FingerprintTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after all existing rules.
    pub fn register(&mut self, rule: FingerprintRule) {
        self.rules.push(rule);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_rule(
        mut self,
        web_part_type: WebPartType,
        required_keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.register(FingerprintRule::new(web_part_type, required_keys));
        self
    }

    /// Resolve a web part type from its property keys.
    ///
    /// Returns [`ResolvedType::NonExportableUnidentified`] when no rule matches.
    #[must_use]
    pub fn resolve(&self, properties: &PropertyBag) -> ResolvedType {
        match self.rules.iter().find(|rule| rule.matches(properties)) {
            Some(rule) => {
                tracing::debug!(web_part_type = %rule.web_part_type, "fingerprint matched");
                ResolvedType::Known(rule.web_part_type)
            }
            None => {
                tracing::debug!(keys = properties.len(), "no fingerprint matched");
                ResolvedType::NonExportableUnidentified
            }
        }
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FingerprintRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
