//! Category definitions and the validated, read-only table.
//!
//! ## Invariants
//!
//! - The table is non-empty and ids are non-empty and unique.
//! - The fallback id names a category in the table.
//! - Every category other than the fallback has at least one keyword; no
//!   keyword is blank.
//! - Keywords are stored normalized (see `pipeline::normalize`), so they are
//!   compared against normalized utterance text as-is.
//! - Declaration order is preserved; it is the iteration and tie-break order.

use crate::error::{ConfigError, Result};
use crate::pipeline::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A spending category and the words that point to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Stable identifier, e.g. `"food"`.
    pub id: String,
    /// Human-readable label, e.g. `"餐饮"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub keywords: Vec<String>,
}

/// Validated category table. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<CategoryDefinition>,
    fallback: usize,
}

impl CategoryTable {
    /// Validate `categories` and normalize their keywords.
    pub fn new(categories: Vec<CategoryDefinition>, fallback: &str) -> Result<Self> {
        if categories.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for (index, category) in categories.iter().enumerate() {
            if category.id.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryId { index });
            }
            if !seen.insert(category.id.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.id.clone()));
            }
            if category.keywords.is_empty() && category.id != fallback {
                return Err(ConfigError::MissingKeywords(category.id.clone()));
            }
            if category.keywords.iter().any(|k| normalize(k).is_empty()) {
                return Err(ConfigError::EmptyKeyword { category: category.id.clone() });
            }
        }

        let table = Self::assemble(categories, fallback).ok_or_else(|| ConfigError::UnknownFallback(fallback.into()))?;
        tracing::debug!(categories = table.len(), fallback, "category table validated");
        Ok(table)
    }

    /// Build without validation. Used for the builtin table, whose validity
    /// is covered by tests.
    pub(crate) fn assemble(mut categories: Vec<CategoryDefinition>, fallback: &str) -> Option<Self> {
        let fallback = categories.iter().position(|c| c.id == fallback)?;
        for category in &mut categories {
            category.keywords = category.keywords.iter().map(|k| normalize(k)).collect();
        }
        Some(CategoryTable { categories, fallback })
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn fallback(&self) -> &CategoryDefinition {
        &self.categories[self.fallback]
    }

    pub fn get(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    /// Every keyword of every category, in table order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().flat_map(|c| c.keywords.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
