//! Rule Table
//!
//! Immutable runtime store of subcategory rules, keyed by [`CategoryKey`].
//! Built from the builtin table and optionally merged with the `[rules]`
//! section of the config file.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

use super::builtin::{SubcategoryRule, BUILTIN_CATEGORIES};
use super::key::{normalize_key, CategoryKey};

/// Rules for a single category
///
/// `types` is kept sorted by ascending priority (stable with respect to
/// definition order) and every keyword is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRules {
    pub key: CategoryKey,
    pub display_name: String,
    pub types: Vec<SubcategoryRule>,
}

impl CategoryRules {
    pub fn new(
        key: CategoryKey,
        display_name: impl Into<String>,
        types: Vec<SubcategoryRule>,
    ) -> Result<Self> {
        let mut types = types
            .into_iter()
            .map(|rule| normalize_rule(&key, rule))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for rule in &types {
            if !seen.insert(rule.id.as_str()) {
                return Err(CatalogError::InvalidRule {
                    category: key.to_string(),
                    message: format!("duplicate subcategory id '{}'", rule.id),
                });
            }
        }

        types.sort_by_key(|rule| rule.priority);

        Ok(Self {
            key,
            display_name: display_name.into(),
            types,
        })
    }

    /// Subcategory rule by id
    pub fn get(&self, id: &str) -> Option<&SubcategoryRule> {
        self.types.iter().find(|rule| rule.id == id)
    }
}

fn normalize_rule(key: &CategoryKey, mut rule: SubcategoryRule) -> Result<SubcategoryRule> {
    let invalid = |message: String| CatalogError::InvalidRule {
        category: key.to_string(),
        message,
    };

    if rule.id.trim().is_empty() {
        return Err(invalid("subcategory id must not be empty".to_string()));
    }
    if rule.keywords.is_empty() {
        return Err(invalid(format!("subcategory '{}' has no keywords", rule.id)));
    }

    rule.keywords = rule
        .keywords
        .into_iter()
        .map(|k| k.to_lowercase())
        .collect();

    // An empty keyword is a substring of every name and would shadow
    // every rule after it.
    if rule.keywords.iter().any(|k| k.is_empty()) {
        return Err(invalid(format!(
            "subcategory '{}' has an empty keyword",
            rule.id
        )));
    }

    Ok(rule)
}

/// Runtime rule table
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    categories: HashMap<CategoryKey, CategoryRules>,
}

impl RuleTable {
    /// Table without any rules; every category falls back to brands
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builtin categories only
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|b| {
                let key = normalize_key(b.key);
                let mut types: Vec<SubcategoryRule> =
                    b.types.iter().map(SubcategoryRule::from).collect();
                types.sort_by_key(|rule| rule.priority);
                let rules = CategoryRules {
                    key: key.clone(),
                    display_name: b.display_name.to_string(),
                    types,
                };
                (key, rules)
            })
            .collect();
        Self { categories }
    }

    /// Merge config overrides
    ///
    /// - same-key categories are replaced
    /// - new categories are added
    pub fn with_config(mut self, config: &RulesConfig) -> Result<Self> {
        for (name, entry) in &config.categories {
            let key = normalize_key(name);
            if self.categories.contains_key(&key) {
                tracing::warn!(category = %key, "config rules replace builtin category");
            }
            let display_name = entry.display_name.clone().unwrap_or_else(|| name.clone());
            let rules = CategoryRules::new(key.clone(), display_name, entry.types.clone())?;
            self.categories.insert(key, rules);
        }
        Ok(self)
    }

    /// Add or replace a single category
    pub fn insert(&mut self, rules: CategoryRules) {
        self.categories.insert(rules.key.clone(), rules);
    }

    /// Rules for a raw category name (case-insensitive)
    pub fn lookup(&self, category: &str) -> Option<&CategoryRules> {
        self.get(&normalize_key(category))
    }

    pub fn get(&self, key: &CategoryKey) -> Option<&CategoryRules> {
        self.categories.get(key)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.lookup(category).is_some()
    }

    /// All categories sorted by key
    pub fn categories(&self) -> Vec<&CategoryRules> {
        let mut categories: Vec<_> = self.categories.values().collect();
        categories.sort_by(|a, b| a.key.cmp(&b.key));
        categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// `[rules]` section of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(flatten)]
    pub categories: BTreeMap<String, CategoryRulesEntry>,
}

impl RulesConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Rules for one category in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRulesEntry {
    /// Display name (default: the table key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub types: Vec<SubcategoryRule>,
}
