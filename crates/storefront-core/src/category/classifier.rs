//! Subcategory Classifier
//!
//! Assigns a product to the first subcategory (by ascending priority) whose
//! keywords appear in its name.

use serde::{Deserialize, Serialize};

use crate::product::Product;

use super::builtin::{
    SubcategoryRule, FALLBACK_PRIORITY, OTHER_SUBCATEGORY_DESCRIPTION, OTHER_SUBCATEGORY_ID,
    OTHER_SUBCATEGORY_NAME,
};
use super::store::{CategoryRules, RuleTable};

/// Subcategory assigned to a product within a category context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name as given by the caller (not normalized)
    pub category: String,
    pub priority: i32,
}

impl Classification {
    fn from_rule(rule: &SubcategoryRule, category: &str) -> Self {
        Self {
            id: rule.id.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            category: category.to_string(),
            priority: rule.priority,
        }
    }

    /// Catch-all for ruled categories where no keyword matched
    pub fn other(category: &str) -> Self {
        Self {
            id: OTHER_SUBCATEGORY_ID.to_string(),
            name: OTHER_SUBCATEGORY_NAME.to_string(),
            description: Some(OTHER_SUBCATEGORY_DESCRIPTION.to_string()),
            category: category.to_string(),
            priority: FALLBACK_PRIORITY,
        }
    }

    /// Brand pseudo-subcategory for categories without rules
    pub fn brand(brand: &str, category: &str) -> Self {
        Self {
            id: brand.to_lowercase(),
            name: brand.to_string(),
            description: None,
            category: category.to_string(),
            priority: FALLBACK_PRIORITY,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.priority >= FALLBACK_PRIORITY
    }
}

/// Keyword classifier over a borrowed [`RuleTable`]
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a RuleTable,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a RuleTable {
        self.table
    }

    /// Classify a product name within a category.
    ///
    /// Returns `None` when the category has no rules; callers then group by
    /// brand. A ruled category always yields a classification, falling back
    /// to `otros`.
    pub fn classify(&self, product_name: &str, category_name: &str) -> Option<Classification> {
        let rules = self.table.lookup(category_name)?;
        Some(classify_with(rules, product_name, category_name))
    }

    pub fn classify_product(&self, product: &Product) -> Option<Classification> {
        self.classify(&product.name, &product.category)
    }
}

/// Classify against an already resolved rule set
pub(crate) fn classify_with(
    rules: &CategoryRules,
    product_name: &str,
    category_name: &str,
) -> Classification {
    let name = product_name.to_lowercase();

    // `types` is sorted by priority on construction
    let matched = rules
        .types
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| name.contains(k.as_str())));

    match matched {
        Some(rule) => Classification::from_rule(rule, category_name),
        None => {
            tracing::debug!(
                category = %rules.key,
                product = product_name,
                "no keyword matched, using fallback"
            );
            Classification::other(category_name)
        }
    }
}
