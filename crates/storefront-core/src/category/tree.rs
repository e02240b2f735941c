//! Category Tree
//!
//! Category → subcategory navigation tree with per-node counts.

use std::collections::HashMap;

use serde::Serialize;

use crate::product::Product;

use super::aggregate::brand_groups;
use super::classifier::{classify_with, Classification, Classifier};
use super::key::{collate, normalize_key, CategoryKey};

/// Subcategory entry in the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryCount {
    #[serde(flatten)]
    pub subcategory: Classification,
    pub count: usize,
}

/// Top-level category in the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    /// First spelling of the category seen in the product list
    pub name: String,
    pub key: CategoryKey,
    pub count: usize,
    pub subcategories: Vec<SubcategoryCount>,
}

impl CategoryNode {
    fn new(name: &str, key: CategoryKey) -> Self {
        Self {
            name: name.to_string(),
            key,
            count: 0,
            subcategories: Vec::new(),
        }
    }

    fn count_subcategory(&mut self, classification: Classification) {
        match self
            .subcategories
            .iter_mut()
            .find(|s| s.subcategory.id == classification.id)
        {
            Some(existing) => existing.count += 1,
            None => self.subcategories.push(SubcategoryCount {
                subcategory: classification,
                count: 1,
            }),
        }
    }
}

/// Build the navigation tree.
///
/// Every product counts towards its category. Products in ruled categories
/// are also classified and counted per subcategory. Categories without rules
/// get an empty subcategory list; see [`build_tree_with_brands`].
///
/// Subcategories are sorted by priority, categories by display name.
/// Products with a blank category are skipped.
pub fn build_tree(classifier: &Classifier<'_>, products: &[Product]) -> Vec<CategoryNode> {
    let mut index: HashMap<CategoryKey, usize> = HashMap::new();
    let mut nodes: Vec<CategoryNode> = Vec::new();
    let mut skipped = 0usize;

    for product in products {
        if product.category.trim().is_empty() {
            skipped += 1;
            continue;
        }

        let key = normalize_key(&product.category);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), nodes.len());
                nodes.push(CategoryNode::new(&product.category, key.clone()));
                nodes.len() - 1
            }
        };

        let node = &mut nodes[slot];
        node.count += 1;

        if let Some(rules) = classifier.table().get(&key) {
            node.count_subcategory(classify_with(rules, &product.name, &product.category));
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "products without category left out of tree");
    }

    for node in &mut nodes {
        node.subcategories.sort_by_key(|s| s.subcategory.priority);
    }
    nodes.sort_by(|a, b| collate(&a.name, &b.name));
    nodes
}

/// [`build_tree`], with brand pseudo-subcategories filled in for categories
/// that have no rules.
///
/// Uses the same brand grouping as the aggregator so the navigation menu and
/// the subcategory picker always agree.
pub fn build_tree_with_brands(
    classifier: &Classifier<'_>,
    products: &[Product],
) -> Vec<CategoryNode> {
    let mut nodes = build_tree(classifier, products);

    for node in &mut nodes {
        if !node.subcategories.is_empty() || classifier.table().get(&node.key).is_some() {
            continue;
        }
        let in_category = products.iter().filter(|p| node.key.matches(&p.category));
        node.subcategories = brand_groups(in_category, &node.name)
            .into_iter()
            .map(|g| SubcategoryCount {
                subcategory: g.subcategory,
                count: g.count,
            })
            .collect();
    }

    nodes
}
