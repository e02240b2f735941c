//! # Category Module
//!
//! Classifies catalog products into subcategories and aggregates them for
//! navigation and filtering.
//!
//! ## Module layout
//!
//! - `key`: category key normalization and display-name collation
//! - `builtin`: compiled-in rule table
//! - `store`: runtime [`RuleTable`] (builtin + config overrides)
//! - `classifier`: keyword-priority [`Classifier`]
//! - `aggregate`: subcategory groups for one selected category
//! - `tree`: category → subcategory navigation tree
//!
//! ## Example
//!
//! ```rust
//! use storefront_core::category::{aggregate, Classifier, RuleTable};
//! use storefront_core::Product;
//!
//! let table = RuleTable::builtin();
//! let classifier = Classifier::new(&table);
//!
//! let ssd = classifier
//!     .classify("Disco SSD NVMe 1TB", "almacenamiento")
//!     .unwrap();
//! assert_eq!(ssd.id, "ssd");
//! assert_eq!(ssd.priority, 1);
//!
//! // no rules for "gabinetes": grouped by brand
//! let products = vec![
//!     Product::new(1, "Gabinete 4000D", "gabinetes").with_brand("Corsair"),
//!     Product::new(2, "Gabinete H5", "gabinetes").with_brand("NZXT"),
//! ];
//! let groups = aggregate(&classifier, &products, "gabinetes");
//! assert_eq!(groups[0].subcategory.id, "corsair");
//! assert_eq!(groups[0].subcategory.priority, 999);
//! ```

mod aggregate;
mod builtin;
mod classifier;
mod key;
mod store;
mod tree;

// Re-exports
pub use aggregate::{aggregate, brand_groups, SubcategoryGroup};
pub use builtin::{
    BuiltinCategory, BuiltinSubcategory, SubcategoryRule, BUILTIN_CATEGORIES, FALLBACK_PRIORITY,
    OTHER_SUBCATEGORY_DESCRIPTION, OTHER_SUBCATEGORY_ID, OTHER_SUBCATEGORY_NAME,
};
pub use classifier::{Classification, Classifier};
pub use key::{collate, normalize_key, CategoryKey};
pub use store::{CategoryRules, CategoryRulesEntry, RuleTable, RulesConfig};
pub use tree::{build_tree, build_tree_with_brands, CategoryNode, SubcategoryCount};
