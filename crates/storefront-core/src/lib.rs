pub mod category;
pub mod config;
pub mod error;
pub mod filter;
pub mod product;

pub use config::Config;
pub use error::{CatalogError, Result};
pub use filter::{paginate, Page, ProductFilter, SortOrder};
pub use product::{load_products, parse_products, read_products, Product};

// Category system
pub use category::{
    aggregate, build_tree, build_tree_with_brands, normalize_key, CategoryKey, CategoryNode,
    CategoryRules, Classification, Classifier, RuleTable, RulesConfig, SubcategoryCount,
    SubcategoryGroup, SubcategoryRule, BUILTIN_CATEGORIES,
};
