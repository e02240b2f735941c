//! Subcategory Aggregation
//!
//! Groups the products of one selected category into subcategories with
//! counts. Drives the inline subcategory picker.

use std::collections::HashMap;

use serde::Serialize;

use crate::product::Product;

use super::classifier::{classify_with, Classification, Classifier};
use super::key::normalize_key;
use super::store::CategoryRules;

/// Products sharing one subcategory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryGroup<'a> {
    #[serde(flatten)]
    pub subcategory: Classification,
    pub count: usize,
    pub products: Vec<&'a Product>,
}

impl<'a> SubcategoryGroup<'a> {
    fn seed(subcategory: Classification) -> Self {
        Self {
            subcategory,
            count: 0,
            products: Vec::new(),
        }
    }

    fn push(&mut self, product: &'a Product) {
        self.count += 1;
        self.products.push(product);
    }
}

/// Group products by brand, in order of first appearance.
///
/// Used for every category without curated rules. Brands are compared
/// case-insensitively; the first spelling seen becomes the display name.
/// Products with a blank brand are skipped.
pub fn brand_groups<'a, I>(products: I, category: &str) -> Vec<SubcategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SubcategoryGroup<'a>> = Vec::new();

    for product in products {
        let Some(brand) = product.brand_name() else {
            continue;
        };
        let id = brand.to_lowercase();
        let slot = *index.entry(id).or_insert_with(|| {
            groups.push(SubcategoryGroup::seed(Classification::brand(brand, category)));
            groups.len() - 1
        });
        groups[slot].push(product);
    }

    groups
}

/// Group products into rule-derived subcategories
fn rule_groups<'a, I>(
    rules: &CategoryRules,
    products: I,
    category: &str,
) -> Vec<SubcategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SubcategoryGroup<'a>> = Vec::new();

    for product in products {
        let classification = classify_with(rules, &product.name, category);
        let slot = match index.get(&classification.id) {
            Some(&slot) => slot,
            None => {
                index.insert(classification.id.clone(), groups.len());
                groups.push(SubcategoryGroup::seed(classification));
                groups.len() - 1
            }
        };
        groups[slot].push(product);
    }

    // stable: equal priorities keep first-seen order
    groups.sort_by_key(|g| g.subcategory.priority);
    groups
}

/// Subcategories of `selected_category` with counts, sorted by priority.
///
/// An empty selection yields no groups. Categories with rules are grouped by
/// classification; categories without rules are grouped by brand.
pub fn aggregate<'a>(
    classifier: &Classifier<'_>,
    products: &'a [Product],
    selected_category: &str,
) -> Vec<SubcategoryGroup<'a>> {
    if selected_category.trim().is_empty() {
        return Vec::new();
    }

    let key = normalize_key(selected_category);
    let in_category = products.iter().filter(|p| key.matches(&p.category));

    let groups = match classifier.table().get(&key) {
        Some(rules) => rule_groups(rules, in_category, selected_category),
        None => brand_groups(in_category, selected_category),
    };

    tracing::debug!(
        category = %key,
        groups = groups.len(),
        "aggregated subcategories"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::store::RuleTable;
    use proptest::prelude::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Disco mecánico 7200 RPM 2TB", "Almacenamiento").with_brand("Seagate"),
            Product::new(2, "Disco SSD NVMe 1TB", "almacenamiento").with_brand("Kingston"),
            Product::new(3, "Pendrive 64GB", "almacenamiento").with_brand("Kingston"),
            Product::new(4, "SSD SATA 480GB", "ALMACENAMIENTO").with_brand("Crucial"),
            Product::new(5, "Gabinete 4000D", "gabinetes").with_brand("Corsair"),
            Product::new(6, "Gabinete H5 Flow", "gabinetes").with_brand("NZXT"),
            Product::new(7, "Gabinete 5000D", "Gabinetes").with_brand("Corsair"),
            Product::new(8, "Gabinete iCUE", "gabinetes").with_brand("Corsair"),
            Product::new(9, "Gabinete genérico", "gabinetes"),
            Product::new(10, "Ryzen 5 5600", "procesadores").with_brand("AMD"),
        ]
    }

    fn summary(groups: &[SubcategoryGroup<'_>]) -> Vec<(String, usize, i32)> {
        groups
            .iter()
            .map(|g| (g.subcategory.id.clone(), g.count, g.subcategory.priority))
            .collect()
    }

    #[test]
    fn test_empty_selection_returns_nothing() {
        let table = RuleTable::builtin();
        let products = catalog();
        assert!(aggregate(&Classifier::new(&table), &products, "").is_empty());
        assert!(aggregate(&Classifier::new(&table), &products, "  ").is_empty());
    }

    #[test]
    fn test_rule_groups_sorted_by_priority() {
        let table = RuleTable::builtin();
        let products = catalog();
        let groups = aggregate(&Classifier::new(&table), &products, "almacenamiento");

        assert_eq!(
            summary(&groups),
            vec![
                ("ssd".to_string(), 2, 1),
                ("hdd".to_string(), 1, 2),
                ("otros".to_string(), 1, 999),
            ]
        );
        assert_eq!(groups[0].products.len(), 2);
        assert_eq!(groups[0].subcategory.category, "almacenamiento");
    }

    #[test]
    fn test_brand_groups_for_category_without_rules() {
        let table = RuleTable::builtin();
        let products = catalog();
        let groups = aggregate(&Classifier::new(&table), &products, "gabinetes");

        assert_eq!(
            summary(&groups),
            vec![("corsair".to_string(), 3, 999), ("nzxt".to_string(), 1, 999)]
        );
        assert_eq!(groups[0].subcategory.name, "Corsair");
        assert_eq!(groups[1].subcategory.name, "NZXT");
    }

    #[test]
    fn test_brand_groups_merge_case_variants() {
        let products = vec![
            Product::new(1, "A", "cables").with_brand("Ugreen"),
            Product::new(2, "B", "cables").with_brand("UGREEN"),
            Product::new(3, "C", "cables").with_brand(""),
        ];
        let groups = brand_groups(&products, "cables");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].subcategory.id, "ugreen");
        assert_eq!(groups[0].subcategory.name, "Ugreen");
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_unknown_category_without_products_is_empty() {
        let table = RuleTable::builtin();
        let products = catalog();
        assert!(aggregate(&Classifier::new(&table), &products, "impresoras").is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = RuleTable::empty();
        let products = vec![
            Product::new(1, "x", "audio").with_brand("Logitech"),
            Product::new(2, "y", "audio").with_brand("HyperX"),
            Product::new(3, "z", "audio").with_brand("Logitech"),
        ];
        let groups = aggregate(&Classifier::new(&table), &products, "Audio");
        let ids: Vec<_> = groups.iter().map(|g| g.subcategory.id.as_str()).collect();
        assert_eq!(ids, vec!["logitech", "hyperx"]);
        assert_eq!(groups[0].subcategory.category, "Audio");
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            0u32..1000,
            prop::sample::select(vec![
                "Disco SSD 1TB",
                "HDD 7200 rpm",
                "Disco externo USB",
                "Cable SATA",
                "Ryzen 7",
                "Core i5",
                "Gabinete",
            ]),
            prop::sample::select(vec!["almacenamiento", "Procesadores", "gabinetes"]),
            prop::option::of(prop::sample::select(vec!["Corsair", "NZXT", "corsair", ""])),
        )
            .prop_map(|(id, name, category, brand)| {
                let mut product = Product::new(id, name, category);
                product.brand = brand.map(str::to_string);
                product
            })
    }

    proptest! {
        #[test]
        fn aggregate_is_sorted_and_idempotent(
            products in prop::collection::vec(arb_product(), 0..40),
            selected in prop::sample::select(vec!["almacenamiento", "procesadores", "Gabinetes", ""]),
        ) {
            let table = RuleTable::builtin();
            let classifier = Classifier::new(&table);

            let first = aggregate(&classifier, &products, selected);
            let second = aggregate(&classifier, &products, selected);
            prop_assert_eq!(&first, &second);

            prop_assert!(first
                .windows(2)
                .all(|w| w[0].subcategory.priority <= w[1].subcategory.priority));

            let total: usize = first.iter().map(|g| g.count).sum();
            let expected = if selected.is_empty() {
                0
            } else if table.contains(selected) {
                products.iter().filter(|p| p.category.eq_ignore_ascii_case(selected)).count()
            } else {
                products
                    .iter()
                    .filter(|p| p.category.eq_ignore_ascii_case(selected) && p.brand_name().is_some())
                    .count()
            };
            prop_assert_eq!(total, expected);
        }
    }
}
