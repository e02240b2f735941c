//! Catalog filtering and pagination.
//!
//! Mirrors the storefront's client-side product listing: narrow by category,
//! subcategory, brand, price and text, sort, then slice into pages.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::category::{collate, normalize_key, Classifier};
use crate::product::Product;

/// Listing sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Keep catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

/// Product listing filter
///
/// Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub category: Option<String>,
    /// Subcategory id; only applies together with `category`
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn subcategory(mut self, id: impl Into<String>) -> Self {
        self.subcategory = Some(id.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Apply the filter and sort. The result borrows from `products`.
    pub fn apply<'a>(
        &self,
        classifier: &Classifier<'_>,
        products: &'a [Product],
    ) -> Vec<&'a Product> {
        let category = non_blank(self.category.as_deref()).map(normalize_key);
        let subcategory = non_blank(self.subcategory.as_deref()).map(str::to_lowercase);
        let brands: Vec<String> = self
            .brands
            .iter()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .collect();
        let search = non_blank(self.search.as_deref()).map(|q| q.trim().to_lowercase());

        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|p| match &category {
                Some(key) => key.matches(&p.category),
                None => true,
            })
            .filter(|p| match (&category, &subcategory) {
                (Some(_), Some(id)) => subcategory_id(classifier, p)
                    .is_some_and(|found| found.to_lowercase() == *id),
                _ => true,
            })
            .filter(|p| {
                brands.is_empty()
                    || p
                        .brand_name()
                        .map(|b| brands.contains(&b.to_lowercase()))
                        .unwrap_or(false)
            })
            .filter(|p| self.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| self.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| match &search {
                Some(q) => {
                    p.name.to_lowercase().contains(q.as_str())
                        || p
                            .brand_name()
                            .map(|b| b.to_lowercase().contains(q.as_str()))
                            .unwrap_or(false)
                }
                None => true,
            })
            .collect();

        match self.sort {
            SortOrder::Relevance => {}
            SortOrder::PriceAsc => matched.sort_by(|a, b| cmp_price(a.price, b.price)),
            SortOrder::PriceDesc => matched.sort_by(|a, b| cmp_price(b.price, a.price)),
            SortOrder::NameAsc => matched.sort_by(|a, b| collate(&a.name, &b.name)),
        }

        tracing::debug!(matched = matched.len(), total = products.len(), "filtered products");
        matched
    }
}

/// Subcategory id a product is listed under: its classification in ruled
/// categories, its lowercased brand otherwise.
fn subcategory_id(classifier: &Classifier<'_>, product: &Product) -> Option<String> {
    match classifier.classify_product(product) {
        Some(classification) => Some(classification.id),
        None => product.brand_name().map(str::to_lowercase),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn cmp_price(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slice `items` into a 1-based page.
///
/// Page 0 is read as page 1 and a zero page size as 1. Pages past the end are
/// empty but still report the totals.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::RuleTable;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Disco SSD NVMe 1TB", "almacenamiento")
                .with_brand("Kingston")
                .with_price(65.0),
            Product::new(2, "Disco mecánico 7200 RPM", "Almacenamiento")
                .with_brand("Seagate")
                .with_price(45.0),
            Product::new(3, "SSD SATA 480GB", "almacenamiento")
                .with_brand("Crucial")
                .with_price(30.0),
            Product::new(4, "Gabinete 4000D", "gabinetes")
                .with_brand("Corsair")
                .with_price(95.0),
            Product::new(5, "Gabinete H5 Flow", "gabinetes")
                .with_brand("NZXT")
                .with_price(90.0),
            Product::new(6, "Ryzen 5 5600", "procesadores")
                .with_brand("AMD")
                .with_price(120.0),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64().unwrap()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let table = RuleTable::builtin();
        let products = catalog();
        let result = ProductFilter::new().apply(&Classifier::new(&table), &products);
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_filter_by_category_and_rule_subcategory() {
        let table = RuleTable::builtin();
        let products = catalog();
        let filter = ProductFilter::new().category("ALMACENAMIENTO").subcategory("ssd");
        let result = filter.apply(&Classifier::new(&table), &products);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_filter_by_brand_subcategory_in_unruled_category() {
        let table = RuleTable::builtin();
        let products = catalog();
        let filter = ProductFilter::new().category("gabinetes").subcategory("nzxt");
        let result = filter.apply(&Classifier::new(&table), &products);
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn test_subcategory_without_category_is_ignored() {
        let table = RuleTable::builtin();
        let products = catalog();
        let filter = ProductFilter::new().subcategory("ssd");
        let result = filter.apply(&Classifier::new(&table), &products);
        assert_eq!(result.len(), products.len());
    }

    #[test]
    fn test_filter_by_brand_price_and_sort() {
        let table = RuleTable::builtin();
        let products = catalog();
        let filter = ProductFilter::new()
            .brand("kingston")
            .brand("CRUCIAL")
            .brand("Corsair")
            .price_range(Some(30.0), Some(90.0))
            .sort(SortOrder::PriceDesc);
        let result = filter.apply(&Classifier::new(&table), &products);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_search_matches_name_or_brand() {
        let table = RuleTable::builtin();
        let products = catalog();
        let classifier = Classifier::new(&table);

        let by_name = ProductFilter::new().search("gabinete").apply(&classifier, &products);
        assert_eq!(ids(&by_name), vec![4, 5]);

        let by_brand = ProductFilter::new().search("seag").apply(&classifier, &products);
        assert_eq!(ids(&by_brand), vec![2]);
    }

    #[test]
    fn test_sort_by_name() {
        let table = RuleTable::builtin();
        let products = catalog();
        let result = ProductFilter::new()
            .category("almacenamiento")
            .sort(SortOrder::NameAsc)
            .apply(&Classifier::new(&table), &products);
        assert_eq!(ids(&result), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_order_from_kebab_case() {
        let filter: ProductFilter = serde_json::from_str(r#"{"sort": "price-asc"}"#).unwrap();
        assert_eq!(filter.sort, SortOrder::PriceAsc);
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=10).collect::<Vec<_>>(), 2, 4);
        assert_eq!(page.items, vec![5, 6, 7, 8]);
        assert_eq!(page.total_items, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last = paginate((1..=10).collect::<Vec<_>>(), 3, 4);
        assert_eq!(last.items, vec![9, 10]);
        assert!(!last.has_next());
    }

    #[test]
    fn test_paginate_edges() {
        let first = paginate(vec!['a', 'b'], 0, 0);
        assert_eq!(first.page, 1);
        assert_eq!(first.per_page, 1);
        assert_eq!(first.items, vec!['a']);

        let past_end = paginate(vec!['a', 'b'], 9, 5);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 1);

        let empty = paginate(Vec::<u8>::new(), 1, 5);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
    }
}
