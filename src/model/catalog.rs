use crate::error::FormulaError;
use crate::parser::formula::Formula;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unit keywords that mark an item as priced per square foot.
const AREA_UNIT_KEYWORDS: &[&str] = &["sqft", "sft", "sq ft", "square"];

/// Unit keyword for a flat per-washroom charge.
const BATHROOM_UNIT_KEYWORD: &str = "bathroom";

/// How a service's rate turns into a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Rate × (floor area + wall area).
    AreaRate,
    /// One flat charge per washroom.
    PerBathroom,
    /// Unrecognised or count-style units ("nos", "point"): flat rate.
    Flat,
}

impl UnitKind {
    /// Classifies a free-text unit. Matching is case-insensitive.
    #[must_use]
    pub fn from_unit(unit: &str) -> Self {
        let unit = unit.to_lowercase();
        if AREA_UNIT_KEYWORDS.iter().any(|k| unit.contains(k)) {
            UnitKind::AreaRate
        } else if unit.contains(BATHROOM_UNIT_KEYWORD) {
            UnitKind::PerBathroom
        } else {
            UnitKind::Flat
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::AreaRate => write!(f, "area rate"),
            UnitKind::PerBathroom => write!(f, "per bathroom"),
            UnitKind::Flat => write!(f, "flat"),
        }
    }
}

/// A priceable execution service or vendor item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    /// Scope of work shown to the client.
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
    /// Client-facing price per unit.
    #[serde(default)]
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl ServiceItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit: unit.into(),
            rate,
            formula: None,
        }
    }

    #[must_use]
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }
}

/// Service items indexed by id, with custom formulas compiled up front.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    items: Vec<ServiceItem>,
    formulas: Vec<Option<Result<Formula, FormulaError>>>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Builds the catalog. On duplicate ids the last item wins. Blank
    /// formulas are treated as absent.
    #[must_use]
    pub fn new(items: Vec<ServiceItem>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
        let formulas = items
            .iter()
            .map(|item| {
                item.formula
                    .as_deref()
                    .filter(|f| !f.trim().is_empty())
                    .map(Formula::parse)
            })
            .collect();
        Self {
            items,
            formulas,
            index,
        }
    }

    /// The compiled formula of an item, if it has one.
    #[must_use]
    pub fn formula(&self, id: &str) -> Option<&Result<Formula, FormulaError>> {
        self.index
            .get(id)
            .and_then(|&i| self.formulas[i].as_ref())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ServiceItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    #[must_use]
    pub fn items(&self) -> &[ServiceItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProduct {
    pub name: String,
    /// Special (selling) price.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl BrandProduct {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            mrp: None,
            unit: None,
        }
    }

    /// MRP, falling back to the special price when no MRP is listed.
    #[must_use]
    pub fn mrp_or_price(&self) -> f64 {
        self.mrp.unwrap_or(self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<BrandProduct>,
}

/// Brand → product list lookup.
#[derive(Debug, Clone, Default)]
pub struct BrandCatalog {
    brands: HashMap<String, Brand>,
}

impl BrandCatalog {
    #[must_use]
    pub fn new(brands: Vec<Brand>) -> Self {
        Self {
            brands: brands.into_iter().map(|b| (b.id.clone(), b)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, brand_id: &str) -> Option<&Brand> {
        self.brands.get(brand_id)
    }

    /// Sum of the brand's product prices. Unknown brands and brands without
    /// products contribute zero.
    #[must_use]
    pub fn product_total(&self, brand_id: &str) -> f64 {
        let brand = match self.get(brand_id) {
            Some(brand) => brand,
            None => {
                log::warn!("brand '{brand_id}' not found; product cost treated as zero");
                return 0.0;
            }
        };
        if brand.products.is_empty() {
            log::warn!("brand '{}' has no products", brand.name);
        }
        brand
            .products
            .iter()
            .map(|p| crate::pricing::money::sanitize(p.price))
            .sum()
    }
}
