use crate::pricing::area::Areas;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One priced line of a quotation, before margin and tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLineItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    /// Brand products are exempt from margin.
    #[serde(default)]
    pub is_brand_product: bool,
    #[serde(default = "default_gst_applicable")]
    pub gst_applicable: bool,
}

fn default_gst_applicable() -> bool {
    true
}

impl QuotationLineItem {
    #[must_use]
    pub fn service(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            amount,
            mrp: None,
            unit: String::new(),
            category: String::new(),
            is_brand_product: false,
            gst_applicable: true,
        }
    }

    #[must_use]
    pub fn brand_product(name: impl Into<String>, amount: f64, gst_applicable: bool) -> Self {
        Self {
            is_brand_product: true,
            gst_applicable,
            ..Self::service(name, amount)
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_mrp(mut self, mrp: f64) -> Self {
        self.mrp = Some(mrp);
        self
    }
}

/// Line items of a single washroom, input to detailed pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WashroomLineItems {
    pub washroom_id: String,
    pub washroom_name: String,
    pub items: Vec<QuotationLineItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePricing {
    pub base: f64,
    pub margin: f64,
    pub gst: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLine {
    pub item: QuotationLineItem,
    pub pricing: LinePricing,
}

/// Internal pricing breakdown of one washroom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WashroomPricing {
    pub washroom_id: String,
    pub washroom_name: String,
    pub margin_percent: f64,
    pub base_price: f64,
    pub margin_amount: f64,
    pub price_with_margin: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectPricingSummary {
    pub total_base_price: f64,
    pub total_with_margin: f64,
    pub total_gst: f64,
    pub grand_total: f64,
    /// Effective margin over all washrooms, in percent. Informational only.
    pub average_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationPricing {
    pub per_washroom: Vec<WashroomPricing>,
    pub summary: ProjectPricingSummary,
}

/// Priced lines of one category within a washroom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub lines: Vec<PricedLine>,
    /// Sum of line totals (with margin and GST).
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WashroomQuotation {
    pub washroom_id: String,
    pub washroom_name: String,
    pub areas: Areas,
    pub categories: Vec<CategoryBreakdown>,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QuotationSummary {
    /// Σ MRP of brand products (price when no MRP is listed).
    pub mrp_total: f64,
    /// Σ special price of brand products.
    pub product_cost: f64,
    /// Logistics / creative service charge on product cost, GST-exempt.
    pub logistics_charge: f64,
    /// Pre-GST total: lines with margin plus the logistics charge.
    pub special_price_subtotal: f64,
    pub total_gst: f64,
    pub grand_total: f64,
}

/// Final quotation payload handed to rendering and persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quotation {
    pub project_name: String,
    pub total_amount: f64,
    pub washrooms: Vec<WashroomQuotation>,
    /// Category → Σ line totals across all washrooms.
    pub category_totals: BTreeMap<String, f64>,
    pub summary: QuotationSummary,
    pub pricing: QuotationPricing,
}
