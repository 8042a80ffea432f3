//! Margin and GST layering.
//!
//! Two policies coexist. The simple path (customer calculator, project
//! costing) puts one margin on the whole subtotal and charges GST only on the
//! execution-services portion. The detailed path (quotations) prices each
//! line: margin on services only, GST on lines flagged eligible, computed on
//! base plus margin.

use crate::model::quotation::{
    LinePricing, PricedLine, ProjectPricingSummary, QuotationLineItem, QuotationPricing,
    WashroomLineItems, WashroomPricing,
};
use crate::model::settings::MarginConfig;
use crate::pricing::money::{guard, percent_of, sanitize};
use serde::Serialize;

/// Result of the simple pricing path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimplePricing {
    pub subtotal: f64,
    pub margin_percent: f64,
    pub margin_amount: f64,
    pub price_with_margin: f64,
    pub gst_percent: f64,
    /// GST base: the execution-services total.
    pub gst_base: f64,
    pub gst_amount: f64,
    pub total: f64,
}

/// Simple path: margin on the whole subtotal, GST on `gst_base` only.
#[must_use]
pub fn price_simple(subtotal: f64, gst_base: f64, margin_pct: f64, gst_pct: f64) -> SimplePricing {
    let subtotal = guard("subtotal", subtotal);
    let gst_base = guard("GST base", gst_base);
    let margin_percent = sanitize(margin_pct);
    let gst_percent = sanitize(gst_pct);

    let margin_amount = percent_of(subtotal, margin_percent);
    let price_with_margin = subtotal + margin_amount;
    let gst_amount = percent_of(gst_base, gst_percent);

    SimplePricing {
        subtotal,
        margin_percent,
        margin_amount,
        price_with_margin,
        gst_percent,
        gst_base,
        gst_amount,
        total: guard("simple total", price_with_margin + gst_amount),
    }
}

/// Detailed path for one line.
#[must_use]
pub fn price_line(item: &QuotationLineItem, margin_pct: f64, gst_pct: f64) -> LinePricing {
    let base = sanitize(item.amount);
    let margin = if item.is_brand_product {
        0.0
    } else {
        percent_of(base, sanitize(margin_pct))
    };
    let gst = if item.gst_applicable {
        percent_of(base + margin, sanitize(gst_pct))
    } else {
        0.0
    };
    LinePricing {
        base,
        margin,
        gst,
        total: base + margin + gst,
    }
}

/// Detailed path for all lines of a washroom.
#[must_use]
pub fn price_washroom(washroom: &WashroomLineItems, margin_pct: f64, gst_pct: f64) -> WashroomPricing {
    let margin_percent = sanitize(margin_pct);
    let lines: Vec<PricedLine> = washroom
        .items
        .iter()
        .map(|item| PricedLine {
            item: item.clone(),
            pricing: price_line(item, margin_percent, gst_pct),
        })
        .collect();

    let base_price: f64 = lines.iter().map(|l| l.pricing.base).sum();
    let margin_amount: f64 = lines.iter().map(|l| l.pricing.margin).sum();
    let gst_amount: f64 = lines.iter().map(|l| l.pricing.gst).sum();
    let price_with_margin = base_price + margin_amount;

    WashroomPricing {
        washroom_id: washroom.washroom_id.clone(),
        washroom_name: washroom.washroom_name.clone(),
        margin_percent,
        base_price,
        margin_amount,
        price_with_margin,
        gst_amount,
        total: guard(&washroom.washroom_name, price_with_margin + gst_amount),
        lines,
    }
}

/// Prices every washroom with its configured margin and sums the project.
#[must_use]
pub fn generate_quotation_pricing(
    washrooms: &[WashroomLineItems],
    margins: &MarginConfig,
    gst_rate: f64,
) -> QuotationPricing {
    let per_washroom: Vec<WashroomPricing> = washrooms
        .iter()
        .map(|w| price_washroom(w, margins.margin_for(&w.washroom_id), gst_rate))
        .collect();

    let total_base_price: f64 = per_washroom.iter().map(|w| w.base_price).sum();
    let total_with_margin: f64 = per_washroom.iter().map(|w| w.price_with_margin).sum();
    let total_gst: f64 = per_washroom.iter().map(|w| w.gst_amount).sum();
    let average_margin = if total_base_price > 0.0 {
        (total_with_margin - total_base_price) / total_base_price * 100.0
    } else {
        0.0
    };

    let summary = ProjectPricingSummary {
        total_base_price,
        total_with_margin,
        total_gst,
        grand_total: guard("grand total", total_with_margin + total_gst),
        average_margin,
    };
    log::debug!(
        "quotation pricing: base {total_base_price:.2}, grand total {:.2}",
        summary.grand_total
    );

    QuotationPricing {
        per_washroom,
        summary,
    }
}
