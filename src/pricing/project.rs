use crate::model::catalog::{BrandCatalog, ServiceCatalog};
use crate::model::cost_item::{AdHocCosts, CostCategory};
use crate::model::settings::PricingSettings;
use crate::model::washroom::Washroom;
use crate::pricing::margin::{price_simple, SimplePricing};
use crate::pricing::money::{guard, percent_of, sanitize};
use crate::pricing::washroom::{cost_washroom, WashroomCost};
use serde::{Deserialize, Serialize};

/// Manually entered project-level product and logistics costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCostOverrides {
    /// Replaces the Σ of washroom product subtotals.
    pub product_cost: Option<f64>,
    /// Replaces the logistics charge derived from product cost.
    pub logistics_cost: Option<f64>,
}

/// Project totals before margin and tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectSubtotals {
    /// Ad hoc execution items plus every washroom's service subtotal.
    pub execution_total: f64,
    pub vendor_total: f64,
    pub additional_total: f64,
    /// execution + vendor + additional.
    pub execution_services_total: f64,
    pub product_cost: f64,
    pub logistics_cost: f64,
    pub subtotal: f64,
}

/// Flat project cost summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub execution_total: f64,
    pub vendor_total: f64,
    pub additional_total: f64,
    pub product_cost: f64,
    pub logistics_cost: f64,
    pub margin_amount: f64,
    pub gst_amount: f64,
    pub grand_total: f64,
}

/// Detailed internal costing of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCosts {
    pub subtotals: ProjectSubtotals,
    pub pricing: SimplePricing,
    pub floor_area: f64,
    pub wall_area: f64,
    pub total_area: f64,
    pub per_washroom_costs: Vec<WashroomCost>,
    pub final_quotation_amount: f64,
}

impl ProjectCosts {
    #[must_use]
    pub fn summary(&self) -> CostSummary {
        CostSummary {
            execution_total: self.subtotals.execution_total,
            vendor_total: self.subtotals.vendor_total,
            additional_total: self.subtotals.additional_total,
            product_cost: self.subtotals.product_cost,
            logistics_cost: self.subtotals.logistics_cost,
            margin_amount: self.pricing.margin_amount,
            gst_amount: self.pricing.gst_amount,
            grand_total: self.pricing.total,
        }
    }
}

/// Combines washroom costs with ad hoc items and overrides.
#[must_use]
pub fn aggregate_project(
    washroom_costs: &[WashroomCost],
    ad_hoc: &AdHocCosts,
    overrides: &ProjectCostOverrides,
    logistics_rate: f64,
) -> ProjectSubtotals {
    let washroom_execution: f64 = washroom_costs.iter().map(|w| w.execution_subtotal).sum();
    let washroom_products: f64 = washroom_costs.iter().map(|w| w.product_subtotal).sum();

    let execution_total = guard(
        "execution total",
        ad_hoc.total_for(CostCategory::Execution) + washroom_execution,
    );
    let vendor_total = guard("vendor total", ad_hoc.total_for(CostCategory::Vendor));
    let additional_total = guard("additional total", ad_hoc.total_for(CostCategory::Additional));
    let execution_services_total = guard(
        "execution services total",
        execution_total + vendor_total + additional_total,
    );

    let product_cost = overrides
        .product_cost
        .map_or_else(|| guard("product cost", washroom_products), sanitize);
    let logistics_cost = overrides
        .logistics_cost
        .map_or_else(|| percent_of(product_cost, sanitize(logistics_rate)), sanitize);

    ProjectSubtotals {
        execution_total,
        vendor_total,
        additional_total,
        execution_services_total,
        product_cost,
        logistics_cost,
        subtotal: guard(
            "project subtotal",
            execution_services_total + product_cost + logistics_cost,
        ),
    }
}

/// Costs every washroom, aggregates the project and applies the simple
/// margin / GST policy from `settings`.
#[must_use]
pub fn calculate_project_costs(
    washrooms: &[Washroom],
    catalog: &ServiceCatalog,
    brands: &BrandCatalog,
    ad_hoc: &AdHocCosts,
    overrides: &ProjectCostOverrides,
    settings: &PricingSettings,
) -> ProjectCosts {
    let per_washroom_costs: Vec<WashroomCost> = washrooms
        .iter()
        .map(|w| cost_washroom(w, catalog, brands))
        .collect();

    let floor_area: f64 = per_washroom_costs.iter().map(|w| w.areas.floor).sum();
    let wall_area: f64 = per_washroom_costs.iter().map(|w| w.areas.wall).sum();

    let subtotals = aggregate_project(&per_washroom_costs, ad_hoc, overrides, settings.logistics_rate);
    let pricing = price_simple(
        subtotals.subtotal,
        subtotals.execution_services_total,
        settings.default_margin,
        settings.gst_rate,
    );

    log::debug!(
        "project costs: {} washrooms, subtotal {:.2}, final {:.2}",
        per_washroom_costs.len(),
        subtotals.subtotal,
        pricing.total
    );

    ProjectCosts {
        subtotals,
        pricing,
        floor_area,
        wall_area,
        total_area: floor_area + wall_area,
        per_washroom_costs,
        final_quotation_amount: pricing.total,
    }
}
