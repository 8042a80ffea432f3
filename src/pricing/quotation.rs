use crate::model::catalog::{BrandCatalog, ServiceCatalog};
use crate::model::cost_item::AdHocCosts;
use crate::model::quotation::{
    CategoryBreakdown, PricedLine, Quotation, QuotationLineItem, QuotationSummary,
    WashroomLineItems, WashroomQuotation,
};
use crate::model::settings::{MarginConfig, PricingSettings};
use crate::model::washroom::Washroom;
use crate::pricing::item_cost::{evaluate_item_cost, CostContext};
use crate::pricing::margin::generate_quotation_pricing;
use crate::pricing::money::{guard, percent_of, sanitize};
use crate::pricing::project::ProjectCostOverrides;
use crate::pricing::rate::resolve_rate;
use std::collections::BTreeMap;

/// Category used for brand product lines.
pub const PRODUCT_CATEGORY: &str = "Products";

/// Pricing-group id of the project-level ad hoc lines. Its margin is
/// `MarginConfig::margin_for(PROJECT_SCOPE_ID)`.
pub const PROJECT_SCOPE_ID: &str = "project";

const PROJECT_SCOPE_NAME: &str = "Project-wide";

const UNCATEGORISED: &str = "Other";
const DEFAULT_PRODUCT_UNIT: &str = "nos";

/// Builds the service and brand-product lines of one washroom.
///
/// Services unknown to the catalog are left out of the quotation.
#[must_use]
pub fn build_line_items(
    washroom: &Washroom,
    catalog: &ServiceCatalog,
    brands: &BrandCatalog,
    settings: &PricingSettings,
) -> WashroomLineItems {
    let ctx = CostContext::for_washroom(washroom);
    let mut items = Vec::new();

    for id in washroom.selected_services() {
        let Some(service) = catalog.get(id) else {
            log::warn!("service '{id}' in washroom '{}' not in catalog; skipped", washroom.name);
            continue;
        };
        let cost = evaluate_item_cost(&resolve_rate(catalog, id), &ctx);
        let category = if service.category.trim().is_empty() {
            UNCATEGORISED
        } else {
            service.category.as_str()
        };
        items.push(
            QuotationLineItem::service(&service.name, cost)
                .with_category(category)
                .with_unit(&service.unit),
        );
    }

    if let Some(brand) = washroom.brand_id.as_deref().and_then(|id| brands.get(id)) {
        for product in &brand.products {
            let price = sanitize(product.price);
            let mut line =
                QuotationLineItem::brand_product(&product.name, price, settings.gst_on_brand_products)
                    .with_category(PRODUCT_CATEGORY)
                    .with_unit(product.unit.as_deref().unwrap_or(DEFAULT_PRODUCT_UNIT))
                    .with_mrp(sanitize(product.mrp_or_price()));
            line.description.clone_from(&brand.name);
            items.push(line);
        }
    } else if let Some(brand_id) = &washroom.brand_id {
        log::warn!("brand '{brand_id}' in washroom '{}' not found", washroom.name);
    }

    WashroomLineItems {
        washroom_id: washroom.id.clone(),
        washroom_name: washroom.name.clone(),
        items,
    }
}

/// Ad hoc execution, vendor and additional items as one project-level group
/// of service lines. `None` when there are no ad hoc items.
#[must_use]
pub fn build_project_line_items(ad_hoc: &AdHocCosts) -> Option<WashroomLineItems> {
    if ad_hoc.items().is_empty() {
        return None;
    }
    let items = ad_hoc
        .items()
        .iter()
        .map(|cost| {
            let mut line = QuotationLineItem::service(&cost.name, sanitize(cost.amount))
                .with_category(cost.category.label());
            line.description.clone_from(&cost.description);
            line
        })
        .collect();
    Some(WashroomLineItems {
        washroom_id: PROJECT_SCOPE_ID.to_string(),
        washroom_name: PROJECT_SCOPE_NAME.to_string(),
        items,
    })
}

/// Groups priced lines by category, keeping first-seen category order.
fn group_by_category(lines: &[PricedLine]) -> Vec<CategoryBreakdown> {
    let mut groups: Vec<CategoryBreakdown> = Vec::new();
    for line in lines {
        let position = groups
            .iter()
            .position(|g| g.category == line.item.category);
        let group = match position {
            Some(i) => &mut groups[i],
            None => {
                groups.push(CategoryBreakdown {
                    category: line.item.category.clone(),
                    lines: Vec::new(),
                    subtotal: 0.0,
                });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };
        group.subtotal += line.pricing.total;
        group.lines.push(line.clone());
    }
    groups
}

/// Everything a quotation is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct QuotationRequest<'a> {
    pub project_name: &'a str,
    pub washrooms: &'a [Washroom],
    pub catalog: &'a ServiceCatalog,
    pub brands: &'a BrandCatalog,
    pub ad_hoc: &'a AdHocCosts,
    pub overrides: &'a ProjectCostOverrides,
    pub margins: &'a MarginConfig,
    pub settings: &'a PricingSettings,
}

/// Assembles the full quotation for a project.
///
/// Washroom lines come first, then the ad hoc items as a project-level
/// group. The logistics / creative service charge is the logistics override
/// when set, else `settings.logistics_rate` percent of product cost (the
/// product-cost override when set, else Σ brand product lines). It is added
/// before GST and never taxed.
#[must_use]
pub fn assemble_quotation(request: &QuotationRequest<'_>) -> Quotation {
    let settings = request.settings;
    let mut line_items: Vec<WashroomLineItems> = request
        .washrooms
        .iter()
        .map(|w| build_line_items(w, request.catalog, request.brands, settings))
        .collect();
    line_items.extend(build_project_line_items(request.ad_hoc));
    let pricing = generate_quotation_pricing(&line_items, request.margins, settings.gst_rate);

    let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut mrp_total = 0.0;
    let mut product_cost = 0.0;

    let washroom_quotes: Vec<WashroomQuotation> = pricing
        .per_washroom
        .iter()
        .map(|priced| {
            for line in priced.lines.iter().filter(|l| l.item.is_brand_product) {
                product_cost += line.pricing.base;
                mrp_total += line.item.mrp.unwrap_or(line.pricing.base);
            }
            let categories = group_by_category(&priced.lines);
            for group in &categories {
                *category_totals.entry(group.category.clone()).or_insert(0.0) += group.subtotal;
            }
            let areas = request
                .washrooms
                .iter()
                .find(|w| w.id == priced.washroom_id)
                .map(Washroom::areas)
                .unwrap_or_default();
            WashroomQuotation {
                washroom_id: priced.washroom_id.clone(),
                washroom_name: priced.washroom_name.clone(),
                areas,
                categories,
                total: priced.total,
            }
        })
        .collect();

    let logistics_base = request.overrides.product_cost.map_or(product_cost, sanitize);
    let logistics_charge = request.overrides.logistics_cost.map_or_else(
        || percent_of(logistics_base, sanitize(settings.logistics_rate)),
        sanitize,
    );
    let special_price_subtotal = pricing.summary.total_with_margin + logistics_charge;
    let total_gst = pricing.summary.total_gst;
    let grand_total = guard("quotation total", special_price_subtotal + total_gst);

    Quotation {
        project_name: request.project_name.to_string(),
        total_amount: grand_total,
        washrooms: washroom_quotes,
        category_totals,
        summary: QuotationSummary {
            mrp_total,
            product_cost,
            logistics_charge,
            special_price_subtotal,
            total_gst,
            grand_total,
        },
        pricing,
    }
}
