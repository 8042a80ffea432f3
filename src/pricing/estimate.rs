use crate::model::catalog::{BrandCatalog, UnitKind};
use crate::model::settings::PricingSettings;
use crate::pricing::area::{compute_areas, Areas};
use crate::pricing::item_cost::standard_cost;
use crate::pricing::margin::{price_simple, SimplePricing};
use crate::pricing::money::sanitize;
use serde::{Deserialize, Serialize};

/// A fixture picked in the customer calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSelection {
    pub name: String,
    pub price: f64,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

fn yes() -> bool {
    true
}

/// What the customer entered in the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSelections {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fixtures: Vec<FixtureSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(default = "yes")]
    pub include_tiling: bool,
    #[serde(default = "yes")]
    pub include_plumbing: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TilingCost {
    pub material: f64,
    pub labor: f64,
    pub total: f64,
}

/// Customer-facing estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub areas: Areas,
    pub fixture_cost: f64,
    pub plumbing_cost: f64,
    pub tiling_cost: TilingCost,
    pub product_cost: f64,
    /// Before margin and GST.
    pub subtotal: f64,
    pub pricing: SimplePricing,
    /// With margin and GST.
    pub total: f64,
}

/// Tiling over floor and wall area; material is over-ordered by the
/// breakage percentage.
fn tiling_cost(areas: &Areas, settings: &PricingSettings) -> TilingCost {
    let material_rate = sanitize(settings.tiling_material_cost)
        * (1.0 + sanitize(settings.breakage_percent) / 100.0);
    let material = standard_cost(material_rate, UnitKind::AreaRate, areas);
    let labor = standard_cost(sanitize(settings.tiling_labor_cost), UnitKind::AreaRate, areas);
    TilingCost {
        material,
        labor,
        total: material + labor,
    }
}

/// Simple customer estimate: fixtures, plumbing and tiling are execution
/// services and carry GST; brand products do not.
#[must_use]
pub fn calculate_estimate(
    selections: &EstimateSelections,
    brands: &BrandCatalog,
    settings: &PricingSettings,
) -> Estimate {
    let areas = compute_areas(selections.length, selections.width, selections.height, None, None);

    let fixture_cost: f64 = selections
        .fixtures
        .iter()
        .map(|f| sanitize(f.price) * f64::from(f.quantity))
        .sum();
    let plumbing_cost = if selections.include_plumbing {
        standard_cost(sanitize(settings.plumbing_rate), UnitKind::AreaRate, &areas)
    } else {
        0.0
    };
    let tiling_cost = if selections.include_tiling {
        tiling_cost(&areas, settings)
    } else {
        TilingCost::default()
    };
    let product_cost = selections
        .brand_id
        .as_deref()
        .map_or(0.0, |id| brands.product_total(id));

    let execution = fixture_cost + plumbing_cost + tiling_cost.total;
    let subtotal = execution + product_cost;
    let pricing = price_simple(subtotal, execution, settings.default_margin, settings.gst_rate);

    Estimate {
        areas,
        fixture_cost,
        plumbing_cost,
        tiling_cost,
        product_cost,
        subtotal,
        pricing,
        total: pricing.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Brand, BrandProduct};

    fn settings() -> PricingSettings {
        PricingSettings {
            tiling_material_cost: 40.0,
            tiling_labor_cost: 20.0,
            breakage_percent: 10.0,
            plumbing_rate: 15.0,
            default_margin: 0.0,
            gst_rate: 18.0,
            ..PricingSettings::default()
        }
    }

    fn selections() -> EstimateSelections {
        EstimateSelections {
            length: 10.0,
            width: 8.0,
            height: 9.0,
            fixtures: vec![FixtureSelection {
                name: "Grab bar".into(),
                price: 750.0,
                quantity: 2,
            }],
            brand_id: Some("b1".into()),
            include_tiling: true,
            include_plumbing: true,
        }
    }

    fn brands() -> BrandCatalog {
        BrandCatalog::new(vec![Brand {
            id: "b1".into(),
            name: "Aqua".into(),
            products: vec![BrandProduct::new("WC", 10_000.0)],
        }])
    }

    #[test]
    fn estimate_breakdown() {
        let estimate = calculate_estimate(&selections(), &brands(), &settings());
        assert_eq!(estimate.fixture_cost, 1500.0);
        assert_eq!(estimate.plumbing_cost, 15.0 * 404.0);
        assert!((estimate.tiling_cost.material - 44.0 * 404.0).abs() < 1e-9);
        assert_eq!(estimate.tiling_cost.labor, 20.0 * 404.0);
        assert_eq!(estimate.product_cost, 10_000.0);

        let execution = 1500.0 + 15.0 * 404.0 + 64.0 * 404.0;
        assert!((estimate.subtotal - (execution + 10_000.0)).abs() < 1e-6);
        assert!((estimate.total - (execution * 1.18 + 10_000.0)).abs() < 1e-6);
    }

    #[test]
    fn excluded_work_costs_nothing() {
        let mut selections = selections();
        selections.include_tiling = false;
        selections.include_plumbing = false;
        selections.brand_id = None;
        let estimate = calculate_estimate(&selections, &brands(), &settings());
        assert_eq!(estimate.tiling_cost, TilingCost::default());
        assert_eq!(estimate.plumbing_cost, 0.0);
        assert_eq!(estimate.subtotal, 1500.0);
    }

    #[test]
    fn default_margin_applies_to_whole_subtotal() {
        let estimate = calculate_estimate(&selections(), &brands(), &PricingSettings::default());
        assert_eq!(estimate.subtotal, 11_500.0);
        assert!((estimate.pricing.margin_amount - 11_500.0 * 0.0152).abs() < 1e-9);
        assert!((estimate.pricing.gst_amount - 1500.0 * 0.18).abs() < 1e-9);
    }
}
