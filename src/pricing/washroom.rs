use crate::model::catalog::{BrandCatalog, ServiceCatalog};
use crate::model::washroom::Washroom;
use crate::pricing::area::Areas;
use crate::pricing::item_cost::{evaluate_item_cost, CostContext};
use crate::pricing::rate::resolve_rate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Costs of one washroom before margin and tax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WashroomCost {
    pub washroom_id: String,
    pub washroom_name: String,
    pub areas: Areas,
    /// Service id → cost, for line-item display.
    pub service_costs: BTreeMap<String, f64>,
    pub execution_subtotal: f64,
    pub product_subtotal: f64,
    pub total: f64,
}

/// Sums the selected services and the selected brand's products of a washroom.
#[must_use]
pub fn cost_washroom(
    washroom: &Washroom,
    catalog: &ServiceCatalog,
    brands: &BrandCatalog,
) -> WashroomCost {
    let ctx = CostContext::for_washroom(washroom);

    let service_costs: BTreeMap<String, f64> = washroom
        .selected_services()
        .map(|id| {
            let resolved = resolve_rate(catalog, id);
            (id.to_string(), evaluate_item_cost(&resolved, &ctx))
        })
        .collect();

    let execution_subtotal: f64 = service_costs.values().sum();
    let product_subtotal = washroom
        .brand_id
        .as_deref()
        .map_or(0.0, |brand_id| brands.product_total(brand_id));
    let total = execution_subtotal + product_subtotal;

    log::debug!(
        "washroom '{}': execution {execution_subtotal:.2}, products {product_subtotal:.2}",
        washroom.name
    );

    WashroomCost {
        washroom_id: washroom.id.clone(),
        washroom_name: washroom.name.clone(),
        areas: ctx.areas,
        service_costs,
        execution_subtotal,
        product_subtotal,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Brand, BrandProduct, ServiceItem};
    use pretty_assertions::assert_eq;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            ServiceItem::new("tile", "Tiling", "Tiling", "sqft", 50.0),
            ServiceItem::new("plumb", "Plumbing", "Plumbing", "bathroom", 5000.0),
        ])
    }

    fn brands() -> BrandCatalog {
        BrandCatalog::new(vec![Brand {
            id: "b1".into(),
            name: "Aqua".into(),
            products: vec![
                BrandProduct::new("Basin", 1200.0),
                BrandProduct::new("Mixer", 800.0),
                BrandProduct::new("WC", 2500.0),
            ],
        }])
    }

    #[test]
    fn sums_services_and_brand() {
        let washroom = Washroom::new("w1", "Master")
            .with_dimensions(10.0, 8.0, 9.0)
            .with_service("tile")
            .with_service("plumb")
            .with_brand("b1");
        let cost = cost_washroom(&washroom, &catalog(), &brands());

        assert_eq!(cost.service_costs["tile"], 20_200.0);
        assert_eq!(cost.service_costs["plumb"], 5000.0);
        assert_eq!(cost.execution_subtotal, 25_200.0);
        assert_eq!(cost.product_subtotal, 4500.0);
        assert_eq!(cost.total, 29_700.0);
    }

    #[test]
    fn empty_washroom_is_zero() {
        let washroom = Washroom::new("w1", "Empty").with_dimensions(10.0, 8.0, 9.0);
        let cost = cost_washroom(&washroom, &catalog(), &brands());
        assert_eq!(cost.total, 0.0);
        assert!(cost.service_costs.is_empty());
    }

    #[test]
    fn stale_ids_contribute_zero() {
        let washroom = Washroom::new("w1", "Stale")
            .with_dimensions(10.0, 8.0, 9.0)
            .with_service("gone")
            .with_brand("gone");
        let cost = cost_washroom(&washroom, &catalog(), &brands());
        assert_eq!(cost.service_costs["gone"], 0.0);
        assert_eq!(cost.total, 0.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let washroom = Washroom::new("w1", "Master")
            .with_dimensions(7.5, 5.0, 8.0)
            .with_service("tile")
            .with_brand("b1");
        let first = cost_washroom(&washroom, &catalog(), &brands());
        let second = cost_washroom(&washroom, &catalog(), &brands());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
