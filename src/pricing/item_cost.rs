use crate::model::catalog::UnitKind;
use crate::model::washroom::Washroom;
use crate::parser::formula::FormulaVars;
use crate::pricing::area::Areas;
use crate::pricing::money::{guard, sanitize};
use crate::pricing::rate::ResolvedRate;

/// Washroom measurements a line-item cost can depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostContext {
    pub areas: Areas,
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl CostContext {
    #[must_use]
    pub fn for_washroom(washroom: &Washroom) -> Self {
        Self {
            areas: washroom.areas(),
            length: sanitize(washroom.length),
            width: sanitize(washroom.width),
            height: sanitize(washroom.height),
        }
    }

    #[must_use]
    pub fn bindings(&self, rate: f64) -> FormulaVars {
        FormulaVars {
            floor_area: self.areas.floor,
            wall_area: self.areas.wall,
            length: self.length,
            width: self.width,
            height: self.height,
            rate,
        }
    }
}

/// Cost by unit kind alone.
#[must_use]
pub fn standard_cost(rate: f64, kind: UnitKind, areas: &Areas) -> f64 {
    match kind {
        UnitKind::AreaRate => rate * areas.total(),
        UnitKind::PerBathroom | UnitKind::Flat => rate,
    }
}

/// Cost of one selected service in one washroom.
///
/// A custom formula takes precedence. If it failed to compile or evaluates
/// to a non-finite value the standard unit-kind rule applies instead and the
/// failure is logged.
#[must_use]
pub fn evaluate_item_cost(resolved: &ResolvedRate<'_>, ctx: &CostContext) -> f64 {
    if let Some(compiled) = resolved.formula {
        let outcome = match compiled {
            Ok(formula) => formula.evaluate(&ctx.bindings(resolved.rate)),
            Err(err) => Err(err.clone()),
        };
        match outcome {
            Ok(cost) => return guard(resolved.service_id, cost),
            Err(err) => log::warn!(
                "custom formula for service '{}' failed: {err}; using {} rule",
                resolved.service_id,
                resolved.kind
            ),
        }
    }

    guard(
        resolved.service_id,
        standard_cost(resolved.rate, resolved.kind, &ctx.areas),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{ServiceCatalog, ServiceItem};
    use crate::pricing::rate::resolve_rate;

    fn ctx() -> CostContext {
        CostContext::for_washroom(&Washroom::new("w1", "Master").with_dimensions(10.0, 8.0, 9.0))
    }

    fn cost_of(item: ServiceItem) -> f64 {
        let id = item.id.clone();
        let catalog = ServiceCatalog::new(vec![item]);
        evaluate_item_cost(&resolve_rate(&catalog, &id), &ctx())
    }

    #[test]
    fn area_rate_uses_floor_plus_wall() {
        let cost = cost_of(ServiceItem::new("s", "Tiling", "Tiling", "sqft", 50.0));
        assert_eq!(cost, 20_200.0);
    }

    #[test]
    fn bathroom_and_unknown_units_are_flat() {
        assert_eq!(
            cost_of(ServiceItem::new("s", "Plumbing", "Plumbing", "per bathroom", 5000.0)),
            5000.0
        );
        assert_eq!(
            cost_of(ServiceItem::new("s", "Exhaust", "Electrical", "nos", 1200.0)),
            1200.0
        );
    }

    #[test]
    fn custom_formula_overrides_unit_rule() {
        let item = ServiceItem::new("s", "Half floor", "Tiling", "sqft", 100.0)
            .with_formula("$rate * $floor_area / 2");
        assert_eq!(cost_of(item), 4000.0);
    }

    #[test]
    fn malformed_formula_falls_back() {
        let item = ServiceItem::new("s", "Broken", "Tiling", "sqft", 50.0)
            .with_formula("$rate * (");
        assert_eq!(cost_of(item), 20_200.0);
    }

    #[test]
    fn non_finite_formula_falls_back() {
        let item = ServiceItem::new("s", "Div zero", "Misc", "bathroom", 700.0)
            .with_formula("$rate / ($length - 10)");
        assert_eq!(cost_of(item), 700.0);
    }

    #[test]
    fn pathologically_nested_formula_falls_back() {
        let formula = format!("{}$rate{}", "(".repeat(200_000), ")".repeat(200_000));
        let item = ServiceItem::new("s", "Nested", "Tiling", "sqft", 50.0).with_formula(formula);
        assert_eq!(cost_of(item), 20_200.0);
    }

    #[test]
    fn negative_formula_result_is_clamped() {
        let item = ServiceItem::new("s", "Credit", "Misc", "nos", 100.0).with_formula("0 - $rate");
        assert_eq!(cost_of(item), 0.0);
    }

    #[test]
    fn missing_service_costs_nothing() {
        let catalog = ServiceCatalog::default();
        assert_eq!(evaluate_item_cost(&resolve_rate(&catalog, "x"), &ctx()), 0.0);
    }
}
