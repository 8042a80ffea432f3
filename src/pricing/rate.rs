use crate::error::FormulaError;
use crate::model::catalog::{ServiceCatalog, UnitKind};
use crate::parser::formula::Formula;
use crate::pricing::money::sanitize;

/// Rate and unit of a service as resolved from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate<'a> {
    pub service_id: &'a str,
    pub rate: f64,
    /// Lower-cased unit text.
    pub unit: String,
    pub kind: UnitKind,
    pub formula: Option<&'a Result<Formula, FormulaError>>,
}

impl<'a> ResolvedRate<'a> {
    /// Placeholder for ids the catalog does not know: rate 0, unit "".
    #[must_use]
    pub fn missing(service_id: &'a str) -> Self {
        Self {
            service_id,
            rate: 0.0,
            unit: String::new(),
            kind: UnitKind::Flat,
            formula: None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.unit.is_empty() && self.rate == 0.0 && self.formula.is_none()
    }
}

/// Looks up a service's rate and unit.
///
/// Unknown ids resolve to a zero rate with a warning; the UI can hold stale
/// ids, so this is never fatal.
#[must_use]
pub fn resolve_rate<'a>(catalog: &'a ServiceCatalog, service_id: &'a str) -> ResolvedRate<'a> {
    let Some(item) = catalog.get(service_id) else {
        log::warn!("service '{service_id}' not found in catalog; contributing zero");
        return ResolvedRate::missing(service_id);
    };

    let unit = item.unit.trim().to_lowercase();
    let kind = UnitKind::from_unit(&unit);
    ResolvedRate {
        service_id,
        rate: sanitize(item.rate),
        unit,
        kind,
        formula: catalog.formula(service_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::ServiceItem;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            ServiceItem::new("tile", "Floor tiling", "Tiling", " Per SqFt ", 50.0),
            ServiceItem::new("neg", "Bad rate", "Misc", "nos", -20.0),
        ])
    }

    #[test]
    fn resolves_rate_and_lowercases_unit() {
        let catalog = catalog();
        let resolved = resolve_rate(&catalog, "tile");
        assert_eq!(resolved.rate, 50.0);
        assert_eq!(resolved.unit, "per sqft");
        assert_eq!(resolved.kind, UnitKind::AreaRate);
        assert!(resolved.formula.is_none());
    }

    #[test]
    fn unknown_id_resolves_to_zero() {
        let catalog = catalog();
        let resolved = resolve_rate(&catalog, "ghost");
        assert_eq!(resolved, ResolvedRate::missing("ghost"));
        assert!(resolved.is_missing());
    }

    #[test]
    fn negative_rate_is_zero() {
        let catalog = catalog();
        assert_eq!(resolve_rate(&catalog, "neg").rate, 0.0);
    }
}
