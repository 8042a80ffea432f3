use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_GST_RATE: f64 = 18.0;
pub const DEFAULT_CALCULATOR_MARGIN: f64 = 1.52;
pub const DEFAULT_LOGISTICS_RATE: f64 = 7.5;

/// Global pricing settings. All percentages are given as percent, not fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub gst_rate: f64,
    /// Margin used by the simple calculator path.
    pub default_margin: f64,
    /// Logistics / creative service charge on product cost.
    pub logistics_rate: f64,
    /// Whether brand product lines carry GST in detailed quotations.
    pub gst_on_brand_products: bool,
    /// Tiling material cost per square foot.
    pub tiling_material_cost: f64,
    /// Tiling labour cost per square foot.
    pub tiling_labor_cost: f64,
    /// Extra tile material ordered to cover breakage, in percent.
    pub breakage_percent: f64,
    /// Plumbing rate per square foot.
    pub plumbing_rate: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            gst_rate: DEFAULT_GST_RATE,
            default_margin: DEFAULT_CALCULATOR_MARGIN,
            logistics_rate: DEFAULT_LOGISTICS_RATE,
            gst_on_brand_products: false,
            tiling_material_cost: 0.0,
            tiling_labor_cost: 0.0,
            breakage_percent: 0.0,
            plumbing_rate: 0.0,
        }
    }
}

/// Per-washroom margins with a fallback for washrooms not listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerWashroomMargins {
    #[serde(default)]
    pub default: f64,
    #[serde(default)]
    pub washrooms: BTreeMap<String, f64>,
}

/// Margin percentage for detailed quotations.
///
/// Accepted shapes: a number (`10`), an object with `default` and
/// `washrooms` keys, or a bare washroom id → percent map (`{"w1": 12.5}`),
/// where unlisted washrooms get no margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarginConfig {
    Global(f64),
    PerWashroom(PerWashroomMargins),
    Washrooms(BTreeMap<String, f64>),
}

impl Default for MarginConfig {
    fn default() -> Self {
        MarginConfig::Global(0.0)
    }
}

impl MarginConfig {
    /// Margin percent for a washroom. Missing, negative and NaN values mean
    /// "not configured yet" and resolve to zero.
    #[must_use]
    pub fn margin_for(&self, washroom_id: &str) -> f64 {
        let pct = match self {
            MarginConfig::Global(pct) => *pct,
            MarginConfig::PerWashroom(margins) => margins
                .washrooms
                .get(washroom_id)
                .copied()
                .unwrap_or(margins.default),
            MarginConfig::Washrooms(washrooms) => {
                washrooms.get(washroom_id).copied().unwrap_or_default()
            }
        };
        crate::pricing::money::sanitize(pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_washroom_margin_falls_back_to_default() {
        let config = MarginConfig::PerWashroom(PerWashroomMargins {
            default: 5.0,
            washrooms: BTreeMap::from([("w1".to_string(), 12.0), ("w2".to_string(), -3.0)]),
        });
        assert_eq!(config.margin_for("w1"), 12.0);
        assert_eq!(config.margin_for("w2"), 0.0);
        assert_eq!(config.margin_for("w3"), 5.0);
    }

    #[test]
    fn margin_config_deserializes_number_or_map() {
        let global: MarginConfig = serde_json::from_str("10").unwrap();
        assert_eq!(global, MarginConfig::Global(10.0));

        let per: MarginConfig =
            serde_json::from_str(r#"{"default": 8, "washrooms": {"w1": 15}}"#).unwrap();
        assert_eq!(per.margin_for("w1"), 15.0);
        assert_eq!(per.margin_for("other"), 8.0);
    }

    #[test]
    fn bare_washroom_map_keeps_each_margin() {
        let config: MarginConfig = serde_json::from_str(r#"{"w1": 12.5, "w2": 10}"#).unwrap();
        assert_eq!(
            config,
            MarginConfig::Washrooms(BTreeMap::from([
                ("w1".to_string(), 12.5),
                ("w2".to_string(), 10.0)
            ]))
        );
        assert_eq!(config.margin_for("w1"), 12.5);
        assert_eq!(config.margin_for("w2"), 10.0);
        assert_eq!(config.margin_for("w3"), 0.0);
    }

    #[test]
    fn default_only_object_is_not_a_washroom_map() {
        let config: MarginConfig = serde_json::from_str(r#"{"default": 6}"#).unwrap();
        assert_eq!(config.margin_for("any"), 6.0);
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: PricingSettings = serde_json::from_str(r#"{"plumbing_rate": 40}"#).unwrap();
        assert_eq!(settings.gst_rate, 18.0);
        assert_eq!(settings.default_margin, 1.52);
        assert_eq!(settings.plumbing_rate, 40.0);
    }
}
