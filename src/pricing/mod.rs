//! The costing and quotation-pricing engine.
//!
//! Every entry point is a pure function over its inputs. Callers decide when
//! to recompute; nothing is cached between calls.

pub mod area;
pub mod estimate;
pub mod item_cost;
pub mod margin;
pub mod money;
pub mod project;
pub mod quotation;
pub mod rate;
pub mod washroom;

pub use area::{compute_areas, Areas};
pub use estimate::{calculate_estimate, Estimate, EstimateSelections, FixtureSelection, TilingCost};
pub use item_cost::{evaluate_item_cost, standard_cost, CostContext};
pub use margin::{generate_quotation_pricing, price_line, price_simple, price_washroom, SimplePricing};
pub use project::{
    aggregate_project, calculate_project_costs, CostSummary, ProjectCostOverrides, ProjectCosts,
    ProjectSubtotals,
};
pub use quotation::{
    assemble_quotation, build_line_items, build_project_line_items, QuotationRequest,
    PROJECT_SCOPE_ID,
};
pub use rate::{resolve_rate, ResolvedRate};
pub use washroom::{cost_washroom, WashroomCost};
