pub mod catalog;
pub mod cost_item;
pub mod quotation;
pub mod settings;
pub mod washroom;

pub use catalog::{Brand, BrandCatalog, BrandProduct, ServiceCatalog, ServiceItem, UnitKind};
pub use cost_item::{AdHocCosts, CostCategory, CostItem, CostItemRecord, PersistedCostItems};
pub use quotation::{
    CategoryBreakdown, LinePricing, PricedLine, ProjectPricingSummary, Quotation,
    QuotationLineItem, QuotationPricing, QuotationSummary, WashroomLineItems, WashroomPricing,
    WashroomQuotation,
};
pub use settings::{MarginConfig, PerWashroomMargins, PricingSettings};
pub use washroom::Washroom;
