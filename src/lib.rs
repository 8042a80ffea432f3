//! # Washroom Quote
//!
//! Costing and quotation pricing for washroom renovation projects.
//!
//! ## Features
//!
//! - Derive floor, wall and ceiling areas from washroom dimensions
//! - Price services by unit kind (per square foot, per bathroom, flat) or by
//!   a custom arithmetic formula
//! - Aggregate washroom and project costs with ad hoc execution, vendor and
//!   additional items
//! - Layer margin, GST and the logistics charge into a quotation
//! - Export quotations to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use washroom_quote::parser::load_project_file;
//! use washroom_quote::pricing::{assemble_quotation, QuotationRequest};
//!
//! let input = load_project_file("project.json").expect("Failed to load");
//! let quotation = assemble_quotation(&QuotationRequest {
//!     project_name: &input.name,
//!     washrooms: &input.washrooms,
//!     catalog: &input.service_catalog(),
//!     brands: &input.brand_catalog(),
//!     ad_hoc: &input.ad_hoc_costs(),
//!     overrides: &input.overrides(),
//!     margins: &input.margins,
//!     settings: &input.settings(),
//! });
//! println!("Grand total: {:.2}", quotation.total_amount);
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod pricing;
