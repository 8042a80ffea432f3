use crate::error::ParseError;
use crate::model::{
    AdHocCosts, Brand, BrandCatalog, MarginConfig, PersistedCostItems, PricingSettings,
    ServiceCatalog, ServiceItem, Washroom,
};
use crate::pricing::estimate::EstimateSelections;
use crate::pricing::project::ProjectCostOverrides;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the engine needs for one project, as supplied by the
/// surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default = "default_project_name")]
    pub name: String,
    #[serde(default)]
    pub washrooms: Vec<Washroom>,
    #[serde(default)]
    pub catalog: Vec<ServiceItem>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub cost_items: PersistedCostItems,
    #[serde(default)]
    pub margins: MarginConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PricingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<EstimateSelections>,
}

fn default_project_name() -> String {
    "Untitled Project".to_string()
}

impl ProjectInput {
    #[must_use]
    pub fn service_catalog(&self) -> ServiceCatalog {
        ServiceCatalog::new(self.catalog.clone())
    }

    #[must_use]
    pub fn brand_catalog(&self) -> BrandCatalog {
        BrandCatalog::new(self.brands.clone())
    }

    #[must_use]
    pub fn ad_hoc_costs(&self) -> AdHocCosts {
        AdHocCosts::from_persisted(&self.cost_items)
    }

    #[must_use]
    pub fn overrides(&self) -> ProjectCostOverrides {
        ProjectCostOverrides {
            product_cost: self.product_cost,
            logistics_cost: self.logistics_cost,
        }
    }

    /// Embedded settings, or the defaults.
    #[must_use]
    pub fn settings(&self) -> PricingSettings {
        self.settings.clone().unwrap_or_default()
    }
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ParseError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ParseError::InvalidDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a project input document.
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidDocument`] if it is not a valid project document.
///
/// # Example
///
/// ```no_run
/// use washroom_quote::parser::load_project_file;
///
/// let input = load_project_file("project.json")?;
/// println!("{}: {} washrooms", input.name, input.washrooms.len());
/// # Ok::<(), washroom_quote::error::ParseError>(())
/// ```
pub fn load_project_file<P: AsRef<Path>>(path: P) -> Result<ProjectInput, ParseError> {
    let input: ProjectInput = load_json(path)?;
    log::debug!(
        "loaded project '{}': {} washrooms, {} services, {} brands",
        input.name,
        input.washrooms.len(),
        input.catalog.len(),
        input.brands.len()
    );
    Ok(input)
}

/// Loads a standalone settings document.
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<PricingSettings, ParseError> {
    load_json(path)
}
