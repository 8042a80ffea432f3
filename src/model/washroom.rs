use crate::model::catalog::ServiceCatalog;
use crate::pricing::area::{compute_areas, Areas};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bathroom unit within a project. Dimensions are in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Washroom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Manually entered wall area; dropped when dimensions change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_area: Option<f64>,
    /// Manually entered ceiling area; dropped when dimensions change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling_area: Option<f64>,
    /// Service id → selected flag.
    #[serde(default)]
    pub services: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    /// Category → names of selected services, for display only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub service_details: BTreeMap<String, Vec<String>>,
}

impl Washroom {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length: 0.0,
            width: 0.0,
            height: 0.0,
            wall_area: None,
            ceiling_area: None,
            services: BTreeMap::new(),
            brand_id: None,
            service_details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.set_dimensions(length, width, height);
        self
    }

    #[must_use]
    pub fn with_service(mut self, service_id: impl Into<String>) -> Self {
        self.select_service(service_id, true);
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    /// Updates dimensions. Any manual wall or ceiling area is discarded so
    /// the derived values take over again.
    pub fn set_dimensions(&mut self, length: f64, width: f64, height: f64) {
        self.length = length;
        self.width = width;
        self.height = height;
        self.wall_area = None;
        self.ceiling_area = None;
    }

    pub fn set_wall_area(&mut self, area: f64) {
        self.wall_area = Some(area);
    }

    pub fn set_ceiling_area(&mut self, area: f64) {
        self.ceiling_area = Some(area);
    }

    pub fn select_service(&mut self, service_id: impl Into<String>, selected: bool) {
        self.services.insert(service_id.into(), selected);
    }

    /// Ids of services currently marked selected, in id order.
    pub fn selected_services(&self) -> impl Iterator<Item = &str> {
        self.services
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn areas(&self) -> Areas {
        compute_areas(
            self.length,
            self.width,
            self.height,
            self.wall_area,
            self.ceiling_area,
        )
    }

    /// Rebuilds the category → service-name display map from the catalog.
    /// Selected ids missing from the catalog are skipped.
    pub fn refresh_service_details(&mut self, catalog: &ServiceCatalog) {
        let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for id in self.selected_services() {
            if let Some(item) = catalog.get(id) {
                details
                    .entry(item.category.clone())
                    .or_default()
                    .push(item.name.clone());
            }
        }
        self.service_details = details;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::ServiceItem;

    #[test]
    fn manual_areas_survive_until_dimensions_change() {
        let mut washroom = Washroom::new("w1", "Master").with_dimensions(10.0, 8.0, 9.0);
        washroom.set_wall_area(200.0);
        washroom.set_ceiling_area(50.0);
        assert_eq!(washroom.areas().wall, 200.0);
        assert_eq!(washroom.areas().ceiling, 50.0);

        washroom.set_dimensions(10.0, 8.0, 10.0);
        assert_eq!(washroom.wall_area, None);
        assert_eq!(washroom.ceiling_area, None);
        assert_eq!(washroom.areas().wall, 360.0);
        assert_eq!(washroom.areas().ceiling, 80.0);
    }

    #[test]
    fn selected_services_skips_deselected() {
        let mut washroom = Washroom::new("w1", "Guest")
            .with_service("s1")
            .with_service("s2");
        washroom.select_service("s1", false);
        let selected: Vec<&str> = washroom.selected_services().collect();
        assert_eq!(selected, vec!["s2"]);
    }

    #[test]
    fn service_details_group_by_category() {
        let catalog = ServiceCatalog::new(vec![
            ServiceItem::new("s1", "Floor tiling", "Tiling", "sqft", 50.0),
            ServiceItem::new("s2", "Wall tiling", "Tiling", "sqft", 60.0),
            ServiceItem::new("s3", "Concealed plumbing", "Plumbing", "bathroom", 5000.0),
        ]);
        let mut washroom = Washroom::new("w1", "Master")
            .with_service("s1")
            .with_service("s2")
            .with_service("s3")
            .with_service("missing");
        washroom.refresh_service_details(&catalog);

        assert_eq!(
            washroom.service_details.get("Tiling"),
            Some(&vec!["Floor tiling".to_string(), "Wall tiling".to_string()])
        );
        assert_eq!(washroom.service_details.len(), 2);
    }
}
