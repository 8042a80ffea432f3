use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Execution,
    Vendor,
    Additional,
}

impl CostCategory {
    pub const ALL: [CostCategory; 3] = [
        CostCategory::Execution,
        CostCategory::Vendor,
        CostCategory::Additional,
    ];

    /// Category heading used on quotation lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Execution => "Execution work",
            CostCategory::Vendor => "Vendor items",
            CostCategory::Additional => "Additional costs",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostCategory::Execution => write!(f, "execution"),
            CostCategory::Vendor => write!(f, "vendor"),
            CostCategory::Additional => write!(f, "additional"),
        }
    }
}

/// An ad hoc project-level cost entered during an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub category: CostCategory,
}

/// Stored form of a cost item: the id is the map key, the category is the
/// map the record lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItemRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
}

/// Keyed-map shape handed to the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedCostItems {
    #[serde(default)]
    pub execution: BTreeMap<String, CostItemRecord>,
    #[serde(default)]
    pub vendor: BTreeMap<String, CostItemRecord>,
    #[serde(default)]
    pub additional: BTreeMap<String, CostItemRecord>,
}

impl PersistedCostItems {
    fn map_for(&self, category: CostCategory) -> &BTreeMap<String, CostItemRecord> {
        match category {
            CostCategory::Execution => &self.execution,
            CostCategory::Vendor => &self.vendor,
            CostCategory::Additional => &self.additional,
        }
    }

    fn map_for_mut(&mut self, category: CostCategory) -> &mut BTreeMap<String, CostItemRecord> {
        match category {
            CostCategory::Execution => &mut self.execution,
            CostCategory::Vendor => &mut self.vendor,
            CostCategory::Additional => &mut self.additional,
        }
    }
}

/// Ad hoc cost items of a project, held in entry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdHocCosts {
    items: Vec<CostItem>,
}

impl AdHocCosts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any existing item with the same id.
    pub fn add(&mut self, item: CostItem) {
        self.remove(&item.id);
        self.items.push(item);
    }

    /// Removes an item by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<CostItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    #[must_use]
    pub fn items(&self) -> &[CostItem] {
        &self.items
    }

    pub fn in_category(&self, category: CostCategory) -> impl Iterator<Item = &CostItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Sum of amounts in a category. Negative and non-finite amounts count as zero.
    #[must_use]
    pub fn total_for(&self, category: CostCategory) -> f64 {
        self.in_category(category)
            .map(|i| crate::pricing::money::sanitize(i.amount))
            .sum()
    }

    #[must_use]
    pub fn to_persisted(&self) -> PersistedCostItems {
        let mut persisted = PersistedCostItems::default();
        for item in &self.items {
            persisted.map_for_mut(item.category).insert(
                item.id.clone(),
                CostItemRecord {
                    name: item.name.clone(),
                    description: item.description.clone(),
                    amount: item.amount,
                },
            );
        }
        persisted
    }

    #[must_use]
    pub fn from_persisted(persisted: &PersistedCostItems) -> Self {
        let mut costs = Self::new();
        for category in CostCategory::ALL {
            for (id, record) in persisted.map_for(category) {
                costs.items.push(CostItem {
                    id: id.clone(),
                    name: record.name.clone(),
                    description: record.description.clone(),
                    amount: record.amount,
                    category,
                });
            }
        }
        costs
    }
}
