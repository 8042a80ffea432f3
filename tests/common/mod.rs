//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use washroom_quote::model::{Brand, BrandCatalog, BrandProduct, ServiceCatalog, ServiceItem, Washroom};

/// Path to a file under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// 10ft × 8ft × 9ft washroom: floor 80, wall 324
pub fn standard_washroom(id: &str) -> Washroom {
    Washroom::new(id, format!("Washroom {id}")).with_dimensions(10.0, 8.0, 9.0)
}

pub fn catalog() -> ServiceCatalog {
    ServiceCatalog::new(vec![
        ServiceItem::new("tile", "Tiling", "Tiling", "sqft", 50.0),
        ServiceItem::new("plumb", "Plumbing", "Plumbing", "bathroom", 5000.0),
        ServiceItem::new("point", "Electrical point", "Electrical", "nos", 650.0),
        ServiceItem::new("half", "Half floor", "Civil", "sqft", 100.0)
            .with_formula("$rate * $floor_area / 2"),
        ServiceItem::new("broken", "Broken formula", "Civil", "sqft", 100.0)
            .with_formula("$rate * * 2"),
    ])
}

pub fn brands() -> BrandCatalog {
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

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
