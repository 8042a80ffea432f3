use crate::pricing::money::sanitize;
use serde::{Deserialize, Serialize};

/// Surface areas of a washroom in square feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Areas {
    pub floor: f64,
    pub wall: f64,
    pub ceiling: f64,
}

impl Areas {
    /// Floor plus wall area, the base for area-rated services.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.floor + self.wall
    }

    #[must_use]
    pub fn total_with_ceiling(&self) -> f64 {
        self.floor + self.wall + self.ceiling
    }
}

/// Derives areas from dimensions in feet.
///
/// Floor = length × width, wall = 2 × height × (length + width), ceiling =
/// floor. A manual override replaces the derived wall or ceiling value.
/// Negative or non-finite inputs count as zero.
#[must_use]
pub fn compute_areas(
    length: f64,
    width: f64,
    height: f64,
    wall_override: Option<f64>,
    ceiling_override: Option<f64>,
) -> Areas {
    let (length, width, height) = (sanitize(length), sanitize(width), sanitize(height));
    let floor = length * width;
    let wall = wall_override.map_or(2.0 * height * (length + width), sanitize);
    let ceiling = ceiling_override.map_or(floor, sanitize);
    Areas {
        floor,
        wall,
        ceiling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_areas_from_dimensions() {
        let areas = compute_areas(10.0, 8.0, 9.0, None, None);
        assert_eq!(areas.floor, 80.0);
        assert_eq!(areas.wall, 324.0);
        assert_eq!(areas.ceiling, 80.0);
        assert_eq!(areas.total(), 404.0);
        assert_eq!(areas.total_with_ceiling(), 484.0);
    }

    #[test]
    fn overrides_replace_derived_values() {
        let areas = compute_areas(10.0, 8.0, 9.0, Some(300.0), Some(75.0));
        assert_eq!(areas.wall, 300.0);
        assert_eq!(areas.ceiling, 75.0);
    }

    #[test]
    fn zero_dimension_gives_zero_area() {
        let areas = compute_areas(0.0, 8.0, 9.0, None, None);
        assert_eq!(areas.floor, 0.0);
        assert_eq!(areas.wall, 144.0);

        let flat = compute_areas(10.0, 8.0, 0.0, None, None);
        assert_eq!(flat.wall, 0.0);
    }

    #[test]
    fn negative_dimensions_count_as_zero() {
        let areas = compute_areas(-10.0, 8.0, f64::NAN, None, Some(-5.0));
        assert_eq!(areas, Areas::default());
    }
}
