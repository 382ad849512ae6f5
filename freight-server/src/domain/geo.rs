//! Geographic coordinates and great-circle distance.

use ::geo::{HaversineDistance, Point};

/// `geo`'s internal IUGG mean Earth radius in metres (not exported by geo 0.28).
const MEAN_EARTH_RADIUS: f64 = 6371008.8;

/// Earth radius the cost model is calibrated against, in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Converts `geo`'s metre distances on its IUGG mean radius to kilometres
/// on [`EARTH_RADIUS_KM`]. Haversine distance is linear in the radius.
const RADIUS_SCALE: f64 = EARTH_RADIUS_KM / MEAN_EARTH_RADIUS;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle (haversine) distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        great_circle_km(self.lat, self.lng, other.lat, other.lng)
    }
}

impl From<GeoPoint> for Point {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lng, p.lat)
    }
}

/// Haversine distance between two coordinates in kilometres.
pub fn great_circle_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let a = Point::new(lng1, lat1);
    let b = Point::new(lng2, lat2);
    a.haversine_distance(&b) * RADIUS_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(13.08, 80.27);
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let d = great_circle_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn chennai_to_mumbai() {
        let chennai = GeoPoint::new(13.0827, 80.2707);
        let mumbai = GeoPoint::new(19.0760, 72.8777);
        let d = chennai.distance_km(&mumbai);
        assert!((1020.0..1040.0).contains(&d), "got {d}");
    }

    #[test]
    fn point_conversion_is_lng_lat() {
        let p: Point = GeoPoint::new(13.08, 80.27).into();
        assert_eq!(p.x(), 80.27);
        assert_eq!(p.y(), 13.08);
    }

    #[test]
    fn antipodes() {
        let d = great_circle_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
    }

    proptest! {
        #[test]
        fn symmetric(a in point(), b in point()) {
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-6);
        }

        #[test]
        fn bounded_by_half_circumference(a in point(), b in point()) {
            let d = a.distance_km(&b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
