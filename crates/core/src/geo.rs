//! Geographic primitives: coordinate pairs and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both coordinates are finite and within valid ranges.
    ///
    /// [`distance_km`] itself does not validate; callers that accept
    /// coordinates from outside (wire data, user input) go through this
    /// before matching.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError::Latitude(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(CoordinateError::Longitude(self.lon));
        }
        Ok(())
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]:
/// `2 * R * asin(sqrt(h))`. Pure and deterministic; out-of-range inputs
/// still produce a number.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_dlon * sin_dlon;
    // sqrt(h) can drift past 1.0 by a few ULPs for near-antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYDERABAD: GeoPoint = GeoPoint {
        lat: 17.4959,
        lon: 78.3926,
    };
    const BANGALORE: GeoPoint = GeoPoint {
        lat: 12.97,
        lon: 77.59,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(HYDERABAD, HYDERABAD), 0.0);
        assert_eq!(distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let d_ab = distance_km(HYDERABAD, BANGALORE);
        let d_ba = distance_km(BANGALORE, HYDERABAD);
        assert_eq!(d_ab, d_ba);
    }

    #[test]
    fn one_degree_of_longitude_at_equator_is_about_111_km() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn hyderabad_to_bangalore_is_hundreds_of_km() {
        let d = distance_km(HYDERABAD, BANGALORE);
        assert!(d > 400.0 && d < 600.0, "got {d}");
    }

    #[test]
    fn distance_grows_with_offset() {
        let origin = GeoPoint::new(17.0, 78.0);
        let near = distance_km(origin, GeoPoint::new(17.01, 78.01));
        let far = distance_km(origin, GeoPoint::new(17.05, 78.05));
        assert!(near < far);
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!(d.is_finite());
        // Half the Earth's circumference
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0, "got {d}");
    }

    #[test]
    fn validate_accepts_range_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).validate().is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).validate().is_ok());
        assert!(GeoPoint::new(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0).validate(),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5).validate(),
            Err(CoordinateError::Longitude(-180.5))
        );
    }

    #[test]
    fn validate_rejects_nan_coordinates() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0).validate(),
            Err(CoordinateError::Latitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::NAN).validate(),
            Err(CoordinateError::Longitude(_))
        ));
    }
}
