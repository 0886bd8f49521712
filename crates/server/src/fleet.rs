//! Fleet directory: candidate ambulance units per operating region.
//!
//! Units come from the fleet backend when one is configured; otherwise a
//! built-in demo fleet keeps the whole system usable offline.

use serde::Deserialize;

use careline_core::{GeoPoint, Positioned, Region};

use crate::error::AppError;

/// An ambulance unit eligible for dispatch.
#[derive(Debug, Clone)]
pub struct Ambulance {
    pub id: String,
    pub location: GeoPoint,
    /// Patient capacity
    pub capacity: u32,
    /// Destination hospital this unit is affiliated with
    pub hospital: String,
}

impl Positioned for Ambulance {
    fn position(&self) -> GeoPoint {
        self.location
    }
}

/// Wire format of a unit as returned by the fleet backend
#[derive(Debug, Deserialize)]
struct UnitRecord {
    id: String,
    #[serde(default)]
    gps: Option<GpsRecord>,
    capacity: u32,
    hospital: String,
}

#[derive(Debug, Deserialize)]
struct GpsRecord {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Response envelope of the fleet backend's unit listing
#[derive(Debug, Deserialize)]
struct FleetResponse {
    data: Vec<UnitRecord>,
}

impl UnitRecord {
    /// Validate the wire record into a dispatchable unit.
    ///
    /// A missing or out-of-range GPS fix fails the lookup instead of
    /// flowing into the matcher as NaN.
    fn into_ambulance(self) -> Result<Ambulance, AppError> {
        let Some(gps) = self.gps else {
            return Err(AppError::Upstream(format!(
                "fleet unit {} has no GPS fix",
                self.id
            )));
        };
        let (Some(lat), Some(lng)) = (gps.lat, gps.lng) else {
            return Err(AppError::Upstream(format!(
                "fleet unit {} has an incomplete GPS fix",
                self.id
            )));
        };

        let location = GeoPoint::new(lat, lng);
        location
            .validate()
            .map_err(|e| AppError::Upstream(format!("fleet unit {}: {e}", self.id)))?;

        Ok(Ambulance {
            id: self.id,
            location,
            capacity: self.capacity,
            hospital: self.hospital,
        })
    }
}

/// Directory of available units for a region.
#[derive(Clone)]
pub struct FleetDirectory {
    backend_url: Option<String>,
    http: reqwest::Client,
}

impl FleetDirectory {
    pub fn new(backend_url: Option<String>) -> Self {
        Self {
            backend_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend_url.is_some()
    }

    /// Fetch the units currently available in `region`.
    pub async fn available_units(&self, region: Region) -> Result<Vec<Ambulance>, AppError> {
        let Some(base) = &self.backend_url else {
            return Ok(demo_fleet(region));
        };

        let response = self
            .http
            .post(format!("{base}/city-units"))
            .json(&serde_json::json!({ "city": region.to_string() }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "fleet backend returned {}",
                response.status()
            )));
        }

        let body: FleetResponse = response.json().await?;
        body.data
            .into_iter()
            .map(UnitRecord::into_ambulance)
            .collect()
    }
}

/// Built-in units served when no fleet backend is configured.
fn demo_fleet(region: Region) -> Vec<Ambulance> {
    fn unit(id: &str, lat: f64, lon: f64, capacity: u32, hospital: &str) -> Ambulance {
        Ambulance {
            id: id.to_string(),
            location: GeoPoint::new(lat, lon),
            capacity,
            hospital: hospital.to_string(),
        }
    }

    match region {
        Region::Hyderabad => vec![
            unit("HYD-204", 17.4486, 78.3908, 2, "Apollo Hospital, Jubilee Hills"),
            unit("HYD-117", 17.5012, 78.3999, 1, "KIMS Hospital, Kondapur"),
            unit("HYD-331", 17.3850, 78.4867, 4, "Osmania General Hospital"),
        ],
        Region::Bangalore => vec![
            unit("BLR-076", 12.9592, 77.6974, 2, "Manipal Hospital, Old Airport Road"),
            unit("BLR-142", 12.9279, 77.6271, 2, "Fortis Hospital, Bannerghatta Road"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fleet_units_have_valid_coordinates() {
        for region in Region::ALL {
            for unit in demo_fleet(region) {
                assert!(unit.location.validate().is_ok(), "unit {}", unit.id);
            }
        }
    }

    #[test]
    fn wire_record_with_full_fix_converts() {
        let record: UnitRecord = serde_json::from_str(
            r#"{"id":"HYD-9","gps":{"lat":17.4,"lng":78.4},"capacity":2,"hospital":"Apollo"}"#,
        )
        .unwrap();
        let unit = record.into_ambulance().unwrap();
        assert_eq!(unit.id, "HYD-9");
        assert_eq!(unit.capacity, 2);
    }

    #[test]
    fn wire_record_without_gps_is_rejected() {
        let record: UnitRecord =
            serde_json::from_str(r#"{"id":"HYD-9","capacity":2,"hospital":"Apollo"}"#).unwrap();
        let err = record.into_ambulance().unwrap_err();
        assert!(err.to_string().contains("no GPS fix"));
    }

    #[test]
    fn wire_record_with_partial_gps_is_rejected() {
        let record: UnitRecord = serde_json::from_str(
            r#"{"id":"HYD-9","gps":{"lat":17.4,"lng":null},"capacity":2,"hospital":"Apollo"}"#,
        )
        .unwrap();
        let err = record.into_ambulance().unwrap_err();
        assert!(err.to_string().contains("incomplete GPS fix"));
    }

    #[test]
    fn wire_record_with_out_of_range_fix_is_rejected() {
        let record: UnitRecord = serde_json::from_str(
            r#"{"id":"HYD-9","gps":{"lat":99.0,"lng":78.4},"capacity":2,"hospital":"Apollo"}"#,
        )
        .unwrap();
        let err = record.into_ambulance().unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[tokio::test]
    async fn directory_without_backend_serves_demo_fleet() {
        let directory = FleetDirectory::new(None);
        assert!(!directory.has_backend());
        let units = directory.available_units(Region::Hyderabad).await.unwrap();
        assert_eq!(units.len(), 3);
    }
}
