//! Ambulance dispatch: region check, fleet lookup, nearest-unit match

use careline_core::{
    AmbulanceRequest, BookingConfirmation, Match, MatchError, Region, find_nearest,
};

use super::receipt;
use crate::error::AppError;
use crate::fleet::{Ambulance, FleetDirectory};

/// Average urban speed used to estimate arrival from the match distance
const AVERAGE_SPEED_KMH: f64 = 40.0;

/// Dispatch the nearest available unit to the caller.
pub async fn dispatch(
    fleet: &FleetDirectory,
    request: &AmbulanceRequest,
) -> Result<BookingConfirmation, AppError> {
    let region: Region = request
        .city
        .parse()
        .map_err(|e: careline_core::UnsupportedRegion| AppError::BadRequest(e.to_string()))?;

    let units = fleet.available_units(region).await?;
    let matched = select_unit(region, &units)?;

    let eta_minutes = eta_minutes(matched.distance_km);
    tracing::info!(
        unit = %matched.candidate.id,
        distance_km = matched.distance_km,
        eta_minutes = eta_minutes,
        "Ambulance matched"
    );

    Ok(receipt::ambulance(
        request,
        region,
        matched.candidate,
        matched.distance_km,
        eta_minutes,
    ))
}

/// Match the nearest unit to the region's pickup origin.
///
/// An empty unit list maps to a user-facing "none available" outcome;
/// malformed fleet data is an upstream failure.
fn select_unit(region: Region, units: &[Ambulance]) -> Result<Match<'_, Ambulance>, AppError> {
    match find_nearest(region.pickup_origin(), units) {
        Ok(matched) => Ok(matched),
        Err(MatchError::NoCandidates) => Err(AppError::ServiceUnavailable(format!(
            "no ambulances are available in {region} right now; \
             please call the 108 emergency line"
        ))),
        Err(err) => Err(err.into()),
    }
}

fn eta_minutes(distance_km: f64) -> u32 {
    ((distance_km / AVERAGE_SPEED_KMH) * 60.0).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_picks_the_unit_nearest_the_pickup_origin() {
        let fleet = FleetDirectory::new(None);
        let request = AmbulanceRequest {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            city: "Hyderabad".to_string(),
        };

        let confirmation = dispatch(&fleet, &request).await.unwrap();
        assert_eq!(confirmation.details["unit_id"], "HYD-117");
        assert_eq!(confirmation.details["hospital"], "KIMS Hospital, Kondapur");
        assert!(confirmation.message.contains("HYD-117"));
    }

    #[tokio::test]
    async fn dispatch_rejects_cities_outside_the_operating_area() {
        let fleet = FleetDirectory::new(None);
        let request = AmbulanceRequest {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            city: "Chennai".to_string(),
        };

        let err = dispatch(&fleet, &request).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.to_string().contains("Hyderabad and Bangalore"));
    }

    #[test]
    fn no_available_units_maps_to_a_none_available_reply() {
        let err = select_unit(Region::Hyderabad, &[]).unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
        assert!(err.to_string().contains("no ambulances are available"));
    }

    #[test]
    fn malformed_unit_coordinates_are_an_upstream_failure() {
        let units = [Ambulance {
            id: "HYD-9".to_string(),
            location: careline_core::GeoPoint::new(f64::NAN, 78.4),
            capacity: 2,
            hospital: "Apollo".to_string(),
        }];
        let err = select_unit(Region::Hyderabad, &units).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn eta_rounds_up_and_never_reports_zero() {
        assert_eq!(eta_minutes(0.0), 1);
        assert_eq!(eta_minutes(1.0), 2); // 1 km at 40 km/h = 1.5 min
        assert_eq!(eta_minutes(20.0), 30);
    }
}
