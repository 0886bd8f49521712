//! Request and response payloads shared between the server and the CLI.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Cities where ambulance dispatch currently operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Hyderabad,
    Bangalore,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Hyderabad, Region::Bangalore];

    /// Fixed pickup origin used as the caller location when matching
    /// units in this region.
    pub fn pickup_origin(&self) -> GeoPoint {
        match self {
            Region::Hyderabad => GeoPoint::new(17.4959, 78.3926),
            Region::Bangalore => GeoPoint::new(12.9716, 77.5946),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Hyderabad => write!(f, "Hyderabad"),
            Region::Bangalore => write!(f, "Bangalore"),
        }
    }
}

/// The requested city is outside the operating area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service is not available in {0}; currently operating in Hyderabad and Bangalore only")]
pub struct UnsupportedRegion(pub String);

impl FromStr for Region {
    type Err = UnsupportedRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hyderabad" => Ok(Region::Hyderabad),
            "bangalore" | "bengaluru" => Ok(Region::Bangalore),
            _ => Err(UnsupportedRegion(s.trim().to_string())),
        }
    }
}

/// Kind of professional a home visit can book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Professional {
    Doctor,
    Nurse,
    Caretaker,
}

impl fmt::Display for Professional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Professional::Doctor => write!(f, "doctor"),
            Professional::Nurse => write!(f, "nurse"),
            Professional::Caretaker => write!(f, "caretaker"),
        }
    }
}

/// The requested professional kind is not on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown professional kind {0:?}; available: doctor, nurse, caretaker")]
pub struct UnknownProfessional(pub String);

impl FromStr for Professional {
    type Err = UnknownProfessional;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(Professional::Doctor),
            "nurse" => Ok(Professional::Nurse),
            "caretaker" | "medical staff" | "clinical staff" => Ok(Professional::Caretaker),
            _ => Err(UnknownProfessional(s.trim().to_string())),
        }
    }
}

/// Request body for ambulance dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbulanceRequest {
    pub name: String,
    pub phone: String,
    pub city: String,
}

/// Request body for prescription delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacyRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub prescription_url: String,
}

/// Request body for a home visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeVisitRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub professional: String,
}

/// Receipt returned by every booking service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub service: String,
    pub booked_at: DateTime<Utc>,
    /// User-facing receipt text
    pub message: String,
    /// Structured, service-specific fields (unit id, medicine list, ...)
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    pub details: JsonValue,
}

/// Request body for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Omitted on the first turn; the server assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub message: String,
}

/// Response body for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: Uuid,
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parsing_is_case_insensitive() {
        assert_eq!("Hyderabad".parse::<Region>(), Ok(Region::Hyderabad));
        assert_eq!("HYDERABAD".parse::<Region>(), Ok(Region::Hyderabad));
        assert_eq!(" bangalore ".parse::<Region>(), Ok(Region::Bangalore));
        assert_eq!("Bengaluru".parse::<Region>(), Ok(Region::Bangalore));
    }

    #[test]
    fn unsupported_city_is_rejected() {
        let err = "Chennai".parse::<Region>().unwrap_err();
        assert_eq!(err, UnsupportedRegion("Chennai".to_string()));
        assert!(err.to_string().contains("Hyderabad and Bangalore"));
    }

    #[test]
    fn region_origins_are_valid_coordinates() {
        for region in Region::ALL {
            assert!(region.pickup_origin().validate().is_ok());
        }
    }

    #[test]
    fn professional_synonyms_map_to_caretaker() {
        assert_eq!("doctor".parse::<Professional>(), Ok(Professional::Doctor));
        assert_eq!("Nurse".parse::<Professional>(), Ok(Professional::Nurse));
        assert_eq!(
            "medical staff".parse::<Professional>(),
            Ok(Professional::Caretaker)
        );
        assert_eq!(
            "clinical staff".parse::<Professional>(),
            Ok(Professional::Caretaker)
        );
        assert!("astronaut".parse::<Professional>().is_err());
    }

    #[test]
    fn chat_request_round_trips_without_session_id() {
        let json = r#"{"message":"i need an ambulance"}"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert!(req.session_id.is_none());
        let back = serde_json::to_string(&req).unwrap();
        assert!(!back.contains("session_id"));
    }
}
