//! careline-core: shared types for the Careline concierge service
//!
//! This crate provides the geo-proximity matcher used by ambulance
//! dispatch, plus the request and response payloads shared between
//! the server and the CLI.

pub mod booking;
pub mod error;
pub mod geo;
pub mod matcher;

// Re-export our types
pub use booking::{
    AmbulanceRequest, BookingConfirmation, ChatReply, ChatRequest, HomeVisitRequest,
    PharmacyRequest, Professional, Region, UnknownProfessional, UnsupportedRegion,
};
pub use error::{CoordinateError, MatchError};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, distance_km};
pub use matcher::{Match, Positioned, find_nearest};
