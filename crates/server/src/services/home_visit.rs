//! Home visits by a doctor, nurse, or caretaker

use careline_core::{BookingConfirmation, HomeVisitRequest, Professional};

use super::receipt;
use crate::error::AppError;

/// Book a professional from the roster for a home visit.
pub fn book(request: &HomeVisitRequest) -> Result<BookingConfirmation, AppError> {
    let kind: Professional = request
        .professional
        .parse()
        .map_err(|e: careline_core::UnknownProfessional| AppError::BadRequest(e.to_string()))?;

    let assigned = roster_name(kind);
    tracing::info!(professional = %kind, assigned = assigned, "Home visit booked");

    Ok(receipt::home_visit(request, kind, assigned))
}

/// Demo roster; one name per professional kind.
fn roster_name(kind: Professional) -> &'static str {
    match kind {
        Professional::Doctor => "Dr. Arun Nayak, MBBS",
        Professional::Nurse => "Nurse Mary Jane",
        Professional::Caretaker => "Ashok Chouhan",
    }
}
