//! Prescription medicine delivery

use careline_core::{BookingConfirmation, PharmacyRequest};

use super::receipt;
use crate::ai::{ClaudeClient, prescription};
use crate::error::AppError;

/// Order the medicines on a prescription image for home delivery.
pub async fn order(
    client: &ClaudeClient,
    request: &PharmacyRequest,
) -> Result<BookingConfirmation, AppError> {
    let medicines = prescription::read_prescription(client, &request.prescription_url)
        .await
        .map_err(|e| AppError::Internal(format!("prescription analysis failed: {e}")))?;

    if medicines.is_empty() {
        return Err(AppError::BadRequest(
            "no medicines could be read from the prescription image".to_string(),
        ));
    }

    tracing::info!(count = medicines.len(), "Prescription read");

    Ok(receipt::pharmacy(request, &medicines))
}
