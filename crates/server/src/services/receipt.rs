//! Booking receipts: canned charge tables rendered into user-facing text

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use careline_core::{
    AmbulanceRequest, BookingConfirmation, HomeVisitRequest, PharmacyRequest, Professional, Region,
};

use crate::ai::prescription::PrescribedMedicine;
use crate::fleet::Ambulance;

// Demo tariffs, in INR
const AMBULANCE_BASE_RATE: u32 = 2000;
const AMBULANCE_MILEAGE: u32 = 50;
const AMBULANCE_OXYGEN: u32 = 500;
const PHARMACY_MEDICINES: u32 = 850;
const PHARMACY_DELIVERY: u32 = 50;
const PHARMACY_GST: u32 = 153;
const VISIT_SERVICE: u32 = 500;
const VISIT_CHECKUP: u32 = 300;

/// Render the ambulance dispatch confirmation.
pub fn ambulance(
    request: &AmbulanceRequest,
    region: Region,
    unit: &Ambulance,
    distance_km: f64,
    eta_minutes: u32,
) -> BookingConfirmation {
    let total = AMBULANCE_BASE_RATE + AMBULANCE_MILEAGE + AMBULANCE_OXYGEN;
    let booked_at = Utc::now();

    let message = format!(
        "Your ambulance has been booked, {name}.\n\
         Keep your phone ({phone}) nearby; the driver may call you shortly.\n\
         \n\
         Unit details:\n\
         - Unit: {unit_id}\n\
         - Patient capacity: {capacity}\n\
         - Destination hospital: {hospital}\n\
         - Estimated arrival: {eta_minutes} minutes ({distance_km:.1} km away)\n\
         \n\
         Payment summary ({region}, {date}):\n\
         - ALS base rate: INR {base}\n\
         - Mileage: INR {mileage}\n\
         - Oxygen administration: INR {oxygen}\n\
         Total: INR {total}",
        name = request.name,
        phone = request.phone,
        unit_id = unit.id,
        capacity = unit.capacity,
        hospital = unit.hospital,
        base = AMBULANCE_BASE_RATE,
        mileage = AMBULANCE_MILEAGE,
        oxygen = AMBULANCE_OXYGEN,
        date = booked_at.format("%Y-%m-%d"),
    );

    BookingConfirmation {
        booking_id: Uuid::new_v4(),
        service: "ambulance".to_string(),
        booked_at,
        message,
        details: json!({
            "city": region.to_string(),
            "unit_id": unit.id,
            "capacity": unit.capacity,
            "hospital": unit.hospital,
            "distance_km": (distance_km * 10.0).round() / 10.0,
            "eta_minutes": eta_minutes,
            "total_inr": total,
        }),
    }
}

/// Render the medicine delivery confirmation.
pub fn pharmacy(
    request: &PharmacyRequest,
    medicines: &[PrescribedMedicine],
) -> BookingConfirmation {
    let total = PHARMACY_MEDICINES + PHARMACY_DELIVERY + PHARMACY_GST;
    let booked_at = Utc::now();

    let mut medicine_lines = String::new();
    for medicine in medicines {
        medicine_lines.push_str(&format!(
            "- {}, {}, {}\n",
            medicine.name, medicine.dose, medicine.quantity
        ));
    }

    let message = format!(
        "{name}, your prescribed medicines have been ordered.\n\
         Keep your phone ({phone}) nearby; the order will reach you shortly.\n\
         Delivery address: {address}\n\
         \n\
         Prescribed medicines:\n\
         {medicine_lines}\
         \n\
         Payment summary ({date}):\n\
         - Medicine cost: INR {meds}\n\
         - Delivery: INR {delivery}\n\
         - GST: INR {gst}\n\
         Total: INR {total}\n\
         \n\
         Estimated delivery: 45-60 minutes",
        name = request.name,
        phone = request.phone,
        address = request.address,
        meds = PHARMACY_MEDICINES,
        delivery = PHARMACY_DELIVERY,
        gst = PHARMACY_GST,
        date = booked_at.format("%Y-%m-%d"),
    );

    BookingConfirmation {
        booking_id: Uuid::new_v4(),
        service: "pharmacy".to_string(),
        booked_at,
        message,
        details: json!({
            "medicines": medicines,
            "address": request.address,
            "total_inr": total,
        }),
    }
}

/// Render the home visit confirmation.
pub fn home_visit(
    request: &HomeVisitRequest,
    kind: Professional,
    assigned: &str,
) -> BookingConfirmation {
    let total = VISIT_SERVICE + VISIT_CHECKUP;
    let booked_at = Utc::now();

    let message = format!(
        "{name}, your appointment is confirmed.\n\
         The appointed {kind} will reach you at {address} shortly; \
         keep your phone ({phone}) nearby.\n\
         \n\
         Appointment details:\n\
         - {kind}: {assigned}\n\
         - Expected arrival: within 30 minutes\n\
         \n\
         Payment summary ({date}):\n\
         - Service cost: INR {service}\n\
         - Checkup: INR {checkup}\n\
         Total: INR {total}",
        name = request.name,
        phone = request.phone,
        address = request.address,
        service = VISIT_SERVICE,
        checkup = VISIT_CHECKUP,
        date = booked_at.format("%Y-%m-%d"),
    );

    BookingConfirmation {
        booking_id: Uuid::new_v4(),
        service: "home-visit".to_string(),
        booked_at,
        message,
        details: json!({
            "professional": kind,
            "assigned": assigned,
            "total_inr": total,
        }),
    }
}
