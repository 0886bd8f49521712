//! Service catalog endpoint

use axum::Json;
use serde::Serialize;

/// One bookable service exposed by this server
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub endpoint: &'static str,
    pub required_fields: &'static [&'static str],
}

/// The full service catalog
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub services: Vec<ServiceDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            services: vec![
                ServiceDescriptor {
                    id: "ambulance",
                    name: "Ambulance dispatch",
                    description: "Dispatches the nearest available ambulance. \
                                  Operating in Hyderabad and Bangalore only.",
                    endpoint: "/services/ambulance",
                    required_fields: &["name", "phone", "city"],
                },
                ServiceDescriptor {
                    id: "pharmacy",
                    name: "Medicine delivery",
                    description: "Reads a prescription image and orders the medicines \
                                  for home delivery.",
                    endpoint: "/services/pharmacy",
                    required_fields: &["name", "phone", "address", "prescription_url"],
                },
                ServiceDescriptor {
                    id: "home-visit",
                    name: "Home visit",
                    description: "Books a doctor, nurse, or caretaker to visit the \
                                  patient at home.",
                    endpoint: "/services/home-visit",
                    required_fields: &["name", "phone", "address", "professional"],
                },
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// GET /services - List the bookable services
pub async fn get() -> Json<Catalog> {
    Json(Catalog::new())
}
