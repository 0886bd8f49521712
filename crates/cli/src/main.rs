//! careline: command-line client for the Careline concierge server.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use uuid::Uuid;

use careline_core::{
    AmbulanceRequest, BookingConfirmation, ChatReply, ChatRequest, HomeVisitRequest,
    PharmacyRequest,
};

#[derive(Parser)]
#[command(name = "careline")]
#[command(about = "Careline healthcare concierge CLI")]
struct Cli {
    /// Server base URL
    #[arg(long, env = "CARELINE_URL", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the concierge assistant
    Chat,
    /// List the bookable services
    Services,
    /// Dispatch the nearest available ambulance
    Ambulance {
        /// Patient name
        name: String,
        /// Contact number
        phone: String,
        /// City (Hyderabad or Bangalore)
        city: String,
    },
    /// Order medicines from a prescription image
    Pharmacy {
        /// Patient name
        name: String,
        /// Contact number
        phone: String,
        /// Delivery address
        address: String,
        /// URL of the prescription image
        prescription_url: String,
    },
    /// Book a home visit
    HomeVisit {
        /// Patient name
        name: String,
        /// Contact number
        phone: String,
        /// Visit address
        address: String,
        /// doctor, nurse, or caretaker
        #[arg(long, default_value = "doctor")]
        professional: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let http = reqwest::Client::new();

    match cli.command {
        Commands::Chat => chat_loop(&http, &cli.server).await?,
        Commands::Services => list_services(&http, &cli.server).await?,
        Commands::Ambulance { name, phone, city } => {
            let request = AmbulanceRequest { name, phone, city };
            book(&http, &cli.server, "services/ambulance", &request).await?;
        }
        Commands::Pharmacy {
            name,
            phone,
            address,
            prescription_url,
        } => {
            let request = PharmacyRequest {
                name,
                phone,
                address,
                prescription_url,
            };
            book(&http, &cli.server, "services/pharmacy", &request).await?;
        }
        Commands::HomeVisit {
            name,
            phone,
            address,
            professional,
        } => {
            let request = HomeVisitRequest {
                name,
                phone,
                address,
                professional,
            };
            book(&http, &cli.server, "services/home-visit", &request).await?;
        }
    }

    Ok(())
}

/// Fetch and print the service catalog.
async fn list_services(
    http: &reqwest::Client,
    base: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog: serde_json::Value = http
        .get(format!("{base}/services"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let Some(services) = catalog["services"].as_array() else {
        return Err("malformed catalog response".into());
    };
    for service in services {
        println!(
            "{}: {}",
            service["name"].as_str().unwrap_or("?"),
            service["description"].as_str().unwrap_or("")
        );
        println!(
            "  endpoint: {}  fields: {}\n",
            service["endpoint"].as_str().unwrap_or("?"),
            service["required_fields"]
                .as_array()
                .map(|fields| {
                    fields
                        .iter()
                        .filter_map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default()
        );
    }
    Ok(())
}

/// Post a booking request and print the receipt.
async fn book<T: serde::Serialize>(
    http: &reqwest::Client,
    base: &str,
    path: &str,
    body: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = http.post(format!("{base}/{path}")).json(body).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        eprintln!("Booking failed ({status}): {}", error_message(response).await);
        std::process::exit(1);
    }

    let confirmation: BookingConfirmation = response.json().await?;
    println!("{}", confirmation.message);
    println!("\nReference: {}", confirmation.booking_id);
    Ok(())
}

/// Interactive chat loop; the server keeps history under the session id.
async fn chat_loop(http: &reqwest::Client, base: &str) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut session_id: Option<Uuid> = None;

    println!("Connected to {base}. Type a message, or \"quit\" to leave.\n");

    loop {
        print!("You: ");
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        let request = ChatRequest {
            session_id,
            message: message.to_string(),
        };
        let response = http.post(format!("{base}/chat")).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            eprintln!("Careline error ({status}): {}\n", error_message(response).await);
            continue;
        }

        let reply: ChatReply = response.json().await?;
        session_id = Some(reply.session_id);
        println!("Careline: {}\n", reply.reply);
    }

    Ok(())
}

/// Pull the `error` field out of an error response, falling back to raw text.
async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body)
}
