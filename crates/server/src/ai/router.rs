//! Chat routing with tool calling for the booking services

use serde_json::{Value as JsonValue, json};

use careline_core::{AmbulanceRequest, HomeVisitRequest, PharmacyRequest};

use super::client::{ClaudeClient, Content, ContentBlock, Message, Tool};
use crate::fleet::FleetDirectory;
use crate::services;

const SYSTEM_PROMPT: &str = r#"You are Careline, a healthcare concierge assistant. You must ONLY answer questions related to healthcare: wellness, diseases, symptoms, medications (general information), fitness, mental health, and nutrition — plus the Careline booking services. If a user asks anything outside healthcare, reply strictly with: "I can only respond to healthcare-related questions."

You can arrange three services through the available tools:
1. dispatch_ambulance — emergency ambulance dispatch (operating in Hyderabad and Bangalore only)
2. order_medicines — prescription medicine delivery from a prescription image URL
3. book_home_visit — a doctor, nurse, or caretaker visiting the patient at home

When asked about a tool, describe it first. Before invoking one, confirm with the user and collect every required parameter. Never invent names, phone numbers, addresses, or URLs. Relay tool results to the user clearly and completely."#;

/// Maximum agentic loop iterations to prevent runaway
const MAX_ITERATIONS: u32 = 10;

/// Define the tools available to the chat router
fn chat_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "dispatch_ambulance".to_string(),
            description: "Dispatch the nearest available ambulance to the caller. Requires the \
                          patient's name, phone number, and city."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Patient name"
                    },
                    "phone": {
                        "type": "string",
                        "description": "10 digit contact number"
                    },
                    "city": {
                        "type": "string",
                        "description": "City the ambulance is needed in"
                    }
                },
                "required": ["name", "phone", "city"],
                "additionalProperties": false
            }),
        },
        Tool {
            name: "order_medicines".to_string(),
            description: "Order the medicines on a prescription for home delivery. Requires the \
                          patient's name, phone number, delivery address, and a URL of the \
                          prescription image."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Patient name"
                    },
                    "phone": {
                        "type": "string",
                        "description": "10 digit contact number"
                    },
                    "address": {
                        "type": "string",
                        "description": "Delivery address"
                    },
                    "prescription_url": {
                        "type": "string",
                        "description": "URL of the prescription image"
                    }
                },
                "required": ["name", "phone", "address", "prescription_url"],
                "additionalProperties": false
            }),
        },
        Tool {
            name: "book_home_visit".to_string(),
            description: "Book a healthcare professional to visit the patient at home. Requires \
                          the patient's name, phone number, address, and the kind of professional \
                          (doctor, nurse, or caretaker)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Patient name"
                    },
                    "phone": {
                        "type": "string",
                        "description": "10 digit contact number"
                    },
                    "address": {
                        "type": "string",
                        "description": "Visit address"
                    },
                    "professional": {
                        "type": "string",
                        "enum": ["doctor", "nurse", "caretaker"],
                        "description": "Kind of professional to send"
                    }
                },
                "required": ["name", "phone", "address", "professional"],
                "additionalProperties": false
            }),
        },
    ]
}

/// Execute a tool call against the booking services.
///
/// Tool inputs are deserialized into the typed request structs, so a
/// malformed call comes back as a readable error the model can correct.
async fn execute_tool(
    client: &ClaudeClient,
    fleet: &FleetDirectory,
    name: &str,
    input: &JsonValue,
) -> String {
    match name {
        "dispatch_ambulance" => match serde_json::from_value::<AmbulanceRequest>(input.clone()) {
            Ok(request) => match services::ambulance::dispatch(fleet, &request).await {
                Ok(confirmation) => confirmation.message,
                Err(e) => e.to_string(),
            },
            Err(e) => format!("Invalid tool input: {e}"),
        },
        "order_medicines" => match serde_json::from_value::<PharmacyRequest>(input.clone()) {
            Ok(request) => match services::pharmacy::order(client, &request).await {
                Ok(confirmation) => confirmation.message,
                Err(e) => e.to_string(),
            },
            Err(e) => format!("Invalid tool input: {e}"),
        },
        "book_home_visit" => match serde_json::from_value::<HomeVisitRequest>(input.clone()) {
            Ok(request) => match services::home_visit::book(&request) {
                Ok(confirmation) => confirmation.message,
                Err(e) => e.to_string(),
            },
            Err(e) => format!("Invalid tool input: {e}"),
        },
        _ => format!("Unknown tool: {name}"),
    }
}

/// Run one chat turn through the agentic loop.
///
/// Appends the user message to `messages`, lets Claude call booking
/// tools until it produces a final text reply, and returns the updated
/// history together with that reply so the caller can store the session.
pub async fn chat(
    client: &ClaudeClient,
    fleet: &FleetDirectory,
    mut messages: Vec<Message>,
    user_message: &str,
) -> Result<(Vec<Message>, String), String> {
    let tools = chat_tools();

    messages.push(Message {
        role: "user".to_string(),
        content: Content::Text(user_message.to_string()),
    });

    for iteration in 0..MAX_ITERATIONS {
        let response = client
            .send(Some(SYSTEM_PROMPT), messages.clone(), Some(tools.clone()))
            .await?;

        tracing::debug!(
            iteration = iteration,
            stop_reason = &response.stop_reason,
            "Chat loop iteration"
        );

        if response.stop_reason == "tool_use" {
            // Collect tool_use blocks
            let tool_uses: Vec<_> = response
                .content
                .iter()
                .filter_map(|block| {
                    if let ContentBlock::ToolUse { id, name, input } = block {
                        Some((id.clone(), name.clone(), input.clone()))
                    } else {
                        None
                    }
                })
                .collect();

            // Append the assistant's response (with tool_use blocks) to conversation
            messages.push(Message {
                role: "assistant".to_string(),
                content: Content::Blocks(response.content),
            });

            // Execute each tool and collect results
            let mut result_blocks = Vec::new();
            for (tool_id, tool_name, tool_input) in &tool_uses {
                tracing::info!(tool = %tool_name, "Executing chat tool");
                let result = execute_tool(client, fleet, tool_name, tool_input).await;
                result_blocks.push(ContentBlock::ToolResult {
                    tool_use_id: tool_id.clone(),
                    content: result,
                });
            }

            // Send tool results back as a user message
            messages.push(Message {
                role: "user".to_string(),
                content: Content::Blocks(result_blocks),
            });
        } else {
            // end_turn, or an unexpected stop reason: return whatever text we got
            let reply = client.extract_text(&response)?;
            messages.push(Message {
                role: "assistant".to_string(),
                content: Content::Text(reply.clone()),
            });
            return Ok((messages, reply));
        }
    }

    Err("Chat loop exceeded maximum iterations".to_string())
}
