//! Prescription image reading via the Claude vision API

use serde::{Deserialize, Serialize};

use super::client::{ClaudeClient, Content, ContentBlock, ImageSource, Message};

const SYSTEM_PROMPT: &str = r#"You are reading a medical prescription image. Extract ONLY medicines that are clearly written. Do NOT guess.

Return a JSON array of objects with these fields:
- "name": the medicine name
- "dose": the prescribed dose
- "quantity": the prescribed quantity

If a value is unclear, use "UNCLEAR". Return ONLY valid JSON, no other text."#;

/// One line item read off a prescription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescribedMedicine {
    pub name: String,
    pub dose: String,
    pub quantity: String,
}

/// Read the medicines off a prescription image.
pub async fn read_prescription(
    client: &ClaudeClient,
    image_url: &str,
) -> Result<Vec<PrescribedMedicine>, String> {
    let messages = vec![Message {
        role: "user".to_string(),
        content: Content::Blocks(vec![
            ContentBlock::Image {
                source: ImageSource::Url {
                    url: image_url.to_string(),
                },
            },
            ContentBlock::Text {
                text: "Extract the prescribed medicines from this image.".to_string(),
            },
        ]),
    }];

    let response = client.send(Some(SYSTEM_PROMPT), messages, None).await?;
    let text = client.extract_text(&response)?;

    // Parse the JSON array from Claude's response (may be wrapped in markdown)
    let json_str = extract_json_array(&text)?;

    serde_json::from_str(&json_str).map_err(|e| format!("Failed to parse medicines: {}", e))
}

/// Extract a JSON array from text that might contain markdown code blocks
fn extract_json_array(text: &str) -> Result<String, String> {
    let trimmed = text.trim();

    // Direct JSON array
    if trimmed.starts_with('[') {
        return Ok(trimmed.to_string());
    }

    // Wrapped in ```json ... ```
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return Ok(after[..end].trim().to_string());
        }
    }

    // Wrapped in ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            return Ok(after[..end].trim().to_string());
        }
    }

    Err(format!(
        "Could not extract JSON array from response: {}",
        trimmed
    ))
}
