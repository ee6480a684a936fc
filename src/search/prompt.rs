use serde_json::{Value, json};

use crate::gemini::{Content, GenerateContentRequest, GenerationConfig};
use crate::groups::Category;

pub const TARGET_RESULTS: usize = 20;
pub const MIN_RESULTS: usize = 15;
pub const INVITE_LINK_PREFIX: &str = "https://chat.whatsapp.com/";
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Fields every returned record is asked to carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "id",
    "name",
    "description",
    "category",
    "inviteLink",
    "tags",
];

pub fn build_prompt(instruction: &str, category: Option<Category>) -> String {
    let scope = match category {
        Some(c) => format!(" in the category {}", c.label()),
        None => String::new(),
    };
    format!(
        r#"Act as an exhaustive, well-informed directory of WhatsApp groups.
Your task is to find or list groups that really exist or are extremely popular and active, based on the search: "{instruction}"{scope}.

IMPORTANT INSTRUCTIONS:
1. Return a robust list with EXACTLY {TARGET_RESULTS} different groups. Never return fewer than {MIN_RESULTS}.
2. Make sure the groups are varied within the theme.
3. For invitation links, use realistic invite IDs in the format '{INVITE_LINK_PREFIX}L2k...'.
4. Descriptions must be detailed and inviting, written in Brazilian Portuguese.
5. The language of the groups should preferably be Portuguese (Brazil).

Return the data strictly as JSON following the provided schema."#
    )
}

/// Response schema in the backend's OpenAPI subset: an array of group
/// objects with string fields and a string-array `tags`.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "category": { "type": "STRING" },
                "memberCount": { "type": "STRING" },
                "tags": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "inviteLink": { "type": "STRING" },
                "language": { "type": "STRING" }
            },
            "required": REQUIRED_FIELDS,
        }
    })
}

pub fn build_request(instruction: &str, category: Option<Category>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(build_prompt(instruction, category))],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some(RESPONSE_MIME_TYPE.to_string()),
            response_schema: Some(response_schema()),
        }),
    }
}
