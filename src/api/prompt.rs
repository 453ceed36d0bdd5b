// Prompt text and structured-output schema for pet name requests

use serde_json::{json, Value};

pub const SYSTEM_INSTRUCTION: &str = "あなたはペットの名前を提案する専門家です。かわいくて日本語で発音しやすいカタカナの名前を生成し、JSON形式で返します。";

pub const RESPONSE_MIME_TYPE: &str = "application/json";

pub const TEMPERATURE: f64 = 1.0;
pub const TOP_P: f64 = 0.95;
pub const TOP_K: u32 = 64;

/// Instruction sent as the user turn, with the pet type appended last.
pub fn build_prompt(category: &str) -> String {
    format!(
        "あなたはペットの名前を提案する専門家です。指定された動物の種類に合う、かわいくて日本語で発音しやすいカタカナの名前を5つ生成してください。応答はJSON形式で、`names`というキーに名前の配列を含めてください。動物の種類: {category}"
    )
}

/// `{names: string[]}`, with `names` required.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "names": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Generated pet names in Katakana."
            }
        },
        "required": ["names"]
    })
}
