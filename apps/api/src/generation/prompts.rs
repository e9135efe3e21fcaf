// Prompts for blueprint generation.

/// System prompt that pins the model to the room-list schema the layout pipeline consumes.
pub const BLUEPRINT_SYSTEM: &str = r#"
You are an architectural blueprint AI.
Return STRICT JSON only.
Schema:
{
  "rooms": [
    { "name": "string", "x": number, "y": number, "width": number, "height": number }
  ]
}
"#;
