// Shared prompt fragments.
// Stage-specific templates live in assessment/prompts.rs; this file holds the
// cross-cutting instructions every stage appends.

/// Instruction appended to every prompt so the reply can be parsed.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with ONE valid JSON object only. \
    Do NOT include any text before or after the JSON object. \
    Do NOT use markdown code fences. \
    Use exactly the keys shown in the example; replace the example values with real content.";

/// Keeps the model on tone for a career-guidance product.
pub const AUDIENCE_INSTRUCTION: &str = "\
    The audience is a person exploring their career options. \
    Be concrete, encouraging and realistic. \
    Never mention that you are an AI model.";
