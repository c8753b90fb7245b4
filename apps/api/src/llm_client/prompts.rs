// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs alongside it and reuses these.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Return ONLY valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
