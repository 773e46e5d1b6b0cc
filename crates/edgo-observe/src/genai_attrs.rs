//! OpenTelemetry GenAI semantic convention names.
//!
//! Field names for `info_span!` on model calls, plus the values EDGO uses
//! for them. Span naming: `"{operation} {model}"`, e.g.
//! `"chat gemini-2.5-flash"`.

pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// Token counts reported in `usageMetadata`.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// e.g. "STOP", "MAX_TOKENS", "SAFETY".
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Values ---

pub const PROVIDER_GEMINI: &str = "gemini";

/// Single-shot generation (the stage greeting).
pub const OP_GENERATE: &str = "generate_content";

/// Streaming chat reply.
pub const OP_CHAT: &str = "chat";

/// Build a span name following the `"{operation} {model}"` convention.
pub fn span_name(operation: &str, model: &str) -> String {
    format!("{operation} {model}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_are_namespaced() {
        for name in [
            GEN_AI_OPERATION_NAME,
            GEN_AI_PROVIDER_NAME,
            GEN_AI_REQUEST_MODEL,
            GEN_AI_REQUEST_TEMPERATURE,
            GEN_AI_REQUEST_MAX_TOKENS,
            GEN_AI_USAGE_INPUT_TOKENS,
            GEN_AI_USAGE_OUTPUT_TOKENS,
            GEN_AI_RESPONSE_FINISH_REASONS,
        ] {
            assert!(name.starts_with("gen_ai."), "{name}");
        }
    }

    #[test]
    fn test_span_name() {
        assert_eq!(span_name(OP_CHAT, "gemini-2.5-flash"), "chat gemini-2.5-flash");
    }
}
