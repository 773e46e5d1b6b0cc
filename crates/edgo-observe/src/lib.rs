//! Observability setup for EDGO: the tracing subscriber and the GenAI
//! attribute names used on model-call spans.

pub mod genai_attrs;
pub mod tracing_setup;
