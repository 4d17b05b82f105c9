// Report synthesis workflow.
// Implements: heading vocabulary, section parsing, request building,
// synthesis orchestration, and the HTTP handlers that tie them together.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod builder;
pub mod handlers;
pub mod headings;
pub mod parser;
pub mod synthesize;
