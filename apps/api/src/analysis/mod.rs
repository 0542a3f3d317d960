// Resume analysis pipeline: prompt building, model invocation with fallback,
// and structured extraction from free-form model output.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod extract;
pub mod handlers;
pub mod parser;
pub mod prompts;
