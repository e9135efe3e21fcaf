// Blueprint generation: prompt → LLM → raw room list.
// All LLM calls go through llm_client: no direct OpenRouter calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
