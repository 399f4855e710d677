pub mod builder;
pub mod handlers;
pub mod language;
pub mod orchestrator;
pub mod prompts;
pub mod tone;
