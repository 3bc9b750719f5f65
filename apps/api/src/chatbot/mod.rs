// Resume chatbot: ranking, conversation memory, prompt composition, and the ask endpoint.
// All completion calls go through llm_client::Completer — never directly from here.

pub mod assistant;
pub mod handlers;
pub mod memory;
pub mod prompts;
pub mod ranking;
