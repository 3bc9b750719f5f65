// Prompt constants and the prompt composer for the chatbot.

use crate::chatbot::memory::ConversationTurn;
use crate::llm_client::ChatMessage;

/// Persona instructions. Replace `{owner}` before sending.
pub const PERSONA_SYSTEM_TEMPLATE: &str = "You are {owner}'s AI Portfolio Assistant. \
    You understand their resume, skills, and projects. \
    Answer clearly and professionally. \
    If asked about skills or projects, summarize them as bullet points with technologies and outcomes. \
    Always sound confident, resume-accurate, and concise.";

pub fn persona_system_prompt(owner: &str) -> String {
    PERSONA_SYSTEM_TEMPLATE.replace("{owner}", owner)
}

/// Builds the exact message sequence sent to the completion API:
/// system persona, remembered turns verbatim, then the question with its
/// retrieved résumé context.
pub fn compose(
    system_prompt: &str,
    memory: &[ConversationTurn],
    question: &str,
    context: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(memory.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(memory.iter().map(ChatMessage::from));
    messages.push(ChatMessage::user(format!(
        "Question: {question}\n\nResume Context:\n{context}"
    )));
    messages
}
