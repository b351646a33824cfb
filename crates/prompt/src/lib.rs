//! # Prompt
//!
//! Builds the message list sent to the completion API for one chat turn.
//!
//! ## Format
//!
//! - **System**: fixed shopping-assistant instruction, then optionally
//!   `\n\nContext: {context}` and `\n\nUser Profile: {profile}`
//! - **User**: the current message, verbatim
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs (Groq, OpenAI).

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Fixed system instruction for the shopping assistant.
pub const SHOPPING_ASSISTANT_SYSTEM_PROMPT: &str = "You are an AI-powered shopping assistant for an e-commerce platform.
Your role is to help users find products, answer questions, and provide personalized recommendations.

Guidelines:
- Be helpful, friendly, and professional
- Ask clarifying questions when needed
- Provide specific product recommendations when possible
- Consider user preferences and past behavior
- Suggest related products or alternatives";

/// Section prefix for conversation context in the system message.
pub const SECTION_CONTEXT: &str = "Context: ";

/// Section prefix for the serialized user profile in the system message.
pub const SECTION_USER_PROFILE: &str = "User Profile: ";

/// Builds the system message content.
///
/// Empty `context` and `None`/empty `user_profile` are omitted. `user_profile` is expected to be
/// already serialized (the agent passes pretty-printed JSON).
pub fn build_system_content(base: &str, context: &str, user_profile: Option<&str>) -> String {
    let mut out = base.to_string();
    if !context.is_empty() {
        out.push_str("\n\n");
        out.push_str(SECTION_CONTEXT);
        out.push_str(context);
    }
    if let Some(profile) = user_profile.filter(|p| !p.is_empty()) {
        out.push_str("\n\n");
        out.push_str(SECTION_USER_PROFILE);
        out.push_str(profile);
    }
    out
}

/// Builds `[system, user]` for one assistant turn.
///
/// # Arguments
///
/// * `system_base` - Instruction text; usually [`SHOPPING_ASSISTANT_SYSTEM_PROMPT`]
/// * `context` - Trailing conversation window plus any caller-supplied context
/// * `user_profile` - Serialized profile, if one was found
/// * `user_message` - Current user message (last message, role User)
pub fn build_agent_messages(
    system_base: &str,
    context: &str,
    user_profile: Option<&str>,
    user_message: &str,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(build_system_content(system_base, context, user_profile)),
        ChatMessage::user(user_message),
    ]
}

/// Combines caller-supplied context with the conversation window: `"{extra}\n{window}"`
/// when `extra` is non-empty, otherwise the window alone.
pub fn combine_context(extra: &str, window: &str) -> String {
    if extra.is_empty() {
        window.to_string()
    } else {
        format!("{}\n{}", extra, window)
    }
}
