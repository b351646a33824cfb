//! Unit tests for the prompt builders.
//!
//! Verifies system message sections, message order, and context combination.
//! External interactions: none (pure function tests).

use prompt::{
    build_agent_messages, build_system_content, combine_context, ChatMessage, MessageRole,
    SECTION_CONTEXT, SECTION_USER_PROFILE, SHOPPING_ASSISTANT_SYSTEM_PROMPT,
};

/// **Test: Without context or profile the system content is the base instruction only.**
#[test]
fn system_content_base_only() {
    let out = build_system_content("Be nice.", "", None);
    assert_eq!(out, "Be nice.");
}

/// **Test: Context and profile sections are appended in that order, separated by blank lines.**
#[test]
fn system_content_with_context_and_profile() {
    let out = build_system_content("Be nice.", "User: hi", Some("{\"user_id\": \"u1\"}"));
    assert_eq!(
        out,
        "Be nice.\n\nContext: User: hi\n\nUser Profile: {\"user_id\": \"u1\"}"
    );
    let ctx = out.find(SECTION_CONTEXT).unwrap();
    let profile = out.find(SECTION_USER_PROFILE).unwrap();
    assert!(ctx < profile);
}

/// **Test: An empty serialized profile is treated like no profile.**
#[test]
fn system_content_skips_empty_profile() {
    let out = build_system_content("Be nice.", "", Some(""));
    assert!(!out.contains(SECTION_USER_PROFILE));
}

/// **Test: build_agent_messages returns system then user, with the user message verbatim.**
#[test]
fn agent_messages_order() {
    let msgs = build_agent_messages(SHOPPING_ASSISTANT_SYSTEM_PROMPT, "", None, "Need shoes");
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].role, MessageRole::System);
    assert!(msgs[0].content.starts_with("You are an AI-powered shopping assistant"));
    assert_eq!(msgs[1], ChatMessage::user("Need shoes"));
}

/// **Test: combine_context prepends caller context with a newline only when present.**
#[test]
fn combine_context_variants() {
    assert_eq!(combine_context("", "User: a"), "User: a");
    assert_eq!(combine_context("Budget 100", "User: a"), "Budget 100\nUser: a");
    assert_eq!(combine_context("Budget 100", ""), "Budget 100\n");
}
