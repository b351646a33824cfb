use knowledge_core::UserProfile;
use preferences::ExtractionReport;
use serde::Serialize;

/// Result of [`crate::ShoppingAgent::process_message`]. Failures are reported in-band:
/// `response` carries an apology and `error` the cause.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub response: String,
    pub user_id: String,
    pub user_profile: Option<UserProfile>,
    pub conversation_length: usize,
    /// RFC 3339, local time.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub extraction: ExtractionReport,
}

impl ChatOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
