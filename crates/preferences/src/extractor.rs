//! Writes scanned preferences to the knowledge graph.

use std::sync::Arc;

use knowledge_core::KnowledgeGraph;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::lexicon::{PreferenceLexicon, PreferenceMatch};

/// Outcome of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Every pair found in the message, lexicon order.
    pub matches: Vec<PreferenceMatch>,
    /// Pairs the graph accepted.
    pub stored: Vec<PreferenceMatch>,
    /// Pairs the graph rejected (no connection, error, timeout).
    pub failed: Vec<PreferenceMatch>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Scans messages and records matches as user preferences.
#[derive(Clone)]
pub struct PreferenceExtractor {
    graph: Arc<KnowledgeGraph>,
    lexicon: PreferenceLexicon,
}

impl PreferenceExtractor {
    pub fn new(graph: Arc<KnowledgeGraph>) -> Self {
        Self::with_lexicon(graph, PreferenceLexicon::default())
    }

    pub fn with_lexicon(graph: Arc<KnowledgeGraph>, lexicon: PreferenceLexicon) -> Self {
        Self { graph, lexicon }
    }

    pub fn lexicon(&self) -> &PreferenceLexicon {
        &self.lexicon
    }

    /// Scans `message` and stores each match for `user_id`. Never fails; rejected writes are
    /// listed in [`ExtractionReport::failed`].
    #[instrument(skip(self, message))]
    pub async fn extract_and_store(&self, user_id: &str, message: &str) -> ExtractionReport {
        let matches = self.lexicon.scan(message);
        let mut report = ExtractionReport {
            matches: matches.clone(),
            ..Default::default()
        };
        for m in matches {
            if self
                .graph
                .add_preference(user_id, &m.category, &m.keyword)
                .await
            {
                report.stored.push(m);
            } else {
                warn!(
                    user_id,
                    category = %m.category,
                    preference = %m.keyword,
                    "Failed to store extracted preference"
                );
                report.failed.push(m);
            }
        }
        debug!(
            user_id,
            matched = report.matches.len(),
            stored = report.stored.len(),
            failed = report.failed.len(),
            "Preference extraction done"
        );
        report
    }
}
