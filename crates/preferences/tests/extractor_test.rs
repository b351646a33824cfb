use std::sync::Arc;

use knowledge_core::{KnowledgeGraph, ProfileAttributes};
use knowledge_inmemory::InMemoryGraphStore;
use preferences::{PreferenceExtractor, PreferenceMatch};

async fn graph_with_user(user_id: &str) -> Arc<KnowledgeGraph> {
    let graph = Arc::new(KnowledgeGraph::connected(Arc::new(InMemoryGraphStore::new())));
    assert!(graph.upsert_profile(user_id, &ProfileAttributes::new()).await);
    graph
}

#[tokio::test]
async fn test_phone_and_fitness_become_recommendations() {
    let graph = graph_with_user("u1").await;
    let extractor = PreferenceExtractor::new(graph.clone());

    let report = extractor
        .extract_and_store("u1", "I need a new phone and some fitness gear")
        .await;

    assert_eq!(
        report.matches,
        vec![
            PreferenceMatch::new("electronics", "phone"),
            PreferenceMatch::new("sports", "fitness"),
        ]
    );
    assert_eq!(report.stored, report.matches);
    assert!(report.is_complete());

    let categories: Vec<String> = graph
        .get_recommendations("u1")
        .await
        .into_iter()
        .map(|r| r.category)
        .collect();
    assert!(categories.contains(&"electronics".to_string()));
    assert!(categories.contains(&"sports".to_string()));
}

#[tokio::test]
async fn test_laptop_and_novel_store_two_pairs() {
    let graph = graph_with_user("u2").await;
    let extractor = PreferenceExtractor::new(graph.clone());

    let report = extractor
        .extract_and_store("u2", "A laptop for work and a novel for the weekend")
        .await;

    assert_eq!(report.stored.len(), 2);
    assert_eq!(graph.get_recommendations("u2").await.len(), 2);
}

#[tokio::test]
async fn test_disconnected_graph_reports_failures() {
    let extractor = PreferenceExtractor::new(Arc::new(KnowledgeGraph::disconnected()));

    let report = extractor.extract_and_store("u1", "new shoes please").await;

    assert_eq!(report.matches, vec![PreferenceMatch::new("clothing", "shoes")]);
    assert!(report.stored.is_empty());
    assert_eq!(report.failed, report.matches);
}

#[tokio::test]
async fn test_message_without_keywords() {
    let graph = graph_with_user("u1").await;
    let extractor = PreferenceExtractor::new(graph);

    let report = extractor.extract_and_store("u1", "hi!").await;

    assert!(report.is_empty());
    assert_eq!(report, Default::default());
}
