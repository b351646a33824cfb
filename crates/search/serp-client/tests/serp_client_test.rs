use mockito::Matcher;
use serde_json::json;
use serp_client::{SearchSource, SerpApiService};

fn service(server: &mockito::Server) -> SerpApiService {
    SerpApiService::new(Some("serp-test-key".to_string())).with_base_url(server.url())
}

#[tokio::test]
async fn test_without_key_serves_mock_tables() {
    let service = SerpApiService::new(None);

    let restaurants = service.search_restaurants("pizza", None).await;
    let flights = service.search_flights("JFK", "LAX", "2024-05-01").await;
    let hotels = service.search_hotels("Paris", "2024-05-01", "2024-05-03").await;
    let products = service.search_products("phone", None).await;

    assert!(!service.is_configured());
    assert_eq!(restaurants.source, SearchSource::Mock);
    assert_eq!(restaurants.results.len(), 3);
    assert_eq!(restaurants.results[0].name, "Pizza Palace");
    assert_eq!(flights.results.len(), 2);
    assert_eq!(flights.results[1].airline, "American Airlines");
    assert_eq!(hotels.results.len(), 2);
    assert_eq!(hotels.results[0].name, "Grand Hotel");
    assert_eq!(products.results.len(), 2);
    assert_eq!(products.results[0].name, "iPhone 15 Pro");
    assert_eq!(products.results[0].price, json!(999.99));
}

#[tokio::test]
async fn test_blank_key_counts_as_missing() {
    let service = SerpApiService::new(Some("   ".to_string()));

    assert!(!service.is_configured());
    assert!(service.search_products("x", None).await.is_mock());
}

#[tokio::test]
async fn test_products_mapped_from_shopping_results() {
    let mut server = mockito::Server::new_async().await;
    let items: Vec<_> = (0..12)
        .map(|i| json!({"product_id": format!("p{i}"), "title": format!("Item {i}"), "price": "$10.00"}))
        .collect();
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("engine".into(), "google_shopping".into()),
            Matcher::UrlEncoded("q".into(), "running shoes".into()),
            Matcher::UrlEncoded("num".into(), "20".into()),
            Matcher::UrlEncoded("api_key".into(), "serp-test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"shopping_results": items}).to_string())
        .create_async()
        .await;

    let products = service(&server)
        .search_products("running shoes", Some("Fashion"))
        .await;

    mock.assert_async().await;
    assert_eq!(products.source, SearchSource::Serpapi);
    assert_eq!(products.results.len(), 10);
    assert_eq!(products.results[0].id, json!("p0"));
    assert_eq!(products.results[0].name, "Item 0");
    assert_eq!(products.results[0].price, json!("$10.00"));
    assert_eq!(products.results[0].category, "Fashion");
}

#[tokio::test]
async fn test_restaurant_query_includes_location() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("engine".into(), "google".into()),
            Matcher::UrlEncoded("q".into(), "thai restaurants New York".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({"organic_results": [
                {"position": 1, "title": "Thai Villa - Menu & Reviews", "snippet": "5 E 19th St", "link": "https://thaivilla.example"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let restaurants = service(&server).search_restaurants("thai", None).await;

    mock.assert_async().await;
    assert_eq!(restaurants.source, SearchSource::Serpapi);
    assert_eq!(restaurants.results[0].name, "Thai Villa");
    assert_eq!(restaurants.results[0].address.as_deref(), Some("5 E 19th St"));
    assert_eq!(restaurants.results[0].delivery_time, "25-35 min");
}

#[tokio::test]
async fn test_missing_results_key_is_empty_live_result() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let hotels = service(&server).search_hotels("Rome", "2024-06-01", "2024-06-02").await;

    assert_eq!(hotels.source, SearchSource::Serpapi);
    assert!(hotels.results.is_empty());
}

#[tokio::test]
async fn test_upstream_error_falls_back_to_mock() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let flights = service(&server).search_flights("JFK", "LAX", "2024-05-01").await;

    assert_eq!(flights.source, SearchSource::Mock);
    assert_eq!(flights.results.len(), 2);
}

#[tokio::test]
async fn test_api_error_body_falls_back_to_mock() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"error": "Invalid API key"}).to_string())
        .create_async()
        .await;

    let hotels = service(&server).search_hotels("Rome", "2024-06-01", "2024-06-02").await;

    assert!(hotels.is_mock());
}
