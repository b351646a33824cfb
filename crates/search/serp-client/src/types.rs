//! Result records returned to clients, and their mapping from SerpApi items.

use serde::Serialize;
use serde_json::{json, Value};

/// Where a result list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    Serpapi,
    Mock,
}

/// A result list tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<T> {
    pub results: Vec<T>,
    pub source: SearchSource,
}

impl<T> SearchResults<T> {
    pub fn live(results: Vec<T>) -> Self {
        Self {
            results,
            source: SearchSource::Serpapi,
        }
    }

    pub fn mock(results: Vec<T>) -> Self {
        Self {
            results,
            source: SearchSource::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.source == SearchSource::Mock
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Value,
    pub name: String,
    pub description: String,
    pub price: Value,
    pub category: String,
    pub condition: String,
    pub seller: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: Value,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub delivery_time: String,
    pub min_order: u32,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Value,
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: Value,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Value,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub price: Value,
    pub amenities: Vec<String>,
    pub image: String,
}

pub(crate) const PLACEHOLDER_RESTAURANT_IMAGE: &str =
    "https://via.placeholder.com/300x200?text=Restaurant";
pub(crate) const PLACEHOLDER_HOTEL_IMAGE: &str = "https://via.placeholder.com/300x200?text=Hotel";
pub(crate) const PLACEHOLDER_PRODUCT_IMAGE: &str =
    "https://via.placeholder.com/300x200?text=Product";

fn str_or(item: &Value, key: &str, default: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn value_or(item: &Value, key: &str, default: Value) -> Value {
    match item.get(key) {
        Some(v) if !v.is_null() => v.clone(),
        _ => default,
    }
}

impl Product {
    pub(crate) fn from_shopping_result(item: &Value, category: Option<&str>) -> Self {
        Self {
            id: value_or(item, "product_id", json!("product_1")),
            name: str_or(item, "title", "Product Name"),
            description: str_or(item, "description", "Product description"),
            price: value_or(item, "price", json!(99.99)),
            category: category.unwrap_or("General").to_string(),
            condition: "new".to_string(),
            seller: "Online Store".to_string(),
            image: str_or(item, "thumbnail", PLACEHOLDER_PRODUCT_IMAGE),
        }
    }
}

impl Restaurant {
    pub(crate) fn from_organic_result(item: &Value, cuisine: &str) -> Self {
        let title = str_or(item, "title", "");
        let name = title.split(" - ").next().unwrap_or_default().to_string();
        Self {
            id: value_or(item, "position", json!(0)),
            name,
            cuisine: cuisine.to_string(),
            rating: 4.2,
            delivery_time: "25-35 min".to_string(),
            min_order: 15,
            image: PLACEHOLDER_RESTAURANT_IMAGE.to_string(),
            address: Some(str_or(item, "snippet", "")),
            website: Some(str_or(item, "link", "")),
        }
    }
}

impl Flight {
    pub(crate) fn from_flight_result(item: &Value, from: &str, to: &str) -> Self {
        Self {
            id: value_or(item, "flight_id", json!("flight_1")),
            airline: str_or(item, "airline", "Unknown"),
            departure: from.to_string(),
            arrival: to.to_string(),
            departure_time: str_or(item, "departure_time", "10:00 AM"),
            arrival_time: str_or(item, "arrival_time", "2:00 PM"),
            price: value_or(item, "price", json!(299)),
            duration: str_or(item, "duration", "4h 0m"),
        }
    }
}

impl Hotel {
    pub(crate) fn from_hotel_result(item: &Value, location: &str) -> Self {
        Self {
            id: value_or(item, "hotel_id", json!("hotel_1")),
            name: str_or(item, "title", "Hotel Name"),
            location: location.to_string(),
            rating: item.get("rating").and_then(Value::as_f64).unwrap_or(4.0),
            price: value_or(item, "price", json!(150)),
            amenities: vec!["WiFi".into(), "Pool".into(), "Gym".into()],
            image: PLACEHOLDER_HOTEL_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_name_stops_at_dash() {
        let item = json!({"position": 3, "title": "Joe's Pizza - Best slices in town", "link": "https://joes.example"});

        let r = Restaurant::from_organic_result(&item, "pizza");

        assert_eq!(r.id, json!(3));
        assert_eq!(r.name, "Joe's Pizza");
        assert_eq!(r.cuisine, "pizza");
        assert_eq!(r.rating, 4.2);
        assert_eq!(r.website.as_deref(), Some("https://joes.example"));
        assert_eq!(r.address.as_deref(), Some(""));
    }

    #[test]
    fn test_product_defaults() {
        let p = Product::from_shopping_result(&json!({}), None);

        assert_eq!(p.id, json!("product_1"));
        assert_eq!(p.name, "Product Name");
        assert_eq!(p.price, json!(99.99));
        assert_eq!(p.category, "General");
        assert_eq!(p.image, PLACEHOLDER_PRODUCT_IMAGE);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(Restaurant::from_organic_result(&json!({}), "x")).unwrap();

        assert!(value.get("deliveryTime").is_some());
        assert!(value.get("minOrder").is_some());
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_value(SearchResults::<Product>::mock(vec![])).unwrap();

        assert_eq!(json, json!({"results": [], "source": "mock"}));
    }
}
