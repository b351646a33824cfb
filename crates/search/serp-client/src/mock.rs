//! Static demo data served when SerpApi is not configured or fails.

use serde_json::json;

use crate::types::{Flight, Hotel, Product, Restaurant};

fn placeholder(text: &str) -> String {
    format!("https://via.placeholder.com/300x200?text={text}")
}

pub fn restaurants() -> Vec<Restaurant> {
    [
        ("rest_1", "Pizza Palace", "Pizza", 4.5, "25-35 min", 15, "Pizza+Palace"),
        ("rest_2", "Sushi Express", "Sushi", 4.3, "30-45 min", 20, "Sushi+Express"),
        ("rest_3", "Burger House", "Burgers", 4.1, "20-30 min", 12, "Burger+House"),
    ]
    .into_iter()
    .map(|(id, name, cuisine, rating, delivery, min_order, image)| Restaurant {
        id: json!(id),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        rating,
        delivery_time: delivery.to_string(),
        min_order,
        image: placeholder(image),
        address: None,
        website: None,
    })
    .collect()
}

pub fn flights() -> Vec<Flight> {
    [
        ("flight_1", "Delta Airlines", "10:00 AM", "2:00 PM", 299),
        ("flight_2", "American Airlines", "2:00 PM", "6:00 PM", 349),
    ]
    .into_iter()
    .map(|(id, airline, departs, arrives, price)| Flight {
        id: json!(id),
        airline: airline.to_string(),
        departure: "JFK".to_string(),
        arrival: "LAX".to_string(),
        departure_time: departs.to_string(),
        arrival_time: arrives.to_string(),
        price: json!(price),
        duration: "4h 0m".to_string(),
    })
    .collect()
}

pub fn hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: json!("hotel_1"),
            name: "Grand Hotel".to_string(),
            location: "New York".to_string(),
            rating: 4.5,
            price: json!(200),
            amenities: ["WiFi", "Pool", "Gym", "Spa"].map(String::from).to_vec(),
            image: placeholder("Grand+Hotel"),
        },
        Hotel {
            id: json!("hotel_2"),
            name: "Comfort Inn".to_string(),
            location: "New York".to_string(),
            rating: 4.0,
            price: json!(150),
            amenities: ["WiFi", "Breakfast"].map(String::from).to_vec(),
            image: placeholder("Comfort+Inn"),
        },
    ]
}

pub fn products() -> Vec<Product> {
    [
        ("product_1", "iPhone 15 Pro", "Latest iPhone with advanced features", 999.99, "Electronics", "Apple Store", "iPhone+15+Pro"),
        ("product_2", "Nike Air Max", "Comfortable running shoes", 129.99, "Fashion", "Nike Store", "Nike+Air+Max"),
    ]
    .into_iter()
    .map(|(id, name, description, price, category, seller, image)| Product {
        id: json!(id),
        name: name.to_string(),
        description: description.to_string(),
        price: json!(price),
        category: category.to_string(),
        condition: "new".to_string(),
        seller: seller.to_string(),
        image: placeholder(image),
    })
    .collect()
}
