//! Shared provider payloads and mock-server helpers for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// `GET /weather` body for `name`
pub fn current_body(name: &str, temp: f64) -> Value {
    json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [
            { "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }
        ],
        "base": "stations",
        "main": {
            "temp": temp,
            "feels_like": 21.1,
            "temp_min": 19.8,
            "temp_max": 23.0,
            "pressure": 1015,
            "humidity": 60
        },
        "visibility": 10000,
        "wind": { "speed": 4.12, "deg": 250 },
        "clouds": { "all": 40 },
        "dt": 1721052000,
        "sys": { "country": "FR", "sunrise": 1721015400, "sunset": 1721073600 },
        "timezone": 7200,
        "id": 2988507,
        "name": name,
        "cod": 200
    })
}

/// `GET /forecast` body for `name`: 40 steps from 2024-07-15 00:00 UTC
pub fn forecast_body(name: &str) -> Value {
    let start = 1721001600_i64;
    let list: Vec<Value> = (0..40)
        .map(|i| {
            let dt = start + i * 3 * 3600;
            let hour = (i % 8) * 3;
            let day = 15 + i / 8;
            json!({
                "dt": dt,
                "main": {
                    "temp": 15.0 + i as f64 * 0.25,
                    "feels_like": 14.5,
                    "temp_min": 14.0,
                    "temp_max": 16.0,
                    "pressure": 1012,
                    "humidity": 70
                },
                "weather": [
                    { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
                ],
                "pop": 0.4,
                "dt_txt": format!("2024-07-{:02} {:02}:00:00", day, hour)
            })
        })
        .collect();

    json!({
        "cod": "200",
        "cnt": 40,
        "list": list,
        "city": { "id": 2988507, "name": name, "country": "FR", "timezone": 7200 }
    })
}

/// Mounts both weather endpoints answering for `query` with the echoed `name`
pub async fn mount_city(server: &MockServer, query: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(name, 21.5)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(name)))
        .mount(server)
        .await;
}

/// Mounts a 404 for both endpoints for `query`
pub async fn mount_not_found(server: &MockServer, query: &str) {
    for endpoint in ["/weather", "/forecast"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("q", query))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(server)
            .await;
    }
}
