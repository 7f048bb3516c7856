//! In-process HTTP servers standing in for the advice and forecast services

#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Advice response in the legacy key format
pub fn legacy_advice_body() -> Value {
    json!({
        "county": "Nakuru",
        "soilData": {"pH": "6.3", "N": 41, "P": "12.5", "K": 150},
        "recommendations": {
            "crop": "Maize grows well here",
            "soil": "Apply well-rotted manure",
            "weather": "Expect showers midweek",
            "alternativeCrops": ["Sorghum", "Cassava"]
        },
        "totalRain": 23.4,
        "history": [
            {"county": "Nakuru", "crop": "maize", "createdAt": "2024-04-02T09:00:00Z",
             "soilData": {"ph": 6.3, "nitrogen": 41}},
            {"county": "Nakuru", "crop": "beans", "accessedAt": "not-a-date",
             "soilData": {"pH": 6.1, "n": "39"}}
        ]
    })
}

/// Hourly forecast covering `days` consecutive dates with two samples each
pub fn hourly_body(days: u32) -> Value {
    let mut time = Vec::new();
    let mut temperature = Vec::new();
    let mut precipitation = Vec::new();
    let mut humidity = Vec::new();
    for day in 1..=days {
        for (hour, temp) in [(6, 14.0), (15, 24.0)] {
            time.push(format!("2024-06-{:02}T{:02}:00", day, hour));
            temperature.push(temp);
            precipitation.push(0.4);
            humidity.push(70.0);
        }
    }
    json!({
        "latitude": -0.3,
        "longitude": 36.1,
        "hourly": {
            "time": time,
            "temperature_2m": temperature,
            "precipitation": precipitation,
            "relative_humidity_2m": humidity
        }
    })
}
