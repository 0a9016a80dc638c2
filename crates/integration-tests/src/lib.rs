//! End-to-end tests for the Cartwheel API.
//!
//! Each test builds the real router in-process around an isolated shop and
//! drives it with `tower::ServiceExt::oneshot`, so `cargo test` needs no
//! running server. Shared request/response helpers live here; the tests
//! themselves are under `tests/`.

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use cartwheel_core::{DiscountConfig, Product, ProductId, Shop};
use cartwheel_server::config::ServerConfig;
use cartwheel_server::state::AppState;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

/// Build an app whose catalog holds one product: id 1, "Laptop", price
/// 1000, the given stock.
#[must_use]
pub fn app_with_stock(stock: u32, nth_order: u64) -> Router {
    let config = ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        discount: DiscountConfig {
            nth_order,
            discount_percentage: Decimal::from(10),
        },
    };
    let mut shop = Shop::new(config.discount);
    shop.catalog.insert(Product {
        id: ProductId::new(1),
        name: "Laptop".to_string(),
        price: Decimal::from(1000),
        stock,
    });
    cartwheel_server::app(AppState::new(config, shop))
}

/// Build an app around the demo catalog.
#[must_use]
pub fn demo_app() -> Router {
    let config = ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        discount: DiscountConfig::default(),
    };
    let shop = Shop::with_demo_catalog(config.discount);
    cartwheel_server::app(AppState::new(config, shop))
}

/// Send one request and parse the JSON response body.
///
/// # Panics
///
/// Panics on transport errors or non-JSON bodies; tests treat those as
/// failures.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

/// Send one request with a raw (possibly malformed) body and parse the JSON
/// response.
///
/// # Panics
///
/// Panics on transport errors or non-JSON bodies; tests treat those as
/// failures.
pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

/// Parse a decimal field out of a JSON response (amounts serialize as
/// strings).
///
/// # Panics
///
/// Panics if the value is not a decimal string.
#[must_use]
pub fn dec(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("parseable decimal")
}
