use fuel_cost_api::{
    config::FuelPricesConfig,
    error::AppError,
    fuel_prices::{resolve_price, FuelPriceSource, HttpPriceSource},
    models::FuelType,
};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const LISTING_HTML: &str = r#"
<html><body>
  <div id="graphPageLeft">
    <table>
      <tbody>
        <tr><td><a href="/Morocco/gasoline_prices/">Gasoline prices</a></td><td>14,21</td></tr>
        <tr><td><a href="/Morocco/diesel_prices/">Diesel prices</a></td><td>12,34</td></tr>
        <tr><td><a href="/Morocco/lpg_prices/">LPG prices</a></td><td>5,10</td></tr>
      </tbody>
    </table>
  </div>
</body></html>
"#;

fn source() -> HttpPriceSource {
    HttpPriceSource::new(reqwest::Client::new(), &FuelPricesConfig::default())
}

#[tokio::test]
async fn test_fetch_prices_parses_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Morocco/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/Morocco/", server.uri());
    let table = source().fetch_prices(&url).await.unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(FuelType::Diesel), Some("12,34"));
    assert_eq!(resolve_price(&table, FuelType::Gasoline).unwrap(), 14.21);
}

#[tokio::test]
async fn test_fetch_prices_server_error_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = source().fetch_prices(&server.uri()).await.unwrap_err();

    assert!(matches!(err, AppError::Fetch(_)));
    assert_eq!(err.status_code().as_u16(), 502);
}

#[tokio::test]
async fn test_fetch_prices_page_without_table_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>Maintenance</p></body></html>"),
        )
        .mount(&server)
        .await;

    let table = source().fetch_prices(&server.uri()).await.unwrap();
    assert!(table.is_empty());

    let err = resolve_price(&table, FuelType::Diesel).unwrap_err();
    assert!(matches!(err, AppError::PriceNotFound(_)));
}

#[tokio::test]
async fn test_fetch_prices_unreachable_host_is_fetch_error() {
    // Nothing listens on port 1
    let err = source().fetch_prices("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)));
}

#[tokio::test]
async fn test_fetch_prices_past_timeout_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LISTING_HTML)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = FuelPricesConfig {
        timeout_seconds: 1,
        ..FuelPricesConfig::default()
    };
    let source = HttpPriceSource::new(reqwest::Client::new(), &config);

    let err = source.fetch_prices(&server.uri()).await.unwrap_err();
    assert!(matches!(err, AppError::Fetch(_)));
}
