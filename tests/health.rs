use restaurant_registry::routes::health::{health_check, index};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");
    assert!(response.0.success);

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
}

#[tokio::test]
async fn index_reports_package_version() {
    let response = index().await;
    let data = response.0.data.expect("service info");
    assert_eq!(data.name, "restaurant-registry");
    assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
}
