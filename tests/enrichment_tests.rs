//! End-to-end enrichment tests against a mock Admin API.

use serde_json::json;
use shopify_b2b_pricing::enrich::{Record, StaticSecrets, SECRET_NAME};
use shopify_b2b_pricing::{
    AccessToken, CatalogRef, EnrichError, EnrichMode, Enricher, HostUrl, PricingConfig,
    ResolutionError, ShopDomain,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/admin/api/2025-10/graphql.json";

fn create_enricher(server: &MockServer, mode: EnrichMode) -> Enricher {
    Enricher::new(
        PricingConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .api_host(HostUrl::new(server.uri()).unwrap())
            .mode(mode)
            .build()
            .unwrap(),
    )
}

fn token() -> AccessToken {
    AccessToken::new("test-token").unwrap()
}

fn record() -> Record {
    Record::from_value(json!({ "id": "111", "objectID": "222", "title": "Widget" })).unwrap()
}

fn publications(catalog_ids: &[&str]) -> serde_json::Value {
    let edges: Vec<_> = catalog_ids
        .iter()
        .map(|id| {
            json!({
                "node": {
                    "publication": {
                        "catalog": { "id": format!("gid://shopify/Catalog/{id}"), "title": "Wholesale" }
                    }
                }
            })
        })
        .collect();

    json!({
        "data": {
            "product": {
                "id": "gid://shopify/Product/111",
                "resourcePublicationsV2": { "edges": edges }
            }
        }
    })
}

fn catalog(status: &str, amount: Option<&str>) -> serde_json::Value {
    let nodes: Vec<_> = amount
        .into_iter()
        .map(|amount| {
            json!({
                "variant": { "id": "gid://shopify/ProductVariant/222" },
                "price": { "amount": amount, "currencyCode": "USD" }
            })
        })
        .collect();

    json!({
        "data": {
            "catalog": {
                "id": "gid://shopify/Catalog/0",
                "title": "Wholesale",
                "status": status,
                "priceList": {
                    "id": "gid://shopify/PriceList/1",
                    "name": "Wholesale",
                    "currency": "USD",
                    "prices": { "nodes": nodes }
                }
            }
        }
    })
}

async fn mount_publications(server: &MockServer, catalog_ids: &[&str]) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("ProductCatalogs"))
        .and(body_partial_json(json!({
            "variables": { "id": "gid://shopify/Product/111", "first": 10 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(publications(catalog_ids)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_catalog(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("CatalogPrice"))
        .and(body_partial_json(json!({
            "variables": {
                "id": format!("gid://shopify/Catalog/{id}"),
                "first": 1,
                "query": "variant_id:222"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// All-Catalogs Mode
// ============================================================================

#[tokio::test]
async fn test_active_catalog_priced_and_draft_catalog_null() {
    let server = MockServer::start().await;
    mount_publications(&server, &["10", "20"]).await;
    mount_catalog(&server, "10", catalog("ACTIVE", Some("19.99"))).await;
    mount_catalog(&server, "20", catalog("DRAFT", Some("17.50"))).await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let enriched = assert_ok!(enricher.enrich(record(), &token()).await);

    assert_eq!(
        enriched.into_value(),
        json!({
            "id": "111",
            "objectID": "222",
            "title": "Widget",
            "b2b_pricing": { "10": 19.99, "20": null }
        })
    );
}

#[tokio::test]
async fn test_unpublished_product_gets_empty_pricing() {
    let server = MockServer::start().await;
    mount_publications(&server, &[]).await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let enriched = assert_ok!(enricher.enrich(record(), &token()).await);

    assert_eq!(enriched.get("b2b_pricing"), Some(&json!({})));
    // Only the publications query was sent
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_active_catalog_without_price_is_null() {
    let server = MockServer::start().await;
    mount_publications(&server, &["30"]).await;
    mount_catalog(&server, "30", catalog("ACTIVE", None)).await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let enriched = assert_ok!(enricher.enrich(record(), &token()).await);

    assert_eq!(enriched.get("b2b_pricing"), Some(&json!({ "30": null })));
}

#[tokio::test]
async fn test_gid_record_ids_are_normalized() {
    let server = MockServer::start().await;
    mount_publications(&server, &["10"]).await;
    mount_catalog(&server, "10", catalog("ACTIVE", Some("5.00"))).await;

    let record = Record::from_value(json!({
        "id": "gid://shopify/Product/111",
        "objectID": "gid://shopify/ProductVariant/222"
    }))
    .unwrap();

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let enriched = assert_ok!(enricher.enrich(record, &token()).await);

    assert_eq!(enriched.get("b2b_pricing"), Some(&json!({ "10": 5.0 })));
}

// ============================================================================
// Single-Catalog Mode
// ============================================================================

#[tokio::test]
async fn test_single_catalog_mode_prices_only_target() {
    let server = MockServer::start().await;
    mount_publications(&server, &["10", "20"]).await;
    mount_catalog(&server, "20", catalog("ACTIVE", Some("12.00"))).await;

    let mode = EnrichMode::SingleCatalog(CatalogRef::parse("20").unwrap());
    let enricher = create_enricher(&server, mode);
    let enriched = assert_ok!(enricher.enrich(record(), &token()).await);

    assert_eq!(enriched.get("b2b_pricing"), Some(&json!({ "20": 12.0 })));
}

#[tokio::test]
async fn test_single_catalog_mode_target_not_published() {
    let server = MockServer::start().await;
    mount_publications(&server, &["10"]).await;

    let mode = EnrichMode::SingleCatalog(CatalogRef::parse("99").unwrap());
    let enricher = create_enricher(&server, mode);
    let enriched = assert_ok!(enricher.enrich(record(), &token()).await);

    assert_eq!(enriched.get("b2b_pricing"), Some(&json!({})));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_product_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })))
        .mount(&server)
        .await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let error = assert_err!(enricher.enrich(record(), &token()).await);

    assert!(matches!(
        error,
        EnrichError::Resolution(ResolutionError::ProductNotFound { product_id }) if product_id == "111"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_fail_the_record() {
    let server = MockServer::start().await;
    mount_publications(&server, &["10"]).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("CatalogPrice"))
        .respond_with(ResponseTemplate::new(429))
        .expect(5)
        .mount(&server)
        .await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let error = assert_err!(enricher.enrich(record(), &token()).await);

    assert!(error.is_retries_exhausted());
}

// ============================================================================
// Host Transform Entry Point
// ============================================================================

#[tokio::test]
async fn test_transform_reads_token_from_secrets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(publications(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let secrets = StaticSecrets::new().with(SECRET_NAME, "secret-token");
    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let output = assert_ok!(enricher.transform(record(), &secrets).await);

    let records = output.into_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("b2b_pricing"), Some(&json!({})));
}

#[tokio::test]
async fn test_transform_without_secret_sends_nothing() {
    let server = MockServer::start().await;

    let enricher = create_enricher(&server, EnrichMode::AllCatalogs);
    let result = enricher.transform(record(), &StaticSecrets::new()).await;

    assert!(matches!(result, Err(EnrichError::MissingSecret { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}
