//! Integration tests for the admin fulfillment set resource.

use commerce_sdk::admin::{
    CreateGeoZone, CreateServiceZone, GeoZoneType, SelectParams, UpdateServiceZone,
};
use commerce_sdk::{ApiKey, BaseUrl, ClientConfig, HttpError, Sdk};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_sdk(server: &MockServer) -> Sdk {
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .api_key(ApiKey::new("sk_123").unwrap())
        .build()
        .unwrap();
    Sdk::new(config).unwrap()
}

fn fulfillment_set_json() -> Value {
    json!({
        "id": "fuset_1",
        "name": "Main warehouse shipping",
        "type": "shipping",
        "created_at": "2024-05-01T10:00:00.000Z",
        "updated_at": "2024-05-02T10:00:00.000Z",
        "deleted_at": null,
        "service_zones": [{
            "id": "serzo_1",
            "name": "Nordics",
            "fulfillment_set_id": "fuset_1",
            "geo_zones": [
                {"id": "fgz_1", "type": "country", "country_code": "dk"},
                {"id": "fgz_2", "type": "country", "country_code": "se"}
            ]
        }]
    })
}

#[tokio::test]
async fn test_delete_fulfillment_set() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/fulfillment-sets/fuset_1"))
        .and(header("authorization", "Basic c2tfMTIzOg=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "fuset_1",
            "object": "fulfillment_set",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let response = sdk.admin().fulfillment_set().delete("fuset_1").await.unwrap();

    assert_eq!(response.id, "fuset_1");
    assert_eq!(response.object, "fulfillment_set");
    assert!(response.deleted);
    assert!(response.parent.is_none());
}

#[tokio::test]
async fn test_create_service_zone() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/fulfillment-sets/fuset_1/service-zones"))
        .and(query_param("fields", "id,name,*service_zones"))
        .and(body_json(json!({
            "name": "Nordics",
            "geo_zones": [
                {"type": "country", "country_code": "dk"},
                {"type": "country", "country_code": "se"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"fulfillment_set": fulfillment_set_json()})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let body = CreateServiceZone::new("Nordics")
        .geo_zone(CreateGeoZone::country("dk"))
        .geo_zone(CreateGeoZone::country("se"));

    let set = sdk
        .admin()
        .fulfillment_set()
        .create_service_zone(
            "fuset_1",
            &body,
            Some(&SelectParams::fields("id,name,*service_zones")),
        )
        .await
        .unwrap();

    assert_eq!(set.id, "fuset_1");
    assert_eq!(set.set_type, "shipping");
    assert_eq!(set.service_zones[0].geo_zones.len(), 2);
    assert_eq!(set.service_zones[0].geo_zones[1].zone_type, GeoZoneType::Country);
}

#[tokio::test]
async fn test_retrieve_service_zone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/fulfillment-sets/fuset_1/service-zones/serzo_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "service_zone": {
                "id": "serzo_1",
                "name": "Nordics",
                "fulfillment_set_id": "fuset_1",
                "geo_zones": [{"id": "fgz_1", "type": "country", "country_code": "dk"}],
                "shipping_options": [{"id": "so_1", "name": "Standard"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let zone = sdk
        .admin()
        .fulfillment_set()
        .retrieve_service_zone("fuset_1", "serzo_1", None)
        .await
        .unwrap();

    assert_eq!(zone.name, "Nordics");
    assert_eq!(zone.shipping_options.len(), 1);
    assert_eq!(zone.shipping_options[0]["name"], "Standard");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_update_service_zone() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/fulfillment-sets/fuset_1/service-zones/serzo_1"))
        .and(body_json(json!({
            "name": "Scandinavia",
            "geo_zones": [
                {"id": "fgz_1", "type": "country", "country_code": "dk"},
                {"type": "province", "country_code": "no", "province_code": "no-03"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"fulfillment_set": fulfillment_set_json()})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let body = UpdateServiceZone {
        name: Some("Scandinavia".to_string()),
        geo_zones: Some(vec![
            CreateGeoZone::country("dk").with_id("fgz_1"),
            CreateGeoZone::province("no", "no-03"),
        ]),
    };

    let set = sdk
        .admin()
        .fulfillment_set()
        .update_service_zone("fuset_1", "serzo_1", &body, None)
        .await
        .unwrap();

    assert_eq!(set.id, "fuset_1");
}

#[tokio::test]
async fn test_delete_service_zone_returns_parent() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/fulfillment-sets/fuset_1/service-zones/serzo_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "serzo_1",
            "object": "service_zone",
            "deleted": true,
            "parent": fulfillment_set_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let response = sdk
        .admin()
        .fulfillment_set()
        .delete_service_zone("fuset_1", "serzo_1")
        .await
        .unwrap();

    assert_eq!(response.object, "service_zone");
    assert_eq!(response.parent.unwrap().id, "fuset_1");
}

#[tokio::test]
async fn test_not_found_surfaces_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/fulfillment-sets/fuset_1/service-zones/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "not_found",
            "message": "Service zone with id: missing was not found"
        })))
        .mount(&server)
        .await;

    let sdk = create_sdk(&server);
    let result = sdk
        .admin()
        .fulfillment_set()
        .retrieve_service_zone("fuset_1", "missing", None)
        .await;

    match result {
        Err(HttpError::Response(e)) => {
            assert_eq!(e.code, 404);
            assert!(e.message.contains("was not found"));
        }
        other => panic!("Expected Response error, got {other:?}"),
    }
}
