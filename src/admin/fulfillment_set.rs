//! Fulfillment set resource implementation.
//!
//! A fulfillment set groups the service zones a stock location can ship to
//! (or serve for pickup). Each service zone is made of geo zones describing
//! the covered area.
//!
//! # Routes
//!
//! - `DELETE /admin/fulfillment-sets/{id}`
//! - `POST /admin/fulfillment-sets/{id}/service-zones`
//! - `GET /admin/fulfillment-sets/{id}/service-zones/{zone_id}`
//! - `POST /admin/fulfillment-sets/{id}/service-zones/{zone_id}`
//! - `DELETE /admin/fulfillment-sets/{id}/service-zones/{zone_id}`
//!
//! # Example
//!
//! ```rust,ignore
//! use commerce_sdk::admin::{CreateGeoZone, CreateServiceZone, SelectParams};
//!
//! let resource = sdk.admin().fulfillment_set();
//!
//! let set = resource
//!     .create_service_zone(
//!         "fuset_123",
//!         &CreateServiceZone::new("Nordics")
//!             .geo_zone(CreateGeoZone::country("dk"))
//!             .geo_zone(CreateGeoZone::country("se")),
//!         None,
//!     )
//!     .await?;
//!
//! let zone_id = &set.service_zones[0].id;
//! let zone = resource
//!     .retrieve_service_zone("fuset_123", zone_id, Some(&SelectParams::fields("id,name")))
//!     .await?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::build_path;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};

const FULFILLMENT_SET_PATH: &str = "/admin/fulfillment-sets/{id}";
const SERVICE_ZONES_PATH: &str = "/admin/fulfillment-sets/{id}/service-zones";
const SERVICE_ZONE_PATH: &str = "/admin/fulfillment-sets/{id}/service-zones/{zone_id}";

/// A fulfillment set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FulfillmentSet {
    /// The unique identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Set type, e.g. `shipping` or `pickup`.
    #[serde(rename = "type", default)]
    pub set_type: String,

    /// Service zones belonging to this set.
    #[serde(default)]
    pub service_zones: Vec<ServiceZone>,

    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the record was soft-deleted, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A service zone: a named area, made of geo zones, that a fulfillment set serves.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServiceZone {
    /// The unique identifier.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// The owning fulfillment set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_set_id: Option<String>,

    /// Areas covered by this zone.
    #[serde(default)]
    pub geo_zones: Vec<GeoZone>,

    /// Shipping options offered in this zone, as returned by the server.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping_options: Vec<serde_json::Value>,

    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the record was soft-deleted, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Granularity of a geo zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GeoZoneType {
    /// A whole country.
    #[default]
    Country,
    /// A province or state within a country.
    Province,
    /// A city within a province.
    City,
    /// Postal codes matched by an expression.
    Zip,
}

/// A geographic area inside a service zone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GeoZone {
    /// The unique identifier.
    pub id: String,

    /// Granularity of this zone.
    #[serde(rename = "type")]
    pub zone_type: GeoZoneType,

    /// ISO 3166-1 alpha-2 country code, lowercase.
    pub country_code: String,

    /// Province or state code, lowercase ISO 3166-2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,

    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Provider-defined postal code matcher for `zip` zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_expression: Option<serde_json::Value>,

    /// The owning service zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_zone_id: Option<String>,

    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the record was soft-deleted, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A geo zone in a create or update request.
///
/// Set `id` (via [`with_id`](Self::with_id)) to update an existing geo zone
/// instead of creating a new one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateGeoZone {
    /// Existing geo zone to update; omitted to create a new one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Granularity of this zone.
    #[serde(rename = "type")]
    pub zone_type: GeoZoneType,

    /// ISO 3166-1 alpha-2 country code, lowercase.
    pub country_code: String,

    /// Province or state code, lowercase ISO 3166-2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,

    /// City name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Provider-defined postal code matcher for `zip` zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_expression: Option<serde_json::Value>,
}

impl CreateGeoZone {
    /// A zone covering a whole country.
    #[must_use]
    pub fn country(country_code: impl Into<String>) -> Self {
        Self {
            id: None,
            zone_type: GeoZoneType::Country,
            country_code: country_code.into(),
            province_code: None,
            city: None,
            postal_expression: None,
        }
    }

    /// A zone covering one province of a country.
    #[must_use]
    pub fn province(country_code: impl Into<String>, province_code: impl Into<String>) -> Self {
        Self {
            zone_type: GeoZoneType::Province,
            province_code: Some(province_code.into()),
            ..Self::country(country_code)
        }
    }

    /// A zone covering one city.
    #[must_use]
    pub fn city(
        country_code: impl Into<String>,
        province_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            zone_type: GeoZoneType::City,
            city: Some(city.into()),
            ..Self::province(country_code, province_code)
        }
    }

    /// A zone covering the postal codes matched by `postal_expression`.
    #[must_use]
    pub fn zip(
        country_code: impl Into<String>,
        province_code: impl Into<String>,
        city: impl Into<String>,
        postal_expression: serde_json::Value,
    ) -> Self {
        Self {
            zone_type: GeoZoneType::Zip,
            postal_expression: Some(postal_expression),
            ..Self::city(country_code, province_code, city)
        }
    }

    /// Targets an existing geo zone.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Request body for creating a service zone.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateServiceZone {
    /// Display name.
    pub name: String,

    /// Geo zones to create with the service zone.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geo_zones: Vec<CreateGeoZone>,
}

impl CreateServiceZone {
    /// Starts a service zone with no geo zones.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geo_zones: Vec::new(),
        }
    }

    /// Adds a geo zone.
    #[must_use]
    pub fn geo_zone(mut self, zone: CreateGeoZone) -> Self {
        self.geo_zones.push(zone);
        self
    }
}

/// Request body for updating a service zone. Unset fields are left unchanged.
///
/// When `geo_zones` is set it replaces the zone's geo zones: entries with an
/// `id` are updated, entries without one are created, and omitted ones are
/// removed.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateServiceZone {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replacement set of geo zones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_zones: Option<Vec<CreateGeoZone>>,
}

/// Field selection applied to the returned resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectParams {
    /// Comma-separated fields; prefix with `+` to add to, or `-` to remove
    /// from, the default selection.
    pub fields: Option<String>,
}

impl SelectParams {
    /// Selects `fields`.
    #[must_use]
    pub fn fields(fields: impl Into<String>) -> Self {
        Self {
            fields: Some(fields.into()),
        }
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|fields| ("fields".to_string(), fields.clone()))
            .collect()
    }
}

/// Confirmation returned by delete routes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeleteResponse {
    /// ID of the deleted object.
    pub id: String,
    /// Kind of the deleted object, e.g. `fulfillment_set` or `service_zone`.
    pub object: String,
    /// Whether the object was deleted.
    pub deleted: bool,
    /// The parent the object was removed from, when the route returns it.
    #[serde(default)]
    pub parent: Option<FulfillmentSet>,
}

#[derive(Deserialize)]
struct FulfillmentSetEnvelope {
    fulfillment_set: FulfillmentSet,
}

#[derive(Deserialize)]
struct ServiceZoneEnvelope {
    service_zone: ServiceZone,
}

/// Admin operations on fulfillment sets and their service zones.
#[derive(Clone, Debug)]
pub struct FulfillmentSetResource {
    client: Arc<HttpClient>,
}

impl FulfillmentSetResource {
    /// Creates the resource on top of `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Deletes a fulfillment set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body is malformed.
    pub async fn delete(&self, id: &str) -> Result<DeleteResponse, HttpError> {
        let request = HttpRequest::builder(
            HttpMethod::Delete,
            build_path(FULFILLMENT_SET_PATH, &[("id", id)]),
        )
        .build()?;

        self.client.fetch(request).await
    }

    /// Adds a service zone to a fulfillment set and returns the updated set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body is malformed.
    pub async fn create_service_zone(
        &self,
        id: &str,
        body: &CreateServiceZone,
        query: Option<&SelectParams>,
    ) -> Result<FulfillmentSet, HttpError> {
        let request = HttpRequest::builder(
            HttpMethod::Post,
            build_path(SERVICE_ZONES_PATH, &[("id", id)]),
        )
        .body(serde_json::to_value(body)?)
        .query_pairs(query.map(SelectParams::query_pairs).unwrap_or_default())
        .build()?;

        let envelope: FulfillmentSetEnvelope = self.client.fetch(request).await?;
        Ok(envelope.fulfillment_set)
    }

    /// Retrieves one service zone of a fulfillment set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body is malformed.
    pub async fn retrieve_service_zone(
        &self,
        id: &str,
        zone_id: &str,
        query: Option<&SelectParams>,
    ) -> Result<ServiceZone, HttpError> {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            build_path(SERVICE_ZONE_PATH, &[("id", id), ("zone_id", zone_id)]),
        )
        .query_pairs(query.map(SelectParams::query_pairs).unwrap_or_default())
        .build()?;

        let envelope: ServiceZoneEnvelope = self.client.fetch(request).await?;
        Ok(envelope.service_zone)
    }

    /// Updates a service zone and returns the owning fulfillment set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body is malformed.
    pub async fn update_service_zone(
        &self,
        id: &str,
        zone_id: &str,
        body: &UpdateServiceZone,
        query: Option<&SelectParams>,
    ) -> Result<FulfillmentSet, HttpError> {
        let request = HttpRequest::builder(
            HttpMethod::Post,
            build_path(SERVICE_ZONE_PATH, &[("id", id), ("zone_id", zone_id)]),
        )
        .body(serde_json::to_value(body)?)
        .query_pairs(query.map(SelectParams::query_pairs).unwrap_or_default())
        .build()?;

        let envelope: FulfillmentSetEnvelope = self.client.fetch(request).await?;
        Ok(envelope.fulfillment_set)
    }

    /// Deletes a service zone. The response's `parent` is the updated set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the body is malformed.
    pub async fn delete_service_zone(
        &self,
        id: &str,
        zone_id: &str,
    ) -> Result<DeleteResponse, HttpError> {
        let request = HttpRequest::builder(
            HttpMethod::Delete,
            build_path(SERVICE_ZONE_PATH, &[("id", id), ("zone_id", zone_id)]),
        )
        .build()?;

        self.client.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fulfillment_set_deserialization() {
        let json = r#"{
            "id": "fuset_01",
            "name": "European Warehouse shipping",
            "type": "shipping",
            "created_at": "2024-05-01T10:00:00.000Z",
            "updated_at": "2024-05-01T10:00:00.000Z",
            "deleted_at": null,
            "service_zones": [{
                "id": "serzo_01",
                "name": "Europe",
                "fulfillment_set_id": "fuset_01",
                "geo_zones": [{
                    "id": "fgz_01",
                    "type": "province",
                    "country_code": "dk",
                    "province_code": "dk-84",
                    "city": null,
                    "postal_expression": null
                }]
            }]
        }"#;

        let set: FulfillmentSet = serde_json::from_str(json).unwrap();

        assert_eq!(set.id, "fuset_01");
        assert_eq!(set.set_type, "shipping");
        assert!(set.created_at.is_some());
        assert!(set.deleted_at.is_none());
        assert_eq!(set.service_zones.len(), 1);

        let zone = &set.service_zones[0];
        assert_eq!(zone.fulfillment_set_id.as_deref(), Some("fuset_01"));
        assert_eq!(zone.geo_zones[0].zone_type, GeoZoneType::Province);
        assert_eq!(zone.geo_zones[0].province_code.as_deref(), Some("dk-84"));
        assert!(zone.geo_zones[0].city.is_none());
    }

    #[test]
    fn test_create_service_zone_serialization() {
        let body = CreateServiceZone::new("Nordics")
            .geo_zone(CreateGeoZone::country("dk"))
            .geo_zone(CreateGeoZone::city("us", "us-ca", "San Francisco"));

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Nordics",
                "geo_zones": [
                    {"type": "country", "country_code": "dk"},
                    {
                        "type": "city",
                        "country_code": "us",
                        "province_code": "us-ca",
                        "city": "San Francisco"
                    }
                ]
            })
        );
    }

    #[test]
    fn test_create_service_zone_without_geo_zones_omits_field() {
        let value = serde_json::to_value(CreateServiceZone::new("Empty")).unwrap();
        assert_eq!(value, json!({"name": "Empty"}));
    }

    #[test]
    fn test_zip_geo_zone_carries_expression() {
        let zone = CreateGeoZone::zip("us", "us-ny", "New York", json!({"starts_with": "100"}))
            .with_id("fgz_9");
        let value = serde_json::to_value(&zone).unwrap();

        assert_eq!(value["type"], "zip");
        assert_eq!(value["id"], "fgz_9");
        assert_eq!(value["city"], "New York");
        assert_eq!(value["postal_expression"], json!({"starts_with": "100"}));
    }

    #[test]
    fn test_update_service_zone_only_sends_set_fields() {
        let body = UpdateServiceZone {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"name": "Renamed"}));

        assert_eq!(
            serde_json::to_value(UpdateServiceZone::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_select_params_query_pairs() {
        assert!(SelectParams::default().query_pairs().is_empty());
        assert_eq!(
            SelectParams::fields("id,name").query_pairs(),
            vec![("fields".to_string(), "id,name".to_string())]
        );
    }

    #[test]
    fn test_delete_response_with_parent() {
        let json = json!({
            "id": "serzo_01",
            "object": "service_zone",
            "deleted": true,
            "parent": {"id": "fuset_01", "name": "Main", "type": "shipping", "service_zones": []}
        });

        let response: DeleteResponse = serde_json::from_value(json).unwrap();
        assert!(response.deleted);
        assert_eq!(response.object, "service_zone");
        assert_eq!(response.parent.unwrap().id, "fuset_01");
    }

    #[test]
    fn test_geo_zone_type_serialization() {
        assert_eq!(serde_json::to_value(GeoZoneType::Zip).unwrap(), json!("zip"));
        let parsed: GeoZoneType = serde_json::from_value(json!("city")).unwrap();
        assert_eq!(parsed, GeoZoneType::City);
    }
}
