//! Admin API resources.
//!
//! Resources are reached through [`Admin`], which shares the client's
//! transport and therefore its credential:
//!
//! ```rust,ignore
//! use commerce_sdk::admin::{CreateGeoZone, CreateServiceZone};
//!
//! let fulfillment_set = sdk
//!     .admin()
//!     .fulfillment_set()
//!     .create_service_zone(
//!         "fuset_123",
//!         &CreateServiceZone::new("Europe").geo_zone(CreateGeoZone::country("dk")),
//!         None,
//!     )
//!     .await?;
//! ```

mod fulfillment_set;

use std::sync::Arc;

use crate::clients::HttpClient;

pub use fulfillment_set::{
    CreateGeoZone, CreateServiceZone, DeleteResponse, FulfillmentSet, FulfillmentSetResource,
    GeoZone, GeoZoneType, SelectParams, ServiceZone, UpdateServiceZone,
};

/// Entry point for admin resources.
#[derive(Clone, Debug)]
pub struct Admin {
    fulfillment_set: FulfillmentSetResource,
}

impl Admin {
    /// Creates the admin resource group on top of `client`.
    #[must_use]
    pub const fn new(client: Arc<HttpClient>) -> Self {
        Self {
            fulfillment_set: FulfillmentSetResource::new(client),
        }
    }

    /// Fulfillment sets and their service zones.
    #[must_use]
    pub const fn fulfillment_set(&self) -> &FulfillmentSetResource {
        &self.fulfillment_set
    }
}

/// Interpolates `{name}` placeholders with percent-encoded values.
pub(crate) fn build_path(template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}
