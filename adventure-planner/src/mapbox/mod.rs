//! Mapbox Directions and Search Box client.
//!
//! Key characteristics of the APIs as used here:
//! - Directions has no transit profile; transit is approximated from
//!   walking by the travel-time provider
//! - Search is two-step: `suggest` returns ids, `retrieve` returns the
//!   feature (coordinates, address, categories) for one id
//! - Coordinates are `[longitude, latitude]` on the wire

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{MapboxClient, MapboxConfig};
pub use convert::{ConversionError, category_from_tag, search_phrase};
pub use error::MapboxError;
pub use mock::MockMapboxClient;
pub use types::{DirectionsResponse, RetrieveResponse, SuggestResponse};
