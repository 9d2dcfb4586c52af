//! # Hamburg Urban Data
//!
//! Asynchronous client for the parking datasets of the urban data
//! platform of Hamburg: disabled parking spots, park and ride
//! facilities, and garages.
//!
//! The API serves GeoJSON feature collections; this crate issues one
//! GET request per operation, validates the response content type, and
//! maps each raw feature into a typed record. Value-level oddities in
//! the data (unparsable timestamps, missing occupancy counts) degrade
//! to absent fields, while a structurally broken feature fails the
//! whole call.
//!
//! ```no_run
//! use hamburg_urban_data::{QueryOptions, UrbanDataClient, UrbanDataClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = UrbanDataClient::new(UrbanDataClientConfig::default());
//!     let spots = client.disabled_parkings(&QueryOptions::default()).await?;
//!     println!("{} disabled parking spots", spots.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    GarageQueryOptions, QueryOptions, UrbanDataClient, UrbanDataClientConfig, DEFAULT_BASE_URL,
};
pub use error::Error;
pub use models::{DisabledParking, Garage, GarageStatus, ParkAndRide, Tickets};
