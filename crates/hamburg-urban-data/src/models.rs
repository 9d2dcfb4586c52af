//! Typed records for the parking datasets.
//!
//! Each record is built from one raw GeoJSON feature. Structural
//! absence (`properties`, `geometry`, required fields) aborts the
//! mapping with [`Error::Mapping`]; value-level oddities such as an
//! unparsable timestamp or a non-numeric occupancy count degrade to
//! `None` instead.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Europe::Berlin;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Timestamp layout used by the park and ride dataset.
pub const PARK_AND_RIDE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout used by the garage dataset.
pub const GARAGE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// A reserved disabled parking spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisabledParking {
    /// Feature identifier assigned by the dataset.
    pub spot_id: String,
    /// Nearest street address, surrounding whitespace removed.
    pub street: Option<String>,
    /// Time restriction that applies to the spot, if any.
    pub limitation: Option<String>,
    /// Number of parking spots at this location.
    pub number: i64,
    /// Longitude of the spot.
    pub longitude: f64,
    /// Latitude of the spot.
    pub latitude: f64,
}

impl DisabledParking {
    /// Map one raw feature onto a [`DisabledParking`] record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when `properties`, `geometry`, or a
    /// required field is absent.
    pub fn from_feature(feature: &Value) -> Result<Self, Error> {
        let attr = properties(feature)?;
        let (longitude, latitude) = coordinates(feature)?;
        Ok(Self {
            spot_id: spot_id(feature)?,
            street: strip_spaces(str_field(attr, "nahe_adresse")),
            limitation: strip_spaces(str_field(attr, "befristung")),
            number: required_int(attr, "anzahl")?,
            longitude,
            latitude,
        })
    }
}

/// Ticket prices of a park and ride facility, in euro. Absent when the
/// facility does not sell that ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tickets {
    /// Price of a single-day ticket.
    pub day: Option<i64>,
    /// Price of a 30-day ticket.
    pub month: Option<i64>,
    /// Price of a one-year ticket.
    pub year: Option<i64>,
}

/// A park and ride facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkAndRide {
    /// Feature identifier assigned by the dataset.
    pub spot_id: String,
    /// Name of the facility.
    pub name: String,
    /// Kind of facility, for example a parking deck.
    pub park_type: String,
    /// Street address.
    pub address: String,
    /// Year the facility was built.
    pub construction_year: i64,
    /// Public transport lines served nearby.
    pub public_transport_line: String,
    /// Number of disabled parking spaces.
    pub disabled_parking_spaces: i64,
    /// Ticket prices.
    pub tickets: Tickets,
    /// Homepage of the facility.
    pub url: String,
    /// Currently free spaces.
    pub free_space: i64,
    /// Total number of spaces.
    pub capacity: i64,
    /// Free spaces as a percentage of capacity, one decimal place.
    pub availability_pct: Option<f64>,
    /// Longitude of the facility.
    pub longitude: f64,
    /// Latitude of the facility.
    pub latitude: f64,
    /// When the occupancy data was last refreshed, in Europe/Berlin
    /// civil time. Absent when the dataset value is unparsable.
    pub updated_at: Option<DateTime<Tz>>,
}

impl ParkAndRide {
    /// Map one raw feature onto a [`ParkAndRide`] record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when `properties`, `geometry`, or a
    /// required field is absent.
    pub fn from_feature(feature: &Value) -> Result<Self, Error> {
        let attr = properties(feature)?;
        let (longitude, latitude) = coordinates(feature)?;
        Ok(Self {
            spot_id: spot_id(feature)?,
            name: required_str(attr, "name")?,
            park_type: required_str(attr, "art")?,
            address: required_str(attr, "adresse")?,
            construction_year: required_int(attr, "baujahr")?,
            public_transport_line: required_str(attr, "linie")?,
            disabled_parking_spaces: required_int(attr, "stellplaetze_behinderte_gesamt")?,
            tickets: Tickets {
                day: int_field(attr, "ticket_1_tag"),
                month: int_field(attr, "ticket_30_tage"),
                year: int_field(attr, "ticket_1_jahr"),
            },
            url: required_str(attr, "homepage")?,
            free_space: required_int(attr, "stellplaetze_frei")?,
            capacity: required_int(attr, "stellplaetze_gesamt")?,
            availability_pct: availability_pct(
                attr.get("stellplaetze_frei"),
                attr.get("stellplaetze_gesamt"),
            ),
            longitude,
            latitude,
            updated_at: parse_timestamp(
                str_field(attr, "aktualitaet_belegungsdaten"),
                PARK_AND_RIDE_TIME_FORMAT,
            ),
        })
    }
}

/// Occupancy status reported for a garage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GarageStatus {
    /// Spaces are available (`frei`).
    Free,
    /// Nearly full (`nahezu belegt`).
    AlmostFull,
    /// No spaces left (`besetzt`).
    Full,
    /// The garage reports no occupancy data (`keine Auslastungsdaten`).
    NoData,
}

impl GarageStatus {
    fn from_raw(raw: &str) -> Result<Self, Error> {
        match raw {
            "frei" => Ok(Self::Free),
            "nahezu belegt" => Ok(Self::AlmostFull),
            "besetzt" => Ok(Self::Full),
            "keine Auslastungsdaten" => Ok(Self::NoData),
            other => Err(Error::Mapping(format!("situation: `{other}`"))),
        }
    }
}

/// A parking garage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Garage {
    /// Feature identifier assigned by the dataset.
    pub spot_id: String,
    /// Name of the garage.
    pub name: String,
    /// Kind of garage.
    pub park_type: String,
    /// Number of disabled parking spaces, when reported.
    pub disabled_parking_spaces: Option<i64>,
    /// Current occupancy status.
    pub status: GarageStatus,
    /// Street address composed from street and house number. Absent
    /// when the dataset carries no street.
    pub address: Option<String>,
    /// Price information. A blank dataset value normalizes to absent.
    pub price: Option<String>,
    /// Origin of the occupancy data.
    pub data_origin: Option<String>,
    /// Currently free spaces, when reported.
    pub free_space: Option<i64>,
    /// Total number of spaces, when reported.
    pub capacity: Option<i64>,
    /// Free spaces as a percentage of capacity, one decimal place.
    pub availability_pct: Option<f64>,
    /// Longitude of the garage.
    pub longitude: f64,
    /// Latitude of the garage.
    pub latitude: f64,
    /// When the occupancy data was received, in Europe/Berlin civil
    /// time. Absent when the dataset value is unparsable.
    pub updated_at: Option<DateTime<Tz>>,
}

impl Garage {
    /// Map one raw feature onto a [`Garage`] record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mapping`] when `properties`, `geometry`, or a
    /// required field is absent, or when the reported status is not
    /// one of the known values.
    pub fn from_feature(feature: &Value) -> Result<Self, Error> {
        let attr = properties(feature)?;
        let (longitude, latitude) = coordinates(feature)?;
        let address = str_field(attr, "strasse").map(|street| {
            match display_field(attr, "hausnr") {
                Some(number) => format!("{street} {number}"),
                None => street.to_string(),
            }
        });
        Ok(Self {
            spot_id: spot_id(feature)?,
            name: required_str(attr, "name")?,
            park_type: required_str(attr, "art")?,
            disabled_parking_spaces: int_field(attr, "behindertenst"),
            status: GarageStatus::from_raw(&required_str(attr, "situation")?)?,
            address,
            price: str_field(attr, "preise")
                .filter(|price| *price != " ")
                .map(str::to_string),
            data_origin: str_field(attr, "datenherkunft").map(str::to_string),
            free_space: int_field(attr, "frei"),
            capacity: int_field(attr, "stellplaetze_gesamt"),
            availability_pct: availability_pct(
                attr.get("frei"),
                attr.get("stellplaetze_gesamt"),
            ),
            longitude,
            latitude,
            updated_at: parse_timestamp(str_field(attr, "received"), GARAGE_TIME_FORMAT),
        })
    }
}

/// Free capacity as a percentage of total capacity, rounded to one
/// decimal place. `None` when either input is absent or non-numeric,
/// or when the capacity is zero; never an error.
#[must_use]
pub fn availability_pct(free_space: Option<&Value>, capacity: Option<&Value>) -> Option<f64> {
    let free = free_space?.as_f64()?;
    let capacity = capacity?.as_f64()?;
    if capacity == 0.0 {
        return None;
    }
    Some((free / capacity * 1000.0).round() / 10.0)
}

/// Parse a dataset timestamp with the given layout and attach the
/// Europe/Berlin civil timezone. `None` on absent input or any parse
/// failure.
#[must_use]
pub fn parse_timestamp(value: Option<&str>, format: &str) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(value?, format).ok()?;
    Berlin.from_local_datetime(&naive).single()
}

/// Remove surrounding whitespace, keeping `None` absent. A string that
/// trims down to nothing stays an empty string.
#[must_use]
pub fn strip_spaces(value: Option<&str>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

fn properties(feature: &Value) -> Result<&Value, Error> {
    feature
        .get("properties")
        .filter(|attr| !attr.is_null())
        .ok_or_else(|| Error::Mapping("properties".to_string()))
}

fn coordinates(feature: &Value) -> Result<(f64, f64), Error> {
    let coords = feature
        .get("geometry")
        .filter(|geometry| !geometry.is_null())
        .and_then(|geometry| geometry.get("coordinates"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Mapping("geometry".to_string()))?;
    let longitude = coords
        .first()
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Mapping("geometry.coordinates[0]".to_string()))?;
    let latitude = coords
        .get(1)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Mapping("geometry.coordinates[1]".to_string()))?;
    Ok((longitude, latitude))
}

fn spot_id(feature: &Value) -> Result<String, Error> {
    match feature.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) if !other.is_null() => Ok(other.to_string()),
        _ => Err(Error::Mapping("id".to_string())),
    }
}

fn str_field<'a>(attr: &'a Value, key: &str) -> Option<&'a str> {
    attr.get(key).and_then(Value::as_str)
}

fn int_field(attr: &Value, key: &str) -> Option<i64> {
    attr.get(key).and_then(Value::as_i64)
}

/// String rendering of a field that may arrive as a string or number,
/// such as a house number.
fn display_field(attr: &Value, key: &str) -> Option<String> {
    match attr.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn required_str(attr: &Value, key: &str) -> Result<String, Error> {
    str_field(attr, key)
        .map(str::to_string)
        .ok_or_else(|| Error::Mapping(key.to_string()))
}

fn required_int(attr: &Value, key: &str) -> Result<i64, Error> {
    int_field(attr, key).ok_or_else(|| Error::Mapping(key.to_string()))
}
