// Domain model for bookings, built from the wire structures with the API's coercion rules

use crate::lenient::{decimal_or_default, parse_or_default};
use crate::timestamp::{parse_timestamp, TimestampError, WIRE_ZONE};
use crate::wire::{WireRegularProduct, WireReservation, WireReservationProperties};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("field `{field}`: {source}")]
    Timestamp {
        field: &'static str,
        source: TimestampError,
    },
}

// One booking as returned by the API.
// `reservation_id` is `None` after decoding a single-fetch payload, which never
// carries its own id; the client fills it in from the request.
// Deserialize reads the API's wire shape through WireReservation while Serialize
// writes the domain shape below, so serialized output is not a wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireReservation")]
pub struct Reservation {
    pub reservation_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub room: String,
    pub creation_time: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub email: String,
    pub phone_number: String,
    pub status: i64,
    pub total_price: Decimal,
    pub amount_paid: Decimal,
    pub properties: ReservationProperties,
    pub admin_notes: Option<String>,
    pub user_notes: Option<String>,
    pub regular_products: Option<Vec<RegularProduct>>,
}

// Same split as Reservation: wire keys in, domain keys out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireReservationProperties")]
pub struct ReservationProperties {
    pub agency: String,
    pub persons: i64,
    pub bed_format_required: String,
    pub allergies: Option<String>,
    pub walking_route: Option<String>,
    pub guest1_first_name: Option<String>,
    pub guest1_last_name: Option<String>,
    pub guest2_first_name: Option<String>,
    pub guest2_last_name: Option<String>,
}

// A purchased add-on line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRegularProduct")]
pub struct RegularProduct {
    pub id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i64,
}

// Payload of the list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationList {
    pub results: Vec<Reservation>,
}

fn timestamp_field(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ModelError> {
    parse_timestamp(raw).map_err(|source| ModelError::Timestamp { field, source })
}

impl TryFrom<WireReservation> for Reservation {
    type Error = ModelError;

    fn try_from(item: WireReservation) -> Result<Self, Self::Error> {
        Ok(Reservation {
            reservation_id: item.reservation_id,
            first_name: item.first_name,
            last_name: item.last_name,
            room: item.room,
            creation_time: timestamp_field("creation_time", &item.creation_time)?,
            start_time: timestamp_field("start_time", &item.start_time)?,
            end_time: timestamp_field("end_time", &item.end_time)?,
            email: item.email,
            phone_number: item.phone_number,
            status: parse_or_default("status", &item.status),
            total_price: decimal_or_default("total_price", &item.total_price),
            amount_paid: decimal_or_default("amount_paid", &item.amount_paid),
            properties: item.properties.into(),
            admin_notes: item.admin_notes,
            user_notes: item.user_notes,
            regular_products: item
                .regular_products
                .map(|products| products.into_iter().map(RegularProduct::from).collect()),
        })
    }
}

impl From<WireReservationProperties> for ReservationProperties {
    fn from(item: WireReservationProperties) -> Self {
        ReservationProperties {
            agency: item.agency,
            persons: parse_or_default("persons", &item.persons),
            bed_format_required: item.bed_format_required,
            allergies: item.allergies,
            walking_route: item.walking_route,
            guest1_first_name: item.guest1_first_name,
            guest1_last_name: item.guest1_last_name,
            guest2_first_name: item.guest2_first_name,
            guest2_last_name: item.guest2_last_name,
        }
    }
}

impl From<WireRegularProduct> for RegularProduct {
    fn from(item: WireRegularProduct) -> Self {
        RegularProduct {
            id: item.id,
            name: item.name,
            unit_price: decimal_or_default("unit_price", &item.unit_price),
            quantity: parse_or_default("quantity", &item.quantity),
        }
    }
}

impl Reservation {
    pub fn amount_due(&self) -> Decimal {
        self.total_price - self.amount_paid
    }

    // Counted on London calendar dates, so a late check-in still counts as a night
    pub fn nights(&self) -> i64 {
        let start = self.start_time.with_timezone(&WIRE_ZONE).date_naive();
        let end = self.end_time.with_timezone(&WIRE_ZONE).date_naive();
        (end - start).num_days()
    }

    pub fn named_guests(&self) -> Vec<String> {
        let p = &self.properties;
        [
            (&p.guest1_first_name, &p.guest1_last_name),
            (&p.guest2_first_name, &p.guest2_last_name),
        ]
        .into_iter()
        .filter_map(|(first, last)| {
            let name = format!(
                "{} {}",
                first.as_deref().unwrap_or("").trim(),
                last.as_deref().unwrap_or("").trim()
            );
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
    }
}

impl RegularProduct {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
