// Structures mirroring the API's JSON exactly as sent.
// Numbers, money and dates all arrive as strings; the domain conversions live in reservation.rs.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WireReservation {
    #[serde(default)]
    pub reservation_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(rename = "name")]
    pub room: String,
    pub creation_time: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub total_price: String,
    pub amount_paid: String,
    pub properties: WireReservationProperties,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub user_notes: Option<String>,
    #[serde(default)]
    pub regular_products: Option<Vec<WireRegularProduct>>,
}

// serde only applies a field default when the key is missing from the object,
// so "agency": "" stays empty and "agency": null is still an error
#[derive(Debug, Deserialize)]
pub struct WireReservationProperties {
    #[serde(default = "default_agency")]
    pub agency: String,
    pub persons: String,
    #[serde(default = "default_bed_format")]
    pub bed_format_required: String,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub walking_route: Option<String>,
    #[serde(default, rename = "First_Name_1")]
    pub guest1_first_name: Option<String>,
    #[serde(default, rename = "Last_name_1")]
    pub guest1_last_name: Option<String>,
    #[serde(default, rename = "First_Name_2")]
    pub guest2_first_name: Option<String>,
    #[serde(default, rename = "Last_name_2")]
    pub guest2_last_name: Option<String>,
}

pub const DEFAULT_AGENCY: &str = "Direct";
pub const DEFAULT_BED_FORMAT: &str = "Double";

fn default_agency() -> String {
    DEFAULT_AGENCY.to_string()
}

fn default_bed_format() -> String {
    DEFAULT_BED_FORMAT.to_string()
}

#[derive(Debug, Deserialize)]
pub struct WireRegularProduct {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: String,
}
