//! Car models

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::{from_str_insensitive, UnknownVariant};

/// Fleet status of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CarStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "rented")]
    Rented,
    #[serde(rename = "under maintenance")]
    UnderMaintenance,
}

impl CarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "available",
            CarStatus::Rented => "rented",
            CarStatus::UnderMaintenance => "under maintenance",
        }
    }

    pub fn all() -> &'static [CarStatus] {
        &[
            CarStatus::Available,
            CarStatus::Rented,
            CarStatus::UnderMaintenance,
        ]
    }
}

impl FromStr for CarStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "available" => Ok(CarStatus::Available),
            "rented" => Ok(CarStatus::Rented),
            "under maintenance" | "maintenance" => Ok(CarStatus::UnderMaintenance),
            _ => Err(UnknownVariant {
                kind: "car status",
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for CarStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_str_insensitive(deserializer)
    }
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A car in the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub car_id: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub car_model: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub types_of_fuel: String,
    /// Price per day
    #[serde(default, deserialize_with = "super::lenient_number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub seating_capacity: u32,
    pub status: CarStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl Car {
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.car_model)
    }
}

/// Body for creating or editing a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub brand: String,
    pub car_model: String,
    pub plate_number: String,
    pub types_of_fuel: String,
    pub rate: f64,
    pub year: i32,
    pub seating_capacity: u32,
    pub status: CarStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Car> for CarDraft {
    fn from(car: &Car) -> Self {
        Self {
            brand: car.brand.clone(),
            car_model: car.car_model.clone(),
            plate_number: car.plate_number.clone(),
            types_of_fuel: car.types_of_fuel.clone(),
            rate: car.rate,
            year: car.year,
            seating_capacity: car.seating_capacity,
            status: car.status,
            description: car.description.clone(),
        }
    }
}

/// Image metadata attached to a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarImage {
    pub car_image_id: i64,
    #[serde(default)]
    pub car_id: Option<i64>,
    #[serde(default)]
    pub file_name: Option<String>,
}
