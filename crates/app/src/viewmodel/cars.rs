//! Fleet screens: browsing, car details and booking, admin car management

use std::path::PathBuf;

use carhire_core::filter::distinct_values;
use carhire_core::validation::{self, validate_booking_dates};
use carhire_core::{
    quote, Booking, Car, CarDraft, CarFilter, CarStatus, NewBooking, PriceQuote, Route,
    ServerMessage,
};
use chrono::NaiveDate;

use super::{banner, ListScreen, ScreenError, ScreenResult};
use crate::state::AppState;

pub const UNAVAILABLE: &str = "This car is not available for the selected dates. Please choose different dates.";

pub type FleetScreen = ListScreen<Car, CarFilter>;

impl FleetScreen {
    /// Brand choices for the browse filter
    pub fn brands(&self) -> Vec<String> {
        distinct_values(self.items.items(), |car| car.brand.as_str())
    }

    pub fn fuels(&self) -> Vec<String> {
        distinct_values(self.items.items(), |car| car.types_of_fuel.as_str())
    }

    /// Empty-state text for the current filter
    pub fn empty_message(&self) -> &'static str {
        if self.items.is_empty() {
            "No cars in the fleet yet"
        } else if self.filter.search.trim().is_empty() {
            "No cars match your filter criteria"
        } else {
            "No cars match your search criteria"
        }
    }
}

/// Cars a customer can book right now
pub async fn browse(state: &AppState, filter: CarFilter) -> ScreenResult<FleetScreen> {
    state.enter(Route::BrowseCars)?;
    let mut screen = FleetScreen::default();
    screen
        .load(state.client.cars().available(), "Failed to load cars. Please try again.")
        .await?;
    Ok(screen.with_filter(filter))
}

/// The whole fleet, for the admin
pub async fn manage(state: &AppState, filter: CarFilter) -> ScreenResult<FleetScreen> {
    state.enter(Route::ManageCars)?;
    let mut screen = FleetScreen::default();
    screen
        .load(state.client.cars().list(), "Failed to load cars. Please try again.")
        .await?;
    Ok(screen.with_filter(filter))
}

/// One car with its images and a price preview for the chosen dates
#[derive(Debug)]
pub struct CarDetails {
    pub car: Car,
    pub image_urls: Vec<String>,
    pub quote: PriceQuote,
}

pub async fn details(
    state: &AppState,
    car_id: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ScreenResult<CarDetails> {
    state.enter(Route::CarDetails)?;
    let cars = state.client.cars();
    let car = cars
        .get(car_id)
        .await
        .map_err(banner("Failed to load car details. Please try again."))?;

    // A car without pictures is still worth showing
    let image_urls = match cars.images(car_id).await {
        Ok(images) => images
            .iter()
            .filter_map(|image| cars.image_url(image.car_image_id).ok())
            .map(|url| url.to_string())
            .collect(),
        Err(e) => {
            tracing::warn!(car_id, error = %e, "Could not load car images");
            Vec::new()
        }
    };

    let quote = quote(car.rate, start, end);
    Ok(CarDetails {
        car,
        image_urls,
        quote,
    })
}

/// Dates picked on the car details screen
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    pub car_id: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Validate the dates, confirm availability, then create the booking
pub async fn book(state: &AppState, request: BookingRequest, today: NaiveDate) -> ScreenResult<Booking> {
    let user = state.enter(Route::CarDetails)?;
    let (start, end) = validate_booking_dates(request.start, request.end, today)?;

    let available = state
        .client
        .rentals()
        .check_availability(request.car_id, start, end)
        .await
        .map_err(banner("Failed to check availability"))?;
    if !available {
        return Err(ScreenError::Banner(UNAVAILABLE.to_string()));
    }

    let booking = NewBooking {
        car_id: request.car_id,
        user_id: user.user_id,
        start_date: start,
        end_date: end,
    };
    state
        .client
        .rentals()
        .create(&booking)
        .await
        .map_err(banner("Failed to create booking. Please try again."))
}

/// Result of the add-car form
#[derive(Debug)]
pub struct AddedCar {
    pub car: Car,
    pub images_uploaded: usize,
    /// The car exists even when its images could not be stored
    pub image_error: Option<String>,
}

pub async fn add(
    state: &AppState,
    draft: &CarDraft,
    images: &[PathBuf],
    current_year: i32,
) -> ScreenResult<AddedCar> {
    state.enter(Route::AddCar)?;
    validation::validate_car(draft, current_year)?;
    validation::validate_images(images)?;

    let cars = state.client.cars();
    let car = cars.create(draft).await.map_err(banner("Failed to add car"))?;

    let (images_uploaded, image_error) = match cars.upload_images(car.car_id, images).await {
        Ok(count) => (count, None),
        Err(e) => {
            tracing::warn!(car_id = car.car_id, error = %e, "Image upload failed");
            let message = e.server_message().unwrap_or("Failed to upload images");
            (0, Some(message.to_string()))
        }
    };

    Ok(AddedCar {
        car,
        images_uploaded,
        image_error,
    })
}

/// Admin edits to a car; unset fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct CarPatch {
    pub brand: Option<String>,
    pub car_model: Option<String>,
    pub plate_number: Option<String>,
    pub types_of_fuel: Option<String>,
    pub rate: Option<f64>,
    pub year: Option<i32>,
    pub seating_capacity: Option<u32>,
    pub status: Option<CarStatus>,
    pub description: Option<String>,
}

impl CarPatch {
    pub fn apply(&self, draft: &mut CarDraft) {
        if let Some(brand) = &self.brand {
            draft.brand = brand.clone();
        }
        if let Some(model) = &self.car_model {
            draft.car_model = model.clone();
        }
        if let Some(plate) = &self.plate_number {
            draft.plate_number = plate.clone();
        }
        if let Some(fuel) = &self.types_of_fuel {
            draft.types_of_fuel = fuel.clone();
        }
        if let Some(rate) = self.rate {
            draft.rate = rate;
        }
        if let Some(year) = self.year {
            draft.year = year;
        }
        if let Some(seats) = self.seating_capacity {
            draft.seating_capacity = seats;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if self.description.is_some() {
            draft.description = self.description.clone();
        }
    }
}

pub async fn update(
    state: &AppState,
    car_id: i64,
    patch: &CarPatch,
    current_year: i32,
) -> ScreenResult<Car> {
    state.enter(Route::ManageCars)?;
    let cars = state.client.cars();
    let current = cars
        .get(car_id)
        .await
        .map_err(banner("Failed to load car details. Please try again."))?;
    let mut draft = CarDraft::from(&current);
    patch.apply(&mut draft);
    validation::validate_car(&draft, current_year)?;
    cars.update(car_id, &draft)
        .await
        .map_err(banner("Failed to update car"))
}

pub async fn set_status(state: &AppState, car_id: i64, status: CarStatus) -> ScreenResult<()> {
    state.enter(Route::ManageCars)?;
    state
        .client
        .cars()
        .update_status(car_id, status)
        .await
        .map_err(banner("Failed to update car status"))
}

pub async fn delete(state: &AppState, car_id: i64) -> ScreenResult<()> {
    state.enter(Route::ManageCars)?;
    state
        .client
        .cars()
        .delete(car_id)
        .await
        .map_err(banner("Failed to delete car"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in, state_in};
    use serde_json::json;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer(dir: &TempDir) -> AppState {
        signed_in(dir, json!({"userId": 3, "fullName": "Nimal", "role": "CUSTOMER"}))
    }

    #[tokio::test]
    async fn test_end_before_start_rejected_before_request() {
        let dir = TempDir::new().unwrap();
        let state = customer(&dir);
        let request = BookingRequest {
            car_id: 7,
            start: Some(day(2025, 3, 10)),
            end: Some(day(2025, 3, 8)),
        };
        // The backend is unreachable; a request would surface as a banner
        match book(&state, request, day(2025, 3, 1)).await {
            Err(ScreenError::Validation(fields)) => {
                assert_eq!(fields.get("endDate"), Some("End date must be after start date"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_booking_requires_login() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        let request = BookingRequest {
            car_id: 7,
            start: Some(day(2025, 3, 10)),
            end: Some(day(2025, 3, 12)),
        };
        assert!(matches!(
            book(&state, request, day(2025, 3, 1)).await,
            Err(ScreenError::Redirect(Route::Login))
        ));
    }

    #[tokio::test]
    async fn test_add_car_validates_form_first() {
        let dir = TempDir::new().unwrap();
        let state = signed_in(&dir, json!({"userId": 1, "role": "ADMIN"}));
        let draft = CarDraft {
            brand: "Toyota".to_string(),
            car_model: String::new(),
            plate_number: "CAB-1234".to_string(),
            types_of_fuel: "Petrol".to_string(),
            rate: 0.0,
            year: 2019,
            seating_capacity: 5,
            status: CarStatus::Available,
            description: None,
        };
        match add(&state, &draft, &[], 2025).await {
            Err(ScreenError::Validation(fields)) => {
                assert!(fields.get("carModel").is_some());
                assert!(fields.get("rate").is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_customer_cannot_manage_fleet() {
        let dir = TempDir::new().unwrap();
        let state = customer(&dir);
        assert!(matches!(
            delete(&state, 7).await,
            Err(ScreenError::Redirect(Route::Unauthorized))
        ));
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let car: Car = serde_json::from_value(json!({
            "carId": 1, "brand": "Toyota", "carModel": "Axio", "plateNumber": "CAB-1234",
            "typesOfFuel": "Petrol", "rate": 5000, "year": 2019, "seatingCapacity": 5,
            "status": "available", "description": "Clean"
        }))
        .unwrap();
        let mut draft = CarDraft::from(&car);
        let patch = CarPatch {
            rate: Some(5500.0),
            status: Some(CarStatus::Rented),
            ..Default::default()
        };
        patch.apply(&mut draft);
        assert_eq!(draft.rate, 5500.0);
        assert_eq!(draft.status, CarStatus::Rented);
        assert_eq!(draft.plate_number, "CAB-1234");
        assert_eq!(draft.description.as_deref(), Some("Clean"));
    }

    #[test]
    fn test_browse_options_and_empty_message() {
        let cars: Vec<Car> = serde_json::from_value(json!([
            {"carId": 1, "brand": "Toyota", "carModel": "Axio", "typesOfFuel": "Petrol", "rate": 5000, "status": "available"},
            {"carId": 2, "brand": "Honda", "carModel": "Vezel", "typesOfFuel": "Hybrid", "rate": 8000, "status": "available"},
            {"carId": 3, "brand": "Toyota", "carModel": "Prius", "typesOfFuel": "Hybrid", "rate": 7000, "status": "available"}
        ]))
        .unwrap();
        let mut screen = FleetScreen::default();
        screen.items.replace(cars);

        assert_eq!(screen.brands(), vec!["Honda", "Toyota"]);
        assert_eq!(screen.fuels(), vec!["Hybrid", "Petrol"]);

        screen.filter.brand = Some("Toyota".to_string());
        screen.filter.max_rate = Some(6000.0);
        let visible: Vec<i64> = screen.visible().iter().map(|c| c.car_id).collect();
        assert_eq!(visible, vec![1]);

        screen.filter.search = "civic".to_string();
        assert!(screen.visible().is_empty());
        assert_eq!(screen.empty_message(), "No cars match your search criteria");
    }
}
