//! Fleet and car image endpoints

use std::path::Path;

use carhire_core::models::{Car, CarDraft, CarImage, CarStatus};
use carhire_core::validation;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;

/// Server-side search parameters; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types_of_fuel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarStatus>,
}

pub struct CarService<'a> {
    client: &'a ApiClient,
}

impl<'a> CarService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Car>> {
        let request = self.client.request(Method::GET, &["api", "cars"])?;
        self.client.send_json(request, "Failed to fetch cars").await
    }

    pub async fn get(&self, car_id: i64) -> Result<Car> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", &car_id.to_string()])?;
        self.client
            .send_json(request, "Failed to fetch car details")
            .await
    }

    pub async fn available(&self) -> Result<Vec<Car>> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", "status", "available"])?;
        self.client
            .send_json(request, "Failed to fetch available cars")
            .await
    }

    pub async fn by_brand(&self, brand: &str) -> Result<Vec<Car>> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", "brand", brand])?;
        self.client
            .send_json(request, "Failed to fetch cars by brand")
            .await
    }

    pub async fn by_fuel(&self, fuel: &str) -> Result<Vec<Car>> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", "fuel", fuel])?;
        self.client
            .send_json(request, "Failed to fetch cars by fuel type")
            .await
    }

    pub async fn price_range(&self, min_rate: f64, max_rate: f64) -> Result<Vec<Car>> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", "price-range"])?
            .query(&[("minRate", min_rate), ("maxRate", max_rate)]);
        self.client
            .send_json(request, "Failed to fetch cars by price range")
            .await
    }

    pub async fn search(&self, search: &CarSearch) -> Result<Vec<Car>> {
        let request = self
            .client
            .request(Method::GET, &["api", "cars", "search"])?
            .query(search);
        self.client.send_json(request, "Failed to search cars").await
    }

    pub async fn create(&self, draft: &CarDraft) -> Result<Car> {
        let request = self
            .client
            .request(Method::POST, &["api", "cars"])?
            .json(draft);
        let car: Car = self.client.send_json(request, "Failed to add car").await?;
        info!(car_id = car.car_id, plate = %car.plate_number, "Car added");
        Ok(car)
    }

    pub async fn update(&self, car_id: i64, draft: &CarDraft) -> Result<Car> {
        let request = self
            .client
            .request(Method::PUT, &["api", "cars", &car_id.to_string()])?
            .json(draft);
        let car = self.client.send_json(request, "Failed to update car").await?;
        info!(car_id, "Car updated");
        Ok(car)
    }

    pub async fn update_status(&self, car_id: i64, status: CarStatus) -> Result<()> {
        let request = self
            .client
            .request(Method::PUT, &["api", "cars", &car_id.to_string(), "status"])?
            .json(&json!({ "status": status }));
        self.client
            .send(request, "Failed to update car status")
            .await?;
        info!(car_id, status = %status, "Car status changed");
        Ok(())
    }

    pub async fn delete(&self, car_id: i64) -> Result<()> {
        let request = self
            .client
            .request(Method::DELETE, &["api", "cars", &car_id.to_string()])?;
        self.client.send(request, "Failed to delete car").await?;
        info!(car_id, "Car deleted");
        Ok(())
    }

    pub async fn images(&self, car_id: i64) -> Result<Vec<CarImage>> {
        let request = self
            .client
            .request(Method::GET, &["api", "car-images", "car", &car_id.to_string()])?;
        self.client
            .send_json(request, "Failed to fetch car images")
            .await
    }

    /// Where an image can be viewed; no request is made
    pub fn image_url(&self, image_id: i64) -> Result<Url> {
        self.client
            .url(&["api", "car-images", "view", &image_id.to_string()])
    }

    /// Upload image files for a car as one multipart request.
    ///
    /// Returns the number of files sent.
    pub async fn upload_images<P: AsRef<Path>>(&self, car_id: i64, paths: &[P]) -> Result<usize> {
        validation::validate_images(paths).map_err(carhire_core::Error::from)?;
        if paths.is_empty() {
            return Ok(0);
        }

        let mut form = Form::new();
        for path in paths {
            let path = path.as_ref();
            let mime = validation::image_mime(path).unwrap_or("application/octet-stream");
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            let data = tokio::fs::read(path).await?;
            let part = Part::bytes(data).file_name(file_name).mime_str(mime)?;
            form = form.part("files", part);
        }

        let request = self
            .client
            .request(
                Method::POST,
                &["api", "car-images", "upload-multiple", &car_id.to_string()],
            )?
            .multipart(form);
        self.client
            .send(request, "Failed to upload images")
            .await?;
        info!(car_id, count = paths.len(), "Car images uploaded");
        Ok(paths.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubServer;
    use tempfile::TempDir;

    const CAR_JSON: &str = r#"{"carId":7,"brand":"Toyota","carModel":"Axio","plateNumber":"CAB-1234","typesOfFuel":"Petrol","rate":5000,"year":2019,"seatingCapacity":5,"status":"available"}"#;

    #[tokio::test]
    async fn test_list_and_get() {
        let server = StubServer::start(|req| match req.path() {
            "/api/cars" => (200, format!("[{}]", CAR_JSON)),
            "/api/cars/7" => (200, CAR_JSON.to_string()),
            _ => (404, r#"{"message":"Car not found"}"#.to_string()),
        })
        .await;
        let client = server.client();

        let cars = client.cars().list().await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].title(), "Toyota Axio");

        let car = client.cars().get(7).await.unwrap();
        assert_eq!(car.rate, 5000.0);

        let err = client.cars().get(99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_sends_only_set_filters() {
        let server = StubServer::start(|_| (200, "[]".to_string())).await;
        let search = CarSearch {
            brand: Some("Toyota".to_string()),
            min_rate: Some(3000.0),
            ..Default::default()
        };
        server.client().cars().search(&search).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].path(), "/api/cars/search");
        let query = requests[0].query().unwrap();
        assert!(query.starts_with("brand=Toyota&minRate=3000"));
        assert!(!query.contains("maxRate"));
    }

    #[tokio::test]
    async fn test_update_status_body() {
        let server = StubServer::start(|_| (200, CAR_JSON.to_string())).await;
        server
            .client()
            .cars()
            .update_status(7, CarStatus::UnderMaintenance)
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].path(), "/api/cars/7/status");
        assert_eq!(requests[0].json()["status"], "under maintenance");
    }

    #[test]
    fn test_image_url() {
        let client = ApiClient::with_http(reqwest::Client::new(), "http://localhost:8080").unwrap();
        let url = client.cars().image_url(12).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/car-images/view/12");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_images_before_sending() {
        let server = StubServer::start(|_| (200, String::new())).await;
        let err = server
            .client()
            .cars()
            .upload_images(7, &["brochure.pdf"])
            .await
            .unwrap_err();
        assert_eq!(
            err.field_errors().and_then(|f| f.get("images")),
            Some("Only image files are allowed")
        );
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_files() {
        let dir = TempDir::new().unwrap();
        let front = dir.path().join("front.jpg");
        let side = dir.path().join("side.png");
        std::fs::write(&front, b"jpeg-bytes").unwrap();
        std::fs::write(&side, b"png-bytes").unwrap();

        let server = StubServer::start(|_| (200, "[]".to_string())).await;
        let sent = server
            .client()
            .cars()
            .upload_images(7, &[front, side])
            .await
            .unwrap();
        assert_eq!(sent, 2);

        let requests = server.requests();
        assert_eq!(requests[0].path(), "/api/car-images/upload-multiple/7");
        assert!(requests[0]
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data"));
        let body = requests[0].body_text();
        assert_eq!(body.matches("name=\"files\"").count(), 2);
        assert!(body.contains("filename=\"front.jpg\""));
        assert!(body.to_lowercase().contains("content-type: image/png"));
    }
}
