// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! API to rent a car.

use crate::driver::Driver;
use crate::model::{CarId, RentalId, UserName, timestamp};
use axum::Json;
use axum::extract::{Path, State};
use car_rental_core::rest::RestError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Message sent to the server to book a car.
#[derive(Deserialize, Serialize)]
pub(crate) struct RentRequest {
    /// Name of the person renting the car.
    pub(crate) user_name: String,

    /// First day of the rental, inclusive.
    #[serde(with = "timestamp")]
    pub(crate) start_date: OffsetDateTime,

    /// Last day of the rental, inclusive.
    #[serde(with = "timestamp")]
    pub(crate) end_date: OffsetDateTime,
}

/// Message returned by the server after a successful booking.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct RentResponse {
    /// Human-readable description of the outcome.
    pub(crate) message: String,

    /// Identifier of the new rental, needed to cancel it later.
    pub(crate) rental_id: RentalId,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(car_id): Path<CarId>,
    Json(request): Json<RentRequest>,
) -> Result<Json<RentResponse>, RestError> {
    let user_name = UserName::new(request.user_name)?;
    let rental =
        driver.book_rental(car_id, user_name, request.start_date, request.end_date).await?;
    Ok(Json(RentResponse { message: "Rental successful".to_owned(), rental_id: *rental.id() }))
}

#[cfg(test)]
impl RentRequest {
    /// Creates a request for `user_name` to rent a car during `period`.
    pub(crate) fn new(user_name: &str, period: crate::model::RentalPeriod) -> Self {
        Self {
            user_name: user_name.to_owned(),
            start_date: period.start(),
            end_date: period.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rental;
    use crate::rest::testutils::*;
    use axum::http;
    use car_rental_core::{rest::testutils::OneShotBuilder, test_payload_must_be_json};
    use serde_json::json;

    fn route(car_id: &str) -> (http::Method, String) {
        (http::Method::POST, format!("/cars/{}/rent", car_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;

        let response = OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(RentRequest::new("Alice", days(1, 3)))
            .await
            .expect_json::<RentResponse>()
            .await;
        assert_eq!("Rental successful", response.message);

        let rentals = context.rentals_for(*car.id()).await;
        let exp_rental = Rental::new(
            response.rental_id,
            *car.id(),
            UserName::new("Alice").unwrap(),
            days(1, 3),
            now(),
        );
        assert_eq!(vec![exp_rental], rentals);
    }

    #[tokio::test]
    async fn test_ok_date_only_input() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;

        let request = json!({
            "user_name": "Alice",
            "start_date": "2024-01-01",
            "end_date": "2024-01-03T00:00:00"
        });
        let response = OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(request)
            .await
            .expect_json::<RentResponse>()
            .await;

        let rentals = context.rentals_for(*car.id()).await;
        assert_eq!(1, rentals.len());
        assert_eq!(response.rental_id, *rentals[0].id());
        assert_eq!(days(1, 3), *rentals[0].period());
    }

    #[tokio::test]
    async fn test_car_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route("55"))
            .send_json(RentRequest::new("Alice", days(1, 3)))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Car not found$")
            .await;
    }

    #[tokio::test]
    async fn test_already_rented() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;
        let existing = context.create_rental(*car.id(), "Alice", days(1, 3)).await;

        for period in [days(2, 4), days(3, 5), days(1, 1), days(1, 9)] {
            OneShotBuilder::new(context.app(), route(&car.id().to_string()))
                .send_json(RentRequest::new("Bob", period))
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error("^Car already rented for the selected dates$")
                .await;
        }

        assert_eq!(vec![existing], context.rentals_for(*car.id()).await);
    }

    #[tokio::test]
    async fn test_adjacent_dates_allowed() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;
        context.create_rental(*car.id(), "Alice", days(1, 3)).await;

        OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(RentRequest::new("Bob", days(4, 5)))
            .await
            .expect_json::<RentResponse>()
            .await;

        assert_eq!(2, context.rentals_for(*car.id()).await.len());
    }

    #[tokio::test]
    async fn test_end_before_start() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;

        let request = json!({
            "user_name": "Alice",
            "start_date": "2024-01-05T00:00:00Z",
            "end_date": "2024-01-01T00:00:00Z"
        });
        OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("before it starts")
            .await;

        assert!(context.rentals_for(*car.id()).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_user_name() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;

        OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(RentRequest::new("", days(1, 3)))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("User name cannot be empty")
            .await;

        assert!(context.rentals_for(*car.id()).await.is_empty());
    }

    #[tokio::test]
    async fn test_bad_timestamp() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;

        let request = json!({
            "user_name": "Alice",
            "start_date": "next tuesday",
            "end_date": "2024-01-01T00:00:00Z"
        });
        OneShotBuilder::new(context.app(), route(&car.id().to_string()))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNPROCESSABLE_ENTITY)
            .expect_text("Invalid timestamp 'next tuesday'")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route("1"));
}
