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

//! API to get the details of one rental.

use crate::driver::Driver;
use crate::model::{Rental, RentalId};
use axum::Json;
use axum::extract::{Path, State};
use car_rental_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(rental_id): Path<RentalId>,
    _: EmptyBody,
) -> Result<Json<Rental>, RestError> {
    let rental = driver.get_rental(rental_id).await?;
    Ok(Json(rental))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use car_rental_core::{rest::testutils::OneShotBuilder, test_payload_must_be_empty};

    fn route(rental_id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/rentals/{}", rental_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let car = context.create_car("Toyota", "Corolla", 45.0).await;
        let rental = context.create_rental(*car.id(), "Alice", days(1, 3)).await;

        let response = OneShotBuilder::new(context.app(), route(&rental.id().to_string()))
            .send_empty()
            .await
            .expect_json::<Rental>()
            .await;
        assert_eq!(rental, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("8"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Rental not found$")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route("1"));
}
