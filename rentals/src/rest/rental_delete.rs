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

//! API to cancel a rental.

use crate::driver::Driver;
use crate::model::RentalId;
use axum::Json;
use axum::extract::{Path, State};
use car_rental_core::rest::{EmptyBody, MessageResponse, RestError};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(rental_id): Path<RentalId>,
    _: EmptyBody,
) -> Result<Json<MessageResponse>, RestError> {
    driver.cancel_rental(rental_id).await?;
    Ok(Json(MessageResponse::new("Rental canceled")))
}
