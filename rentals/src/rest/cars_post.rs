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

//! API to add a car to the catalog.

use crate::driver::Driver;
use crate::model::{Car, DailyRate, NewCar};
use axum::Json;
use axum::extract::State;
use car_rental_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to add a car.
#[derive(Deserialize, Serialize)]
pub(crate) struct CarRequest {
    /// Manufacturer of the car.
    pub(crate) make: String,

    /// Model name of the car.
    pub(crate) model: String,

    /// Model year of the car.
    pub(crate) year: i32,

    /// Price of renting the car for one day.
    pub(crate) daily_rate: f64,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CarRequest>,
) -> Result<Json<Car>, RestError> {
    let daily_rate = DailyRate::new(request.daily_rate)?;
    let details = NewCar::new(request.make, request.model, request.year, daily_rate)?;
    let car = driver.create_car(details).await?;
    Ok(Json(car))
}
