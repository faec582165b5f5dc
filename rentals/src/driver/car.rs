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

//! Operations on one car.

use crate::db;
use crate::driver::{CAR_NOT_FOUND, Driver};
use crate::model::{Car, CarId, Rental};
use car_rental_core::db::{DbError, Executor};
use car_rental_core::driver::{DriverError, DriverResult};

/// Gets the car `id`, reporting its absence with a user-facing message.
pub(super) async fn get_existing_car(ex: &mut Executor, id: CarId) -> DriverResult<Car> {
    match db::get_car(ex, id).await {
        Ok(car) => Ok(car),
        Err(DbError::NotFound) => Err(DriverError::NotFound(CAR_NOT_FOUND.to_owned())),
        Err(e) => Err(e.into()),
    }
}

impl Driver {
    /// Gets the car identified by `id`.
    pub(crate) async fn get_car(self, id: CarId) -> DriverResult<Car> {
        get_existing_car(&mut self.db.ex().await?, id).await
    }

    /// Gets all rentals of the car identified by `id`, sorted by start date.
    pub(crate) async fn get_car_rentals(self, id: CarId) -> DriverResult<Vec<Rental>> {
        let mut tx = self.db.begin().await?;
        get_existing_car(tx.ex(), id).await?;
        let rentals = db::get_rentals_for_car(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(rentals)
    }
}
