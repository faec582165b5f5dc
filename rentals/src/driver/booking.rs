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

//! Extends the driver with the `book_rental` method.

use crate::db;
use crate::driver::car::get_existing_car;
use crate::driver::{ALREADY_RENTED, CAR_NOT_FOUND, Driver};
use crate::model::{CarId, Rental, RentalPeriod, UserName};
use car_rental_core::db::DbError;
use car_rental_core::driver::{DriverError, DriverResult};
use log::{info, warn};
use time::OffsetDateTime;

/// Translates database errors raised while storing a booking into user-facing errors.
///
/// The store refuses overlapping rentals on its own, which only happens here if another booking
/// for the same car committed after our overlap check ran.
fn map_booking_error(e: DbError, car_id: CarId) -> DriverError {
    match e {
        DbError::Conflict => {
            warn!("Concurrent booking of car {} detected by the database", car_id);
            DriverError::Conflict(ALREADY_RENTED.to_owned())
        }
        DbError::NotFound => DriverError::NotFound(CAR_NOT_FOUND.to_owned()),
        e => e.into(),
    }
}

impl Driver {
    /// Rents the car `car_id` to `user_name` from `start_date` to `end_date`, both inclusive.
    ///
    /// The booking is rejected if the requested dates share any instant with another rental of
    /// the same car.
    pub(crate) async fn book_rental(
        self,
        car_id: CarId,
        user_name: UserName,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
    ) -> DriverResult<Rental> {
        let period = RentalPeriod::new(start_date, end_date)?;

        let mut tx = self.db.begin_write().await?;

        get_existing_car(tx.ex(), car_id).await?;

        let existing = db::get_rentals_for_car(tx.ex(), car_id).await?;
        if let Some(other) = existing.iter().find(|other| period.overlaps(other.period())) {
            info!(
                "Rejected booking of car {} by {}: overlaps rental {}",
                car_id,
                user_name,
                other.id()
            );
            return Err(DriverError::Conflict(ALREADY_RENTED.to_owned()));
        }

        let now = self.clock.now_utc();
        let rental = db::create_rental(tx.ex(), car_id, user_name, period, now)
            .await
            .map_err(|e| map_booking_error(e, car_id))?;
        tx.commit().await.map_err(|e| map_booking_error(e, car_id))?;

        info!("Booked rental {} of car {} for {}", rental.id(), car_id, rental.user_name());
        Ok(rental)
    }
}
