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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Car, CarId, DailyRate, NewCar, Rental, RentalPeriod, UserName};
use car_rental_core::clocks::testutils::{SettableClock, utc_datetime};
use car_rental_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct inspection.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver to timestamp bookings.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(car_rental_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(utc_datetime(2023, 12, 15, 9, 0, 0)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets the clock used by the driver.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Adds a car to the catalog by directly modifying the database.
    pub(crate) async fn create_car(&self, make: &str, model: &str) -> Car {
        let details = NewCar::new(make, model, 2020, DailyRate::new(45.0).unwrap()).unwrap();
        db::create_car(&mut self.ex().await, details).await.unwrap()
    }

    /// Books `period` of `car_id` for `user` by directly modifying the database.
    pub(crate) async fn create_rental(
        &self,
        car_id: CarId,
        user: &str,
        period: RentalPeriod,
    ) -> Rental {
        let now = utc_datetime(2023, 12, 1, 0, 0, 0);
        db::create_rental(&mut self.ex().await, car_id, UserName::new(user).unwrap(), period, now)
            .await
            .unwrap()
    }

    /// Gets all rentals of `car_id` by directly querying the database.
    pub(crate) async fn rentals_for(&self, car_id: CarId) -> Vec<Rental> {
        db::get_rentals_for_car(&mut self.ex().await, car_id).await.unwrap()
    }
}

/// Syntactic sugar to build a period that spans from the midnight of day `start` to the midnight
/// of day `end` of January 2024.
pub(crate) fn days(start: u8, end: u8) -> RentalPeriod {
    let start = utc_datetime(2024, 1, start, 0, 0, 0);
    let end = utc_datetime(2024, 1, end, 0, 0, 0);
    RentalPeriod::new(start, end).unwrap()
}
