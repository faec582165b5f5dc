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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::{Car, CarId, DailyRate, NewCar, Rental, RentalPeriod, UserName};
use crate::rest::app;
use axum::Router;
use car_rental_core::clocks::testutils::{SettableClock, utc_datetime};
use car_rental_core::db::{Db, DbError};
use std::sync::Arc;
use time::OffsetDateTime;

pub(crate) use crate::driver::testutils::days;

/// Returns the fixed time that the clock of the test app reports.
pub(crate) fn now() -> OffsetDateTime {
    utc_datetime(2023, 12, 15, 9, 30, 0)
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct inspection.
    db: Arc<dyn Db + Send + Sync>,

    /// The router of the app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a clock stopped at `now()`.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(car_rental_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(now()));
        let driver = Driver::new(db.clone(), clock);
        let app = app(driver);
        Self { db, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Adds a car to the catalog by directly modifying the database.
    pub(crate) async fn create_car(&self, make: &str, model: &str, daily_rate: f64) -> Car {
        let details =
            NewCar::new(make, model, 2021, DailyRate::new(daily_rate).unwrap()).unwrap();
        db::create_car(&mut self.db.ex().await.unwrap(), details).await.unwrap()
    }

    /// Gets all cars by directly querying the database.
    pub(crate) async fn get_cars(&self) -> Vec<Car> {
        db::get_cars(&mut self.db.ex().await.unwrap()).await.unwrap()
    }

    /// Books `period` of `car_id` for `user` by directly modifying the database.
    pub(crate) async fn create_rental(
        &self,
        car_id: CarId,
        user: &str,
        period: RentalPeriod,
    ) -> Rental {
        db::create_rental(
            &mut self.db.ex().await.unwrap(),
            car_id,
            UserName::new(user).unwrap(),
            period,
            utc_datetime(2023, 12, 1, 0, 0, 0),
        )
        .await
        .unwrap()
    }

    /// Gets all rentals of `car_id` by directly querying the database.
    pub(crate) async fn rentals_for(&self, car_id: CarId) -> Vec<Rental> {
        db::get_rentals_for_car(&mut self.db.ex().await.unwrap(), car_id).await.unwrap()
    }

    /// Gets the stored version of `rental`, if it still exists, by directly querying the
    /// database.
    pub(crate) async fn get_rental(&self, rental: &Rental) -> Option<Rental> {
        match db::get_rental(&mut self.db.ex().await.unwrap(), *rental.id()).await {
            Ok(rental) => Some(rental),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }
}
