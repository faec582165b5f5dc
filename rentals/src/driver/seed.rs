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

//! Extends the driver with the `seed_cars` method.

use crate::db;
use crate::driver::Driver;
use crate::model::{Car, DailyRate, NewCar};
use car_rental_core::driver::DriverResult;
use log::info;

/// Sample catalog as `(make, model, year, daily rate)` tuples.
const SAMPLE_CARS: &[(&str, &str, i32, f64)] = &[
    ("Toyota", "Corolla", 2020, 45.00),
    ("Honda", "Civic", 2022, 55.00),
    ("Ford", "Focus", 2019, 40.00),
    ("Tesla", "Model 3", 2023, 85.00),
];

impl Driver {
    /// Populates an empty catalog with a few sample cars and returns them.
    ///
    /// Does nothing if the catalog already has cars so that restarting the service does not
    /// duplicate them.
    pub(crate) async fn seed_cars(self) -> DriverResult<Vec<Car>> {
        let mut tx = self.db.begin_write().await?;

        if db::count_cars(tx.ex()).await? > 0 {
            info!("Catalog already has cars; not seeding");
            return Ok(vec![]);
        }

        let mut cars = Vec::with_capacity(SAMPLE_CARS.len());
        for (make, model, year, daily_rate) in SAMPLE_CARS {
            let details = NewCar::new(*make, *model, *year, DailyRate::new(*daily_rate)?)?;
            cars.push(db::create_car(tx.ex(), details).await?);
        }

        tx.commit().await?;
        info!("Seeded catalog with {} cars", cars.len());
        Ok(cars)
    }
}
