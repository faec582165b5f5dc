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

//! Operations on the whole catalog.

use crate::db;
use crate::driver::Driver;
use crate::model::{Car, NewCar};
use car_rental_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Adds a new car described by `details` to the catalog.
    pub(crate) async fn create_car(self, details: NewCar) -> DriverResult<Car> {
        let car = db::create_car(&mut self.db.ex().await?, details).await?;
        info!("Added car {} ({} {} {})", car.id(), car.make(), car.model(), car.year());
        Ok(car)
    }

    /// Gets all cars in the catalog.
    pub(crate) async fn get_cars(self) -> DriverResult<Vec<Car>> {
        let cars = db::get_cars(&mut self.db.ex().await?).await?;
        Ok(cars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::DailyRate;

    #[tokio::test]
    async fn test_create_car_ok() {
        let context = TestContext::setup().await;

        let details = NewCar::new("Audi", "A4", 2021, DailyRate::new(70.0).unwrap()).unwrap();
        let car = context.driver().create_car(details).await.unwrap();
        assert_eq!("Audi", car.make());
        assert_eq!("A4", car.model());
        assert_eq!(2021, *car.year());
        assert_eq!(70.0, car.daily_rate().as_f64());
        assert!(*car.available());

        let mut ex = context.ex().await;
        assert_eq!(car, db::get_car(&mut ex, *car.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_cars_empty() {
        let context = TestContext::setup().await;

        assert!(context.driver().get_cars().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_cars_some() {
        let context = TestContext::setup().await;

        let car1 = context.create_car("Toyota", "Corolla").await;
        let car2 = context.create_car("Honda", "Civic").await;

        assert_eq!(vec![car1, car2], context.driver().get_cars().await.unwrap());
    }
}
