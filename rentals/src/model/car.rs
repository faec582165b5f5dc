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

//! Cars in the catalog.

use car_rental_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier of a car, assigned by the database on insertion.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct CarId(i64);

impl CarId {
    /// Creates a new identifier from its raw database representation.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database representation of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// Price of renting a car for one day.  Never negative.
#[derive(Clone, Copy, Debug, Deserialize, Display, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "f64", into = "f64")]
pub(crate) struct DailyRate(f64);

impl DailyRate {
    /// Creates a new rate after validating that it is a non-negative finite number.
    pub(crate) fn new(rate: f64) -> ModelResult<Self> {
        if !rate.is_finite() {
            return Err(ModelError(format!("Daily rate {} is not a valid number", rate)));
        }
        if rate < 0.0 {
            return Err(ModelError(format!("Daily rate {} cannot be negative", rate)));
        }
        Ok(Self(rate))
    }

    /// Returns the rate as a float.
    pub(crate) fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DailyRate {
    type Error = ModelError;

    fn try_from(rate: f64) -> ModelResult<Self> {
        Self::new(rate)
    }
}

impl From<DailyRate> for f64 {
    fn from(rate: DailyRate) -> Self {
        rate.0
    }
}

/// Ensures that a required text `field` has some content.
fn validate_required(field: &str, value: &str) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Details of a car to add to the catalog.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct NewCar {
    /// Manufacturer of the car.
    make: String,

    /// Model name of the car.
    model: String,

    /// Model year of the car.
    year: i32,

    /// Price of renting the car for one day.
    daily_rate: DailyRate,
}

impl NewCar {
    /// Creates a new car description, validating that the textual fields are present.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        make: S1,
        model: S2,
        year: i32,
        daily_rate: DailyRate,
    ) -> ModelResult<Self> {
        let make = make.into();
        let model = model.into();
        validate_required("Make", &make)?;
        validate_required("Model", &model)?;
        Ok(Self { make, model, year, daily_rate })
    }
}

/// A car in the catalog.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Car {
    /// Identifier of the car.
    id: CarId,

    /// Manufacturer of the car.
    make: String,

    /// Model name of the car.
    model: String,

    /// Model year of the car.
    year: i32,

    /// Price of renting the car for one day.
    daily_rate: DailyRate,

    /// Advisory flag shown to clients.  No operation changes it.
    available: bool,
}

impl Car {
    /// Creates a car from its stored parts.
    pub(crate) fn new(id: CarId, details: NewCar, available: bool) -> Self {
        Self {
            id,
            make: details.make,
            model: details.model,
            year: details.year,
            daily_rate: details.daily_rate,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_rate_ok() {
        assert_eq!(0.0, DailyRate::new(0.0).unwrap().as_f64());
        assert_eq!(45.5, DailyRate::new(45.5).unwrap().as_f64());
    }

    #[test]
    fn test_daily_rate_errors() {
        assert!(DailyRate::new(-0.01).unwrap_err().0.contains("cannot be negative"));
        assert!(DailyRate::new(f64::NAN).unwrap_err().0.contains("not a valid number"));
        assert!(DailyRate::new(f64::INFINITY).unwrap_err().0.contains("not a valid number"));
    }

    #[test]
    fn test_new_car_requires_text_fields() {
        let rate = DailyRate::new(10.0).unwrap();
        NewCar::new("Toyota", "Corolla", 2020, rate).unwrap();
        assert_eq!(
            ModelError("Make cannot be empty".to_owned()),
            NewCar::new("  ", "Corolla", 2020, rate).unwrap_err()
        );
        assert_eq!(
            ModelError("Model cannot be empty".to_owned()),
            NewCar::new("Toyota", "", 2020, rate).unwrap_err()
        );
    }

    #[test]
    fn test_car_serialization() {
        let car = Car::new(
            CarId::new(7),
            NewCar::new("Tesla", "Model 3", 2023, DailyRate::new(85.0).unwrap()).unwrap(),
            true,
        );
        assert_eq!(
            r#"{"id":7,"make":"Tesla","model":"Model 3","year":2023,"daily_rate":85.0,"available":true}"#,
            serde_json::to_string(&car).unwrap()
        );
    }
}
