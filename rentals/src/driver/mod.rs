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

//! Business logic for the catalog and the reservations.

use car_rental_core::clocks::Clock;
use car_rental_core::db::Db;
use std::sync::Arc;

mod booking;
mod car;
mod cars;
mod rental;
mod seed;
#[cfg(test)]
pub(crate) mod testutils;

/// Error message returned when a car cannot be found.
pub(crate) const CAR_NOT_FOUND: &str = "Car not found";

/// Error message returned when a rental cannot be found.
pub(crate) const RENTAL_NOT_FOUND: &str = "Rental not found";

/// Error message returned when a booking clashes with an existing rental.
pub(crate) const ALREADY_RENTED: &str = "Car already rented for the selected dates";

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Clock instance to obtain the booking time of rentals.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}
