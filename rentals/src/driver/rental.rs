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

//! Operations on one rental.

use crate::db;
use crate::driver::{Driver, RENTAL_NOT_FOUND};
use crate::model::{Rental, RentalId};
use car_rental_core::db::DbError;
use car_rental_core::driver::{DriverError, DriverResult};
use log::info;

/// Translates a database lookup error on a rental into a user-facing error.
fn map_rental_error(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(RENTAL_NOT_FOUND.to_owned()),
        e => e.into(),
    }
}

impl Driver {
    /// Cancels the rental identified by `id`, freeing its dates.
    pub(crate) async fn cancel_rental(self, id: RentalId) -> DriverResult<()> {
        db::delete_rental(&mut self.db.ex().await?, id).await.map_err(map_rental_error)?;
        info!("Canceled rental {}", id);
        Ok(())
    }

    /// Gets the rental identified by `id`.
    pub(crate) async fn get_rental(self, id: RentalId) -> DriverResult<Rental> {
        db::get_rental(&mut self.db.ex().await?, id).await.map_err(map_rental_error)
    }
}
