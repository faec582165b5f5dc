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

//! REST interface for the catalog and the reservations.

use crate::driver::Driver;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

mod car_get;
mod car_rent_post;
mod car_rentals_get;
mod cars_get;
mod cars_post;
mod rental_delete;
mod rental_get;
mod root_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
///
/// Cross-origin requests are accepted from any origin so that browser front ends served from
/// elsewhere can use the API.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(root_get::handler))
        .route("/cars", get(cars_get::handler).post(cars_post::handler))
        .route("/cars/", get(cars_get::handler).post(cars_post::handler))
        .route("/cars/:car_id", get(car_get::handler))
        .route("/cars/:car_id/rent", post(car_rent_post::handler))
        .route("/cars/:car_id/rentals", get(car_rentals_get::handler))
        .route("/rentals/:rental_id", get(rental_get::handler).delete(rental_delete::handler))
        .layer(cors)
        .with_state(driver)
}
