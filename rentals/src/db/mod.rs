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

//! Database abstraction in terms of the operations needed by the catalog and the reservations.

use crate::model::{Car, CarId, DailyRate, NewCar, Rental, RentalId, RentalPeriod, UserName};
use car_rental_core::db::sqlite::{build_timestamp, unpack_timestamp};
use car_rental_core::db::{DbError, DbResult, Executor, postgres, sqlite};
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;


/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

impl TryFrom<PgRow> for Car {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let make: String = row.try_get("make").map_err(postgres::map_sqlx_error)?;
        let model: String = row.try_get("model").map_err(postgres::map_sqlx_error)?;
        let year: i32 = row.try_get("year").map_err(postgres::map_sqlx_error)?;
        let daily_rate: f64 = row.try_get("daily_rate").map_err(postgres::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(postgres::map_sqlx_error)?;

        let details = NewCar::new(make, model, year, DailyRate::new(daily_rate)?)?;
        Ok(Car::new(CarId::new(id), details, available))
    }
}

impl TryFrom<SqliteRow> for Car {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let make: String = row.try_get("make").map_err(sqlite::map_sqlx_error)?;
        let model: String = row.try_get("model").map_err(sqlite::map_sqlx_error)?;
        let year: i32 = row.try_get("year").map_err(sqlite::map_sqlx_error)?;
        let daily_rate: f64 = row.try_get("daily_rate").map_err(sqlite::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(sqlite::map_sqlx_error)?;

        let details = NewCar::new(make, model, year, DailyRate::new(daily_rate)?)?;
        Ok(Car::new(CarId::new(id), details, available))
    }
}

impl TryFrom<PgRow> for Rental {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let car_id: i64 = row.try_get("car_id").map_err(postgres::map_sqlx_error)?;
        let user_name: String = row.try_get("user_name").map_err(postgres::map_sqlx_error)?;
        let start_date: OffsetDateTime =
            row.try_get("start_date").map_err(postgres::map_sqlx_error)?;
        let end_date: OffsetDateTime =
            row.try_get("end_date").map_err(postgres::map_sqlx_error)?;
        let rental_date: OffsetDateTime =
            row.try_get("rental_date").map_err(postgres::map_sqlx_error)?;

        Ok(Rental::new(
            RentalId::new(id),
            CarId::new(car_id),
            UserName::new(user_name)?,
            RentalPeriod::new(start_date, end_date)?,
            rental_date,
        ))
    }
}

impl TryFrom<SqliteRow> for Rental {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let car_id: i64 = row.try_get("car_id").map_err(sqlite::map_sqlx_error)?;
        let user_name: String = row.try_get("user_name").map_err(sqlite::map_sqlx_error)?;
        let start_date_secs: i64 =
            row.try_get("start_date_secs").map_err(sqlite::map_sqlx_error)?;
        let start_date_nsecs: i64 =
            row.try_get("start_date_nsecs").map_err(sqlite::map_sqlx_error)?;
        let end_date_secs: i64 = row.try_get("end_date_secs").map_err(sqlite::map_sqlx_error)?;
        let end_date_nsecs: i64 = row.try_get("end_date_nsecs").map_err(sqlite::map_sqlx_error)?;
        let rental_date_secs: i64 =
            row.try_get("rental_date_secs").map_err(sqlite::map_sqlx_error)?;
        let rental_date_nsecs: i64 =
            row.try_get("rental_date_nsecs").map_err(sqlite::map_sqlx_error)?;

        let start_date = build_timestamp(start_date_secs, start_date_nsecs)?;
        let end_date = build_timestamp(end_date_secs, end_date_nsecs)?;
        let rental_date = build_timestamp(rental_date_secs, rental_date_nsecs)?;

        Ok(Rental::new(
            RentalId::new(id),
            CarId::new(car_id),
            UserName::new(user_name)?,
            RentalPeriod::new(start_date, end_date)?,
            rental_date,
        ))
    }
}

/// Adds a new car described by `details` to the catalog.  New cars are always available.
pub(crate) async fn create_car(ex: &mut Executor, details: NewCar) -> DbResult<Car> {
    let id: i64 = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO cars (make, model, year, daily_rate, available)
                VALUES ($1, $2, $3, $4, TRUE)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(details.make())
                .bind(details.model())
                .bind(*details.year())
                .bind(details.daily_rate().as_f64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO cars (make, model, year, daily_rate, available)
                VALUES (?, ?, ?, ?, TRUE)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(details.make())
                .bind(details.model())
                .bind(*details.year())
                .bind(details.daily_rate().as_f64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }
    };

    Ok(Car::new(CarId::new(id), details, true))
}

/// Gets all cars in the catalog, sorted by identifier.
pub(crate) async fn get_cars(ex: &mut Executor) -> DbResult<Vec<Car>> {
    let query_str = "SELECT * FROM cars ORDER BY id";

    let mut cars = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                cars.push(Car::try_from(row)?);
            }
        }
    }
    Ok(cars)
}

/// Gets the car identified by `id`.
pub(crate) async fn get_car(ex: &mut Executor, id: CarId) -> DbResult<Car> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM cars WHERE id = $1";
            let raw_car = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Car::try_from(raw_car)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM cars WHERE id = ?";
            let raw_car = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Car::try_from(raw_car)
        }
    }
}

/// Counts the number of cars in the catalog.
pub(crate) async fn count_cars(ex: &mut Executor) -> DbResult<u64> {
    let query_str = "SELECT COUNT(*) AS count FROM cars";
    let count: i64 = match ex {
        Executor::Postgres(ex) => {
            let row = sqlx::query(query_str)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let row =
                sqlx::query(query_str).fetch_one(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }
    };
    u64::try_from(count).map_err(|e| DbError::DataIntegrityError(format!("Bad count: {}", e)))
}

/// Records a rental of `car_id` by `user_name` for `period`, booked at `rental_date`.
///
/// The database rejects the insertion with `DbError::Conflict` if the period overlaps another
/// rental of the same car, and with `DbError::NotFound` if the car does not exist.
pub(crate) async fn create_rental(
    ex: &mut Executor,
    car_id: CarId,
    user_name: UserName,
    period: RentalPeriod,
    rental_date: OffsetDateTime,
) -> DbResult<Rental> {
    let id: i64 = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO rentals (car_id, user_name, start_date, end_date, rental_date)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(car_id.as_i64())
                .bind(user_name.as_str())
                .bind(period.start())
                .bind(period.end())
                .bind(rental_date)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (start_date_secs, start_date_nsecs) = unpack_timestamp(period.start())?;
            let (end_date_secs, end_date_nsecs) = unpack_timestamp(period.end())?;
            let (rental_date_secs, rental_date_nsecs) = unpack_timestamp(rental_date)?;

            let query_str = "
                INSERT INTO rentals (
                    car_id, user_name,
                    start_date_secs, start_date_nsecs,
                    end_date_secs, end_date_nsecs,
                    rental_date_secs, rental_date_nsecs)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(car_id.as_i64())
                .bind(user_name.as_str())
                .bind(start_date_secs)
                .bind(start_date_nsecs)
                .bind(end_date_secs)
                .bind(end_date_nsecs)
                .bind(rental_date_secs)
                .bind(rental_date_nsecs)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }
    };

    Ok(Rental::new(RentalId::new(id), car_id, user_name, period, rental_date))
}

/// Gets the rental identified by `id`.
pub(crate) async fn get_rental(ex: &mut Executor, id: RentalId) -> DbResult<Rental> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM rentals WHERE id = $1";
            let raw_rental = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Rental::try_from(raw_rental)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM rentals WHERE id = ?";
            let raw_rental = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Rental::try_from(raw_rental)
        }
    }
}

/// Gets all rentals of `car_id`, sorted by start date.
///
/// Returns an empty list if the car does not exist.
pub(crate) async fn get_rentals_for_car(ex: &mut Executor, car_id: CarId) -> DbResult<Vec<Rental>> {
    let mut rentals = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM rentals WHERE car_id = $1 ORDER BY start_date, id";
            let mut rows = sqlx::query(query_str).bind(car_id.as_i64()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                rentals.push(Rental::try_from(row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM rentals
                WHERE car_id = ?
                ORDER BY start_date_secs, start_date_nsecs, id";
            let mut rows = sqlx::query(query_str).bind(car_id.as_i64()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                rentals.push(Rental::try_from(row)?);
            }
        }
    }
    Ok(rentals)
}

/// Deletes the rental identified by `id`.
pub(crate) async fn delete_rental(ex: &mut Executor, id: RentalId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM rentals WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM rentals WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
