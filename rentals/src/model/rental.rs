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

//! Rentals of cars.

use crate::model::CarId;
use crate::model::timestamp;
use car_rental_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifier of a rental, assigned by the database on insertion.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct RentalId(i64);

impl RentalId {
    /// Creates a new identifier from its raw database representation.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database representation of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// Name of the person that rents a car.
#[derive(Clone, Debug, Deserialize, Display, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct UserName(String);

impl UserName {
    /// Creates a new user name, validating that it is not blank.
    pub(crate) fn new<S: Into<String>>(name: S) -> ModelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError("User name cannot be empty".to_owned()));
        }
        Ok(Self(name))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ModelError;

    fn try_from(name: String) -> ModelResult<Self> {
        Self::new(name)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

/// Wire form of a `RentalPeriod` before validation.
#[derive(Deserialize)]
struct RawRentalPeriod {
    #[serde(with = "timestamp")]
    start_date: OffsetDateTime,

    #[serde(with = "timestamp")]
    end_date: OffsetDateTime,
}

/// The closed interval `[start, end]` during which a car is rented.
///
/// Both ends belong to the interval, so two periods that share only one boundary instant still
/// overlap.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "RawRentalPeriod")]
pub(crate) struct RentalPeriod {
    /// First instant of the rental.
    #[serde(rename = "start_date", with = "timestamp")]
    start: OffsetDateTime,

    /// Last instant of the rental.
    #[serde(rename = "end_date", with = "timestamp")]
    end: OffsetDateTime,
}

impl RentalPeriod {
    /// Creates a new period, ensuring that it does not end before it starts.
    pub(crate) fn new(start: OffsetDateTime, end: OffsetDateTime) -> ModelResult<Self> {
        if start > end {
            return Err(ModelError(format!(
                "Rental cannot end ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Returns the first instant of the period.
    pub(crate) fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the last instant of the period.
    pub(crate) fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Checks whether this candidate period clashes with an `existing` one.
    pub(crate) fn overlaps(&self, existing: &RentalPeriod) -> bool {
        let starts_inside = existing.start <= self.start && self.start <= existing.end;
        let ends_inside = existing.start <= self.end && self.end <= existing.end;
        let covers = self.start <= existing.start && existing.end <= self.end;
        starts_inside || ends_inside || covers
    }
}

impl TryFrom<RawRentalPeriod> for RentalPeriod {
    type Error = ModelError;

    fn try_from(raw: RawRentalPeriod) -> ModelResult<Self> {
        Self::new(raw.start_date, raw.end_date)
    }
}

/// A booked rental.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Rental {
    /// Identifier of the rental.
    id: RentalId,

    /// Car that has been rented.
    car_id: CarId,

    /// Person that rented the car.
    user_name: UserName,

    /// Dates during which the car is taken.
    #[serde(flatten)]
    period: RentalPeriod,

    /// When the rental was booked.
    #[serde(with = "timestamp")]
    rental_date: OffsetDateTime,
}

impl Rental {
    /// Creates a rental from its stored parts.
    pub(crate) fn new(
        id: RentalId,
        car_id: CarId,
        user_name: UserName,
        period: RentalPeriod,
        rental_date: OffsetDateTime,
    ) -> Self {
        Self { id, car_id, user_name, period, rental_date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_rental_core::clocks::testutils::utc_datetime;

    /// Shorthand to build a period from two days of January 2024.
    fn days(start: u8, end: u8) -> RentalPeriod {
        let start = utc_datetime(2024, 1, start, 0, 0, 0);
        let end = utc_datetime(2024, 1, end, 0, 0, 0);
        RentalPeriod::new(start, end).unwrap()
    }

    #[test]
    fn test_user_name_ok() {
        assert_eq!("Alice", UserName::new("Alice").unwrap().as_str());
    }

    #[test]
    fn test_user_name_blank() {
        for name in ["", "   "] {
            assert_eq!(
                ModelError("User name cannot be empty".to_owned()),
                UserName::new(name).unwrap_err()
            );
        }
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }

    #[test]
    fn test_rental_period_single_instant() {
        let ts = utc_datetime(2024, 1, 1, 10, 0, 0);
        let period = RentalPeriod::new(ts, ts).unwrap();
        assert_eq!(ts, period.start());
        assert_eq!(ts, period.end());
    }

    #[test]
    fn test_rental_period_reversed() {
        let start = utc_datetime(2024, 1, 3, 0, 0, 0);
        let end = utc_datetime(2024, 1, 1, 0, 0, 0);
        let err = RentalPeriod::new(start, end).unwrap_err();
        assert!(err.0.contains("before it starts"));
    }

    #[test]
    fn test_overlaps_start_inside() {
        assert!(days(2, 4).overlaps(&days(1, 3)));
    }

    #[test]
    fn test_overlaps_end_inside() {
        assert!(days(1, 3).overlaps(&days(2, 4)));
    }

    #[test]
    fn test_overlaps_covers_existing() {
        assert!(days(1, 9).overlaps(&days(3, 4)));
        assert!(days(3, 4).overlaps(&days(1, 9)));
    }

    #[test]
    fn test_overlaps_touching_boundaries() {
        assert!(days(3, 5).overlaps(&days(1, 3)));
        assert!(days(1, 3).overlaps(&days(3, 5)));
    }

    #[test]
    fn test_overlaps_identical() {
        assert!(days(1, 3).overlaps(&days(1, 3)));
    }

    #[test]
    fn test_overlaps_disjoint() {
        assert!(!days(4, 5).overlaps(&days(1, 3)));
        assert!(!days(1, 3).overlaps(&days(4, 5)));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        for (a, b) in [(1, 3), (2, 2), (3, 6), (5, 9), (7, 8)] {
            for (c, d) in [(1, 1), (2, 4), (4, 6), (6, 9), (9, 9)] {
                let p1 = days(a, b);
                let p2 = days(c, d);
                assert_eq!(p1.overlaps(&p2), p2.overlaps(&p1), "{:?} vs {:?}", p1, p2);
                assert_eq!(a <= d && c <= b, p1.overlaps(&p2), "{:?} vs {:?}", p1, p2);
            }
        }
    }

    #[test]
    fn test_rental_serialization() {
        let rental = Rental::new(
            RentalId::new(5),
            CarId::new(2),
            UserName::new("Bob").unwrap(),
            days(2, 4),
            utc_datetime(2023, 12, 31, 8, 30, 0),
        );
        let json = serde_json::to_string(&rental).unwrap();
        assert_eq!(
            concat!(
                r#"{"id":5,"car_id":2,"user_name":"Bob","#,
                r#""start_date":"2024-01-02T00:00:00Z","end_date":"2024-01-04T00:00:00Z","#,
                r#""rental_date":"2023-12-31T08:30:00Z"}"#,
            ),
            json
        );
        assert_eq!(rental, serde_json::from_str::<Rental>(&json).unwrap());
    }

    #[test]
    fn test_rental_period_deserialize_validates() {
        let err = serde_json::from_str::<RentalPeriod>(
            r#"{"start_date": "2024-01-05", "end_date": "2024-01-01"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("before it starts"));
    }
}
