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

//! Textual representation of timestamps exchanged with clients.
//!
//! Timestamps are always emitted in RFC 3339 form.  On input, we also take naive date-times and
//! plain dates, which are interpreted as UTC, because that is what web front ends tend to send
//! out of date pickers.

use car_rental_core::clocks::truncate_to_micros;
use car_rental_core::model::{ModelError, ModelResult};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Parses a timestamp `raw` in any of the supported formats and normalizes it to UTC with
/// microsecond resolution.
pub(crate) fn parse(raw: &str) -> ModelResult<OffsetDateTime> {
    let naive_datetime =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    let naive_date = format_description!("[year]-[month]-[day]");

    let ts = if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        ts
    } else if let Ok(ts) = PrimitiveDateTime::parse(raw, naive_datetime) {
        ts.assume_utc()
    } else if let Ok(date) = Date::parse(raw, naive_date) {
        date.midnight().assume_utc()
    } else {
        return Err(ModelError(format!("Invalid timestamp '{}'", raw)));
    };
    Ok(truncate_to_micros(ts.to_offset(UtcOffset::UTC)))
}

/// Formats a timestamp `ts` in RFC 3339 form.
pub(crate) fn format(ts: OffsetDateTime) -> ModelResult<String> {
    ts.format(&Rfc3339).map_err(|e| ModelError(format!("Cannot format timestamp {}: {}", ts, e)))
}

/// Serializes a timestamp for use with `#[serde(with)]`.
pub(crate) fn serialize<S: Serializer>(ts: &OffsetDateTime, ser: S) -> Result<S::Ok, S::Error> {
    let raw = format(*ts).map_err(S::Error::custom)?;
    ser.serialize_str(&raw)
}

/// Deserializes a timestamp for use with `#[serde(with)]`.
pub(crate) fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<OffsetDateTime, D::Error> {
    let raw = String::deserialize(de)?;
    parse(&raw).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(datetime!(2024-03-01 10:20:30 UTC), parse("2024-03-01T10:20:30Z").unwrap());
        assert_eq!(
            datetime!(2024-03-01 08:20:30 UTC),
            parse("2024-03-01T10:20:30+02:00").unwrap()
        );
    }

    #[test]
    fn test_parse_normalizes_offset() {
        let ts = parse("2024-03-01T10:20:30+02:00").unwrap();
        assert_eq!(UtcOffset::UTC, ts.offset());
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(datetime!(2024-03-01 10:20:30 UTC), parse("2024-03-01T10:20:30").unwrap());
        assert_eq!(
            datetime!(2024-03-01 10:20:30.5 UTC),
            parse("2024-03-01T10:20:30.500").unwrap()
        );
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(datetime!(2024-03-01 00:00:00 UTC), parse("2024-03-01").unwrap());
    }

    #[test]
    fn test_parse_truncates_to_micros() {
        assert_eq!(
            datetime!(2024-03-01 10:20:30.123456 UTC),
            parse("2024-03-01T10:20:30.123456789Z").unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        for raw in ["", "yesterday", "2024-13-01", "2024-03-01T25:00:00Z", "01/03/2024"] {
            let err = parse(raw).unwrap_err();
            assert_eq!(format!("Invalid timestamp '{}'", raw), err.0);
        }
    }

    #[test]
    fn test_format() {
        assert_eq!("2024-03-01T10:20:30Z", format(datetime!(2024-03-01 10:20:30 UTC)).unwrap());
    }
}
