//! Fixed-offset field access for one line of the flight feed.
//!
//! The feed is comma-delimited with no quoting, so a record is a plain
//! split. Accessors parse the handful of positions the loader consumes and
//! leave every other column untouched.

use std::num::ParseIntError;

use chrono::NaiveDate;
use thiserror::Error;

/// Date format used by the feed, e.g. `01/15/19`.
const DATE_FORMAT: &str = "%m/%d/%y";

// 0-based field positions in a record line.
const FIELD_DATE: usize = 2;
const FIELD_CARRIER: usize = 3;
const FIELD_NUMBER: usize = 4;
const FIELD_ORIGIN_ID: usize = 5;
const FIELD_ORIGIN_NAME: usize = 6;
const FIELD_STATE: usize = 7;
const FIELD_DESTINATION_ID: usize = 8;
const FIELD_DESTINATION_NAME: usize = 9;
const FIELD_DEPARTURE_DELAY: usize = 12;
const FIELD_ARRIVAL_DELAY: usize = 16;
const FIELD_CANCELLED: usize = 17;

/// Errors raised while reading fields out of a single record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The line ended before the required field position.
    #[error("record ends before field {index}")]
    MissingField {
        /// 0-based position of the absent field.
        index: usize,
    },
    /// A numeric field did not parse.
    #[error("invalid {field} {value:?}")]
    InvalidNumber {
        /// Label of the field that failed to parse.
        field: &'static str,
        /// Raw field text as found in the record.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The flight date did not match the feed's `MM/DD/YY` format.
    #[error("invalid flight date {value:?}")]
    InvalidDate {
        /// Raw field text as found in the record.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::format::ParseError,
    },
}

/// One data line of the feed, split at commas.
///
/// # Examples
/// ```
/// use flightline_data::ingest::FlightRecord;
///
/// let line = "2019,1,01/15/19,AA,1587,11298,Dallas/Fort Worth International,Texas,\
///             12892,Los Angeles International,California,0900,-3,15,0915,1200,5,0";
/// let record = FlightRecord::parse(line);
/// assert_eq!(record.carrier_code().expect("carrier"), "AA");
/// assert_eq!(record.origin_id().expect("origin id"), 11298);
/// ```
#[derive(Debug)]
pub struct FlightRecord<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FlightRecord<'a> {
    /// Split a line into its fields.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        Self {
            fields: line.split(',').collect(),
        }
    }

    fn field(&self, index: usize) -> Result<&'a str, RecordError> {
        self.fields
            .get(index)
            .copied()
            .ok_or(RecordError::MissingField { index })
    }

    fn airport_id(&self, index: usize, field: &'static str) -> Result<u32, RecordError> {
        let value = self.field(index)?;
        value.parse().map_err(|source| RecordError::InvalidNumber {
            field,
            value: value.to_owned(),
            source,
        })
    }

    /// Delay fields may be empty; the feed leaves them blank rather than
    /// writing zero.
    fn delay(&self, index: usize, field: &'static str) -> Result<i32, RecordError> {
        let value = self.field(index)?;
        if value.is_empty() {
            return Ok(0);
        }
        value.parse().map_err(|source| RecordError::InvalidNumber {
            field,
            value: value.to_owned(),
            source,
        })
    }

    /// Flight date, parsed from the feed's `MM/DD/YY` format.
    pub fn date(&self) -> Result<NaiveDate, RecordError> {
        let value = self.field(FIELD_DATE)?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| RecordError::InvalidDate {
            value: value.to_owned(),
            source,
        })
    }

    /// Carrier reporting code.
    pub fn carrier_code(&self) -> Result<&'a str, RecordError> {
        self.field(FIELD_CARRIER)
    }

    /// Flight number, kept as printed in the feed.
    pub fn number(&self) -> Result<&'a str, RecordError> {
        self.field(FIELD_NUMBER)
    }

    /// Numeric identifier of the origin airport.
    pub fn origin_id(&self) -> Result<u32, RecordError> {
        self.airport_id(FIELD_ORIGIN_ID, "origin airport id")
    }

    /// Display name of the origin airport.
    pub fn origin_name(&self) -> Result<&'a str, RecordError> {
        self.field(FIELD_ORIGIN_NAME)
    }

    /// State name carried by the record.
    pub fn state_name(&self) -> Result<&'a str, RecordError> {
        self.field(FIELD_STATE)
    }

    /// Numeric identifier of the destination airport.
    pub fn destination_id(&self) -> Result<u32, RecordError> {
        self.airport_id(FIELD_DESTINATION_ID, "destination airport id")
    }

    /// Display name of the destination airport.
    pub fn destination_name(&self) -> Result<&'a str, RecordError> {
        self.field(FIELD_DESTINATION_NAME)
    }

    /// Departure delay in minutes; an empty field reads as zero.
    pub fn departure_delay(&self) -> Result<i32, RecordError> {
        self.delay(FIELD_DEPARTURE_DELAY, "departure delay")
    }

    /// Arrival delay in minutes; an empty field reads as zero.
    pub fn arrival_delay(&self) -> Result<i32, RecordError> {
        self.delay(FIELD_ARRIVAL_DELAY, "arrival delay")
    }

    /// Cancellation flag; the feed writes an integer, non-zero meaning
    /// cancelled.
    pub fn cancelled(&self) -> Result<bool, RecordError> {
        let value = self.field(FIELD_CANCELLED)?;
        let flag: i32 = value.parse().map_err(|source| RecordError::InvalidNumber {
            field: "cancelled flag",
            value: value.to_owned(),
            source,
        })?;
        Ok(flag != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const WELL_FORMED: &str = "2019,1,01/15/19,AA,1587,11298,\
        Dallas/Fort Worth International,Texas,12892,Los Angeles International,\
        California,0900,-3,15,0915,1200,5,0";

    #[rstest]
    fn reads_fields_at_fixed_offsets() {
        let record = FlightRecord::parse(WELL_FORMED);

        assert_eq!(record.carrier_code().expect("carrier"), "AA");
        assert_eq!(record.number().expect("number"), "1587");
        assert_eq!(record.origin_id().expect("origin id"), 11298);
        assert_eq!(
            record.origin_name().expect("origin name"),
            "Dallas/Fort Worth International"
        );
        assert_eq!(record.state_name().expect("state"), "Texas");
        assert_eq!(record.destination_id().expect("destination id"), 12892);
        assert_eq!(record.departure_delay().expect("departure delay"), -3);
        assert_eq!(record.arrival_delay().expect("arrival delay"), 5);
        assert!(!record.cancelled().expect("cancelled"));
    }

    #[rstest]
    fn parses_feed_dates() {
        let record = FlightRecord::parse(WELL_FORMED);
        let date = record.date().expect("date");
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2019, 1, 15).expect("valid date"));
    }

    #[rstest]
    #[case("2019,1,01/20/19,WN,44,10821,Baltimore/Washington International,Maryland,13232,Chicago Midway International,Illinois,0700,,10,0710,0930,,1")]
    fn empty_delays_default_to_zero(#[case] line: &str) {
        let record = FlightRecord::parse(line);
        assert_eq!(record.departure_delay().expect("departure delay"), 0);
        assert_eq!(record.arrival_delay().expect("arrival delay"), 0);
        assert!(record.cancelled().expect("cancelled"));
    }

    #[rstest]
    fn short_line_reports_the_missing_field() {
        let record = FlightRecord::parse("2019,1,01/15/19,AA,1587");
        let error = record.origin_id().expect_err("field 5 is absent");
        assert!(matches!(error, RecordError::MissingField { index: 5 }));
    }

    #[rstest]
    fn bad_airport_id_reports_the_field_label() {
        let line = WELL_FORMED.replace("11298", "DFW");
        let record = FlightRecord::parse(&line);
        let error = record.origin_id().expect_err("non-numeric id");
        assert!(matches!(
            error,
            RecordError::InvalidNumber {
                field: "origin airport id",
                ..
            }
        ));
    }

    #[rstest]
    fn bad_date_is_rejected() {
        let line = WELL_FORMED.replace("01/15/19", "January 15");
        let record = FlightRecord::parse(&line);
        assert!(matches!(
            record.date().expect_err("unparseable date"),
            RecordError::InvalidDate { .. }
        ));
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("2", true)]
    fn cancelled_flag_is_integer_non_zero(#[case] flag: &str, #[case] expected: bool) {
        let line = format!("{},{flag}", WELL_FORMED.rsplit_once(',').expect("has fields").0);
        let record = FlightRecord::parse(&line);
        assert_eq!(record.cancelled().expect("cancelled"), expected);
    }
}
