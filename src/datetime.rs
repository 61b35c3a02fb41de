//! TOML dates, times, and date-times.
//!
//! TOML has four temporal literals; this crate models them with three types:
//!
//! | TOML | Type |
//! |------|------|
//! | Local date `1979-05-27` | [`Date`] |
//! | Local time `07:32:00.999` | [`Time`] |
//! | Local date-time `1979-05-27T07:32:00` | [`DateTime`] with `offset: None` |
//! | Offset date-time `1979-05-27T07:32:00-07:00` | [`DateTime`] with `offset: Some(minutes)` |
//!
//! All three print as RFC 3339 via [`Display`](std::fmt::Display) and parse back via
//! [`FromStr`](std::str::FromStr). Conversions to and from [`chrono`] are provided for
//! callers who need calendar arithmetic.
//!
//! ```rust
//! use toml_tree::{Date, DateTime, Time};
//!
//! let dt: DateTime = "1979-05-27T07:32:00-07:00".parse().unwrap();
//! assert_eq!(dt.date, Date::new(1979, 5, 27));
//! assert_eq!(dt.time, Time::new(7, 32, 0, 0));
//! assert_eq!(dt.offset, Some(-420));
//! assert_eq!(dt.to_string(), "1979-05-27T07:32:00-07:00");
//! ```

use crate::{Error, Node, Result};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Newtype name that lets [`NodeSerializer`](crate::ser::NodeSerializer) recognise
/// temporal values and keep them out of the string variant.
pub(crate) const DATETIME_TOKEN: &str = "$__toml_tree_private_datetime";

/// A calendar date. Values built in code are stored as given, without
/// checking the day against the month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A time of day with nanosecond precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

/// A date and time, optionally anchored to a UTC offset.
///
/// `offset` is in minutes east of UTC. `None` is a local (unzoned) date-time;
/// `Some(0)` is UTC and is written as `Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
    pub offset: Option<i16>,
}

impl Date {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Date { year, month, day }
    }

    /// Converts to a [`NaiveDate`], or `None` if the date does not exist.
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, self.day as u32)
    }
}

impl Time {
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Time {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    #[must_use]
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.nanosecond,
        )
    }
}

impl DateTime {
    #[must_use]
    pub const fn new(date: Date, time: Time, offset: Option<i16>) -> Self {
        DateTime { date, time, offset }
    }

    /// A local date-time without an offset.
    #[must_use]
    pub const fn local(date: Date, time: Time) -> Self {
        DateTime {
            date,
            time,
            offset: None,
        }
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.offset.is_none()
    }

    #[must_use]
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(
            self.date.to_naive_date()?,
            self.time.to_naive_time()?,
        ))
    }

    /// Converts an offset date-time to [`chrono::DateTime`]. Local date-times
    /// have no instant and return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::DateTime;
    ///
    /// let dt: DateTime = "1979-05-27T07:32:00Z".parse().unwrap();
    /// let chrono = dt.to_chrono().unwrap();
    /// assert_eq!(chrono.timestamp(), 296638320);
    /// ```
    #[must_use]
    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::from(self.offset?) * 60)?;
        offset
            .from_local_datetime(&self.to_naive_date_time()?)
            .single()
    }
}

pub(crate) fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn write_offset(f: &mut fmt::Formatter<'_>, minutes: i16) -> fmt::Result {
    if minutes == 0 {
        return f.write_str("Z");
    }
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.unsigned_abs();
    write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond > 0 {
            let fraction = format!("{:09}", self.nanosecond);
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        match self.offset {
            Some(minutes) => write_offset(f, minutes),
            None => Ok(()),
        }
    }
}

fn parse_literal(s: &str) -> Result<Node> {
    crate::parser::parse_literal(s).map_err(Error::from)
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_literal(s)? {
            Node::Date(date) => Ok(date),
            other => Err(Error::type_mismatch("date", other.node_type().name())),
        }
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_literal(s)? {
            Node::Time(time) => Ok(time),
            other => Err(Error::type_mismatch("time", other.node_type().name())),
        }
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_literal(s)? {
            Node::DateTime(dt) => Ok(dt),
            other => Err(Error::type_mismatch("date-time", other.node_type().name())),
        }
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = Error;

    fn try_from(value: NaiveDate) -> Result<Self> {
        use chrono::Datelike;

        let year = u16::try_from(value.year())
            .ok()
            .filter(|year| *year <= 9999)
            .ok_or_else(|| Error::custom(format!("year {} is out of range", value.year())))?;
        Ok(Date::new(year, value.month() as u8, value.day() as u8))
    }
}

impl From<NaiveTime> for Time {
    fn from(value: NaiveTime) -> Self {
        // chrono encodes a leap second as nanosecond >= 1_000_000_000
        Time::new(
            value.hour() as u8,
            value.minute() as u8,
            value.second() as u8,
            value.nanosecond().min(999_999_999),
        )
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = Error;

    fn try_from(value: NaiveDateTime) -> Result<Self> {
        Ok(DateTime::local(
            Date::try_from(value.date())?,
            Time::from(value.time()),
        ))
    }
}

impl TryFrom<chrono::DateTime<FixedOffset>> for DateTime {
    type Error = Error;

    fn try_from(value: chrono::DateTime<FixedOffset>) -> Result<Self> {
        let local = value.naive_local();
        let minutes = value.offset().local_minus_utc() / 60;
        Ok(DateTime::new(
            Date::try_from(local.date())?,
            Time::from(local.time()),
            Some(minutes as i16),
        ))
    }
}

macro_rules! impl_temporal_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_newtype_struct(DATETIME_TOKEN, &self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct TemporalVisitor;

                impl<'de> de::Visitor<'de> for TemporalVisitor {
                    type Value = $ty;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str($expecting)
                    }

                    fn visit_str<E>(self, value: &str) -> std::result::Result<$ty, E>
                    where
                        E: de::Error,
                    {
                        value.parse().map_err(E::custom)
                    }

                    fn visit_newtype_struct<D>(
                        self,
                        deserializer: D,
                    ) -> std::result::Result<$ty, D::Error>
                    where
                        D: Deserializer<'de>,
                    {
                        deserializer.deserialize_str(self)
                    }
                }

                deserializer.deserialize_newtype_struct(DATETIME_TOKEN, TemporalVisitor)
            }
        }
    };
}

impl_temporal_serde!(Date, "a TOML local date");
impl_temporal_serde!(Time, "a TOML local time");
impl_temporal_serde!(DateTime, "a TOML date-time");
