// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil dates and Julian Day Numbers.
//!
//! [`SolarDate`] is a plain `(year, month, day)` civil date. Dates on or
//! after JDN 2 299 161 (1582-10-15) follow the proleptic Gregorian rule;
//! earlier dates follow the proleptic Julian rule, matching historical
//! convention. The Julian Day Number is the common day coordinate shared
//! with the lunar computations in [`moon`](crate::moon) and
//! [`lunisolar`](crate::lunisolar).

use chrono::{Datelike, NaiveDate};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First Julian Day Number of the Gregorian calendar (1582-10-15).
pub(crate) const GREGORIAN_START_JDN: i64 = 2_299_161;

/// A civil calendar date.
///
/// `year` is an astronomical year number (1 BC is `0`, 2 BC is `-1`, …).
/// The struct is a pure value type; no field is validated on construction.
/// The two lunisolar conversion entry points validate their inputs, see
/// [`solar_to_lunar`](crate::solar_to_lunar).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarDate {
    /// Astronomical year number.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// Day of month, 1-based.
    pub day: u32,
}

impl SolarDate {
    /// Create a civil date from its fields.
    #[inline]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Julian Day Number of this date (the day beginning at civil noon).
    ///
    /// # Example
    /// ```
    /// use lunisolar::SolarDate;
    ///
    /// assert_eq!(SolarDate::new(2000, 1, 1).jdn(), 2_451_545);
    /// assert_eq!(SolarDate::new(1970, 1, 1).jdn(), 2_440_588);
    /// ```
    #[inline]
    pub const fn jdn(&self) -> i64 {
        jdn_from_civil(self.day as i64, self.month as i64, self.year as i64)
    }

    /// Inverse of [`jdn`](Self::jdn), using the same calendar-switch rule.
    ///
    /// # Example
    /// ```
    /// use lunisolar::SolarDate;
    ///
    /// assert_eq!(SolarDate::from_jdn(2_451_545), SolarDate::new(2000, 1, 1));
    /// ```
    pub const fn from_jdn(jdn: i64) -> Self {
        let (b, c) = if jdn > GREGORIAN_START_JDN - 1 {
            let a = jdn + 32_044;
            let b = (4 * a + 3) / 146_097;
            (b, a - (b * 146_097) / 4)
        } else {
            (0, jdn + 32_082)
        };
        let d = (4 * c + 3) / 1_461;
        let e = c - (1_461 * d) / 4;
        let m = (5 * e + 2) / 153;
        Self {
            day: (e - (153 * m + 2) / 5 + 1) as u32,
            month: (m + 3 - 12 * (m / 10)) as u32,
            year: (b * 100 + d - 4_800 + m / 10) as i32,
        }
    }

    /// Day of week in ISO-8601 numbering, `1..=7` for Monday through Sunday.
    ///
    /// # Example
    /// ```
    /// use lunisolar::SolarDate;
    ///
    /// assert_eq!(SolarDate::new(2000, 1, 1).day_of_week(), 6); // Saturday
    /// ```
    #[inline]
    pub fn day_of_week(&self) -> u32 {
        (self.jdn().rem_euclid(7) + 1) as u32
    }

    /// The same civil fields as a `chrono::NaiveDate`.
    ///
    /// `NaiveDate` is proleptic Gregorian throughout, so for dates before
    /// 1582-10-15 the *fields* carry over but the day coordinate does not.
    /// Returns `None` outside chrono's representable range.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for SolarDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Julian Day Number of an arbitrary `(day, month, year)` triple.
///
/// Standard calendrical formula with the Gregorian/Julian switch at
/// JDN 2 299 161. No validation: internal callers rely on out-of-range
/// fields (e.g. day 31 of a 30-day month) resolving arithmetically.
pub(crate) const fn jdn_from_civil(day: i64, month: i64, year: i64) -> i64 {
    let a = (14 - month) / 12;
    let y = year + 4_800 - a;
    let m = month + 12 * a - 3;
    let c = day + (153 * m + 2) / 5 + 365 * y + y / 4;
    let jd = c - y / 100 + y / 400 - 32_045;
    if jd < GREGORIAN_START_JDN {
        c - 32_083
    } else {
        jd
    }
}
