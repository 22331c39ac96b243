// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunisolar calendar arithmetic.
//!
//! Lunar months begin at new moons; the month containing the December
//! solstice is month 11, and all other months of a lunar year are
//! numbered from that anchor. When two successive month-11 anchors are
//! more than 365 days apart, the year has thirteen lunar months and the
//! first month whose new moon repeats the previous moon's 30° solar
//! sector is the inserted (leap) month.
//!
//! Day boundaries for new moons and the solstice are decided at a fixed
//! reference meridian, conventionally UTC+8 ([`TimeZone::CST`]). This is
//! a property of the calendar itself, not of the observer's location.
//!
//! All functions here are pure; a conversion is a bounded sequence of
//! floating-point evaluations of the series in [`sun`](crate::sun) and
//! [`moon`](crate::moon).

use crate::date::{jdn_from_civil, SolarDate};
use crate::moon::new_moon_day;
use crate::sun::longitude_sector;
use crate::Error;
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fractional JD of the reference new moon (1900-01-01 13:51 GMT),
/// i.e. `new_moon(0)`.
pub(crate) const LUNATION_EPOCH: Days = Days::new(2_415_021.076_998_695);

/// Mean synodic month used to estimate lunation indices.
pub(crate) const SYNODIC_MONTH: Days = Days::new(29.530_588_853);

// ═══════════════════════════════════════════════════════════════════════════
// Value types
// ═══════════════════════════════════════════════════════════════════════════

/// Reference meridian for day-boundary decisions, in hours east of
/// Greenwich.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZone {
    hours: f64,
}

impl TimeZone {
    /// UTC+8, the conventional reference meridian of the East-Asian
    /// lunisolar calendar.
    pub const CST: Self = Self::from_hours(8.0);

    /// A meridian `hours` east of Greenwich.
    #[inline]
    pub const fn from_hours(hours: f64) -> Self {
        Self { hours }
    }

    /// The offset in hours.
    #[inline]
    pub const fn hours(&self) -> f64 {
        self.hours
    }

    /// The offset as a fraction of a day.
    #[inline]
    pub(crate) const fn day_fraction(&self) -> f64 {
        self.hours / 24.0
    }
}

impl Default for TimeZone {
    #[inline]
    fn default() -> Self {
        Self::CST
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC{:+}", self.hours)
    }
}

/// A date in the East-Asian lunisolar calendar.
///
/// `leap` is only ever true for the unique inserted month of a
/// thirteen-month lunar year; [`lunar_to_solar`] rejects any other
/// combination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunisolarDate {
    /// Lunar year (numbered by the solar year its New Year falls in).
    pub year: i32,
    /// Lunar month, 1..=12.
    pub month: u32,
    /// Lunar day, 1..=30.
    pub day: u32,
    /// Whether this is the inserted leap month.
    pub leap: bool,
}

impl LunisolarDate {
    /// Create a lunisolar date from its fields.
    #[inline]
    pub const fn new(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            leap,
        }
    }

    /// Convert to a solar date at the default UTC+8 meridian.
    #[inline]
    pub fn to_solar(&self) -> Result<SolarDate, Error> {
        lunar_to_solar(*self, TimeZone::default())
    }
}

impl fmt::Display for LunisolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leap {
            write!(f, "{:04}-L{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl SolarDate {
    /// Convert to a lunisolar date at the default UTC+8 meridian.
    #[inline]
    pub fn to_lunisolar(&self) -> Result<LunisolarDate, Error> {
        solar_to_lunar(*self, TimeZone::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Month-11 anchor and leap-month detection
// ═══════════════════════════════════════════════════════════════════════════

/// Day number of the new moon that starts the lunar month containing the
/// December solstice of `year` (lunar month 11).
///
/// Estimates the lunation index from December 31 and steps back one
/// lunation when the candidate new moon already lies past solar
/// longitude 270° (sector 9).
pub(crate) fn lunar_month_11(year: i32, time_zone: TimeZone) -> i64 {
    let off = jdn_from_civil(31, 12, year as i64) as f64 - LUNATION_EPOCH.value();
    let k = (off / SYNODIC_MONTH.value()).floor() as i32;
    let nm = new_moon_day(k, time_zone);
    if longitude_sector(nm, time_zone) >= 9 {
        new_moon_day(k - 1, time_zone)
    } else {
        nm
    }
}

/// 1-based offset, counted from the month-11 anchor `a11`, of the first
/// lunation whose solar-longitude sector repeats the previous one — the
/// signature of the inserted month.
///
/// Only meaningful when the next year's anchor is more than 365 days
/// after `a11`; callers check that precondition.
pub(crate) fn leap_month_offset(a11: i64, time_zone: TimeZone) -> i32 {
    let k = (0.5 + (a11 as f64 - LUNATION_EPOCH.value()) / SYNODIC_MONTH.value()).floor() as i32;
    let mut i = 1;
    let mut arc = longitude_sector(new_moon_day(k + i, time_zone), time_zone);
    loop {
        let last = arc;
        i += 1;
        arc = longitude_sector(new_moon_day(k + i, time_zone), time_zone);
        if arc == last || i >= 14 {
            break;
        }
    }
    i - 1
}

/// The leap month of lunar `year`, or `None` for a twelve-month year.
///
/// Computed from the same anchors and offsets the conversions use, so
/// the result always agrees with the `leap` flag [`solar_to_lunar`]
/// produces and the validation [`lunar_to_solar`] applies. A leap
/// month 12 is not representable in this scheme (none occurs between
/// 1645 and 3358).
///
/// # Example
/// ```
/// use lunisolar::{leap_month, TimeZone};
///
/// assert_eq!(leap_month(2023, TimeZone::CST), Some(2));
/// assert_eq!(leap_month(2024, TimeZone::CST), None);
/// ```
pub fn leap_month(year: i32, time_zone: TimeZone) -> Option<u32> {
    // Months 1..=10 of lunar `year` lie between the month-11 anchors of
    // the previous and the current solar year.
    let a11 = lunar_month_11(year - 1, time_zone);
    let b11 = lunar_month_11(year, time_zone);
    if b11 - a11 > 365 {
        let m = (leap_month_offset(a11, time_zone) - 2).rem_euclid(12);
        if (1..=10).contains(&m) {
            return Some(m as u32);
        }
    }
    // A leap month 11 follows the current year's anchor.
    let c11 = lunar_month_11(year + 1, time_zone);
    if c11 - b11 > 365 {
        let m = (leap_month_offset(b11, time_zone) - 2).rem_euclid(12);
        if m == 11 {
            return Some(11);
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════

/// Convert a solar (civil) date to its lunisolar date.
///
/// Rejects a month outside `1..=12` or a day outside `1..=31`; any civil
/// date with plausible fields converts.
///
/// # Example
/// ```
/// use lunisolar::{solar_to_lunar, LunisolarDate, SolarDate, TimeZone};
///
/// let lunar = solar_to_lunar(SolarDate::new(2024, 2, 10), TimeZone::CST).unwrap();
/// assert_eq!(lunar, LunisolarDate::new(2024, 1, 1, false)); // Lunar New Year
/// ```
pub fn solar_to_lunar(solar: SolarDate, time_zone: TimeZone) -> Result<LunisolarDate, Error> {
    if !(1..=12).contains(&solar.month) {
        return Err(Error::MonthOutOfRange { month: solar.month });
    }
    if !(1..=31).contains(&solar.day) {
        return Err(Error::DayOutOfRange {
            day: solar.day,
            max: 31,
        });
    }

    let day_number = solar.jdn();
    let k = ((day_number as f64 - LUNATION_EPOCH.value()) / SYNODIC_MONTH.value()).floor() as i32;
    // The mean-month estimate can overshoot by one lunation on the last
    // day of a month, so step back until the month start is reached.
    let mut month_start = new_moon_day(k + 1, time_zone);
    if month_start > day_number {
        month_start = new_moon_day(k, time_zone);
    }
    if month_start > day_number {
        month_start = new_moon_day(k - 1, time_zone);
    }

    // Pick the month-11 anchors bracketing this lunar month.
    let mut a11 = lunar_month_11(solar.year, time_zone);
    let mut b11 = a11;
    let mut lunar_year;
    if a11 >= month_start {
        lunar_year = solar.year;
        a11 = lunar_month_11(solar.year - 1, time_zone);
    } else {
        lunar_year = solar.year + 1;
        b11 = lunar_month_11(solar.year + 1, time_zone);
    }

    let lunar_day = (day_number - month_start + 1) as u32;
    let diff = ((month_start - a11) / 29) as i32;
    let mut leap = false;
    let mut lunar_month = diff + 11;
    if b11 - a11 > 365 {
        let leap_offset = leap_month_offset(a11, time_zone);
        if diff >= leap_offset {
            lunar_month = diff + 10;
            if diff == leap_offset {
                leap = true;
            }
        }
    }
    if lunar_month > 12 {
        lunar_month -= 12;
    }
    // Months 11 and 12 near the anchor belong to the closing lunar year.
    if lunar_month >= 11 && diff < 4 {
        lunar_year -= 1;
    }

    Ok(LunisolarDate {
        year: lunar_year,
        month: lunar_month as u32,
        day: lunar_day,
        leap,
    })
}

/// Convert a lunisolar date back to the solar (civil) date of its day.
///
/// Rejects a month outside `1..=12`, a day outside `1..=30`, and — the
/// one semantic error of the calendar — a leap month that is not the
/// inserted month of that lunar year ([`Error::NoSuchLeapMonth`]).
///
/// # Example
/// ```
/// use lunisolar::{lunar_to_solar, LunisolarDate, SolarDate, TimeZone};
///
/// let solar = lunar_to_solar(LunisolarDate::new(2024, 1, 1, false), TimeZone::CST).unwrap();
/// assert_eq!(solar, SolarDate::new(2024, 2, 10));
/// ```
pub fn lunar_to_solar(lunar: LunisolarDate, time_zone: TimeZone) -> Result<SolarDate, Error> {
    if !(1..=12).contains(&lunar.month) {
        return Err(Error::MonthOutOfRange { month: lunar.month });
    }
    if !(1..=30).contains(&lunar.day) {
        return Err(Error::DayOutOfRange {
            day: lunar.day,
            max: 30,
        });
    }

    // Months 11 and 12 come before New Year, so they sit in the earlier
    // anchor bracket.
    let (a11, b11) = if lunar.month < 11 {
        (
            lunar_month_11(lunar.year - 1, time_zone),
            lunar_month_11(lunar.year, time_zone),
        )
    } else {
        (
            lunar_month_11(lunar.year, time_zone),
            lunar_month_11(lunar.year + 1, time_zone),
        )
    };
    let k = (0.5 + (a11 as f64 - LUNATION_EPOCH.value()) / SYNODIC_MONTH.value()).floor() as i32;

    let mut offset = lunar.month as i32 - 11;
    if offset < 0 {
        offset += 12;
    }
    if b11 - a11 > 365 {
        let leap_offset = leap_month_offset(a11, time_zone);
        let leap_month = (leap_offset - 2).rem_euclid(12);
        if lunar.leap && lunar.month as i32 != leap_month {
            return Err(Error::NoSuchLeapMonth {
                year: lunar.year,
                month: lunar.month,
            });
        }
        if lunar.leap || offset >= leap_offset {
            offset += 1;
        }
    } else if lunar.leap {
        return Err(Error::NoSuchLeapMonth {
            year: lunar.year,
            month: lunar.month,
        });
    }

    let month_start = new_moon_day(k + offset, time_zone);
    Ok(SolarDate::from_jdn(month_start + lunar.day as i64 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TZ: TimeZone = TimeZone::CST;

    #[test]
    fn lunar_new_year_reference_dates() {
        let cases = [
            (SolarDate::new(2022, 2, 1), 2022),
            (SolarDate::new(2023, 1, 22), 2023),
            (SolarDate::new(2024, 2, 10), 2024),
        ];
        for (solar, lunar_year) in cases {
            assert_eq!(
                solar_to_lunar(solar, TZ).unwrap(),
                LunisolarDate::new(lunar_year, 1, 1, false),
                "New Year {}",
                solar
            );
        }
    }

    #[test]
    fn month_end_days_where_lunation_estimate_overshoots() {
        // On each of these dates the mean-month estimate k lands on the
        // lunation beginning the next day, and new_moon_day(k) is still
        // one day ahead; the selection must step back a second time
        // instead of producing lunar day 0.
        let cases = [
            SolarDate::new(1939, 4, 19),
            SolarDate::new(1947, 3, 22),
            SolarDate::new(2009, 3, 26),
            SolarDate::new(2054, 5, 7),
            SolarDate::new(2062, 4, 9),
        ];
        for solar in cases {
            let lunar = solar_to_lunar(solar, TZ).unwrap();
            assert!(
                (29..=30).contains(&lunar.day),
                "{} -> {} should close its lunar month",
                solar,
                lunar
            );
            assert_eq!(lunar_to_solar(lunar, TZ).unwrap(), solar, "{}", solar);
        }
    }

    #[test]
    fn new_year_eve_closes_previous_year() {
        // 2024-02-09 is the last day of lunar 2023 (month 12).
        let eve = solar_to_lunar(SolarDate::new(2024, 2, 9), TZ).unwrap();
        assert_eq!(eve.year, 2023);
        assert_eq!(eve.month, 12);
        assert!(!eve.leap);
    }

    #[test]
    fn month_11_anchor_contains_the_solstice() {
        let a11 = lunar_month_11(2023, TZ);
        // The anchor new moon fell on 2023-12-13, nine days before the
        // solstice (2023-12-22).
        assert_eq!(SolarDate::from_jdn(a11), SolarDate::new(2023, 12, 13));
        let solstice = SolarDate::new(2023, 12, 22).jdn();
        let next = new_moon_day(
            (0.5 + (a11 as f64 - LUNATION_EPOCH.value()) / SYNODIC_MONTH.value()).floor() as i32
                + 1,
            TZ,
        );
        assert!(a11 <= solstice && solstice < next);
    }

    #[test]
    fn anchor_spacing_is_12_or_13_lunations() {
        for year in 1900..2100 {
            let gap = lunar_month_11(year + 1, TZ) - lunar_month_11(year, TZ);
            assert!(
                (353..=355).contains(&gap) || (383..=385).contains(&gap),
                "anchors of {} and {} are {} days apart",
                year,
                year + 1,
                gap
            );
        }
    }

    #[test]
    fn leap_month_known_years() {
        let cases = [
            (2004, Some(2)),
            (2009, Some(5)),
            (2012, Some(4)),
            (2014, Some(9)),
            (2017, Some(6)),
            (2020, Some(4)),
            (2023, Some(2)),
            (2025, Some(6)),
            (2021, None),
            (2022, None),
            (2024, None),
        ];
        for (year, expected) in cases {
            assert_eq!(leap_month(year, TZ), expected, "leap month of {}", year);
        }
    }

    #[test]
    fn leap_month_2023_converts_both_ways() {
        // Lunar 2023 inserts a leap month 2 beginning 2023-03-22.
        let first = solar_to_lunar(SolarDate::new(2023, 3, 22), TZ).unwrap();
        assert_eq!(first, LunisolarDate::new(2023, 2, 1, true));

        let common = lunar_to_solar(LunisolarDate::new(2023, 2, 1, false), TZ).unwrap();
        assert_eq!(common, SolarDate::new(2023, 2, 20));
        let leap = lunar_to_solar(LunisolarDate::new(2023, 2, 1, true), TZ).unwrap();
        assert_eq!(leap, SolarDate::new(2023, 3, 22));
    }

    #[test]
    fn leap_month_2020_converts_both_ways() {
        let first = solar_to_lunar(SolarDate::new(2020, 5, 23), TZ).unwrap();
        assert_eq!(first, LunisolarDate::new(2020, 4, 1, true));
        let back = lunar_to_solar(first, TZ).unwrap();
        assert_eq!(back, SolarDate::new(2020, 5, 23));
    }

    #[test]
    fn at_most_one_leap_month_per_year() {
        for year in 1950..2050 {
            let expected = leap_month(year, TZ);
            let mut seen = None;
            let start = lunar_to_solar(LunisolarDate::new(year, 1, 1, false), TZ)
                .unwrap()
                .jdn();
            let end = lunar_to_solar(LunisolarDate::new(year + 1, 1, 1, false), TZ)
                .unwrap()
                .jdn();
            for jdn in start..end {
                let lunar = solar_to_lunar(SolarDate::from_jdn(jdn), TZ).unwrap();
                if lunar.leap {
                    assert!(
                        seen.is_none() || seen == Some(lunar.month),
                        "two leap months in {}",
                        year
                    );
                    seen = Some(lunar.month);
                }
            }
            assert_eq!(seen, expected, "leap month of {}", year);
        }
    }

    #[test]
    fn mismatched_leap_request_is_rejected() {
        // Lunar 2023's leap month is 2, not 3.
        assert_eq!(
            lunar_to_solar(LunisolarDate::new(2023, 3, 1, true), TZ),
            Err(Error::NoSuchLeapMonth {
                year: 2023,
                month: 3
            })
        );
        // Lunar 2024 has no leap month at all.
        assert_eq!(
            lunar_to_solar(LunisolarDate::new(2024, 5, 1, true), TZ),
            Err(Error::NoSuchLeapMonth {
                year: 2024,
                month: 5
            })
        );
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert_eq!(
            solar_to_lunar(SolarDate::new(2024, 13, 1), TZ),
            Err(Error::MonthOutOfRange { month: 13 })
        );
        assert_eq!(
            solar_to_lunar(SolarDate::new(2024, 1, 0), TZ),
            Err(Error::DayOutOfRange { day: 0, max: 31 })
        );
        assert_eq!(
            lunar_to_solar(LunisolarDate::new(2024, 0, 1, false), TZ),
            Err(Error::MonthOutOfRange { month: 0 })
        );
        assert_eq!(
            lunar_to_solar(LunisolarDate::new(2024, 1, 31, false), TZ),
            Err(Error::DayOutOfRange { day: 31, max: 30 })
        );
    }

    #[test]
    fn mid_autumn_festival() {
        // Lunar 8/15 of 2024 is 2024-09-17.
        let solar = lunar_to_solar(LunisolarDate::new(2024, 8, 15, false), TZ).unwrap();
        assert_eq!(solar, SolarDate::new(2024, 9, 17));
        assert_eq!(
            solar_to_lunar(solar, TZ).unwrap(),
            LunisolarDate::new(2024, 8, 15, false)
        );
    }

    #[test]
    fn convenience_methods_use_default_meridian() {
        let lunar = SolarDate::new(2023, 1, 22).to_lunisolar().unwrap();
        assert_eq!(lunar, LunisolarDate::new(2023, 1, 1, false));
        assert_eq!(lunar.to_solar().unwrap(), SolarDate::new(2023, 1, 22));
    }

    #[test]
    fn display_marks_leap_months() {
        assert_eq!(
            LunisolarDate::new(2023, 2, 11, true).to_string(),
            "2023-L02-11"
        );
        assert_eq!(
            LunisolarDate::new(2023, 2, 11, false).to_string(),
            "2023-02-11"
        );
        assert_eq!(TimeZone::CST.to_string(), "UTC+8");
    }

    #[test]
    fn western_meridian_shifts_day_boundaries() {
        // At UTC+7 (the Vietnamese convention) some month boundaries move
        // by a day; the conversion must still round-trip.
        let tz = TimeZone::from_hours(7.0);
        for (y, m, d) in [(2023, 1, 22), (2024, 2, 10), (1985, 6, 2), (2040, 11, 30)] {
            let solar = SolarDate::new(y, m, d);
            let lunar = solar_to_lunar(solar, tz).unwrap();
            assert_eq!(lunar_to_solar(lunar, tz).unwrap(), solar);
        }
    }
}
