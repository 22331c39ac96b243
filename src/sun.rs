// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent solar ecliptic longitude.
//!
//! Truncated low-precision series from *Jean Meeus — Astronomical
//! Algorithms (2nd ed. 1998)*, ch. 25. The lunisolar calendar only needs
//! the 30°-wide longitude sector a given day falls in (to locate the
//! December solstice and to detect leap months), so the few-arcminute
//! error of the truncated series is irrelevant here.
//!
//! The coefficients — including the 1900-epoch century constant — are
//! carried verbatim from the reference implementation; the `floor` steps
//! downstream depend on reproducing its rounding behaviour exactly.

use crate::lunisolar::TimeZone;
use qtty::Days;

/// Reference epoch of the longitude series (JD 2 415 021.0, 1900 January 0.5).
const EPOCH_1900: Days = Days::new(2_415_021.0);

/// Days per Julian century.
const JULIAN_CENTURY: f64 = 36_525.0;

/// Sun's ecliptic longitude in degrees, normalized to `[0, 360)`.
///
/// `jd` is a fractional Julian Day (days since noon UTC on 1 January
/// 4713 BC).
///
/// # Example
/// ```
/// use lunisolar::sun_longitude;
/// use qtty::Days;
///
/// // Shortly after a December solstice the longitude passes 270°.
/// let l = sun_longitude(Days::new(2_451_901.0));
/// assert!((269.0..272.0).contains(&l));
/// ```
pub fn sun_longitude(jd: Days) -> f64 {
    let t = (jd - EPOCH_1900).value() / JULIAN_CENTURY;
    let t2 = t * t;
    // Mean anomaly, degrees.
    let m = 357.529_10 + 35_999.050_30 * t - 0.000_155_9 * t2 - 0.000_000_48 * t * t2;
    // Mean longitude, degrees.
    let l0 = 280.466_45 + 36_000.769_83 * t + 0.000_303_2 * t2;
    // Equation of the center.
    let mut dl = (1.914_600 - 0.004_817 * t - 0.000_014 * t2) * m.to_radians().sin();
    dl += (0.019_993 - 0.000_101 * t) * (2.0 * m).to_radians().sin()
        + 0.000_290 * (3.0 * m).to_radians().sin();
    let l = l0 + dl;
    l - 360.0 * (l / 360.0).floor()
}

/// 30°-sector index (0..=11) of the sun's longitude at the local midnight
/// beginning calendar day `day_number`, for the meridian `time_zone`.
///
/// Sector 9 starts at 270°, the December solstice.
pub(crate) fn longitude_sector(day_number: i64, time_zone: TimeZone) -> i32 {
    let jd = Days::new(day_number as f64 - 0.5 - time_zone.day_fraction());
    (sun_longitude(jd) / 30.0).floor() as i32
}
