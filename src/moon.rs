// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! New-moon times.
//!
//! Truncated series for the instant of new moon from *Jean Meeus —
//! Astronomical Algorithms (2nd ed. 1998)*, ch. 49, indexed by lunation
//! number `k` counted from the new moon of 1900-01-01 13:51 GMT.
//! Accuracy is about two minutes, far below the half-day margin the
//! calendar's day-boundary decisions need.
//!
//! Coefficients and operation order are carried verbatim from the
//! reference implementation (see the fidelity note in [`sun`](crate::sun)).

use crate::lunisolar::TimeZone;
use qtty::Days;

/// Fractional Julian Day of the `k`-th new moon after (or, for negative
/// `k`, before) the reference new moon of 1900-01-01 13:51 GMT.
///
/// Includes the secular ΔT correction, with a separate polynomial for
/// lunations more than eleven centuries before the reference epoch.
///
/// # Example
/// ```
/// use lunisolar::new_moon;
///
/// // Lunation 0 is the reference new moon itself.
/// assert!((new_moon(0).value() - 2_415_021.077).abs() < 1e-3);
/// ```
pub fn new_moon(k: i32) -> Days {
    // Julian centuries from 1900 January 0.5.
    let t = k as f64 / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let k = k as f64;

    // Mean new moon.
    let mut jd1 = 2_415_020.759_33 + 29.530_588_68 * k + 0.000_117_8 * t2 - 0.000_000_155 * t3;
    jd1 += 0.000_33 * (166.56 + 132.87 * t - 0.009_173 * t2).to_radians().sin();

    // Sun's mean anomaly.
    let m = 359.224_2 + 29.105_356_08 * k - 0.000_033_3 * t2 - 0.000_003_47 * t3;
    // Moon's mean anomaly.
    let mpr = 306.025_3 + 385.816_918_06 * k + 0.010_730_6 * t2 + 0.000_012_36 * t3;
    // Moon's argument of latitude.
    let f = 21.296_4 + 390.670_506_46 * k - 0.001_652_8 * t2 - 0.000_002_39 * t3;

    let mut c1 = (0.173_4 - 0.000_393 * t) * m.to_radians().sin()
        + 0.002_1 * (2.0 * m).to_radians().sin();
    c1 = c1 - 0.406_8 * mpr.to_radians().sin() + 0.016_1 * (2.0 * mpr).to_radians().sin();
    c1 -= 0.000_4 * (3.0 * mpr).to_radians().sin();
    c1 = c1 + 0.010_4 * (2.0 * f).to_radians().sin() - 0.005_1 * (m + mpr).to_radians().sin();
    c1 = c1 - 0.007_4 * (m - mpr).to_radians().sin() + 0.000_4 * (2.0 * f + m).to_radians().sin();
    c1 = c1 - 0.000_4 * (2.0 * f - m).to_radians().sin()
        - 0.000_6 * (2.0 * f + mpr).to_radians().sin();
    c1 = c1 + 0.001_0 * (2.0 * f - mpr).to_radians().sin()
        + 0.000_5 * (2.0 * mpr + m).to_radians().sin();

    let deltat = if t < -11.0 {
        0.001 + 0.000_839 * t + 0.000_226_1 * t2 - 0.000_008_45 * t3 - 0.000_000_081 * t * t3
    } else {
        -0.000_278 + 0.000_265 * t + 0.000_262 * t2
    };

    Days::new(jd1 + c1 - deltat)
}

/// Local calendar day number on which the `k`-th new moon falls, for the
/// meridian `time_zone`.
pub(crate) fn new_moon_day(k: i32, time_zone: TimeZone) -> i64 {
    (new_moon(k).value() + 0.5 + time_zone.day_fraction()).floor() as i64
}
