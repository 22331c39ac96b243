// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunisolar Calendar Conversion
//!
//! This crate converts Gregorian (solar) civil dates to traditional
//! East-Asian lunisolar dates and back, using astronomical
//! approximations of new-moon times and solar ecliptic longitude.
//!
//! # Core types
//!
//! - [`SolarDate`] — a civil `(year, month, day)` date with Julian Day
//!   Number conversion (Gregorian rule from 1582-10-15, Julian before).
//! - [`LunisolarDate`] — a lunar `(year, month, day)` date with a
//!   leap-month flag.
//! - [`TimeZone`] — the reference meridian for day-boundary decisions;
//!   defaults to [`TimeZone::CST`] (UTC+8), the calendar's conventional
//!   meridian.
//! - [`Error`] — the boundary-validation and leap-month-mismatch errors.
//!
//! # Entry points
//!
//! | Function | Direction |
//! |----------|-----------|
//! | [`solar_to_lunar`] | civil date → lunisolar date |
//! | [`lunar_to_solar`] | lunisolar date → civil date |
//! | [`leap_month`] | which month of a lunar year is inserted, if any |
//!
//! Every function is pure and stateless; conversions may run from any
//! number of threads without synchronisation.
//!
//! # Quick Example
//! ```rust
//! use lunisolar::{solar_to_lunar, LunisolarDate, SolarDate, TimeZone};
//!
//! // Lunar New Year 2024 fell on February 10.
//! let lunar = solar_to_lunar(SolarDate::new(2024, 2, 10), TimeZone::CST).unwrap();
//! assert_eq!(lunar, LunisolarDate::new(2024, 1, 1, false));
//! ```
//!
//! # Astronomical model
//!
//! New-moon instants and solar longitude come from the truncated
//! low-precision series of *Jean Meeus — Astronomical Algorithms
//! (2nd ed. 1998)*, evaluated on the Julian-day axis ([`new_moon`],
//! [`sun_longitude`]). The calendar only consumes day numbers and 30°
//! longitude sectors, so the few-minute accuracy of the series is ample.
//! The supported civil range for conversions is roughly 1900–2100.

mod date;
mod error;
pub mod lunisolar;
pub mod moon;
pub mod sun;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use date::SolarDate;
pub use error::Error;
pub use lunisolar::{leap_month, lunar_to_solar, solar_to_lunar, LunisolarDate, TimeZone};
pub use moon::new_moon;
pub use sun::sun_longitude;
