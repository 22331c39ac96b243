// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the lunisolar conversions.

/// Error returned by [`solar_to_lunar`](crate::solar_to_lunar) and
/// [`lunar_to_solar`](crate::lunar_to_solar).
///
/// The conversion engine itself is total over its domain; every variant
/// is an input rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when a month field is outside `1..=12`.
    #[error("month must be in 1..=12, got {month}")]
    MonthOutOfRange {
        /// The rejected month value.
        month: u32,
    },

    /// Returned when a day field is outside `1..=max` (31 for solar
    /// dates, 30 for lunar dates).
    #[error("day must be in 1..={max}, got {day}")]
    DayOutOfRange {
        /// The rejected day value.
        day: u32,
        /// Largest day the calendar admits for this kind of date.
        max: u32,
    },

    /// Returned when a leap month is requested for a month that is not
    /// the inserted month of that lunar year. A 12-month year has no
    /// leap month at all.
    #[error("lunar year {year} has no leap month {month}")]
    NoSuchLeapMonth {
        /// The lunar year of the request.
        year: i32,
        /// The month that was requested as leap.
        month: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::MonthOutOfRange { month: 13 }.to_string(),
            "month must be in 1..=12, got 13"
        );
        assert_eq!(
            Error::DayOutOfRange { day: 0, max: 30 }.to_string(),
            "day must be in 1..=30, got 0"
        );
        assert_eq!(
            Error::NoSuchLeapMonth {
                year: 2024,
                month: 3
            }
            .to_string(),
            "lunar year 2024 has no leap month 3"
        );
    }

    #[test]
    fn error_is_std_error_send_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<Error>();
    }
}
