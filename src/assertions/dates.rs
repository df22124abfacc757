//! Date and time assertions over `chrono::DateTime`.
//!
//! Instants render as RFC 3339 in failure messages. Both sides of a
//! comparison use the same `TimeZone`; convert with `with_timezone` first
//! when mixing zones.

use std::fmt;

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike};

use crate::subject::Subject;

impl<Tz: TimeZone> Subject<DateTime<Tz>>
where
    Tz::Offset: fmt::Display,
{
    /// Assert the instant is strictly after `expected`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use voluble::expect;
    ///
    /// expect(order.shipped_at).to_be_after(&order.placed_at);
    /// ```
    pub fn to_be_after(mut self, expected: &DateTime<Tz>) -> Self {
        let because = self.take_reason();
        if !(*self.value() > *expected) {
            let message = format!(
                "Expected {} to be after '{}' but was '{}'",
                self.name(),
                expected.to_rfc3339(),
                self.value().to_rfc3339()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the instant is strictly before `expected`.
    pub fn to_be_before(mut self, expected: &DateTime<Tz>) -> Self {
        let because = self.take_reason();
        if !(*self.value() < *expected) {
            let message = format!(
                "Expected {} to be before '{}' but was '{}'",
                self.name(),
                expected.to_rfc3339(),
                self.value().to_rfc3339()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the instant is at or after `expected`. The inclusive
    /// counterpart of [`to_be_after`](Subject::to_be_after).
    pub fn to_be_on_or_after(mut self, expected: &DateTime<Tz>) -> Self {
        let because = self.take_reason();
        if !(*self.value() >= *expected) {
            let message = format!(
                "Expected {} to be on or after '{}' but was '{}'",
                self.name(),
                expected.to_rfc3339(),
                self.value().to_rfc3339()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the instant is at or before `expected`. The inclusive
    /// counterpart of [`to_be_before`](Subject::to_be_before).
    pub fn to_be_on_or_before(mut self, expected: &DateTime<Tz>) -> Self {
        let because = self.take_reason();
        if !(*self.value() <= *expected) {
            let message = format!(
                "Expected {} to be on or before '{}' but was '{}'",
                self.name(),
                expected.to_rfc3339(),
                self.value().to_rfc3339()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the instant is within `tolerance` of `expected`, in either
    /// direction.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use chrono::TimeDelta;
    ///
    /// expect(event.recorded_at)
    ///     .to_be_close_to(&event.created_at, TimeDelta::seconds(1));
    /// ```
    pub fn to_be_close_to(mut self, expected: &DateTime<Tz>, tolerance: TimeDelta) -> Self {
        let because = self.take_reason();
        let offset = self
            .value()
            .clone()
            .signed_duration_since(expected.clone())
            .abs();
        if offset > tolerance {
            let message = format!(
                "Expected {} to be within {}ms of '{}' but was '{}'",
                self.name(),
                tolerance.num_milliseconds(),
                expected.to_rfc3339(),
                self.value().to_rfc3339()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the calendar year.
    pub fn to_have_year(mut self, expected: i32) -> Self {
        let because = self.take_reason();
        if self.value().year() != expected {
            let message = format!(
                "Expected {} to have year {} but had {}",
                self.name(),
                expected,
                self.value().year()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the calendar month (1-12).
    pub fn to_have_month(mut self, expected: u32) -> Self {
        let because = self.take_reason();
        if self.value().month() != expected {
            let message = format!(
                "Expected {} to have month {} but had {}",
                self.name(),
                expected,
                self.value().month()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the day of month (1-31).
    pub fn to_have_day(mut self, expected: u32) -> Self {
        let because = self.take_reason();
        if self.value().day() != expected {
            let message = format!(
                "Expected {} to have day {} but had {}",
                self.name(),
                expected,
                self.value().day()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the hour (0-23).
    pub fn to_have_hour(mut self, expected: u32) -> Self {
        let because = self.take_reason();
        if self.value().hour() != expected {
            let message = format!(
                "Expected {} to have hour {} but had {}",
                self.name(),
                expected,
                self.value().hour()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the minute (0-59).
    pub fn to_have_minute(mut self, expected: u32) -> Self {
        let because = self.take_reason();
        if self.value().minute() != expected {
            let message = format!(
                "Expected {} to have minute {} but had {}",
                self.name(),
                expected,
                self.value().minute()
            );
            self.fail(message, because);
        }
        self
    }

    /// Assert the second (0-59).
    pub fn to_have_second(mut self, expected: u32) -> Self {
        let because = self.take_reason();
        if self.value().second() != expected {
            let message = format!(
                "Expected {} to have second {} but had {}",
                self.name(),
                expected,
                self.value().second()
            );
            self.fail(message, because);
        }
        self
    }
}
