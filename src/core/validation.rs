//! Field-level acceptance rules shared by every entity input.
//!
//! Inputs collect failures into a [`ValidationErrors`] map (field name to
//! message) and only touch storage once the map is empty. All failing fields
//! are reported together; the first failure per field wins.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Largest number of fraction digits accepted for money.
pub const MONEY_DECIMAL_PLACES: u32 = 2;
/// Largest number of digits accepted for money, fraction included.
pub const MONEY_MAX_DIGITS: u32 = 10;

/// Per-field validation failures, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field` unless one is already recorded.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when empty, otherwise the collected failures.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Checks a required text field: not blank and at most `max_len` characters.
    pub fn require_text(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.trim().is_empty() {
            self.add(field, "This field may not be blank.");
        } else {
            self.check_length(field, value, max_len);
        }
    }

    /// Checks an optional text field against `max_len` characters.
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max_len: usize) {
        if let Some(value) = value {
            self.check_length(field, value, max_len);
        }
    }

    fn check_length(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.chars().count() > max_len {
            self.add(
                field,
                format!("Ensure this field has no more than {max_len} characters."),
            );
        }
    }

    /// Checks that `value` is at least `min`.
    pub fn check_min(&mut self, field: &'static str, value: i32, min: i32, message: &str) {
        if value < min {
            self.add(field, message);
        }
    }

    /// Checks that a present `value` lies in `[min, max]`.
    pub fn check_optional_range(
        &mut self,
        field: &'static str,
        value: Option<i32>,
        min: i32,
        max: i32,
        message: &str,
    ) {
        if value.is_some_and(|value| !(min..=max).contains(&value)) {
            self.add(field, message);
        }
    }

    /// Checks a monetary amount: non-negative, two decimal places, ten digits.
    pub fn check_money(&mut self, field: &'static str, value: Decimal, negative_message: &str) {
        if value.is_sign_negative() && !value.is_zero() {
            self.add(field, negative_message);
            return;
        }

        let normalized = value.normalize();
        if normalized.scale() > MONEY_DECIMAL_PLACES {
            self.add(
                field,
                format!("Ensure that there are no more than {MONEY_DECIMAL_PLACES} decimal places."),
            );
            return;
        }

        let max_whole_digits = MONEY_MAX_DIGITS - MONEY_DECIMAL_PLACES;
        if normalized.trunc().abs() >= Decimal::from(10_i64.pow(max_whole_digits)) {
            self.add(
                field,
                format!(
                    "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
                ),
            );
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Rounds a monetary amount to exactly two fraction digits (`21` becomes `21.00`).
#[must_use]
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(MONEY_DECIMAL_PLACES);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
