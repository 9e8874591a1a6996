//! Widget configuration: ranges, stepping, formatting and annotations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decimal places used when `precision` is not configured.
pub const DEFAULT_PRECISION: usize = 3;

/// Step used when `step` is unset or zero.
pub const DEFAULT_STEP: f64 = 1.0;

/// Configuration of an annotated widget.
///
/// Every key is optional. Options come from two places (the input descriptor
/// and the widget stub) and are merged once by the factory, see
/// [`WidgetOptions::merged_over`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Lower bound; `None` leaves the range open below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound; `None` leaves the range open above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Value change per nudge is `0.1 * step`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Decimal places shown for the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    /// Unit suffix drawn right of the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Anchor of the quantization grid applied by the callback.
    #[serde(rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modulus: Option<f64>,
    /// Value restored by the reset button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<f64>,
    /// Value restored by the disable button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<f64>,
    /// Node property mirrored on every commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Per-value annotation text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<AnnotationTable>,
}

impl WidgetOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both bounds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set the displayed precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Set the unit suffix.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the quantization anchor.
    pub fn with_modulus(mut self, modulus: f64) -> Self {
        self.modulus = Some(modulus);
        self
    }

    /// Set the reset sentinel.
    pub fn with_reset(mut self, reset: f64) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Set the disable sentinel.
    pub fn with_disable(mut self, disable: f64) -> Self {
        self.disable = Some(disable);
        self
    }

    /// Set the mirrored node property.
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Set the annotation table.
    pub fn with_annotation(mut self, table: AnnotationTable) -> Self {
        self.annotation = Some(table);
        self
    }

    /// Merge `self` over `base`: keys set here win, unset keys fall back to `base`.
    pub fn merged_over(self, base: &WidgetOptions) -> WidgetOptions {
        WidgetOptions {
            min: self.min.or(base.min),
            max: self.max.or(base.max),
            step: self.step.or(base.step),
            precision: self.precision.or(base.precision),
            unit: self.unit.or_else(|| base.unit.clone()),
            modulus: self.modulus.or(base.modulus),
            reset: self.reset.or(base.reset),
            disable: self.disable.or(base.disable),
            property: self.property.or_else(|| base.property.clone()),
            annotation: self.annotation.or_else(|| base.annotation.clone()),
        }
    }

    /// Effective step; zero and NaN count as unset.
    pub fn step(&self) -> f64 {
        match self.step {
            Some(step) if step != 0.0 && !step.is_nan() => step,
            _ => DEFAULT_STEP,
        }
    }

    /// Effective precision.
    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    /// Clamp a value into the configured bounds. Missing bounds are open.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(min) = self.min {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                value = max;
            }
        }
        value
    }

    /// Format a value with the configured precision.
    pub fn format_value(&self, value: f64) -> String {
        to_fixed(value, self.precision())
    }

    /// Quantize a raw value onto the grid anchored at `mod` with size `step / 10`.
    ///
    /// Returns `None` when no anchor is configured. A degenerate grid leaves
    /// the raw value untouched.
    pub fn quantize(&self, raw: f64) -> Option<f64> {
        let anchor = self.modulus?;
        let grid = self.step() / 10.0;
        if !grid.is_finite() || grid == 0.0 {
            return Some(raw);
        }
        Some(round_half_up((raw - anchor) / grid) * grid + anchor)
    }
}

/// Digits after the point needed to write any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Largest precision `to_fixed` honors.
pub const MAX_PRECISION: usize = 100;

/// Fixed-point text with `precision` decimals.
///
/// Rounds the exact binary value, ties away from zero, and signs the result
/// whenever the input is negative (`-0.5` at precision 0 is `-1`, `-0.0` is
/// `0`). Precision is capped at [`MAX_PRECISION`].
pub fn to_fixed(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    if !value.is_finite() {
        return format!("{value}");
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(precision))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(precision).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - precision;
    let mut text = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    if precision > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }
    text
}

/// Round to the nearest integer, ties toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Value-indexed annotation lookup.
///
/// Keys are the shortest decimal rendering of the value (`1`, `0.5`, `-2`),
/// the same form a JSON object key carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationTable(BTreeMap<String, String>);

impl AnnotationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(value, text)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(value, text)| (value_key(value), text.into()))
                .collect(),
        )
    }

    /// Insert the text shown for `value`.
    pub fn insert(&mut self, value: f64, text: impl Into<String>) {
        self.0.insert(value_key(value), text.into());
    }

    /// Look up the text for `value`.
    pub fn get(&self, value: f64) -> Option<&str> {
        self.0.get(&value_key(value)).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key under which a value is stored in an [`AnnotationTable`].
///
/// Shortest round-trip digits, in plain notation for `1e-6 <= |x| < 1e21`
/// and exponent notation (`1e+21`, `1.5e-7`) outside it.
pub fn value_key(value: f64) -> String {
    // -0 and 0 share a key
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !magnitude.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
