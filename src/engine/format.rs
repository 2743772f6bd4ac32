//! Display helpers shared by every layout: currency, stock tiers, excerpts

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Render a whole-unit rupiah amount: `Rp 12.000`
///
/// Zero fractional digits (rounded half away from zero), `.` as the
/// thousands separator and a non-breaking space after the symbol.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{}Rp\u{a0}{}", sign, group_thousands(&digits))
}

/// Like [`format_currency`], `-` for an absent amount
pub fn format_optional_currency(amount: Option<f64>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "-".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Three-way stock classification used for badge styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTier {
    Low,
    Medium,
    High,
}

impl StockTier {
    /// CSS-style class name
    pub fn as_str(&self) -> &'static str {
        match self {
            StockTier::Low => "low",
            StockTier::Medium => "medium",
            StockTier::High => "high",
        }
    }
}

/// Cut points for [`StockTier`]
///
/// `stock > high_above` is high, `stock > medium_above` is medium,
/// everything else (including an absent stock) is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    pub high_above: i64,
    pub medium_above: i64,
}

impl StockThresholds {
    pub const TABLE: Self = Self::new(50, 10);
    pub const GRID: Self = Self::new(70, 55);
    pub const MOBILE: Self = Self::new(80, 50);

    pub const fn new(high_above: i64, medium_above: i64) -> Self {
        Self {
            high_above,
            medium_above,
        }
    }

    /// Thresholds must keep tiers monotonic in stock
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.high_above < self.medium_above {
            return Err(ValidationError::FieldError {
                field: "high_above".to_string(),
                message: format!(
                    "must be >= medium_above ({} < {})",
                    self.high_above, self.medium_above
                ),
            });
        }
        Ok(())
    }

    pub fn tier(&self, stock: Option<i64>) -> StockTier {
        match stock {
            Some(s) if s > self.high_above => StockTier::High,
            Some(s) if s > self.medium_above => StockTier::Medium,
            _ => StockTier::Low,
        }
    }
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self::TABLE
    }
}

/// Keep the first `max_chars` characters and append `...` when longer
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
