//! Column sorting
//!
//! Sorting is always stable: records with equal keys keep their input order in
//! both directions, because the direction flips the comparison result rather
//! than reversing the sequence.

use crate::core::Product;
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    ProductId,
    CategoryId,
    ProductName,
    Price,
    Stock,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::ProductId,
        SortKey::CategoryId,
        SortKey::ProductName,
        SortKey::Price,
        SortKey::Stock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ProductId => "product_id",
            SortKey::CategoryId => "category_id",
            SortKey::ProductName => "product_name",
            SortKey::Price => "price",
            SortKey::Stock => "stock",
        }
    }

    fn value(&self, product: &Product) -> SortValue {
        match self {
            SortKey::ProductId => SortValue::Integer(Some(product.product_id)),
            SortKey::Price => SortValue::Number(product.price),
            SortKey::Stock => SortValue::Integer(product.stock),
            SortKey::CategoryId => SortValue::Text(product.category_label().to_lowercase()),
            SortKey::ProductName => SortValue::Text(product.product_name.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ValidationError::FieldError {
                field: "sort_key".to_string(),
                message: format!("unknown column '{}'", s),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow shown next to the active column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction; no key means input order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Header-click semantics: same column while ascending flips to
    /// descending, anything else starts ascending on `key`
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self::new(key, direction)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Integer(Option<i64>),
    Number(Option<f64>),
    Text(String),
}

impl SortValue {
    // Absent numbers are equal to each other and greater than any present one
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Integer(a), SortValue::Integer(b)) => {
                absent_last(a.as_ref(), b.as_ref(), Ord::cmp)
            }
            (SortValue::Number(a), SortValue::Number(b)) => {
                absent_last(a.as_ref(), b.as_ref(), f64::total_cmp)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // a single key never yields mixed kinds
            _ => Ordering::Equal,
        }
    }
}

fn absent_last<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Sort a copy of `records`; `None` returns the input order unchanged
pub fn sort(records: &[Product], key: Option<SortKey>, direction: SortDirection) -> Vec<Product> {
    let Some(key) = key else {
        return records.to_vec();
    };

    let mut keyed: Vec<(SortValue, &Product)> =
        records.iter().map(|p| (key.value(p), p)).collect();

    // `sort_by` is stable
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));

    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}
