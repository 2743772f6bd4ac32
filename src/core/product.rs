//! Product record as served by the catalog API
//!
//! Records are read-only for everything downstream of the fetch. Numeric
//! columns are parsed leniently: PostgreSQL `NUMERIC` values arrive as JSON
//! strings (`"12000.00"`), and a malformed value must degrade to "absent"
//! instead of failing the whole payload.

use serde::{Deserialize, Serialize};

/// One row of the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier
    pub product_id: i64,

    /// Category reference; the detail endpoint does not select it
    #[serde(default, deserialize_with = "lenient::integer")]
    pub category_id: Option<i64>,

    #[serde(default, deserialize_with = "lenient::required_text")]
    pub product_name: String,

    /// Unit price in whole currency units
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: Option<i64>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl Product {
    pub fn new(
        product_id: i64,
        category_id: i64,
        product_name: impl Into<String>,
        price: f64,
        stock: i64,
    ) -> Self {
        Self {
            product_id,
            category_id: Some(category_id),
            product_name: product_name.into(),
            price: Some(price),
            stock: Some(stock),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Category as rendered on screen and in exports (`KAT-5`), empty when absent
    pub fn category_label(&self) -> String {
        self.category_id
            .map(|id| format!("KAT-{}", id))
            .unwrap_or_default()
    }

    /// Description text, empty when absent
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// `price * stock`, absent values contribute nothing
    pub fn inventory_value(&self) -> f64 {
        match (self.price, self.stock) {
            (Some(price), Some(stock)) => price * stock as f64,
            _ => 0.0,
        }
    }
}

/// Field deserializers that never reject a record for a bad column
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(number_from_value))
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        }))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn required_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(text(deserializer)?.unwrap_or_default())
    }

    fn number_from_value(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|f| f.is_finite())
    }

    fn whole(f: f64) -> Option<i64> {
        (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
    }
}
