//! Presentation adapters over the table view engine
//!
//! Every layout renders the same engine output; they only differ in their
//! stock-tier cut points, description excerpt length and tier labels.
//!
//! | Layout | Stock tiers (high / medium above) | Excerpt |
//! |--------|-----------------------------------|---------|
//! | Table  | 50 / 10                           | 50      |
//! | Grid   | 70 / 55                           | 100     |
//! | Mobile | 80 / 50                           | 80      |

use crate::core::Product;
use crate::core::error::ValidationError;
use crate::engine::format::{
    StockThresholds, StockTier, format_currency, format_optional_currency, truncate_description,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Table,
    Grid,
    Mobile,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Table => "table",
            Layout::Grid => "grid",
            Layout::Mobile => "mobile",
        }
    }

    pub fn default_preset(&self) -> LayoutPreset {
        match self {
            Layout::Table => LayoutPreset::new(StockThresholds::TABLE, 50),
            Layout::Grid => LayoutPreset::new(StockThresholds::GRID, 100),
            Layout::Mobile => LayoutPreset::new(StockThresholds::MOBILE, 80),
        }
    }

    pub fn tier_label(&self, tier: StockTier) -> &'static str {
        match (self, tier) {
            (Layout::Grid, StockTier::High) => "Banyak",
            (Layout::Grid, StockTier::Medium) => "Sedang",
            (Layout::Grid, StockTier::Low) => "Sedikit",
            (_, tier) => tier.as_str(),
        }
    }

    /// Render with this layout's built-in preset
    pub fn render(&self, records: &[Product]) -> Vec<DisplayRow> {
        Renderer::new(*self, self.default_preset()).render(records)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Layout::Table),
            "grid" => Ok(Layout::Grid),
            "mobile" => Ok(Layout::Mobile),
            other => Err(ValidationError::FieldError {
                field: "layout".to_string(),
                message: format!("unknown layout '{}'", other),
            }),
        }
    }
}

/// Per-layout styling knobs, overridable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPreset {
    pub stock: StockThresholds,

    /// Maximum description length before it is cut with `...`
    pub description_excerpt: usize,
}

impl LayoutPreset {
    pub const fn new(stock: StockThresholds, description_excerpt: usize) -> Self {
        Self {
            stock,
            description_excerpt,
        }
    }
}

/// One product as it appears on screen and on paper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub product_id: i64,
    /// `#1`
    pub id_label: String,
    /// `KAT-5`
    pub category_label: String,
    pub name: String,
    /// Uppercase first letter of the name, for the avatar bubble
    pub avatar: String,
    pub price_label: String,
    /// `15 unit`
    pub stock_label: String,
    pub tier: StockTier,
    pub tier_label: String,
    /// Formatted `price * stock`
    pub value_label: String,
    /// Description excerpt, `-` when absent
    pub description: String,
}

/// Renders products for one layout
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    layout: Layout,
    preset: LayoutPreset,
}

impl Renderer {
    pub fn new(layout: Layout, preset: LayoutPreset) -> Self {
        Self { layout, preset }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn preset(&self) -> LayoutPreset {
        self.preset
    }

    pub fn render(&self, records: &[Product]) -> Vec<DisplayRow> {
        records.iter().map(|p| self.render_row(p)).collect()
    }

    pub fn render_row(&self, product: &Product) -> DisplayRow {
        let tier = self.preset.stock.tier(product.stock);
        let description = match product.description.as_deref() {
            Some(text) if !text.is_empty() => {
                truncate_description(text, self.preset.description_excerpt)
            }
            _ => "-".to_string(),
        };

        DisplayRow {
            product_id: product.product_id,
            id_label: format!("#{}", product.product_id),
            category_label: product.category_label(),
            name: product.product_name.clone(),
            avatar: product
                .product_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
            price_label: format_optional_currency(product.price),
            stock_label: product
                .stock
                .map(|s| format!("{} unit", s))
                .unwrap_or_else(|| "-".to_string()),
            tier,
            tier_label: self.layout.tier_label(tier).to_string(),
            value_label: format_currency(product.inventory_value()),
            description,
        }
    }
}
