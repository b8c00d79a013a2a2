//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! `graphql_client` generated types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Format for display, suppressing trailing zeros.
    ///
    /// Whole amounts drop the decimals entirely (`$25.00` renders as `$25`);
    /// fractional amounts keep two places (`$25.50`). Currencies without a
    /// known symbol fall back to `amount CODE`.
    #[must_use]
    pub fn format(&self) -> String {
        let symbol = match self.currency_code.as_str() {
            "USD" | "CAD" | "AUD" => "$",
            "EUR" => "\u{20ac}",
            "GBP" => "\u{a3}",
            _ => "",
        };

        let Ok(amount) = self.amount.parse::<f64>() else {
            // Unparsable amounts pass through untouched
            return if symbol.is_empty() {
                format!("{} {}", self.amount, self.currency_code)
            } else {
                format!("{symbol}{}", self.amount)
            };
        };

        let formatted = if amount.fract().abs() < f64::EPSILON {
            format!("{amount:.0}")
        } else {
            format!("{amount:.2}")
        };

        if symbol.is_empty() {
            format!("{formatted} {}", self.currency_code)
        } else {
            format!("{symbol}{formatted}")
        }
    }
}

// =============================================================================
// Image Types
// =============================================================================

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Shopify image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size", "Color").
    pub name: String,
    /// Selected value (e.g., "Large", "Blue").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["Small", "Medium", "Large"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID (`gid://shopify/ProductVariant/...`).
    pub id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Current price.
    pub price: Money,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Money>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
    /// Unit price (for products sold by measure).
    pub unit_price: Option<Money>,
    /// SKU code.
    pub sku: Option<String>,
    /// Parent product title.
    pub product_title: Option<String>,
    /// Parent product handle.
    pub product_handle: Option<String>,
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Vendor name.
    pub vendor: String,
    /// Description, rendered as trusted rich HTML.
    pub description: String,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Variant resolved by the backend from the visitor's selected options.
    pub selected_variant: Option<ProductVariant>,
    /// Leading variants (the query requests the first as a fallback).
    pub variants: Vec<ProductVariant>,
}
