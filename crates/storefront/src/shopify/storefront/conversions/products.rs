//! Product type conversion functions.

use crate::shopify::types::{Image, Money, Product, ProductOption, ProductVariant, SelectedOption};

use super::super::queries::get_product;

/// Convert a `CurrencyCode` enum to string.
fn currency_code_to_string<T: std::fmt::Debug>(code: T) -> String {
    format!("{code:?}")
}

/// Convert the product payload of the product page query.
pub fn convert_product(product: get_product::GetProductProduct) -> Product {
    let selected_variant = product.selected_variant.map(convert_selected_variant);

    // The fallback nodes carry a reduced field set; parent references come
    // from the queried product itself
    let variants = product
        .variants
        .nodes
        .into_iter()
        .map(|node| convert_fallback_variant(node, &product.title, &product.handle))
        .collect();

    Product {
        id: product.id,
        title: product.title,
        handle: product.handle,
        vendor: product.vendor,
        description: product.description,
        featured_image: product.featured_image.map(|i| Image {
            id: i.id,
            url: i.url,
            alt_text: i.alt_text,
            width: i.width,
            height: i.height,
        }),
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.values,
            })
            .collect(),
        selected_variant,
        variants,
    }
}

fn convert_selected_variant(v: get_product::GetProductProductSelectedVariant) -> ProductVariant {
    ProductVariant {
        id: v.id,
        title: v.title,
        available_for_sale: v.available_for_sale,
        price: Money {
            amount: v.price.amount,
            currency_code: currency_code_to_string(v.price.currency_code),
        },
        compare_at_price: v.compare_at_price.map(|p| Money {
            amount: p.amount,
            currency_code: currency_code_to_string(p.currency_code),
        }),
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        image: v.image.map(|i| Image {
            id: i.id,
            url: i.url,
            alt_text: i.alt_text,
            width: i.width,
            height: i.height,
        }),
        unit_price: v.unit_price.map(|p| Money {
            amount: p.amount,
            currency_code: currency_code_to_string(p.currency_code),
        }),
        sku: v.sku,
        product_title: Some(v.product.title),
        product_handle: Some(v.product.handle),
    }
}

fn convert_fallback_variant(
    v: get_product::GetProductProductVariantsNodes,
    product_title: &str,
    product_handle: &str,
) -> ProductVariant {
    ProductVariant {
        id: v.id,
        title: v.title,
        available_for_sale: v.available_for_sale,
        price: Money {
            amount: v.price.amount,
            currency_code: currency_code_to_string(v.price.currency_code),
        },
        compare_at_price: v.compare_at_price.map(|p| Money {
            amount: p.amount,
            currency_code: currency_code_to_string(p.currency_code),
        }),
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        image: None,
        unit_price: None,
        sku: None,
        product_title: Some(product_title.to_string()),
        product_handle: Some(product_handle.to_string()),
    }
}
