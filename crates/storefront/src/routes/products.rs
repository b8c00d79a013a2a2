//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::shopify::types::{Image, Money, Product, ProductVariant, SelectedOption};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub title: String,
    pub description_html: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub image: Option<ImageView>,
    pub orderable: bool,
    pub variant_id: String,
    pub express_checkout_url: String,
}

impl ProductShowTemplate {
    /// Shape the loaded payload for rendering. Pure; no I/O.
    fn build(product: Product, selected_variant: ProductVariant, store_domain: &str) -> Self {
        let orderable = selected_variant.available_for_sale;
        let image = display_image(&selected_variant, &product).map(|img| ImageView {
            alt: img
                .alt_text
                .clone()
                .unwrap_or_else(|| product.title.clone()),
            url: img.url.clone(),
        });

        Self {
            title: product.title,
            description_html: product.description,
            price: selected_variant.price.format(),
            compare_at_price: selected_variant
                .compare_at_price
                .as_ref()
                .map(Money::format),
            image,
            orderable,
            express_checkout_url: shop_pay_permalink(store_domain, &selected_variant.id),
            variant_id: selected_variant.id,
        }
    }
}

// =============================================================================
// Payload Shaping
// =============================================================================

/// Pick the active variant: the backend's own resolution wins, else the
/// first variant, so a page is always renderable once a product exists.
fn resolve_selected_variant(product: &Product) -> Option<ProductVariant> {
    product
        .selected_variant
        .clone()
        .or_else(|| product.variants.first().cloned())
}

/// The displayed image: the variant's own image, else the product's
/// featured image.
fn display_image<'a>(variant: &'a ProductVariant, product: &'a Product) -> Option<&'a Image> {
    variant.image.as_ref().or(product.featured_image.as_ref())
}

/// Extract the numeric tail of a `gid://shopify/ProductVariant/N` id.
fn variant_numeric_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// Shop Pay cart permalink for express checkout of a single variant.
fn shop_pay_permalink(store_domain: &str, variant_id: &str) -> String {
    format!(
        "https://{store_domain}/cart/{}:1?payment=shop_pay",
        variant_numeric_id(variant_id)
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product detail page.
///
/// Every query parameter is forwarded to the backend as a selected option,
/// in iteration order and without deduplication; the backend owns any
/// last-one-wins semantics.
///
/// # Errors
///
/// Returns 404 (empty body) when no product exists for the handle.
#[instrument(skip(state, params), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ProductShowTemplate> {
    let selected_options = params
        .into_iter()
        .map(|(name, value)| SelectedOption { name, value })
        .collect();

    let product = state
        .storefront()
        .product_by_handle(&handle, selected_options)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {handle}")))?;

    let selected_variant = resolve_selected_variant(&product)
        .ok_or_else(|| AppError::Internal(format!("product {handle} has no variants")))?;

    let store_domain = &state.config().shopify.store;

    Ok(ProductShowTemplate::build(
        product,
        selected_variant,
        store_domain,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::types::{Image, Money};

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn variant(id: &str, available: bool, image: Option<Image>) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            title: "Default".to_string(),
            available_for_sale: available,
            price: money("25.00"),
            compare_at_price: None,
            selected_options: Vec::new(),
            image,
            unit_price: None,
            sku: None,
            product_title: Some("Classic Tee".to_string()),
            product_handle: Some("classic-tee".to_string()),
        }
    }

    fn tee_image(url: &str) -> Image {
        Image {
            id: None,
            url: url.to_string(),
            alt_text: None,
            width: Some(700),
            height: Some(700),
        }
    }

    fn product(
        selected_variant: Option<ProductVariant>,
        variants: Vec<ProductVariant>,
    ) -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            title: "Classic Tee".to_string(),
            handle: "classic-tee".to_string(),
            vendor: "Ride".to_string(),
            description: "<p>Soft.</p>".to_string(),
            featured_image: Some(tee_image("https://cdn.shopify.com/featured.jpg")),
            options: Vec::new(),
            selected_variant,
            variants,
        }
    }

    #[test]
    fn test_resolve_prefers_backend_selection() {
        let backend_pick = variant("gid://shopify/ProductVariant/2", true, None);
        let fallback = variant("gid://shopify/ProductVariant/1", true, None);
        let product = product(Some(backend_pick), vec![fallback]);

        let resolved = resolve_selected_variant(&product).expect("variant");
        assert_eq!(resolved.id, "gid://shopify/ProductVariant/2");
    }

    #[test]
    fn test_resolve_falls_back_to_first_variant() {
        let fallback = variant("gid://shopify/ProductVariant/1", false, None);
        let product = product(None, vec![fallback]);

        let resolved = resolve_selected_variant(&product).expect("variant");
        assert_eq!(resolved.id, "gid://shopify/ProductVariant/1");
        // Orderable reflects the fallback variant's own availability
        assert!(!resolved.available_for_sale);
    }

    #[test]
    fn test_resolve_none_when_no_variants() {
        let product = product(None, Vec::new());
        assert!(resolve_selected_variant(&product).is_none());
    }

    #[test]
    fn test_display_image_prefers_variant_image() {
        let v = variant(
            "gid://shopify/ProductVariant/1",
            true,
            Some(tee_image("https://cdn.shopify.com/variant.jpg")),
        );
        let p = product(None, vec![v.clone()]);

        let image = display_image(&v, &p).expect("image");
        assert_eq!(image.url, "https://cdn.shopify.com/variant.jpg");
    }

    #[test]
    fn test_display_image_falls_back_to_featured() {
        let v = variant("gid://shopify/ProductVariant/1", true, None);
        let p = product(None, vec![v.clone()]);

        let image = display_image(&v, &p).expect("image");
        assert_eq!(image.url, "https://cdn.shopify.com/featured.jpg");
    }

    #[test]
    fn test_display_image_none_when_neither_present() {
        let v = variant("gid://shopify/ProductVariant/1", true, None);
        let mut p = product(None, vec![v.clone()]);
        p.featured_image = None;

        assert!(display_image(&v, &p).is_none());
    }

    #[test]
    fn test_shop_pay_permalink() {
        assert_eq!(
            shop_pay_permalink("ride.myshopify.com", "gid://shopify/ProductVariant/41"),
            "https://ride.myshopify.com/cart/41:1?payment=shop_pay"
        );
        // Plain ids pass through unchanged
        assert_eq!(
            shop_pay_permalink("ride.myshopify.com", "41"),
            "https://ride.myshopify.com/cart/41:1?payment=shop_pay"
        );
    }

    #[test]
    fn test_view_omits_purchase_affordances_when_not_orderable() {
        let v = variant("gid://shopify/ProductVariant/1", false, None);
        let p = product(Some(v.clone()), vec![v]);
        let selected = resolve_selected_variant(&p).expect("variant");

        let view = ProductShowTemplate::build(p, selected, "ride.myshopify.com");
        assert!(!view.orderable);

        let html = view.render().expect("renders");
        assert!(!html.contains("shop_pay"));
        assert!(!html.contains("Add to cart"));
        // Price and description still render
        assert!(html.contains("$25"));
        assert!(html.contains("<p>Soft.</p>"));
    }

    #[test]
    fn test_view_renders_purchase_affordances_when_orderable() {
        let v = variant("gid://shopify/ProductVariant/41", true, None);
        let p = product(Some(v.clone()), vec![v]);
        let selected = resolve_selected_variant(&p).expect("variant");

        let view = ProductShowTemplate::build(p, selected, "ride.myshopify.com");
        let html = view.render().expect("renders");

        assert!(html.contains("https://ride.myshopify.com/cart/41:1?payment=shop_pay"));
        assert!(html.contains("Add to cart"));
        assert!(html.contains("gid://shopify/ProductVariant/41"));
    }

    #[test]
    fn test_view_image_alt_defaults_to_product_title() {
        let v = variant("gid://shopify/ProductVariant/1", true, None);
        let p = product(Some(v.clone()), vec![v]);
        let selected = resolve_selected_variant(&p).expect("variant");

        let view = ProductShowTemplate::build(p, selected, "ride.myshopify.com");
        let image = view.image.as_ref().expect("featured image fallback");
        assert_eq!(image.alt, "Classic Tee");
    }
}
