//! Leaf block components.

use askama::Template;

use super::registry::BlockRegistry;
use super::{BlockError, ContentBlock, VisitorContext};

#[derive(Template)]
#[template(path = "blocks/page.html")]
struct PageTemplate<'a> {
    uid: &'a str,
    editable: String,
    children: Vec<String>,
}

/// `page` block: the root of every story, a plain sequence of body blocks.
pub fn render_page(
    registry: &BlockRegistry,
    block: &ContentBlock,
    visitor: &VisitorContext,
) -> Result<String, BlockError> {
    let body: Vec<ContentBlock> = match block.field("body") {
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(|e| BlockError::InvalidField {
                uid: block.uid.clone(),
                field: "body",
                message: e.to_string(),
            })?
        }
        None => Vec::new(),
    };

    let children = body
        .iter()
        .map(|child| registry.render(child, visitor))
        .collect::<Result<Vec<_>, _>>()?;

    let template = PageTemplate {
        uid: &block.uid,
        editable: block.editable_attributes(),
        children,
    };
    Ok(template.render()?)
}

#[derive(Template)]
#[template(path = "blocks/teaser.html")]
struct TeaserTemplate<'a> {
    uid: &'a str,
    editable: String,
    headline: &'a str,
    text: Option<&'a str>,
}

/// `teaser` block: headline with optional supporting text.
pub fn render_teaser(
    _registry: &BlockRegistry,
    block: &ContentBlock,
    _visitor: &VisitorContext,
) -> Result<String, BlockError> {
    let template = TeaserTemplate {
        uid: &block.uid,
        editable: block.editable_attributes(),
        headline: block.str_field("headline").unwrap_or_default(),
        text: block.str_field("text"),
    };
    Ok(template.render()?)
}

#[derive(Template)]
#[template(path = "blocks/image_banner.html")]
struct ImageBannerTemplate<'a> {
    uid: &'a str,
    editable: String,
    image_url: Option<&'a str>,
    image_alt: &'a str,
    headline: Option<&'a str>,
    cta_label: Option<&'a str>,
    cta_link: Option<&'a str>,
}

/// `image_banner` block: full-bleed image with optional headline and CTA.
pub fn render_image_banner(
    _registry: &BlockRegistry,
    block: &ContentBlock,
    _visitor: &VisitorContext,
) -> Result<String, BlockError> {
    // CMS asset fields arrive as {"filename": ..., "alt": ...}
    let image = block.field("image");
    let image_url = image
        .and_then(|i| i.get("filename"))
        .and_then(serde_json::Value::as_str);
    let image_alt = image
        .and_then(|i| i.get("alt"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    let template = ImageBannerTemplate {
        uid: &block.uid,
        editable: block.editable_attributes(),
        image_url,
        image_alt,
        headline: block.str_field("headline"),
        cta_label: block.str_field("cta_label"),
        cta_link: block.str_field("cta_link"),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: serde_json::Value) -> ContentBlock {
        serde_json::from_value(value).expect("valid block")
    }

    #[test]
    fn test_page_renders_body_in_order() {
        let registry = BlockRegistry::with_builtins();
        let page = block(json!({
            "_uid": "root",
            "component": "page",
            "body": [
                {"_uid": "t-1", "component": "teaser", "headline": "First"},
                {"_uid": "t-2", "component": "teaser", "headline": "Second"}
            ]
        }));

        let html = registry
            .render(&page, &VisitorContext::default())
            .expect("renders");
        let first = html.find("First").expect("first child rendered");
        let second = html.find("Second").expect("second child rendered");
        assert!(first < second);
    }

    #[test]
    fn test_teaser_renders_headline_and_text() {
        let registry = BlockRegistry::with_builtins();
        let teaser = block(json!({
            "_uid": "t-1",
            "component": "teaser",
            "headline": "Gear up",
            "text": "New season arrivals"
        }));

        let html = registry
            .render(&teaser, &VisitorContext::default())
            .expect("renders");
        assert!(html.contains("Gear up"));
        assert!(html.contains("New season arrivals"));
    }

    #[test]
    fn test_teaser_escapes_cms_text() {
        let registry = BlockRegistry::with_builtins();
        let teaser = block(json!({
            "_uid": "t-1",
            "component": "teaser",
            "headline": "<script>alert(1)</script>"
        }));

        let html = registry
            .render(&teaser, &VisitorContext::default())
            .expect("renders");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_image_banner_renders_image_and_cta() {
        let registry = BlockRegistry::with_builtins();
        let banner = block(json!({
            "_uid": "b-1",
            "component": "image_banner",
            "image": {"filename": "https://cdn.example/hero.jpg", "alt": "Hero"},
            "headline": "Ride further",
            "cta_label": "Shop now",
            "cta_link": "/products/classic-tee"
        }));

        let html = registry
            .render(&banner, &VisitorContext::default())
            .expect("renders");
        assert!(html.contains("https://cdn.example/hero.jpg"));
        assert!(html.contains("alt=\"Hero\""));
        assert!(html.contains("Shop now"));
    }

    #[test]
    fn test_image_banner_without_image() {
        let registry = BlockRegistry::with_builtins();
        let banner = block(json!({
            "_uid": "b-1",
            "component": "image_banner",
            "headline": "No art yet"
        }));

        let html = registry
            .render(&banner, &VisitorContext::default())
            .expect("renders");
        assert!(html.contains("No art yet"));
        assert!(!html.contains("<img"));
    }
}
