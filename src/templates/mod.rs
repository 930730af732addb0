//! Built-in site templates using the Tera template engine
//!
//! Templates and the stylesheet are embedded in the binary, so a site
//! directory only needs an optional `_config.yml` and static assets.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{SiteConfig, SocialLink};
use crate::content::{html_escape, ContentRecord, RecordLink};
use crate::helpers::{current_year, normalize_path, url_for};

/// The site stylesheet, served at `/css/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the built-in site templates loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escape text but leave slashes alone so paths in attributes stay readable
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("project.html", include_str!("site/project.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("cv.html", include_str!("site/cv.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            ("partials/toast.html", include_str!("site/partials/toast.html")),
            (
                "partials/record_header.html",
                include_str!("site/partials/record_header.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    Ok(tera::Value::String(truncate_chars(&s, length, &omission)))
}

fn truncate_chars(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

// Data structures for template context

/// Navigation entries, in display order
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("About", "/about/"),
    ("Projects", "/projects/"),
    ("Blog", "/blog/"),
    ("CV", "/cv/"),
    ("Contact", "/contact/"),
];

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub email: String,
    pub calendly_url: String,
    pub cv_url: String,
    pub css_url: String,
    pub feed_url: String,
    pub home_url: String,
    pub contact_url: String,
    pub social: Vec<SocialLink>,
    pub nav: Vec<MenuItem>,
    pub current_year: i32,
}

impl SiteData {
    /// Site-wide data for a page at `current_path`
    pub fn new(config: &SiteConfig, current_path: &str) -> Self {
        let current = normalize_path(current_path);
        let nav = NAV_ITEMS
            .iter()
            .map(|(name, path)| MenuItem {
                name: name.to_string(),
                path: url_for(config, path),
                active: is_active(path, &current),
            })
            .collect();

        Self {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            email: config.email.clone(),
            calendly_url: config.calendly_url.clone(),
            cv_url: url_for(config, &config.cv_file),
            css_url: url_for(config, "/css/style.css"),
            feed_url: url_for(config, "/atom.xml"),
            home_url: url_for(config, "/"),
            contact_url: url_for(config, "/contact/"),
            social: config.social.clone(),
            nav,
            current_year: current_year(),
        }
    }
}

/// Home is only active on itself; sections stay active on their detail pages
fn is_active(item_path: &str, current: &str) -> bool {
    if item_path == "/" {
        current == "/"
    } else {
        current.starts_with(item_path)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

/// A record as shown on a listing card
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub id: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub summary: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub links: Vec<RecordLink>,
    pub url: String,
    pub image: Option<String>,
}

impl CardData {
    pub fn new(record: &ContentRecord, url: String, image: Option<String>) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category: record.category.clone(),
            date: record.date.clone(),
            summary: record.summary.clone(),
            excerpt: record.excerpt.clone(),
            tags: record.tags.clone(),
            links: record.links.clone(),
            url,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_parse() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_paths_are_not_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&config, "/"));
        context.insert("toast", &None::<()>);
        let html = renderer.render("404.html", &context).unwrap();
        assert!(html.contains("href=\"/about/\""));
        assert!(html.contains("href=\"/css/style.css\""));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10, "…"), "short");
        assert_eq!(truncate_chars("a long sentence", 6, "…"), "a long…");
        assert_eq!(truncate_chars("héllo wörld", 5, "."), "héllo.");
    }

    #[test]
    fn test_nav_active_state() {
        let config = SiteConfig::default();
        let site = SiteData::new(&config, "/blog/lbs-journey");
        let active: Vec<_> = site
            .nav
            .iter()
            .filter(|i| i.active)
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(active, vec!["Blog"]);

        let home = SiteData::new(&config, "/");
        assert!(home.nav[0].active);
        assert_eq!(home.nav.iter().filter(|i| i.active).count(), 1);
    }

    #[test]
    fn test_site_urls_follow_root() {
        let mut config = SiteConfig::default();
        config.root = "/me/".to_string();
        let site = SiteData::new(&config, "/");
        assert_eq!(site.css_url, "/me/css/style.css");
        assert_eq!(site.cv_url, "/me/isaac-hasbani-cv.pdf");
        assert_eq!(site.nav[1].path, "/me/about/");
    }
}
