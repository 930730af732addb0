//! Generator module - writes every page of the site as static HTML

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::content::{render_blocks, render_body, ContentRecord};
use crate::helpers::{date_rfc3339, full_url_for};
use crate::pages::{PageComposer, Route};
use crate::templates::STYLESHEET;
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    composer: PageComposer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            composer: PageComposer::new(folio)?,
        })
    }

    /// Generate the entire site, returning the number of pages written
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        // User assets first so generated files win on conflicts
        self.copy_static_assets()?;
        self.write_stylesheet()?;

        let pages = self.generate_pages()?;
        self.generate_missing_page()?;
        self.generate_atom_feed()?;
        self.generate_search_index()?;

        Ok(pages)
    }

    /// Render every route to `<public>/<route>/index.html`
    fn generate_pages(&self) -> Result<usize> {
        let routes = Route::all(&self.folio.content);
        for route in &routes {
            let page = self.composer.compose(route)?;
            let output_path = self.output_path(route);
            write_file(&output_path, &page.html)?;
            tracing::debug!("Generated: {:?}", output_path);
        }
        tracing::info!("Generated {} pages", routes.len());
        Ok(routes.len())
    }

    fn generate_missing_page(&self) -> Result<()> {
        let page = self.composer.compose(&Route::NotFound)?;
        write_file(&self.folio.public_dir.join("404.html"), &page.html)
    }

    fn output_path(&self, route: &Route) -> PathBuf {
        let clean_path = route.path();
        let clean_path = clean_path.trim_matches('/');
        if clean_path.is_empty() {
            self.folio.public_dir.join("index.html")
        } else {
            self.folio.public_dir.join(clean_path).join("index.html")
        }
    }

    fn write_stylesheet(&self) -> Result<()> {
        write_file(
            &self.folio.public_dir.join("css").join("style.css"),
            STYLESHEET,
        )
    }

    /// Copy the static directory (CV PDF, images) into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::info!("Copied {} static files", copied);
        Ok(())
    }

    /// Generate the Atom feed of blog posts
    fn generate_atom_feed(&self) -> Result<()> {
        let config = &self.folio.config;
        let posts: Vec<&ContentRecord> = self
            .folio
            .content
            .blog
            .with_detail()
            .take(config.feed_limit)
            .collect();

        let now = chrono::Utc::now().to_rfc3339();
        let updated = posts
            .first()
            .and_then(|p| date_rfc3339(&p.date))
            .unwrap_or_else(|| now.clone());

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "/atom.xml")
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\"/>\n",
            full_url_for(config, "/blog/")
        ));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}</id>\n", full_url_for(config, "/")));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts {
            let url = full_url_for(config, &Route::BlogPost(post.id.clone()).path());
            let date = date_rfc3339(&post.date).unwrap_or_else(|| now.clone());
            let content = render_blocks(&render_body(&post.body));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
            feed.push_str(&format!("    <id>{}</id>\n", url));
            feed.push_str(&format!("    <published>{}</published>\n", date));
            feed.push_str(&format!("    <updated>{}</updated>\n", date));
            feed.push_str(&format!(
                "    <category term=\"{}\"/>\n",
                escape_xml(&post.category)
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&post.excerpt)
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        write_file(&self.folio.public_dir.join("atom.xml"), &feed)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Generate search index (JSON) over posts and projects with a detail page
    fn generate_search_index(&self) -> Result<()> {
        let content = &self.folio.content;
        let entries = content
            .blog
            .with_detail()
            .map(|r| (r, Route::BlogPost(r.id.clone())))
            .chain(
                content
                    .projects
                    .with_detail()
                    .map(|r| (r, Route::Project(r.id.clone()))),
            );

        let search_data: Vec<serde_json::Value> = entries
            .map(|(record, route)| {
                let text: Vec<String> = render_body(&record.body)
                    .iter()
                    .map(|b| b.text())
                    .collect();
                serde_json::json!({
                    "title": record.title,
                    "url": route.path(),
                    "category": record.category,
                    "date": record.date,
                    "content": text.join("\n"),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        write_file(&self.folio.public_dir.join("search.json"), &json)?;
        tracing::info!("Generated search.json");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
