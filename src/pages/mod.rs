//! Routes and page composition
//!
//! Every page of the site is produced here, for both the generator and the
//! server. A route maps to exactly one composer; record routes fall back to a
//! "not found" view when the id is unknown.

use anyhow::Result;
use tera::Context;

use crate::config::SiteConfig;
use crate::contact::{ContactPageState, Toast};
use crate::content::{render_blocks, render_body, Content, ContentRecord};
use crate::helpers::url_for;
use crate::templates::{CardData, SiteData, TemplateRenderer};
use crate::Folio;

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Projects,
    Project(String),
    Blog,
    BlogPost(String),
    Cv,
    Contact,
    NotFound,
}

impl Route {
    /// Resolve a URL path (without the site root)
    pub fn parse(path: &str) -> Self {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["projects"] => Route::Projects,
            ["projects", id] => Route::Project(id.to_string()),
            ["blog"] => Route::Blog,
            ["blog", id] => Route::BlogPost(id.to_string()),
            ["cv"] => Route::Cv,
            ["contact"] => Route::Contact,
            _ => Route::NotFound,
        }
    }

    /// Canonical path, with a trailing slash
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about/".to_string(),
            Route::Projects => "/projects/".to_string(),
            Route::Project(id) => format!("/projects/{}/", id),
            Route::Blog => "/blog/".to_string(),
            Route::BlogPost(id) => format!("/blog/{}/", id),
            Route::Cv => "/cv/".to_string(),
            Route::Contact => "/contact/".to_string(),
            Route::NotFound => "/404.html".to_string(),
        }
    }

    /// Every page that exists for the given content.
    ///
    /// Records without a body are listed but have no detail route.
    pub fn all(content: &Content) -> Vec<Route> {
        let mut routes = vec![
            Route::Home,
            Route::About,
            Route::Projects,
            Route::Blog,
            Route::Cv,
            Route::Contact,
        ];
        routes.extend(
            content
                .projects
                .with_detail()
                .map(|r| Route::Project(r.id.clone())),
        );
        routes.extend(
            content
                .blog
                .with_detail()
                .map(|r| Route::BlogPost(r.id.clone())),
        );
        routes
    }
}

/// Whether the composed page is the one that was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: String,
}

impl RenderedPage {
    fn found(html: String) -> Self {
        Self {
            status: PageStatus::Found,
            html,
        }
    }

    fn not_found(html: String) -> Self {
        Self {
            status: PageStatus::NotFound,
            html,
        }
    }
}

/// The two record collections with detail pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Blog,
    Projects,
}

impl Collection {
    fn listing(self) -> Route {
        match self {
            Collection::Blog => Route::Blog,
            Collection::Projects => Route::Projects,
        }
    }

    fn detail(self, id: &str) -> Route {
        match self {
            Collection::Blog => Route::BlogPost(id.to_string()),
            Collection::Projects => Route::Project(id.to_string()),
        }
    }

    fn template(self) -> &'static str {
        match self {
            Collection::Blog => "post.html",
            Collection::Projects => "project.html",
        }
    }

    fn not_found_heading(self) -> &'static str {
        match self {
            Collection::Blog => "Post not found",
            Collection::Projects => "Project not found",
        }
    }

    fn back_label(self) -> &'static str {
        match self {
            Collection::Blog => "Back to Blog",
            Collection::Projects => "Back to Projects",
        }
    }
}

/// Renders routes to HTML
pub struct PageComposer {
    config: SiteConfig,
    content: Content,
    renderer: TemplateRenderer,
}

impl PageComposer {
    pub fn new(folio: &Folio) -> Result<Self> {
        Self::with_content(folio.config.clone(), folio.content.clone())
    }

    pub fn with_content(config: SiteConfig, content: Content) -> Result<Self> {
        Ok(Self {
            config,
            content,
            renderer: TemplateRenderer::new()?,
        })
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Compose a route. The contact page is rendered with an empty form.
    pub fn compose(&self, route: &Route) -> Result<RenderedPage> {
        match route {
            Route::Home => self.home(),
            Route::About => self.about(),
            Route::Projects => self.projects(),
            Route::Project(id) => self.record(Collection::Projects, id),
            Route::Blog => self.blog(),
            Route::BlogPost(id) => self.record(Collection::Blog, id),
            Route::Cv => self.cv(),
            Route::Contact => self.contact(&ContactPageState::default()),
            Route::NotFound => self.missing_page(),
        }
    }

    /// Contact page for a given form state
    pub fn contact(&self, state: &ContactPageState) -> Result<RenderedPage> {
        let mut context = self.base_context(&Route::Contact, state.toast.as_ref());
        context.insert("contact", &self.content.profile.contact);
        context.insert("state", state);
        let html = self.renderer.render("contact.html", &context)?;
        Ok(RenderedPage::found(html))
    }

    fn base_context(&self, route: &Route, toast: Option<&Toast>) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&self.config, &route.path()));
        context.insert("current_path", &route.path());
        context.insert("toast", &toast);
        context
    }

    fn url(&self, route: &Route) -> String {
        url_for(&self.config, &route.path())
    }

    fn image_url(&self, record: &ContentRecord) -> Option<String> {
        record
            .image
            .as_deref()
            .map(|image| url_for(&self.config, image))
    }

    fn cards<'a>(
        &self,
        records: impl Iterator<Item = &'a ContentRecord>,
        collection: Collection,
    ) -> Vec<CardData> {
        records
            .map(|r| {
                CardData::new(
                    r,
                    self.url(&collection.detail(&r.id)),
                    self.image_url(r),
                )
            })
            .collect()
    }

    fn home(&self) -> Result<RenderedPage> {
        let home = &self.content.profile.home;
        let quick_links: Vec<_> = home
            .quick_links
            .iter()
            .map(|link| {
                let mut link = link.clone();
                link.href = url_for(&self.config, &link.href);
                link
            })
            .collect();

        let mut context = self.base_context(&Route::Home, None);
        context.insert("home", home);
        context.insert("quick_links", &quick_links);
        context.insert(
            "about_preview_html",
            &render_blocks(&render_body(&home.about_preview)),
        );
        context.insert(
            "featured_projects",
            &self.cards(self.content.projects.featured(), Collection::Projects),
        );
        context.insert(
            "featured_posts",
            &self.cards(self.content.blog.featured(), Collection::Blog),
        );
        context.insert("about_url", &self.url(&Route::About));
        context.insert("projects_url", &self.url(&Route::Projects));
        context.insert("blog_url", &self.url(&Route::Blog));
        context.insert("cv_page_url", &self.url(&Route::Cv));

        Ok(RenderedPage::found(
            self.renderer.render("home.html", &context)?,
        ))
    }

    fn about(&self) -> Result<RenderedPage> {
        let about = &self.content.profile.about;
        let mut context = self.base_context(&Route::About, None);
        context.insert("about", about);
        context.insert("story_html", &render_blocks(&render_body(&about.story)));
        Ok(RenderedPage::found(
            self.renderer.render("about.html", &context)?,
        ))
    }

    fn projects(&self) -> Result<RenderedPage> {
        let mut context = self.base_context(&Route::Projects, None);
        context.insert(
            "projects",
            &self.cards(self.content.projects.iter(), Collection::Projects),
        );
        Ok(RenderedPage::found(
            self.renderer.render("projects.html", &context)?,
        ))
    }

    fn blog(&self) -> Result<RenderedPage> {
        let mut context = self.base_context(&Route::Blog, None);
        context.insert(
            "posts",
            &self.cards(self.content.blog.iter(), Collection::Blog),
        );
        Ok(RenderedPage::found(
            self.renderer.render("blog.html", &context)?,
        ))
    }

    fn cv(&self) -> Result<RenderedPage> {
        let mut context = self.base_context(&Route::Cv, None);
        context.insert("cv", &self.content.profile.cv);
        Ok(RenderedPage::found(self.renderer.render("cv.html", &context)?))
    }

    /// Detail page of a blog post or project
    fn record(&self, collection: Collection, id: &str) -> Result<RenderedPage> {
        let registry = match collection {
            Collection::Blog => &self.content.blog,
            Collection::Projects => &self.content.projects,
        };
        let route = collection.detail(id);

        let mut context = self.base_context(&route, None);
        context.insert("back_url", &self.url(&collection.listing()));
        context.insert("back_label", collection.back_label());

        let Some(record) = registry.detail(id) else {
            tracing::debug!("No record {:?}, rendering fallback", id);
            context.insert("heading", collection.not_found_heading());
            let html = self.renderer.render("not_found.html", &context)?;
            return Ok(RenderedPage::not_found(html));
        };

        context.insert("record", record);
        context.insert("image_url", &self.image_url(record));
        context.insert("body_html", &render_blocks(&render_body(&record.body)));
        let html = self.renderer.render(collection.template(), &context)?;
        Ok(RenderedPage::found(html))
    }

    fn missing_page(&self) -> Result<RenderedPage> {
        let context = self.base_context(&Route::NotFound, None);
        Ok(RenderedPage::not_found(
            self.renderer.render("404.html", &context)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;

    fn composer() -> PageComposer {
        PageComposer::with_content(SiteConfig::default(), Content::builtin().unwrap()).unwrap()
    }

    fn position(html: &str, needle: &str) -> usize {
        html.find(needle)
            .unwrap_or_else(|| panic!("{:?} not found in page", needle))
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/about/"), Route::About);
        assert_eq!(
            Route::parse("/blog/lbs-journey/"),
            Route::BlogPost("lbs-journey".to_string())
        );
        assert_eq!(
            Route::parse("projects/aws-cloud-resume"),
            Route::Project("aws-cloud-resume".to_string())
        );
        assert_eq!(Route::parse("/blog/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/nope"), Route::NotFound);
    }

    #[test]
    fn test_route_path_parses_back() {
        let content = Content::builtin().unwrap();
        for route in Route::all(&content) {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_all_routes_cover_records() {
        let content = Content::builtin().unwrap();
        let routes = Route::all(&content);
        assert_eq!(
            routes.len(),
            6 + content.projects.with_detail().count() + content.blog.with_detail().count()
        );
        assert!(routes.contains(&Route::Project("olympic-data-story".to_string())));
        assert!(routes.contains(&Route::BlogPost("ai-product-strategy".to_string())));
        assert!(!routes.contains(&Route::BlogPost("tech-shapes-ma-deals".to_string())));
    }

    #[test]
    fn test_every_route_renders() {
        let composer = composer();
        for route in Route::all(composer.content()) {
            let page = composer.compose(&route).unwrap();
            assert_eq!(page.status, PageStatus::Found, "{:?}", route);
            assert!(page.html.contains("</html>"));
        }
    }

    #[test]
    fn test_blog_post_header_and_body() {
        let page = composer()
            .compose(&Route::BlogPost("cloud-resume-learnings".to_string()))
            .unwrap();
        let html = &page.html;
        assert!(html.contains("What I Learned Building the AWS Cloud Resume"));
        assert!(html.contains("Aug 22, 2024"));
        assert!(html.contains("8 min read"));
        assert!(html.contains("<h2 class=\"body-heading\">Technical Learnings</h2>"));
        assert!(html.contains("<strong>Infrastructure as Code</strong>: Using Terraform"));
        assert!(position(html, "The Challenge Structure") < position(html, "Recommendation</h2>"));
    }

    #[test]
    fn test_unknown_post_renders_fallback() {
        let page = composer()
            .compose(&Route::BlogPost("does-not-exist".to_string()))
            .unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Post not found"));
        assert!(page.html.contains("href=\"/blog/\""));
        assert!(page.html.contains("Back to Blog"));
        assert!(!page.html.contains("body-heading"));
    }

    #[test]
    fn test_unknown_project_renders_fallback() {
        let page = composer()
            .compose(&Route::Project("does-not-exist".to_string()))
            .unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Project not found"));
        assert!(page.html.contains("Back to Projects"));
    }

    #[test]
    fn test_sample_record_end_to_end() {
        let mut content = Content::builtin().unwrap();
        content.blog = ContentRegistry::from_records(vec![ContentRecord::new(
            "sample", "Sample", "Test",
        )
        .with_body("## Title\n- item one\n**Bold line**\nplain line")])
        .unwrap();
        let composer = PageComposer::with_content(SiteConfig::default(), content).unwrap();

        let html = composer
            .compose(&Route::BlogPost("sample".to_string()))
            .unwrap()
            .html;
        let heading = position(&html, "<h2 class=\"body-heading\">Title</h2>");
        let item = position(&html, "<li>item one</li>");
        let bold = position(&html, "<p class=\"body-lead\">Bold line</p>");
        let plain = position(&html, "<p>plain line</p>");
        assert!(heading < item && item < bold && bold < plain);
        assert!(!html.contains("<p></p>"));
    }

    #[test]
    fn test_project_detail_shows_links_and_stack() {
        let html = composer()
            .compose(&Route::Project("canvas-grade-processor".to_string()))
            .unwrap()
            .html;
        assert!(html.contains("https://canvas-processor.vercel.app"));
        assert!(html.contains("Live Demo"));
        assert!(html.contains("Tech Stack"));
        assert!(html.contains("Chart.js"));
    }

    #[test]
    fn test_home_lists_only_featured() {
        let html = composer().compose(&Route::Home).unwrap().html;
        assert!(html.contains("AWS Cloud Resume Challenge"));
        assert!(html.contains("How Tech Shapes M&amp;A Deals"));
        assert!(!html.contains("Olympic House Price Data Story"));
        assert!(!html.contains("What I Learned Building the AWS Cloud Resume"));
    }

    #[test]
    fn test_listings_show_every_record() {
        let composer = composer();
        let projects = composer.compose(&Route::Projects).unwrap().html;
        assert!(projects.contains("Olympic House Price Data Story"));
        let blog = composer.compose(&Route::Blog).unwrap().html;
        for record in composer.content().blog.iter() {
            assert!(blog.contains(&format!("href=\"/blog/{}/\"", record.id)));
        }
    }

    #[test]
    fn test_listed_post_without_body() {
        let composer = composer();
        let blog = composer.compose(&Route::Blog).unwrap().html;
        assert!(blog.contains("How Tech Shapes M&amp;A Deals: A Practical Guide"));
        assert!(blog.contains("href=\"/blog/tech-shapes-ma-deals/\""));
        assert!(blog.contains("src=\"/images/deal.jpg\""));

        let page = composer
            .compose(&Route::BlogPost("tech-shapes-ma-deals".to_string()))
            .unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Post not found"));
        assert!(page.html.contains("Back to Blog"));
    }

    #[test]
    fn test_project_image_follows_root() {
        let mut content = Content::builtin().unwrap();
        let mut record = ContentRecord::new("p", "Pictured", "Test").with_body("text");
        record.image = Some("/images/p.png".to_string());
        content.projects = ContentRegistry::from_records(vec![
            record,
            ContentRecord::new("plain", "Plain", "Test").with_body("text"),
        ])
        .unwrap();
        let mut config = SiteConfig::default();
        config.root = "/me/".to_string();
        let composer = PageComposer::with_content(config, content).unwrap();

        let listing = composer.compose(&Route::Projects).unwrap().html;
        assert_eq!(listing.matches("src=\"/me/images/p.png\"").count(), 1);

        let detail = composer
            .compose(&Route::Project("p".to_string()))
            .unwrap()
            .html;
        assert!(detail.contains("background-image: url(/me/images/p.png)"));
        let plain = composer
            .compose(&Route::Project("plain".to_string()))
            .unwrap()
            .html;
        assert!(!plain.contains("record-hero"));
    }

    #[test]
    fn test_contact_page_with_toast() {
        let state = ContactPageState {
            toast: Some(Toast::message_sent()),
            ..Default::default()
        };
        let html = composer().contact(&state).unwrap().html;
        assert!(html.contains("Message sent!"));
        assert!(html.contains("id=\"toast\""));
    }

    #[test]
    fn test_contact_page_without_toast() {
        let html = composer().compose(&Route::Contact).unwrap().html;
        assert!(!html.contains("id=\"toast\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("required"));
    }

    #[test]
    fn test_missing_page() {
        let page = composer().compose(&Route::NotFound).unwrap();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("Page not found"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut content = Content::builtin().unwrap();
        content.projects = ContentRegistry::from_records(vec![ContentRecord::new(
            "x",
            "<script>alert(1)</script>",
            "Test",
        )
        .with_body("body")])
        .unwrap();
        let composer = PageComposer::with_content(SiteConfig::default(), content).unwrap();
        let html = composer
            .compose(&Route::Project("x".to_string()))
            .unwrap()
            .html;
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
