//! Content records and the static profile

use serde::{Deserialize, Serialize};

/// One unit of static content: a blog article or a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique key within its registry, used in URLs
    pub id: String,

    pub title: String,

    pub category: String,

    /// Display date, shown as written
    #[serde(default)]
    pub date: String,

    /// Read time for articles, one-line description for projects
    #[serde(default)]
    pub summary: String,

    /// Longer teaser for listing cards
    #[serde(default)]
    pub excerpt: String,

    /// Raw multi-line body in the block micro-syntax
    #[serde(default)]
    pub body: String,

    /// Tech stack for projects
    #[serde(default)]
    pub tags: Vec<String>,

    /// Outbound links (source code, live demo)
    #[serde(default)]
    pub links: Vec<RecordLink>,

    /// Shown on the home page
    #[serde(default)]
    pub featured: bool,

    /// Card thumbnail and project hero, as a site path into the static dir
    #[serde(default)]
    pub image: Option<String>,
}

impl ContentRecord {
    pub fn new(id: &str, title: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            date: String::new(),
            summary: String::new(),
            excerpt: String::new(),
            body: String::new(),
            tags: Vec::new(),
            links: Vec::new(),
            featured: false,
            image: None,
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Whether there is anything to show on a detail page.
    ///
    /// Listed records without a body still appear on listings, but their
    /// detail route renders the "not found" view.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    pub label: String,
    pub url: String,
}

/// Everything on the home, about and CV pages that is not a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub home: HomeContent,
    pub about: AboutContent,
    pub cv: CvContent,
    pub contact: ContactContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeContent {
    pub headline: String,
    pub intro: String,
    pub quick_links: Vec<QuickLink>,
    /// About preview, in the block micro-syntax
    pub about_preview: String,
    pub cta_title: String,
    pub cta_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickLink {
    pub label: String,
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutContent {
    pub location: String,
    pub intro: String,
    /// "My Story", in the block micro-syntax
    pub story: String,
    pub interests: Vec<String>,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub period: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvContent {
    pub intro: String,
    pub sections: Vec<CvSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvSection {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactContent {
    pub intro: String,
    pub call_text: String,
    pub email_text: String,
}
