//! Built-in page templates using Tera template engine
//!
//! The listing, detail and not-found views are embedded in the binary.

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{PostDetail, PostsPagination};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        // CMS text is untrusted, keep escaping on for every template
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template_name, context)
    }

    /// Listing page
    pub fn render_index(
        &self,
        site: &SiteData,
        posts_pagination: &PostsPagination,
    ) -> tera::Result<String> {
        let mut context = base_context(site);
        context.insert("posts_pagination", posts_pagination);
        self.render("index.html", &context)
    }

    /// Detail page
    pub fn render_post(&self, site: &SiteData, post: &PostDetail) -> tera::Result<String> {
        let mut context = base_context(site);
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// Page shown for a UID the CMS doesn't know
    pub fn render_not_found(&self, site: &SiteData, uid: &str) -> tera::Result<String> {
        let mut context = base_context(site);
        context.insert("uid", uid);
        self.render("404.html", &context)
    }
}

fn base_context(site: &SiteData) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context
}

/// Site-wide values every template sees
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
        }
    }
}
