//! Generator module - runs the listing and detail flows and writes the pages
//!
//! The listing is built once per site build. No detail page is pre-built:
//! each one is generated the first time its UID is asked for.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::content::{self, DateStyle, PostDetail, PostsPagination};
use crate::error::Result;
use crate::prismic::CmsClient;
use crate::templates::{SiteData, TemplateRenderer};
use crate::Blog;

/// Result of an on-demand detail generation
#[derive(Debug)]
pub enum PostOutcome {
    Generated {
        post: PostDetail,
        html: String,
        path: PathBuf,
    },
    /// The CMS has no post with this UID
    NotFound,
}

/// Static site generator over a CMS client
pub struct Generator<C> {
    client: C,
    renderer: TemplateRenderer,
    site: SiteData,
    dates: DateStyle,
    doc_type: String,
    public_dir: PathBuf,
}

impl<C: CmsClient> Generator<C> {
    /// Create a new generator
    pub fn new(blog: &Blog, client: C) -> anyhow::Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let dates = DateStyle::from_config(&blog.config)?;

        Ok(Self {
            client,
            renderer,
            site: SiteData::from_config(&blog.config),
            dates,
            doc_type: blog.config.document_type.clone(),
            public_dir: blog.public_dir.clone(),
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn dates(&self) -> &DateStyle {
        &self.dates
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Fetch the first listing page and write `index.html` / `index.json`
    pub async fn generate_index(&self) -> Result<PostsPagination> {
        let pagination = content::fetch_listing(&self.client, &self.doc_type, &self.dates).await?;

        let html = self.renderer.render_index(&self.site, &pagination)?;
        let json = serde_json::to_string_pretty(&pagination)?;

        tokio::fs::create_dir_all(&self.public_dir).await?;
        let output_path = self.public_dir.join("index.html");
        write_page(&self.public_dir, json, html).await?;
        tracing::info!("Generated listing with {} posts", pagination.results.len());
        tracing::debug!("Generated: {:?}", output_path);

        Ok(pagination)
    }

    /// Generate the page of one post, unless the CMS doesn't know it
    pub async fn generate_post(&self, uid: &str) -> Result<PostOutcome> {
        let Some(dir) = self.post_dir(uid) else {
            tracing::warn!("Rejected post UID {:?}", uid);
            return Ok(PostOutcome::NotFound);
        };

        let Some(post) =
            content::fetch_detail(&self.client, &self.doc_type, uid, &self.dates).await?
        else {
            tracing::warn!("Post not found: {}", uid);
            return Ok(PostOutcome::NotFound);
        };

        let html = self.renderer.render_post(&self.site, &post)?;
        let json = serde_json::to_string_pretty(&post)?;

        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join("index.html");
        write_page(&dir, json, html.clone()).await?;
        tracing::info!("Generated post: {}", uid);
        tracing::debug!("Generated: {:?}", path);

        Ok(PostOutcome::Generated { post, html, path })
    }

    /// Not-found page for `uid`
    pub fn render_not_found(&self, uid: &str) -> Result<String> {
        Ok(self.renderer.render_not_found(&self.site, uid)?)
    }

    /// Output `index.html` of a post, `None` for UIDs that can't be a path segment
    pub fn post_path(&self, uid: &str) -> Option<PathBuf> {
        self.post_dir(uid).map(|dir| dir.join("index.html"))
    }

    fn post_dir(&self, uid: &str) -> Option<PathBuf> {
        is_valid_uid(uid).then(|| self.public_dir.join("post").join(uid))
    }
}

/// Write `index.json` then `index.html` into `dir`
///
/// `index.html` is what the server looks for, so it only shows up once the
/// page is complete.
async fn write_page(dir: &Path, json: String, html: String) -> Result<()> {
    write_atomic(&dir.join("index.json"), json.into_bytes()).await?;
    write_atomic(&dir.join("index.html"), html.into_bytes()).await?;
    Ok(())
}

/// Write to a temporary file next to `path`, then rename it into place
async fn write_atomic(path: &Path, contents: Vec<u8>) -> Result<()> {
    static NEXT_TMP: AtomicU64 = AtomicU64::new(0);

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        name,
        std::process::id(),
        NEXT_TMP.fetch_add(1, Ordering::Relaxed)
    ));

    let written = match tokio::fs::write(&tmp, contents).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Prismic UIDs are URL-safe slugs
fn is_valid_uid(uid: &str) -> bool {
    !uid.is_empty()
        && uid
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
