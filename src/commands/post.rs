//! Generate one post page on demand

use anyhow::{Context, Result};

use crate::generator::PostOutcome;
use crate::Blog;

/// Generate the page of `uid`; returns whether the CMS knows the post
pub async fn run(blog: &Blog, uid: &str) -> Result<bool> {
    let generator = blog.generator()?;
    let outcome = generator
        .generate_post(uid)
        .await
        .with_context(|| format!("Failed to generate post {}", uid))?;

    match outcome {
        PostOutcome::Generated { post, path, .. } => {
            println!("Generated \"{}\" at {}", post.data.title, path.display());
            Ok(true)
        }
        PostOutcome::NotFound => {
            println!("No post with UID {:?}", uid);
            Ok(false)
        }
    }
}
