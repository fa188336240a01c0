use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use log::info;

use crate::config::Config;
use crate::metadata::METADATA_FILE;
use crate::slug::slug;

/// Scaffold a new post folder under the posts root and return the path of
/// the metadata file written inside it. Never overwrites: an existing
/// folder for the same date and slug is an error.
pub fn create_post(cfg: &Config, title: &str, now: NaiveDateTime) -> anyhow::Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        bail!("post title must not be empty");
    }

    let date = now.format("%Y-%m-%d").to_string();
    let datetime = now.format("%Y-%m-%d %H:%M").to_string();
    let dir_name = format!("{}-{}", date, slug(title));

    if !cfg.posts_dir.exists() {
        fs::create_dir_all(&cfg.posts_dir)
            .with_context(|| format!("while creating {:?}", cfg.posts_dir))?;
        info!("created posts directory {:?}", cfg.posts_dir);
    }

    let post_dir = cfg.posts_dir.join(&dir_name);
    if post_dir.exists() {
        bail!("post folder {post_dir:?} already exists");
    }
    fs::create_dir(&post_dir).with_context(|| format!("while creating {post_dir:?}"))?;

    let file_path = post_dir.join(METADATA_FILE);
    let content = format!(
        "---\n\
         title: \"{title}\"\n\
         author: \"{author}\"\n\
         date: \"{datetime}\"\n\
         categories: []\n\
         ---\n\
         \n\
         Start writing here...\n",
        author = cfg.default_author,
    );
    fs::write(&file_path, content).with_context(|| format!("while writing {file_path:?}"))?;

    Ok(file_path)
}
