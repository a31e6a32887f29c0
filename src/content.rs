//! Marketing content of the home screen: news posts fetched from the
//! service, partners and testimonials read from a local TOML file.

use std::{cmp::Reverse, fmt::Debug, fs, path::Path};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::Deserialize;

use crate::prelude::*;

/// News/blog entry as served by `GET /posts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub category: PostCategory,

    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// The wire carries the category labels verbatim from the CMS.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum PostCategory {
    #[serde(rename = "Partenariat")]
    Partnership,

    #[serde(rename = "Formation")]
    Training,

    #[serde(rename = "Actualité")]
    News,

    #[serde(other)]
    Other,
}

/// The `n` most recent posts, newest first.
#[must_use]
pub fn latest_posts(posts: &[Post], n: usize) -> Vec<&Post> {
    posts.iter().sorted_by_key(|post| Reverse(post.created_at)).take(n).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub partners: Vec<Partner>,

    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Deserialize)]
pub struct Partner {
    pub name: String,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Testimonial {
    pub author: String,

    #[serde(default)]
    pub role: Option<String>,

    pub quote: String,

    /// 1 to 5 stars.
    pub rating: u8,
}

impl Content {
    #[instrument(name = "Reading the content file…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content: Self = toml::from_str(
            &fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?,
        )
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
        for testimonial in &content.testimonials {
            ensure!(
                (1..=5).contains(&testimonial.rating),
                "testimonial by `{}` has an out-of-range rating {}",
                testimonial.author,
                testimonial.rating,
            );
        }
        Ok(content)
    }
}
