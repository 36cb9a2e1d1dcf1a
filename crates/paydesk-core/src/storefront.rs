//! Hosted storefront types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ProductId, StorefrontId};

/// A hosted storefront listing a subset of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storefront {
    /// Platform identifier.
    pub id: StorefrontId,
    /// Display name.
    pub name: String,
    /// URL slug, unique per platform.
    pub slug: String,
    /// Tagline or description.
    #[serde(default)]
    pub description: Option<String>,
    /// Products shown on the storefront.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    /// Whether the storefront is publicly reachable.
    #[serde(default)]
    pub published: bool,
    /// Public URL once published.
    #[serde(default)]
    pub url: Option<String>,
    /// When the storefront was created.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a storefront.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStorefront {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Products to list.
    pub product_ids: Vec<ProductId>,
}

impl NewStorefront {
    /// Build a request whose slug is derived from the name.
    #[must_use]
    pub fn named(name: impl Into<String>, product_ids: Vec<ProductId>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            description: None,
            product_ids,
        }
    }
}

/// Derive a URL slug: lowercase ASCII alphanumerics separated by single hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Whether `slug` is already in canonical form.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
