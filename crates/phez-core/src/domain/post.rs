use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::format::{self, SELF_DOMAIN};
use super::text::{is_blank, scrub, scrub_optional};
use super::user::User;
use crate::error::ValidationError;
use crate::ports::{MarkdownOptions, MarkdownRenderer, TextSanitizer};

/// Self posts can be edited for this long after creation.
pub const EDIT_WINDOW_HOURS: i64 = 24;

/// Post entity - a self post or a link submitted to a subphez.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub url: Option<String>,
    pub is_self: bool,
    pub guid: String,
    pub user_id: Uuid,
    pub subphez_id: Uuid,
    pub points: i32,
    pub hot_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Canonical permalink: `/p/{subphez_path}/{id}/{guid}`.
    pub fn post_path(&self, subphez_path: &str) -> String {
        format!("/p/{}/{}/{}", subphez_path, self.id, self.guid)
    }

    /// Where a listing should link to: the permalink for self posts,
    /// the submitted link otherwise.
    pub fn linkable_target(&self, subphez_path: &str) -> String {
        if self.is_self {
            return self.post_path(subphez_path);
        }
        self.url.clone().unwrap_or_default()
    }

    pub fn encoded_url(&self) -> String {
        self.url
            .as_deref()
            .map(format::encode_url)
            .unwrap_or_default()
    }

    /// Display domain. Never fails: unparsable links report `"unknown"`.
    pub fn domain(&self) -> String {
        if self.is_self {
            return SELF_DOMAIN.to_string();
        }
        format::link_domain(self.url.as_deref().unwrap_or_default())
    }

    /// Self posts stay editable for [`EDIT_WINDOW_HOURS`]; link posts never are.
    pub fn is_editable(&self) -> bool {
        self.is_editable_at(Utc::now())
    }

    pub fn is_editable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_self && self.created_at > now - TimeDelta::hours(EDIT_WINDOW_HOURS)
    }

    pub fn is_owned_by(&self, actor: &User) -> bool {
        actor.id == self.user_id
    }

    /// Body as HTML. The stored body is already plain text.
    pub fn rendered_body(&self, renderer: &dyn MarkdownRenderer) -> String {
        match self.body.as_deref() {
            Some(body) if !is_blank(body) => renderer.render(body, MarkdownOptions::post_body()),
            _ => String::new(),
        }
    }
}

/// Listing orders supported by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrder {
    /// `created_at` descending.
    #[default]
    Latest,
    /// `points` descending.
    Points,
    /// `hot_score` descending.
    Hot,
}

/// Raw user submission, before any cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSubmission {
    pub title: String,
    pub body: Option<String>,
    pub url: Option<String>,
    pub is_self: bool,
    pub subphez_id: Uuid,
}

/// A validated, normalized post ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub body: Option<String>,
    pub url: Option<String>,
    pub is_self: bool,
    pub guid: String,
    pub user_id: Uuid,
    pub subphez_id: Uuid,
}

impl NewPost {
    /// Validate a submission, then format the link, sanitize every text
    /// field and derive the slug from the sanitized title.
    pub fn prepare(
        submission: PostSubmission,
        author: &User,
        sanitizer: &dyn TextSanitizer,
    ) -> Result<Self, ValidationError> {
        let PostSubmission {
            title,
            body,
            url,
            is_self,
            subphez_id,
        } = submission;

        if is_blank(&title) {
            return Err(ValidationError::BlankTitle);
        }

        let body = body.filter(|b| !is_blank(b));
        let url = url.filter(|u| !is_blank(u));
        match (is_self, body.is_some(), url.is_some()) {
            (true, _, true) => return Err(ValidationError::UrlOnSelfPost),
            (true, false, _) => return Err(ValidationError::MissingBody),
            (false, true, _) => return Err(ValidationError::BodyOnLinkPost),
            (false, _, false) => return Err(ValidationError::MissingUrl),
            _ => {}
        }

        let url = url.map(|u| format::format_url(&u));

        let title = scrub(sanitizer, &title);
        if title.is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        let body = scrub_optional(sanitizer, body.as_deref());
        let url = scrub_optional(sanitizer, url.as_deref());
        if is_self && body.is_none() {
            return Err(ValidationError::MissingBody);
        }
        if !is_self && url.is_none() {
            return Err(ValidationError::MissingUrl);
        }

        let guid = format::derive_guid(&title);

        Ok(Self {
            title,
            body,
            url,
            is_self,
            guid,
            user_id: author.id,
            subphez_id,
        })
    }
}

/// Changes to a self post's text. `None` leaves a field alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostEdit {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostEdit {
    /// Apply the edit, re-sanitizing what changed. The slug is left as is.
    pub fn apply(
        self,
        post: &mut Post,
        sanitizer: &dyn TextSanitizer,
    ) -> Result<(), ValidationError> {
        if let Some(title) = self.title {
            let title = scrub(sanitizer, &title);
            if title.is_empty() {
                return Err(ValidationError::BlankTitle);
            }
            post.title = title;
        }

        if let Some(body) = self.body {
            let body = scrub(sanitizer, &body);
            if body.is_empty() {
                return Err(ValidationError::MissingBody);
            }
            post.body = Some(body);
        }

        Ok(())
    }
}
