use serde::{Deserialize, Serialize};

/// Identifier of a post. Always supplied by the server, never generated here.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        PostId(value)
    }
}

#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommentId {
    fn from(value: u64) -> Self {
        CommentId(value)
    }
}

/// A comment as returned by the server.
///
/// Only `id` and `post` are interpreted. Everything else the server sends
/// (author, content, dates, links, ...) is kept verbatim in `fields` so it
/// survives a round trip through the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post: PostId,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Comment {
    pub fn new(id: CommentId, post: PostId) -> Self {
        Self {
            id,
            post,
            fields: Default::default(),
        }
    }

    /// Look up one of the opaque server fields
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// The rendered content, if the server sent the usual `{ "rendered": .. }` shape
    pub fn rendered_content(&self) -> Option<&str> {
        self.field("content")?.get("rendered")?.as_str()
    }

    pub fn author_name(&self) -> Option<&str> {
        self.field("author_name")?.as_str()
    }
}

/// A comment that has not been submitted yet. The server assigns the id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub post: PostId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CommentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

impl NewComment {
    pub fn new(post: PostId, content: impl Into<String>) -> Self {
        Self {
            post,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn in_reply_to(mut self, parent: CommentId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self.author_email = Some(email.into());
        self
    }
}
