pub mod comments;
pub mod query_comments;
