mod action;
mod effects;
pub mod reducer;
pub mod selectors;
mod state;

pub use action::CommentsAction;
pub use effects::{request_comments, submit_comment};
pub use reducer::reduce;
pub use state::CommentsState;
