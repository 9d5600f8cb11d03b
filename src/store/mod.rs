//! Data-access functions. Each takes a borrowed connection, runs
//! parameterized SQL and shapes rows into model types.

pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;

pub const NO_ARTICLE: &str = "No article found";
pub const NO_TOPIC: &str = "No topic found";
pub const NO_COMMENT: &str = "No comment found";
