//! Business services
//!
//! Services sit between the web handlers and the repositories: they run the
//! reference checks the forms declare, compose pagination, and enforce the
//! relationship rules (tag syncing, referential protection on categories).

pub mod article;
pub mod category;
pub mod comment;
pub mod tag;

pub use article::ArticleService;
pub use category::CategoryService;
pub use comment::CommentService;
pub use tag::TagService;
