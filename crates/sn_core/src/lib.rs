pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use error::{CompletionError, Error};
pub use models::CompletionModel;
pub use sources::{CompanyLookup, NewsSource};
pub use types::Article;

pub type Result<T> = std::result::Result<T, Error>;
