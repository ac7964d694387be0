pub mod google;

pub use google::GoogleNewsSource;

pub mod prelude {
    pub use super::google::GoogleNewsSource;
    pub use sn_core::{Article, Error, NewsSource, Result};
}
