pub mod yahoo;

pub use yahoo::YahooFinanceLookup;

pub mod prelude {
    pub use super::yahoo::YahooFinanceLookup;
    pub use sn_core::{CompanyLookup, Error, Result};
}
