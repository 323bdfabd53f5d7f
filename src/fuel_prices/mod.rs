//! Fuel price listing: fetch, parse and resolve unit prices
//!
//! - `parser`: HTML scraping of the listing page
//! - `table`: fuel-type keyed table and price normalization
//! - `source`: the [`FuelPriceSource`] seam and its HTTP implementation
//! - `cache`: optional TTL cache in front of any source

pub mod cache;
pub mod parser;
pub mod source;
pub mod table;

pub use cache::CachedPriceSource;
pub use parser::parse_price_page;
pub use source::{FuelPriceSource, HttpPriceSource};
pub use table::{parse_price, resolve_price, FuelPriceTable};
