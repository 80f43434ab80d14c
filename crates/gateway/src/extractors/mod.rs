//! Input decoding applied before a request reaches the account store.

mod params;

pub use params::{decode_text_param, properties_body};
