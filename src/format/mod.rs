pub mod constants;
pub mod header;

pub use constants::*;
pub use header::{max_decoded_size, max_encoded_size, max_plausible_decoded_size, StreamHeader};
