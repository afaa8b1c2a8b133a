pub mod decoder;
pub mod encoder;

pub use decoder::TokenDecoder;
pub use encoder::TokenEncoder;
