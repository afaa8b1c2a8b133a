pub mod batch;
pub mod compress;
pub mod decompress;

pub use batch::{decode_batch, encode_batch};
pub use compress::Compressor;
pub use decompress::Decompressor;
