//! Compact text compression for web pages served from small devices.
//!
//! Pages are encoded ahead of time into a prefix-coded bit stream (see
//! [`table`] for the codes) and stored as static byte arrays. At request
//! time [`decompress`] turns them back into text.
//!
//! ```
//! let blob = pagepress::compress("<html></html>");
//! let text = pagepress::decompress(&blob, blob.len()).unwrap();
//! assert_eq!(text, "<html></html>");
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod page;
pub mod table;

pub use decoder::{Decompressor, decompress};
pub use encoder::{Compressor, compress};
pub use error::{CorruptReason, DecodeError, Result};
pub use page::CompressedPage;

#[doc(hidden)]
pub use paste;
