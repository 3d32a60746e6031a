//! Compressed pages kept in static storage.
//!
//! Pages are declared with [`compressed_page!`](crate::compressed_page), which
//! emits a size constant, a [`CompressedPage`] constant and a zero-argument
//! accessor. The accessor decompresses on every call; nothing is cached.

use log::error;

use crate::decoder::Decompressor;
use crate::error::Result;

/// An encoded page and the size of the text it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedPage {
    name: &'static str,
    size_hint: usize,
    data: &'static [u8],
}

impl CompressedPage {
    pub const fn new(name: &'static str, size_hint: usize, data: &'static [u8]) -> Self {
        CompressedPage {
            name,
            size_hint,
            data,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Expected decoded size. Informational: decoding does not trust it.
    pub fn size_hint(&self) -> usize {
        self.size_hint
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    pub fn compressed_len(&self) -> usize {
        self.data.len()
    }

    /// Runs a full decode of the page.
    pub fn decompress(&self) -> Result<String> {
        Decompressor::new()
            .with_size_hint(self.size_hint)
            .decompress(self.data, self.data.len())
    }

    /// Decodes the page, or logs the failure and returns an empty page so the
    /// caller can still answer the request.
    pub fn decompress_or_empty(&self) -> String {
        self.decompress().unwrap_or_else(|e| {
            error!("Failed to decompress page {}: {e}", self.name);
            String::new()
        })
    }
}

/// Declares a compressed page.
///
/// ```
/// pagepress::compressed_page! {
///     /// The bare document.
///     pub HTTP_EMPTY = {
///         size: 13,
///         data: &[0x64, 0x11, 0x43, 0x4B, 0x70, 0x3C, 0x03, 0x07, 0xE0],
///     }
/// }
///
/// assert_eq!(HTTP_EMPTY_SIZE, 13);
/// assert_eq!(HTTP_EMPTY_COMPRESSED.compressed_len(), 9);
/// assert_eq!(http_empty().unwrap(), "<html></html>");
/// ```
#[macro_export]
macro_rules! compressed_page {
    ($(#[$meta:meta])* $vis:vis $name:ident = { size: $size:expr, data: $data:expr $(,)? }) => {
        $crate::paste::paste! {
            $vis const [<$name _SIZE>]: usize = $size;

            $(#[$meta])*
            $vis const [<$name _COMPRESSED>]: $crate::CompressedPage =
                $crate::CompressedPage::new(stringify!($name), [<$name _SIZE>], $data);

            $(#[$meta])*
            #[allow(dead_code)]
            $vis fn [<$name:lower>]() -> $crate::Result<::std::string::String> {
                [<$name _COMPRESSED>].decompress()
            }
        }
    };
}
