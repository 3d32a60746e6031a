use log::{LevelFilter, info};
use simple_logger::SimpleLogger;

pagepress::compressed_page! {
    /// A minimal greeting page.
    HTTP_HELLO = {
        size: 20,
        data: &[
            0x64, 0x26, 0xF2, 0x40, 0x52, 0x92, 0x51, 0x04, 0x8C, 0xE4, 0xAB, 0x88, 0x70, 0x21,
            0x37, 0xE0,
        ],
    }
}

pagepress::compressed_page! {
    /// Deliberately damaged: served as an empty page.
    HTTP_DAMAGED = { size: 20, data: &[0x64, 0x26, 0xF2] }
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .without_timestamps()
        .init()?;

    let body = http_hello()?;
    info!(
        "{}: {} compressed bytes, body {body:?}",
        HTTP_HELLO_COMPRESSED.name(),
        HTTP_HELLO_COMPRESSED.compressed_len()
    );

    let fallback = HTTP_DAMAGED_COMPRESSED.decompress_or_empty();
    info!("{}: serving {} bytes", HTTP_DAMAGED_COMPRESSED.name(), fallback.len());

    Ok(())
}
