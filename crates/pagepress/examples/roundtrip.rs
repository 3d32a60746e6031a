use anyhow::{Context, anyhow};
use log::info;
use pagepress::{Compressor, Decompressor};
use simple_logger::SimpleLogger;

fn main() -> anyhow::Result<()> {
    SimpleLogger::new().without_timestamps().init()?;

    let path = std::env::args()
        .nth(1)
        .ok_or(anyhow!("usage: roundtrip <page.html>"))?;
    let text = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;

    let encoded = Compressor::new().compress(&text);
    info!(
        "{path}: {} bytes -> {} bytes ({:.1}%)",
        text.len(),
        encoded.len(),
        encoded.len() as f64 * 100.0 / text.len().max(1) as f64
    );

    let decoded = Decompressor::new()
        .with_size_hint(text.len())
        .decompress(&encoded, encoded.len())?;
    if decoded != text {
        return Err(anyhow!("Round trip of {path} did not reproduce the input"));
    }
    info!("Round trip ok");

    Ok(())
}
