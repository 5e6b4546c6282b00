use planar_core::Compressor;

/// Zstandard backend.
///
/// The default choice: strong ratios on the structured binary data the
/// byte-plane transform targets, with decode speed well above disk speed.
/// Each call compresses one independent frame; the level (1–22) is passed
/// per call by the pipeline.
pub struct ZstdCompressor;

impl Compressor for ZstdCompressor {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, raw: &[u8], level: i32) -> anyhow::Result<Vec<u8>> {
        let compressed = zstd::bulk::compress(raw, level)?;
        Ok(compressed)
    }

    fn decompress(&self, compressed: &[u8]) -> anyhow::Result<Vec<u8>> {
        // The frame carries its own content size, so no pre-sizing hint is
        // needed here; the block decoder verifies the decoded length against
        // the block header afterwards.
        let raw = zstd::decode_all(compressed)?;
        Ok(raw)
    }
}
