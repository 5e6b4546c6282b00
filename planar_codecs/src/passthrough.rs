use planar_core::Compressor;

/// No-op backend: payload bytes are the planar bytes verbatim.
///
/// Useful for verifying the container and transform round-trip independently
/// of any real compressor, and for data that is already compressed.
pub struct PassThroughCompressor;

impl Compressor for PassThroughCompressor {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn compress(&self, raw: &[u8], _level: i32) -> anyhow::Result<Vec<u8>> {
        Ok(raw.to_vec())
    }

    fn decompress(&self, compressed: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(compressed.to_vec())
    }
}
