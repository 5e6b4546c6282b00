use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use planar_core::Compressor;

/// LZ4 backend.
///
/// Trades ratio for speed — useful when the pipeline is CPU-bound rather
/// than storage-bound. LZ4 block compression has no level knob, so the
/// pipeline's `level` is ignored.
pub struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, raw: &[u8], _level: i32) -> anyhow::Result<Vec<u8>> {
        Ok(compress_prepend_size(raw))
    }

    fn decompress(&self, compressed: &[u8]) -> anyhow::Result<Vec<u8>> {
        let raw = decompress_size_prepended(compressed)
            .map_err(|e| anyhow::anyhow!("lz4 decompress error: {}", e))?;
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_including_empty() {
        let c = Lz4Compressor;
        for raw in [&b""[..], &b"y"[..], &b"abababababababab"[..]] {
            let compressed = c.compress(raw, 0).unwrap();
            assert_eq!(c.decompress(&compressed).unwrap(), raw);
        }
    }
}
