/// Backend compression abstraction.
///
/// Each `Compressor` implementation:
/// - Compresses/decompresses individual buffers independently — no state may
///   survive between calls. This is the invariant that keeps every block of
///   a planar stream decodable on its own.
/// - Must reconstruct the exact input byte sequence on decompress, for any
///   input including the empty buffer.
/// - Knows nothing about blocks or the byte-plane transform; it sees raw
///   bytes in and raw bytes out.
pub trait Compressor: Send + Sync {
    /// Human-readable backend name for CLI display and error messages.
    fn name(&self) -> &'static str;

    /// Compress one buffer at the given level.
    ///
    /// `level` follows the backend's own scale (for zstd, 1 = fast through
    /// 22 = smallest). Backends without a level knob ignore it.
    fn compress(&self, raw: &[u8], level: i32) -> anyhow::Result<Vec<u8>>;

    /// Decompress one buffer produced by [`compress`](Self::compress).
    ///
    /// Must fail (never truncate or pad) when `compressed` is not valid for
    /// this backend's algorithm.
    fn decompress(&self, compressed: &[u8]) -> anyhow::Result<Vec<u8>>;
}
