use thiserror::Error;

/// Everything that can go wrong while encoding or decoding a planar stream.
///
/// All variants are fatal for the stream being processed: block corruption
/// is not transient, so there is no retry at this layer. Output already
/// written before the failure remains a valid stream prefix. Running out of
/// input cleanly at a block boundary is not an error — `decode_block`
/// signals it with `Ok(None)`.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Fewer than 8 bytes where a block header was expected — the stream
    /// was cut mid-write or is not a planar stream.
    #[error("truncated block header: expected 8 bytes, got {got}")]
    TruncatedHeader { got: usize },

    /// The header promised more payload bytes than the stream holds.
    #[error("truncated block payload: header declares {declared} bytes, only {got} present")]
    TruncatedPayload { declared: u32, got: usize },

    /// The backend rejected the payload as invalid for its algorithm.
    /// Carries the backend's own diagnostic.
    #[error("backend '{name}' failed: {cause}")]
    Backend {
        name: &'static str,
        cause: anyhow::Error,
    },

    /// Decompressed payload length disagrees with the header's
    /// `original_len` — corruption, or a header tampered after write.
    #[error("length mismatch: header says {expected} bytes, payload decoded to {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Underlying read/write failure, propagated as-is.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
