//! End-to-end tests for the planar block codec and stream pipeline:
//! round trips across the edge-case length set, multi-chunk order
//! preservation, and decoder behavior on every class of damaged stream.

use std::io::Cursor;

use planar_codecs::{Lz4Compressor, PassThroughCompressor, ZstdCompressor};
use planar_core::{
    compress_stream, decode_block, decompress_stream, encode_block, scan_stream, CodecError,
    Compressor,
};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

/// Lengths exercising every pairing edge: empty, single unpaired byte,
/// smallest pair, pair + trailer, and the same around a 64 KB boundary.
const EDGE_LENGTHS: &[usize] = &[0, 1, 2, 3, 4, 5, 100, 101, 65536, 65537];

// ── block codec ────────────────────────────────────────────────────────────

#[test]
fn block_roundtrip_edge_lengths() {
    let backends: [&dyn Compressor; 3] =
        [&ZstdCompressor, &Lz4Compressor, &PassThroughCompressor];
    for backend in backends {
        for &n in EDGE_LENGTHS {
            let chunk = pseudo_random_bytes(n, 0xBEEF ^ n as u64);
            let block = encode_block(&chunk, backend, 3).unwrap();

            let mut cursor = Cursor::new(block);
            let (original_len, decoded) = decode_block(&mut cursor, backend)
                .unwrap()
                .expect("one block should decode");
            assert_eq!(original_len as usize, n);
            assert_eq!(decoded, chunk, "{} round-trip failed at n={n}", backend.name());

            // The block must be fully consumed — nothing left dangling.
            assert!(decode_block(&mut cursor, backend).unwrap().is_none());
        }
    }
}

#[test]
fn block_wire_layout_seven_bytes() {
    // Passthrough payload equals the planar buffer, pinning the exact wire
    // bytes: header (7, 7) then even run, odd run, trailing byte.
    let chunk = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
    let block = encode_block(&chunk, &PassThroughCompressor, 0).unwrap();
    assert_eq!(
        block,
        vec![
            0x07, 0x00, 0x00, 0x00, // original_len = 7, LE
            0x07, 0x00, 0x00, 0x00, // compressed_len = 7, LE
            0x00, 0x02, 0x04, 0x01, 0x03, 0x05, 0x06, // planar payload
        ]
    );
}

#[test]
fn decode_empty_stream_is_clean_end() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(decode_block(&mut cursor, &ZstdCompressor).unwrap().is_none());
}

// ── stream pipeline ────────────────────────────────────────────────────────

#[test]
fn stream_roundtrip_multi_chunk() {
    let data = pseudo_random_bytes(2500, 0xDEAD_BEEF);
    let mut compressed = Vec::new();
    let summary =
        compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 1000, 3)
            .unwrap();
    assert_eq!(summary.blocks, 3); // 1000 + 1000 + 500
    assert_eq!(summary.original_bytes, 2500);
    assert_eq!(summary.compressed_bytes, compressed.len() as u64);

    let mut restored = Vec::new();
    let summary =
        decompress_stream(&mut Cursor::new(&compressed), &mut restored, &ZstdCompressor).unwrap();
    assert_eq!(summary.blocks, 3);
    assert_eq!(restored, data);
}

#[test]
fn stream_roundtrip_odd_chunk_size() {
    // An odd chunk size makes every full block exercise the trailing-byte
    // path of the transform.
    let data = compressible_bytes(10_000);
    let mut compressed = Vec::new();
    compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 777, 3).unwrap();

    let mut restored = Vec::new();
    decompress_stream(&mut Cursor::new(&compressed), &mut restored, &ZstdCompressor).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn stream_preserves_chunk_order() {
    // Each chunk gets distinct content; decoding block by block must yield
    // the chunks in encode order, and concatenation must equal the input.
    let chunk_size = 256usize;
    let mut data = Vec::new();
    for i in 0u8..10 {
        data.extend(std::iter::repeat(i).take(chunk_size));
    }

    let mut compressed = Vec::new();
    compress_stream(
        &mut Cursor::new(&data),
        &mut compressed,
        &ZstdCompressor,
        chunk_size,
        3,
    )
    .unwrap();

    let mut cursor = Cursor::new(&compressed);
    let mut reassembled = Vec::new();
    let mut i = 0u8;
    while let Some((original_len, chunk)) = decode_block(&mut cursor, &ZstdCompressor).unwrap() {
        assert_eq!(original_len as usize, chunk_size);
        assert_eq!(chunk, vec![i; chunk_size], "block {i} out of order");
        reassembled.extend_from_slice(&chunk);
        i += 1;
    }
    assert_eq!(i, 10);
    assert_eq!(reassembled, data);
}

#[test]
fn empty_input_yields_empty_stream() {
    let mut compressed = Vec::new();
    let summary = compress_stream(
        &mut Cursor::new(Vec::new()),
        &mut compressed,
        &ZstdCompressor,
        1024,
        3,
    )
    .unwrap();
    assert_eq!(summary.blocks, 0);
    assert!(compressed.is_empty());

    let mut restored = Vec::new();
    let summary =
        decompress_stream(&mut Cursor::new(&compressed), &mut restored, &ZstdCompressor).unwrap();
    assert_eq!(summary.blocks, 0);
    assert!(restored.is_empty());
}

// ── damaged streams ────────────────────────────────────────────────────────

#[test]
fn truncated_tail_is_detected() {
    let data = pseudo_random_bytes(4096, 42);
    let mut compressed = Vec::new();
    compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 1024, 3).unwrap();

    // Cutting 1–7 bytes off the end lands inside the final block's payload
    // (every payload here is comfortably longer than 7 bytes).
    for cut in 1..=7usize {
        let truncated = &compressed[..compressed.len() - cut];
        let mut restored = Vec::new();
        let err =
            decompress_stream(&mut Cursor::new(truncated), &mut restored, &ZstdCompressor)
                .unwrap_err();
        assert!(
            matches!(err, CodecError::TruncatedPayload { .. }),
            "cut={cut}: expected TruncatedPayload, got {err}"
        );
    }
}

#[test]
fn partial_header_is_detected() {
    let data = pseudo_random_bytes(100, 7);
    let mut compressed = Vec::new();
    compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 1024, 3).unwrap();

    // A write interrupted 3 bytes into the next block's header.
    compressed.extend_from_slice(&[0x64, 0x00, 0x00]);

    let mut restored = Vec::new();
    let err = decompress_stream(&mut Cursor::new(&compressed), &mut restored, &ZstdCompressor)
        .unwrap_err();
    assert!(
        matches!(err, CodecError::TruncatedHeader { got: 3 }),
        "expected TruncatedHeader with 3 bytes, got {err}"
    );
    // The block before the damage decoded fine.
    assert_eq!(restored, data);
}

#[test]
fn garbage_payload_reports_backend_error() {
    // A well-formed header framing bytes zstd cannot parse.
    let mut stream = Vec::new();
    stream.extend_from_slice(&5u32.to_le_bytes());
    stream.extend_from_slice(&5u32.to_le_bytes());
    stream.extend_from_slice(&[1, 2, 3, 4, 5]);

    let err = decode_block(&mut Cursor::new(&stream), &ZstdCompressor).unwrap_err();
    match err {
        CodecError::Backend { name, .. } => assert_eq!(name, "zstd"),
        other => panic!("expected Backend error, got {other}"),
    }
}

#[test]
fn tampered_original_len_reports_length_mismatch() {
    let chunk = [10u8, 20, 30, 40];
    let mut block = encode_block(&chunk, &PassThroughCompressor, 0).unwrap();
    // Bump original_len from 4 to 5; the payload still decodes to 4 bytes.
    block[0] = 5;

    let err = decode_block(&mut Cursor::new(&block), &PassThroughCompressor).unwrap_err();
    assert!(
        matches!(
            err,
            CodecError::LengthMismatch {
                expected: 5,
                actual: 4
            }
        ),
        "expected LengthMismatch 5 vs 4, got {err}"
    );
}

// ── header scanning ────────────────────────────────────────────────────────

#[test]
fn scan_matches_written_blocks() {
    let data = compressible_bytes(5000);
    let mut compressed = Vec::new();
    let summary =
        compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 2048, 3)
            .unwrap();

    let mut cursor = Cursor::new(&compressed);
    let headers = scan_stream(&mut cursor).unwrap();
    assert_eq!(headers.len() as u64, summary.blocks);
    let raw_total: u64 = headers.iter().map(|h| h.original_len as u64).sum();
    assert_eq!(raw_total, summary.original_bytes);
    assert_eq!(headers[0].original_len, 2048);
    assert_eq!(headers.last().unwrap().original_len, 5000 - 2 * 2048);
}

#[test]
fn scan_detects_truncation() {
    let data = pseudo_random_bytes(3000, 99);
    let mut compressed = Vec::new();
    compress_stream(&mut Cursor::new(&data), &mut compressed, &ZstdCompressor, 1024, 3).unwrap();

    compressed.truncate(compressed.len() - 4);
    let err = scan_stream(&mut Cursor::new(&compressed)).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedPayload { .. }));
}
