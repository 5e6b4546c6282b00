use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use planar_codecs::compressor_by_name;
use planar_core::{
    compress_stream, decompress_stream, scan_stream, DEFAULT_CHUNK_SIZE, DEFAULT_LEVEL,
};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "planar",
    about = "Byte-plane split compression — compress, decompress, and inspect planar streams",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a planar stream
    Compress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination stream ("-" writes stdout)
        output: PathBuf,
        /// Backend: zstd | lz4 | passthrough
        #[arg(short, long, default_value = "zstd")]
        codec: String,
        /// Backend compression level (zstd: 1–22)
        #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
        level: i32,
        /// Raw bytes read per chunk (default: 52428800 = 50 MiB)
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
    /// Decompress a planar stream back to raw bytes
    Decompress {
        /// Source stream ("-" reads stdin)
        input: PathBuf,
        /// Destination file ("-" writes stdout)
        output: PathBuf,
        /// Backend the stream was compressed with (the format stores no
        /// codec id, so it must be named here)
        #[arg(short, long, default_value = "zstd")]
        codec: String,
    },
    /// Print block statistics for a planar stream without decompressing it
    Inspect {
        /// Stream to inspect
        file: PathBuf,
        /// Print per-block details
        #[arg(long)]
        blocks: bool,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn open_input(path: &PathBuf) -> anyhow::Result<Box<dyn Read>> {
    if path.to_str() == Some("-") {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file =
            File::open(path).with_context(|| format!("opening input file {:?}", path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(path: &PathBuf) -> anyhow::Result<Box<dyn Write>> {
    if path.to_str() == Some("-") {
        Ok(Box::new(io::stdout().lock()))
    } else {
        let file =
            File::create(path).with_context(|| format!("creating output file {:?}", path))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    level: i32,
    chunk_size: usize,
) -> anyhow::Result<()> {
    if chunk_size == 0 {
        anyhow::bail!("chunk size must be at least 1 byte");
    }
    if chunk_size > u32::MAX as usize {
        anyhow::bail!("chunk size {} exceeds the format's u32 block limit", chunk_size);
    }
    let compressor = compressor_by_name(codec_name)?;

    let mut src = open_input(&input)?;
    let mut dst = open_output(&output)?;
    let summary = compress_stream(&mut src, &mut dst, compressor.as_ref(), chunk_size, level)?;

    eprintln!("  codec       : {}", compressor.name());
    eprintln!("  chunk size  : {}", human_bytes(chunk_size as u64));
    eprintln!("  blocks      : {}", summary.blocks);
    eprintln!("  raw size    : {}", human_bytes(summary.original_bytes));
    eprintln!("  compressed  : {}", human_bytes(summary.compressed_bytes));
    eprintln!("  ratio       : {:.2}x", summary.ratio());
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((summary.original_bytes as f64 / summary.elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", summary.elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf, codec_name: &str) -> anyhow::Result<()> {
    let compressor = compressor_by_name(codec_name)?;

    let mut src = open_input(&input)?;
    let mut dst = open_output(&output)?;
    let summary = decompress_stream(&mut src, &mut dst, compressor.as_ref())?;

    eprintln!("  codec       : {}", compressor.name());
    eprintln!("  blocks      : {}", summary.blocks);
    eprintln!("  raw size    : {}", human_bytes(summary.original_bytes));
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((summary.original_bytes as f64 / summary.elapsed.as_secs_f64()) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", summary.elapsed.as_secs_f64());
    Ok(())
}

fn run_inspect(file: PathBuf, show_blocks: bool) -> anyhow::Result<()> {
    let mut f = File::open(&file).with_context(|| format!("opening {:?}", file))?;
    let headers = scan_stream(&mut f)?;

    let file_size = f.metadata()?.len();
    let raw_total: u64 = headers.iter().map(|h| h.original_len as u64).sum();
    let payload_total: u64 = headers.iter().map(|h| h.compressed_len as u64).sum();
    let ratio = if file_size == 0 {
        1.0
    } else {
        raw_total as f64 / file_size as f64
    };

    println!("=== planar stream: {:?} ===", file);
    println!();
    println!("  blocks      : {}", headers.len());
    println!("  raw size    : {}", human_bytes(raw_total));
    println!("  payload     : {}", human_bytes(payload_total));
    println!("  file on disk: {}", human_bytes(file_size));
    println!("  ratio       : {:.2}x", ratio);

    if show_blocks {
        println!();
        println!(
            "  {:>8}  {:>14}  {:>12}  {:>12}",
            "block", "file offset", "raw", "compressed"
        );
        println!("  {}", "-".repeat(52));
        let mut offset = 0u64;
        for (i, h) in headers.iter().enumerate() {
            println!(
                "  {:>8}  {:>14}  {:>12}  {:>12}",
                i,
                offset,
                human_bytes(h.original_len as u64),
                human_bytes(h.compressed_len as u64)
            );
            offset += 8 + h.compressed_len as u64;
        }
    }

    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
            level,
            chunk_size,
        } => run_compress(input, output, &codec, level, chunk_size),
        Commands::Decompress {
            input,
            output,
            codec,
        } => run_decompress(input, output, &codec),
        Commands::Inspect { file, blocks } => run_inspect(file, blocks),
    }
}
