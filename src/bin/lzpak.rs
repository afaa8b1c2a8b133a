use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use lzpak::format::HEADER_SIZE;
use lzpak::{
    decode_batch, encode_batch, max_decoded_size, max_encoded_size, CodecStats, Compressor,
    Decompressor, EncodeConfig, Error, ErrorKind, MatchStrategy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lzpak")]
#[command(about = "Compress and decompress resource blobs with bounded LZ77")]
#[command(version)]
struct Args {
    /// Show verbose statistics and debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Match search strategy (hash-chain or brute-force)
        #[arg(long, default_value = "hash-chain", value_parser = parse_strategy)]
        strategy: MatchStrategy,

        /// Decode the result and check it matches the input
        #[arg(long)]
        verify: bool,
    },

    /// Decompress a file
    Decompress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the header and size bounds of a compressed file
    Info {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compress (or decompress) many files in parallel, writing next to each input
    Batch {
        /// Files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Decompress `.lzp` files instead of compressing
        #[arg(short, long)]
        decompress: bool,

        /// Number of threads (0 = auto)
        #[arg(short = 't', long, default_value = "0")]
        threads: usize,

        /// Match search strategy (hash-chain or brute-force)
        #[arg(long, default_value = "hash-chain", value_parser = parse_strategy)]
        strategy: MatchStrategy,
    },
}

/// Extension appended to compressed files in batch mode
const EXTENSION: &str = "lzp";

/// Exit codes
const EXIT_OK: u8 = 0;
const EXIT_CORRUPT: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn parse_strategy(name: &str) -> Result<MatchStrategy, String> {
    MatchStrategy::from_name(name)
        .ok_or_else(|| format!("unknown strategy '{}' (expected hash-chain or brute-force)", name))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            match e.kind() {
                ErrorKind::CorruptStream => ExitCode::from(EXIT_CORRUPT),
                _ => ExitCode::from(EXIT_ERROR),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "lzpak=debug" } else { "lzpak=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(args: Args) -> Result<u8, Error> {
    match args.command {
        Command::Compress { input, output, strategy, verify } => {
            let data = read_input(&input)?;
            let start = Instant::now();

            let mut compressor = Compressor::new(EncodeConfig { strategy, verify });
            let encoded = compressor.encode(&data)?;
            write_output(&output, &encoded)?;

            if args.verbose {
                print_stats("Compression", compressor.stats(), start);
            }
            Ok(EXIT_OK)
        }

        Command::Decompress { input, output } => {
            let data = read_input(&input)?;
            let start = Instant::now();

            let mut decompressor = Decompressor::new();
            let decoded = decompressor.decode(&data)?;
            write_output(&output, &decoded)?;

            if args.verbose {
                print_stats("Decompression", decompressor.stats(), start);
            }
            Ok(EXIT_OK)
        }

        Command::Info { input } => {
            let data = read_input(&input)?;
            let decoded_len = max_decoded_size(&data)?;

            eprintln!("Decoded length:   {} bytes", decoded_len);
            eprintln!("Encoded length:   {} bytes", data.len());
            eprintln!("Payload:          {} bytes", data.len() - HEADER_SIZE);
            eprintln!("Worst-case bound: {} bytes", max_encoded_size(decoded_len));
            if decoded_len > 0 {
                eprintln!("Ratio:            {:.3}", data.len() as f64 / decoded_len as f64);
            }
            Ok(EXIT_OK)
        }

        Command::Batch { files, decompress, threads, strategy } => {
            run_batch(&files, decompress, threads, strategy, args.verbose)
        }
    }
}

fn run_batch(
    files: &[PathBuf],
    decompress: bool,
    threads: usize,
    strategy: MatchStrategy,
    verbose: bool,
) -> Result<u8, Error> {
    let inputs = files.iter().map(fs::read).collect::<io::Result<Vec<_>>>()?;
    let start = Instant::now();

    let results = if decompress {
        decode_batch(&inputs, threads)?
    } else {
        encode_batch(&inputs, &EncodeConfig { strategy, verify: false }, threads)?
    };

    let mut exit = EXIT_OK;
    let mut total_in = 0u64;
    let mut total_out = 0u64;

    for ((path, input), result) in files.iter().zip(&inputs).zip(results) {
        match result {
            Ok(output) => {
                let out_path = batch_output_path(path, decompress);
                fs::write(&out_path, &output)?;
                total_in += input.len() as u64;
                total_out += output.len() as u64;
                if verbose {
                    eprintln!(
                        "{} -> {} ({} -> {} bytes)",
                        path.display(),
                        out_path.display(),
                        input.len(),
                        output.len()
                    );
                }
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                let code = if e.is_corrupt_stream() { EXIT_CORRUPT } else { EXIT_ERROR };
                exit = exit.max(code);
            }
        }
    }

    if verbose {
        let elapsed = start.elapsed();
        eprintln!("Batch complete:");
        eprintln!("  Files:            {}", files.len());
        eprintln!("  Input bytes:      {}", total_in);
        eprintln!("  Output bytes:     {}", total_out);
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(exit)
}

/// `name` -> `name.lzp` when compressing, `name.lzp` -> `name` when decompressing
fn batch_output_path(path: &Path, decompress: bool) -> PathBuf {
    if decompress {
        if path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
            return path.with_extension("");
        }
        let mut name = path.as_os_str().to_owned();
        name.push(".out");
        return PathBuf::from(name);
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.to_str() == Some("-") {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(path)
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    if path.to_str() == Some("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()
    } else {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(data)?;
        writer.flush()
    }
}

fn print_stats(label: &str, stats: &CodecStats, start: Instant) {
    let elapsed = start.elapsed();
    eprintln!("{} complete:", label);
    eprintln!("  Decoded bytes:    {}", stats.decoded_bytes);
    eprintln!("  Encoded bytes:    {}", stats.encoded_bytes);
    eprintln!("  Ratio:            {:.3}", stats.ratio());
    eprintln!("  Literals:         {}", stats.literals);
    eprintln!("  Copies:           {} ({} bytes)", stats.copies, stats.copied_bytes);
    eprintln!("  Time:             {:.2?}", elapsed);
    eprintln!(
        "  Throughput:       {:.1} MB/s",
        stats.decoded_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );
}
