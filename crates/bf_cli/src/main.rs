use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use bf_core::{load_snapshot, write_snapshot, Filter, FilterStats, HasherSet};

#[derive(Parser)]
#[command(name = "bf", about = "Bloom filter snapshots: init, insert, search, dump")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(ValueEnum, Clone, Copy)]
enum CliHashers {
    /// fnv1, fnv1a, crc64-iso, crc64-ecma
    Default,
    /// xxh3 seeded 0..k
    Xxh3,
}

#[derive(Subcommand)]
enum Cmd {
    Init {
        #[arg(long)]
        file: PathBuf,
        /// Requested bits, rounded up to a multiple of 8
        #[arg(long)]
        size: usize,
        #[arg(long, value_enum, default_value_t = CliHashers::Default)]
        hashers: CliHashers,
        /// Number of hash functions (xxh3 only)
        #[arg(long, default_value_t = 4)]
        k: usize,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    Insert {
        #[arg(long)]
        file: PathBuf,
        /// Items are hex-encoded bytes
        #[arg(long, default_value_t = false)]
        hex: bool,
        #[arg(required = true)]
        items: Vec<String>,
    },

    Search {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = false)]
        hex: bool,
        #[arg(required = true)]
        items: Vec<String>,
    },

    Dump {
        #[arg(long)]
        file: PathBuf,
    },

    Info {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Info<'a> {
    file: &'a Path,
    hasher_set: HasherSet,
    estimated_fpp: f64,
    #[serde(flatten)]
    stats: FilterStats,
}

fn decode_item(item: &str, hex: bool) -> Result<Vec<u8>> {
    if hex {
        hex::decode(item).with_context(|| format!("bad hex item {item:?}"))
    } else {
        Ok(item.as_bytes().to_vec())
    }
}

fn open_filter(file: &Path) -> Result<Filter> {
    load_snapshot(file).with_context(|| format!("open snapshot {}", file.display()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Init { file, size, hashers, k, force } => {
            if file.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", file.display());
            }
            let filter = match hashers {
                CliHashers::Default => Filter::new_default(size),
                CliHashers::Xxh3 => {
                    if k == 0 {
                        bail!("--k must be at least 1");
                    }
                    Filter::new_xxh3(size, k)
                }
            };
            write_snapshot(&file, &filter)?;
            println!(
                "init: {} bits={} hashers={}",
                file.display(),
                filter.len(),
                filter.hasher_count()
            );
        }
        Cmd::Insert { file, hex, items } => {
            let filter = open_filter(&file)?;
            for item in &items {
                filter.insert(&decode_item(item, hex)?);
            }
            write_snapshot(&file, &filter)?;
            tracing::info!(count = items.len(), file = %file.display(), "items inserted");
            println!("inserted {} item(s)", items.len());
        }
        Cmd::Search { file, hex, items } => {
            let filter = open_filter(&file)?;
            for item in &items {
                let verdict = if filter.search(&decode_item(item, hex)?) {
                    "possibly present"
                } else {
                    "not present"
                };
                println!("{item}: {verdict}");
            }
        }
        Cmd::Dump { file } => {
            let filter = open_filter(&file)?;
            println!("{filter}");
        }
        Cmd::Info { file, json } => {
            let filter = open_filter(&file)?;
            let info = Info {
                file: &file,
                hasher_set: filter.hasher_set(),
                estimated_fpp: filter.estimated_fpp(),
                stats: filter.stats(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("file     : {}", file.display());
                println!("hashers  : {:?} x{}", info.hasher_set, info.stats.hasher_count);
                println!("bits     : {}", info.stats.bit_len);
                println!(
                    "set      : {} (fill≈{:.4}, fpp≈{:.6})",
                    info.stats.bits_set, info.stats.fill_ratio, info.estimated_fpp
                );
            }
        }
    }
    Ok(())
}
