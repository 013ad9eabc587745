use std::{
    fs::{self, File},
    io::BufReader,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eapolcrack::{
    attack::{attack, default_workers},
    hccapx::{Hccapx, HccapxIterator, KeyVersion},
    wordlist::Candidates,
};

#[derive(Parser)]
#[command(version, about = "Offline WPA2-Personal passphrase recovery.")]
struct Args {
    /// Capture to attack: an hccapx file, or a pcap capture whose derived
    /// .hccapx cache sits next to it.
    capture: PathBuf,
    /// Wordlist with one candidate passphrase per line.
    wordlist: PathBuf,
    /// Only attack handshakes with this ESSID.
    essid: Option<String>,
    /// Number of worker threads. Defaults to the logical core count; a
    /// single worker tries candidates strictly in wordlist order.
    #[arg(long)]
    threads: Option<NonZeroUsize>,
    /// Attack the record at this index instead of the first usable one.
    #[arg(long)]
    index: Option<usize>,
    /// List the records in the capture and exit.
    #[arg(long)]
    list: bool,
}

enum Outcome {
    Found(Vec<u8>),
    Exhausted,
    Listed,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let interrupted = Arc::new(AtomicBool::new(false));
    match run(&interrupted) {
        Ok(Outcome::Found(passphrase)) => {
            println!("{}", String::from_utf8_lossy(&passphrase));
            ExitCode::SUCCESS
        }
        Ok(Outcome::Exhausted) => {
            if interrupted.load(Ordering::Relaxed) {
                eprintln!("interrupted");
            } else {
                eprintln!("wordlist exhausted without a match");
            }
            ExitCode::from(1)
        }
        Ok(Outcome::Listed) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(stop: &Arc<AtomicBool>) -> anyhow::Result<Outcome> {
    let args = Args::parse();

    let capture_path = resolve_capture_path(&args.capture)?;
    let capture = fs::read(&capture_path)
        .with_context(|| format!("reading capture {}", capture_path.display()))?;

    if args.list {
        list_records(&capture);
        return Ok(Outcome::Listed);
    }

    let record = select_record(&capture, args.essid.as_deref(), args.index)?;
    info!(
        essid = %String::from_utf8_lossy(record.essid()),
        ap = ?record.mac_ap,
        station = ?record.mac_sta,
        "attacking handshake"
    );

    let wordlist = File::open(&args.wordlist)
        .with_context(|| format!("opening wordlist {}", args.wordlist.display()))?;
    let candidates = Candidates::new(BufReader::new(wordlist));

    ctrlc::set_handler({
        let stop = stop.clone();
        move || stop.store(true, Ordering::Relaxed)
    })
    .context("installing the interrupt handler")?;

    let workers = args.threads.unwrap_or_else(default_workers);
    match attack(&record, candidates, workers, stop)? {
        Some(passphrase) => Ok(Outcome::Found(passphrase)),
        None => Ok(Outcome::Exhausted),
    }
}

/// Map the capture argument to an hccapx file.
///
/// Raw pcap decoding is left to an external converter; for `.cap`/`.pcap`
/// inputs the derived `.hccapx` cache next to the capture is used instead.
fn resolve_capture_path(path: &Path) -> anyhow::Result<PathBuf> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("hccapx") => Ok(path.to_path_buf()),
        Some("cap" | "pcap" | "pcapng") => {
            let derived = path.with_extension("hccapx");
            if derived.is_file() {
                Ok(derived)
            } else {
                bail!(
                    "no derived hccapx next to {}; convert the capture first (e.g. with cap2hccapx)",
                    path.display()
                );
            }
        }
        _ => bail!("unsupported capture format: {}", path.display()),
    }
}

fn list_records(capture: &[u8]) {
    for (index, record) in HccapxIterator::new(capture).enumerate() {
        match record {
            Ok(record) => println!(
                "{index}: essid={} ap={:?} station={:?} keyver={} pair={}",
                String::from_utf8_lossy(record.essid()),
                record.mac_ap,
                record.mac_sta,
                record.key_version.into_bits(),
                record.message_pair.pair(),
            ),
            Err(error) => println!("{index}: malformed record ({error})"),
        }
    }
}

/// Pick the record to attack.
///
/// With an explicit index that record is required to be usable; otherwise
/// the first well-formed keyver=2 record passing the ESSID filter wins, and
/// malformed or unsupported records are skipped with a warning.
fn select_record(
    capture: &[u8],
    essid_filter: Option<&str>,
    index: Option<usize>,
) -> anyhow::Result<Hccapx> {
    if let Some(wanted) = index {
        let record = HccapxIterator::new(capture)
            .nth(wanted)
            .with_context(|| format!("capture has no record {wanted}"))?
            .with_context(|| format!("record {wanted} is malformed"))?;
        return Ok(record);
    }
    for (index, record) in HccapxIterator::new(capture).enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(index, %error, "skipping malformed record");
                continue;
            }
        };
        if let Some(essid) = essid_filter {
            if record.essid() != essid.as_bytes() {
                continue;
            }
        }
        if record.key_version != KeyVersion::HmacSha1Aes {
            warn!(
                index,
                key_version = ?record.key_version,
                "skipping handshake with unsupported key version"
            );
            continue;
        }
        return Ok(record);
    }
    bail!("no usable handshake in capture");
}
