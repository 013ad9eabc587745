use std::{io::Cursor, num::NonZeroUsize, sync::atomic::AtomicBool};

use eapolcrack::{
    attack::{attack, AttackError},
    hccapx::{Hccapx, KeyVersion},
    wordlist::Candidates,
};
use scroll::Pread;

const HANDSHAKE_RECORD: &[u8] = include_bytes!("../../bins/handshake.hccapx");

fn record() -> Hccapx {
    HANDSHAKE_RECORD.pread(0).unwrap()
}

fn candidates(wordlist: &[u8]) -> Candidates<Cursor<Vec<u8>>> {
    Candidates::new(Cursor::new(wordlist.to_vec()))
}

fn workers(count: usize) -> NonZeroUsize {
    NonZeroUsize::new(count).unwrap()
}

#[test]
fn test_wordlist_line_splitting() {
    let lines: Vec<_> = candidates(b"one\ntwo\r\nthree")
        .map(Result::unwrap)
        .collect();
    assert_eq!(lines, [b"one".as_slice(), b"two", b"three"]);
}

#[test]
fn test_wordlist_preserves_interior_bytes() {
    let lines: Vec<_> = candidates(b"with space\n\nnon\xffutf8\n")
        .map(Result::unwrap)
        .collect();
    assert_eq!(lines, [b"with space".as_slice(), b"", b"non\xffutf8"]);
}

#[test]
fn test_serial_attack_finds_passphrase() {
    let record = record();
    let stop = AtomicBool::new(false);
    let wordlist = b"password\nletmein\nInduction\nnevertried";
    let found = attack(&record, candidates(wordlist), workers(1), &stop).unwrap();
    assert_eq!(found.as_deref(), Some(b"Induction".as_slice()));
}

#[test]
fn test_out_of_range_candidates_are_skipped() {
    let record = record();
    let stop = AtomicBool::new(false);
    let mut wordlist = Vec::new();
    wordlist.extend_from_slice(b"\n");
    wordlist.extend_from_slice(&[b'x'; 64]);
    wordlist.extend_from_slice(b"\nInduction\n");
    let found = attack(&record, candidates(&wordlist), workers(1), &stop).unwrap();
    assert_eq!(found.as_deref(), Some(b"Induction".as_slice()));
}

#[test]
fn test_exhausted_wordlist_yields_no_match() {
    let record = record();
    let stop = AtomicBool::new(false);
    let wordlist = b"password\nletmein\nhunter22\n";
    let found = attack(&record, candidates(wordlist), workers(1), &stop).unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_parallel_attack_finds_passphrase() {
    let record = record();
    let stop = AtomicBool::new(false);
    let mut wordlist = Vec::new();
    for filler in 0..24 {
        wordlist.extend_from_slice(format!("filler-{filler}\n").as_bytes());
    }
    wordlist.extend_from_slice(b"Induction\n");
    for filler in 24..32 {
        wordlist.extend_from_slice(format!("filler-{filler}\n").as_bytes());
    }
    let found = attack(&record, candidates(&wordlist), workers(4), &stop).unwrap();
    assert_eq!(found.as_deref(), Some(b"Induction".as_slice()));
}

#[test]
fn test_parallel_attack_exhausts_cleanly() {
    let record = record();
    let stop = AtomicBool::new(false);
    let wordlist: Vec<u8> = (0..16)
        .flat_map(|filler| format!("filler-{filler}\n").into_bytes())
        .collect();
    let found = attack(&record, candidates(&wordlist), workers(4), &stop).unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_raised_stop_flag_cancels_the_run() {
    let record = record();
    let stop = AtomicBool::new(true);
    let wordlist = b"Induction\n";
    let found = attack(&record, candidates(wordlist), workers(1), &stop).unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_unsupported_key_version_aborts() {
    let mut record = record();
    record.key_version = KeyVersion::HmacMd5;
    let stop = AtomicBool::new(false);
    let result = attack(&record, candidates(b"Induction\n"), workers(1), &stop);
    assert!(matches!(
        result,
        Err(AttackError::UnsupportedKeyVersion(KeyVersion::HmacMd5))
    ));
}
