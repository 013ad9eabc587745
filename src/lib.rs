#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
//! Offline WPA2-Personal passphrase recovery.
//!
//! This crate replays the four-way-handshake integrity check against
//! candidate passphrases: each candidate is stretched into a Pairwise Master
//! Key with PBKDF2-HMAC-SHA1, expanded into a Pairwise Transient Key with the
//! IEEE 802.11 PRF, and the resulting Key Confirmation Key is used to
//! recompute the MIC of a captured EAPOL-Key frame. A matching MIC recovers
//! the network's pre-shared key.
//!
//! Handshake inputs are consumed as hccapx records (see [`hccapx`]), the
//! fixed-size container produced by capture converters. The crypto pipeline
//! lives in [`crypto`] and is usable on its own; [`verify`] ties it to a
//! record, and the `std`-gated [`attack`] module drives a wordlist through
//! the whole pipeline.

pub mod crypto;
pub mod hccapx;
pub mod verify;

#[cfg(feature = "std")]
pub mod attack;
#[cfg(feature = "std")]
pub mod wordlist;
