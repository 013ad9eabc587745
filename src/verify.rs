//! Recomputing and checking the MIC of a captured handshake.

use crate::{
    crypto::{derive_ptk, hmac_sha1, kck, KCK_SIZE, PMK_SIZE},
    hccapx::{Hccapx, KeyVersion, MIC_SIZE},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// An error related to MIC verification.
pub enum VerifyError {
    /// The record's key descriptor version selects a MIC algorithm this
    /// crate doesn't compute.
    UnsupportedKeyVersion(KeyVersion),
}

/// Recompute the MIC of the record's EAPOL-Key frame under the given KCK.
///
/// Only key descriptor version 2 (HMAC-SHA1-128) is computed; versions 1
/// (HMAC-MD5) and 3 (AES-CMAC) fail with
/// [`VerifyError::UnsupportedKeyVersion`] rather than silently producing a
/// MIC with the wrong algorithm.
pub fn compute_mic(record: &Hccapx, kck: &[u8; KCK_SIZE]) -> Result<[u8; MIC_SIZE], VerifyError> {
    match record.key_version {
        KeyVersion::HmacSha1Aes => {
            let digest = hmac_sha1(kck, record.eapol());
            Ok(digest[..MIC_SIZE].try_into().unwrap())
        }
        unsupported => Err(VerifyError::UnsupportedKeyVersion(unsupported)),
    }
}

/// Check whether a PMK is the one the captured handshake was performed with.
///
/// The PMK is expanded into a PTK over the record's addresses and nonces,
/// the KCK recomputes the MIC, and the result is compared against the
/// captured MIC in constant time. Keeping the PMK as the input (rather than
/// the passphrase) lets callers check one derived PMK against several
/// records.
pub fn verify(record: &Hccapx, pmk: &[u8; PMK_SIZE]) -> Result<bool, VerifyError> {
    let ptk = derive_ptk(
        pmk,
        &record.mac_ap,
        &record.mac_sta,
        &record.nonce_ap,
        &record.nonce_sta,
    );
    let mic = compute_mic(record, kck(&ptk))?;
    let difference = mic
        .iter()
        .zip(record.key_mic)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    Ok(difference == 0)
}
