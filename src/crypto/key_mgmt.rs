use core::cmp::Ordering;

use mac_parser::MACAddress;

use super::{HmacSha1, SHA1_OUTPUT_SIZE};

/// The size of a Pairwise Transient Key in bytes.
pub const PTK_SIZE: usize = 64;
/// The size of the Key Confirmation Key in bytes.
///
/// The KCK is the leading slice of the PTK and is the only part of it this
/// tool consumes.
pub const KCK_SIZE: usize = 16;
/// The size of the AP and station nonces in bytes.
pub const NONCE_SIZE: usize = 32;

const PAIRWISE_KEY_EXPANSION: &str = "Pairwise key expansion";

/// Pseudo Random Function (PRF)
///
/// Implemented according to 12.7.1.2 IEEE 802.11-2020, with HMAC-SHA1. Each
/// 20 byte output chunk is `HMAC-SHA1(key, label ∥ 0x00 ∥ data ∥ i)` with a
/// single byte counter `i`; the final chunk is truncated to the output
/// length. `data` is a collection of slices, since the PRF input is almost
/// always several chunks concatenated together.
pub fn prf(key: &[u8], label: &str, data: &[&[u8]], output: &mut [u8]) {
    for (i, output_chunk) in output.chunks_mut(SHA1_OUTPUT_SIZE).enumerate() {
        let mut hmac = HmacSha1::new(key);
        hmac.update(label.as_bytes());
        hmac.update(&[0x00]);
        for data_chunk in data {
            hmac.update(data_chunk);
        }
        hmac.update(&[i as u8]);
        let digest = hmac.finalize();
        output_chunk.copy_from_slice(&digest[..output_chunk.len()]);
    }
}

/// Sort two byte slices lexicographically.
///
/// The first slice in the returned tuple is lexicographically smaller than
/// the second one, unless both are equal.
fn sort_lexicographically<'a>(a: &'a [u8], b: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    if a.iter().partial_cmp(b.iter()) == Some(Ordering::Less) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Derive a Pairwise Transient Key (PTK)
///
/// This is PRF-512 over the PMK, with the AP and station addresses and
/// nonces in canonical order: the lexicographically smaller operand of each
/// pair comes first, which makes the derivation symmetric in the two
/// parties.
pub fn derive_ptk(
    pmk: &[u8],
    ap_address: &MACAddress,
    sta_address: &MACAddress,
    ap_nonce: &[u8; NONCE_SIZE],
    sta_nonce: &[u8; NONCE_SIZE],
) -> [u8; PTK_SIZE] {
    let (min_address, max_address) = sort_lexicographically(ap_address.as_slice(), sta_address.as_slice());
    let (min_nonce, max_nonce) = sort_lexicographically(ap_nonce, sta_nonce);
    let mut ptk = [0x00; PTK_SIZE];
    prf(
        pmk,
        PAIRWISE_KEY_EXPANSION,
        &[min_address, max_address, min_nonce, max_nonce],
        &mut ptk,
    );
    ptk
}

/// Extract the Key Confirmation Key from a PTK.
pub fn kck(ptk: &[u8; PTK_SIZE]) -> &[u8; KCK_SIZE] {
    ptk[..KCK_SIZE].try_into().unwrap()
}
