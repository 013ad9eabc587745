use super::{HmacSha1, SHA1_OUTPUT_SIZE};

/// The size of a Pairwise Master Key in bytes.
pub const PMK_SIZE: usize = 32;
/// The PBKDF2 iteration count mandated for WPA2-Personal.
pub const WPA2_ITERATION_COUNT: u32 = 4096;

/// PBKDF2 with HMAC-SHA1 as the PRF, as specified in RFC 2898.
///
/// `output` may have any length; the last block is truncated as needed.
/// `rounds` must be at least one.
pub fn pbkdf2_hmac_sha1(password: &[u8], salt: &[u8], rounds: u32, output: &mut [u8]) {
    assert!(rounds > 0, "PBKDF2 requires at least one round");
    // The key schedule depends only on the password, so it's computed once
    // and cloned for each of the `rounds` messages per block.
    let prf = HmacSha1::new(password);
    for (i, block) in output.chunks_mut(SHA1_OUTPUT_SIZE).enumerate() {
        derive_block(&prf, salt, rounds, i as u32 + 1, block);
    }
}

/// The `F` function of RFC 2898: the XOR sum of `rounds` chained HMAC
/// invocations, truncated to the block slice.
fn derive_block(prf: &HmacSha1, salt: &[u8], rounds: u32, index: u32, block: &mut [u8]) {
    let mut hmac = *prf;
    hmac.update(salt);
    hmac.update(&index.to_be_bytes());
    let mut u = hmac.finalize();

    block.copy_from_slice(&u[..block.len()]);
    for _ in 1..rounds {
        let mut hmac = *prf;
        hmac.update(&u);
        u = hmac.finalize();
        for (out, byte) in block.iter_mut().zip(u) {
            *out ^= byte;
        }
    }
}

/// Maps a passphrase to a PSK, as specified in Annex J of IEEE 802.11-2020.
///
/// This is the WPA2 instantiation of PBKDF2: the SSID is the salt, the
/// iteration count is 4096 and the derived key is the 32 byte PMK. Both
/// inputs are raw bytes; no normalization is applied to the passphrase.
pub fn map_passphrase_to_psk(passphrase: &[u8], ssid: &[u8]) -> [u8; PMK_SIZE] {
    let mut pmk = [0x00; PMK_SIZE];
    pbkdf2_hmac_sha1(passphrase, ssid, WPA2_ITERATION_COUNT, &mut pmk);
    pmk
}
