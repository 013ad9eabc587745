use super::{sha1, Sha1, SHA1_BLOCK_SIZE, SHA1_OUTPUT_SIZE};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

#[derive(Clone, Copy, Debug)]
/// A streaming HMAC-SHA1 context, as specified in RFC 2104.
///
/// Constructing the context absorbs the padded key into the inner and outer
/// hashers. Cloning a fresh context therefore reuses those two midstates,
/// which is what makes the PBKDF2 inner loop cheap: one key schedule per
/// derivation, one clone per message.
pub struct HmacSha1 {
    inner: Sha1,
    outer: Sha1,
}
impl HmacSha1 {
    /// Create a context for the given key.
    ///
    /// Keys longer than the 64 byte block size are replaced by their SHA-1
    /// digest before padding, as required by the RFC.
    pub fn new(key: &[u8]) -> Self {
        let mut padded_key = [0x00; SHA1_BLOCK_SIZE];
        if key.len() > SHA1_BLOCK_SIZE {
            padded_key[..SHA1_OUTPUT_SIZE].copy_from_slice(&sha1(key));
        } else {
            padded_key[..key.len()].copy_from_slice(key);
        }

        let mut inner = Sha1::new();
        let mut outer = Sha1::new();
        let mut block = padded_key;
        for byte in block.iter_mut() {
            *byte ^= IPAD;
        }
        inner.update(&block);
        for byte in block.iter_mut() {
            *byte ^= IPAD ^ OPAD;
        }
        outer.update(&block);

        Self { inner, outer }
    }
    /// Append message bytes.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }
    /// Produce the MAC.
    pub fn finalize(mut self) -> [u8; SHA1_OUTPUT_SIZE] {
        self.outer.update(&self.inner.finalize());
        self.outer.finalize()
    }
}

/// Compute HMAC-SHA1 of a message in one shot.
pub fn hmac_sha1(key: &[u8], msg: &[u8]) -> [u8; SHA1_OUTPUT_SIZE] {
    let mut hmac = HmacSha1::new(key);
    hmac.update(msg);
    hmac.finalize()
}
