/// The output size of SHA-1 in bytes.
pub const SHA1_OUTPUT_SIZE: usize = 20;
/// The internal block size of SHA-1 in bytes.
pub const SHA1_BLOCK_SIZE: usize = 64;

const INITIAL_STATE: [u32; 5] = [
    0x6745_2301,
    0xefcd_ab89,
    0x98ba_dcfe,
    0x1032_5476,
    0xc3d2_e1f0,
];

#[derive(Clone, Copy, Debug)]
/// A streaming SHA-1 hasher, as specified in FIPS 180-4.
///
/// Input may be fed through [`Sha1::update`] in chunks of any size; the
/// digest is independent of the chunk boundaries. The hasher is a plain
/// value, so a fresh one is constructed per message and partially fed
/// hashers can be duplicated with [`Clone`].
pub struct Sha1 {
    state: [u32; 5],
    block: [u8; SHA1_BLOCK_SIZE],
    block_len: usize,
    message_len: u64,
}
impl Sha1 {
    /// Create a hasher over the empty message.
    pub const fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            block: [0x00; SHA1_BLOCK_SIZE],
            block_len: 0,
            message_len: 0,
        }
    }
    /// Append bytes to the message.
    pub fn update(&mut self, mut bytes: &[u8]) {
        self.message_len += bytes.len() as u64;
        if self.block_len != 0 {
            let free = SHA1_BLOCK_SIZE - self.block_len;
            let take = free.min(bytes.len());
            self.block[self.block_len..self.block_len + take].copy_from_slice(&bytes[..take]);
            self.block_len += take;
            if self.block_len < SHA1_BLOCK_SIZE {
                return;
            }
            let block = self.block;
            self.compress(&block);
            self.block_len = 0;
            bytes = &bytes[take..];
        }
        let mut chunks = bytes.chunks_exact(SHA1_BLOCK_SIZE);
        for block in chunks.by_ref() {
            let block: [u8; SHA1_BLOCK_SIZE] = block.try_into().unwrap();
            self.compress(&block);
        }
        let rest = chunks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.block_len = rest.len();
    }
    /// Pad the message and produce the digest.
    pub fn finalize(mut self) -> [u8; SHA1_OUTPUT_SIZE] {
        let bit_len = self.message_len * 8;
        // One bit, the shortest zero fill reaching 448 mod 512, then the 64
        // bit big endian message length.
        let mut padding = [0x00; SHA1_BLOCK_SIZE + 8];
        padding[0] = 0x80;
        let pad_len = SHA1_BLOCK_SIZE - ((self.message_len as usize + 8) % SHA1_BLOCK_SIZE);
        padding[pad_len..pad_len + 8].copy_from_slice(&bit_len.to_be_bytes());
        self.update(&padding[..pad_len + 8]);

        let mut digest = [0x00; SHA1_OUTPUT_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        digest
    }
    fn compress(&mut self, block: &[u8; SHA1_BLOCK_SIZE]) {
        let mut w = [0u32; 80];
        for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_be_bytes(chunk.try_into().unwrap());
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;
        for (i, word) in w.into_iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5a82_7999),
                20..=39 => (b ^ c ^ d, 0x6ed9_eba1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8f1b_bcdc),
                _ => (b ^ c ^ d, 0xca62_c1d6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
    }
}
impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the SHA-1 digest of a message in one shot.
pub fn sha1(bytes: &[u8]) -> [u8; SHA1_OUTPUT_SIZE] {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hasher.finalize()
}
