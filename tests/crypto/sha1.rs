use eapolcrack::crypto::{sha1, Sha1, SHA1_OUTPUT_SIZE};

fn run_test_vector(message: &[u8], digest: &str) {
    assert_eq!(sha1(message), hex::decode(digest).unwrap().as_slice());
}

#[test]
fn test_fips_vectors() {
    [
        ("", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
        ("abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
        ),
    ]
    .iter()
    .for_each(|(message, digest)| run_test_vector(message.as_bytes(), digest));
}

#[test]
fn test_million_a() {
    let mut hasher = Sha1::new();
    let chunk = [b'a'; 1000];
    for _ in 0..1000 {
        hasher.update(&chunk);
    }
    assert_eq!(
        hasher.finalize(),
        hex::decode("34aa973cd4c4daa4f61eeb2bdbad27316534016f")
            .unwrap()
            .as_slice()
    );
}

#[test]
fn test_streaming_is_chunk_boundary_independent() {
    let message: Vec<u8> = (0u32..517).map(|i| (i * 31 % 251) as u8).collect();
    let expected = sha1(&message);
    assert_eq!(expected.len(), SHA1_OUTPUT_SIZE);

    for chunk_size in [1, 2, 3, 19, 63, 64, 65, 128, 517] {
        let mut hasher = Sha1::default();
        for chunk in message.chunks(chunk_size) {
            hasher.update(chunk);
        }
        assert_eq!(
            hasher.finalize(),
            expected,
            "digest changed with chunk size {chunk_size}"
        );
    }
}
