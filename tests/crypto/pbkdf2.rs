use eapolcrack::crypto::{map_passphrase_to_psk, pbkdf2_hmac_sha1};

fn run_rfc_6070_vector(password: &[u8], salt: &[u8], rounds: u32, derived_key: &str) {
    let expected = hex::decode(derived_key).unwrap();
    let mut output = vec![0x00; expected.len()];
    pbkdf2_hmac_sha1(password, salt, rounds, &mut output);
    assert_eq!(output, expected);
}

#[test]
fn test_rfc_6070_vectors() {
    [
        (1, "0c60c80f961f0e71f3a9b524af6012062fe037a6"),
        (2, "ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"),
        (4096, "4b007901b765489abead49d926f721d065a429c1"),
    ]
    .iter()
    .for_each(|(rounds, derived_key)| {
        run_rfc_6070_vector(b"password", b"salt", *rounds, derived_key)
    });

    // Derived key length isn't a multiple of the hash output here.
    run_rfc_6070_vector(
        b"passwordPASSWORDpassword",
        b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
        4096,
        "3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038",
    );
}

#[test]
fn test_output_length_is_honored() {
    for length in [0, 1, 19, 20, 21, 40, 63] {
        let mut output = vec![0x00; length];
        pbkdf2_hmac_sha1(b"length probe", b"salt", 2, &mut output);
        assert_eq!(output.len(), length);
    }
}

#[test]
fn test_truncation_is_a_prefix() {
    let mut long = [0x00; 40];
    pbkdf2_hmac_sha1(b"prefix probe", b"salt", 3, &mut long);
    let mut short = [0x00; 25];
    pbkdf2_hmac_sha1(b"prefix probe", b"salt", 3, &mut short);
    assert_eq!(short, &long[..25]);
}

#[test]
fn test_empty_password_is_accepted() {
    let mut output = [0x00; 20];
    pbkdf2_hmac_sha1(b"", b"salt", 2, &mut output);
    assert_ne!(output, [0x00; 20]);
}

fn run_psk_test_vector(passphrase: &str, ssid: &str, psk: &str) {
    assert_eq!(
        map_passphrase_to_psk(passphrase.as_bytes(), ssid.as_bytes()),
        hex::decode(psk).unwrap().as_slice()
    );
}

#[test]
fn test_passphrase_to_psk_mapping() {
    [
        (
            "password",
            "IEEE",
            "f42c6fc52df0ebef9ebb4b90b38a5f902e83fe1b135a70e23aed762e9710a12e",
        ),
        (
            "Induction",
            "IEEE",
            "ac2c121cb2b61418c92116976b560fe67682e960f60082814ab93e12df04384d",
        ),
        (
            "ThisIsAPassword",
            "ThisIsASSID",
            "0dc0d6eb90555ed6419756b9a15ec3e3209b63df707dd508d14581f8982721af",
        ),
        (
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ",
            "becb93866bb8c3832cb777c2f559807c8c59afcb6eae734885001300a981cc62",
        ),
    ]
    .iter()
    .for_each(|(passphrase, ssid, psk)| run_psk_test_vector(passphrase, ssid, psk));
}
