//! The cryptographic pipeline: SHA-1, HMAC-SHA1, PBKDF2 and the IEEE 802.11
//! key expansion built on top of them.

mod sha1;
pub use sha1::*;

mod hmac;
pub use hmac::*;

mod pbkdf2;
pub use pbkdf2::*;

mod key_mgmt;
pub use key_mgmt::*;
