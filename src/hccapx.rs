//! The hccapx handshake record container.
//!
//! An hccapx file is a sequence of fixed-size 393 byte records, each holding
//! exactly the pieces of one four-way handshake needed for offline MIC
//! verification: the ESSID, the two MAC addresses and nonces, the key
//! descriptor version, the captured MIC and the EAPOL-Key frame the MIC was
//! computed over (with its MIC field zeroed). Multi-byte integer fields are
//! little endian.

use bitfield_struct::bitfield;
use mac_parser::MACAddress;
use scroll::{
    ctx::{MeasureWith, TryFromCtx, TryIntoCtx},
    Endian, Pread, Pwrite,
};

use crate::crypto::NONCE_SIZE;

/// The magic at the start of every record, `HCPX` in little endian.
pub const HCCAPX_SIGNATURE: u32 = 0x5850_4348;
/// The container version this crate reads and writes.
pub const HCCAPX_VERSION: u32 = 4;
/// The size of a record on the wire in bytes.
pub const HCCAPX_RECORD_SIZE: usize = 393;
/// The maximum length of an ESSID in bytes.
pub const MAX_ESSID_SIZE: usize = 32;
/// The maximum length of the stored EAPOL-Key frame in bytes.
pub const MAX_EAPOL_SIZE: usize = 256;
/// The size of the captured MIC in bytes.
pub const MIC_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Cipher and MIC combination negotiated for the handshake.
pub enum KeyVersion {
    /// RC4 for encryption and HMAC-MD5 for integrity (WPA).
    HmacMd5,
    /// AES Key Wrap for encryption and HMAC-SHA1-128 for integrity (WPA2).
    HmacSha1Aes,
    /// AES Key Wrap for encryption and AES-CMAC for integrity.
    AesCmac,
    Unknown(u8),
}
impl KeyVersion {
    /// Constructs the key version from it's representation.
    pub const fn from_bits(value: u8) -> Self {
        match value {
            1 => Self::HmacMd5,
            2 => Self::HmacSha1Aes,
            3 => Self::AesCmac,
            other => Self::Unknown(other),
        }
    }
    /// Turns the key version into it's representation.
    pub const fn into_bits(self) -> u8 {
        match self {
            Self::HmacMd5 => 1,
            Self::HmacSha1Aes => 2,
            Self::AesCmac => 3,
            Self::Unknown(other) => other,
        }
    }
}

#[bitfield(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Which EAPOL message pair the record's MIC was taken from.
///
/// Pair 0 is M1/M2, 2 is M2/M3 and 4 is M3/M4; odd values mark pairs whose
/// replay counters didn't match exactly. The record carries a single EAPOL
/// buffer chosen by the capture converter, so this field is informational
/// and isn't consulted during verification.
pub struct MessagePair {
    #[bits(7)]
    pub pair: u8,
    /// The handshake was captured without seeing the AP side.
    pub ap_less: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A single handshake record.
///
/// The ESSID and EAPOL buffers aren't public, since checking their lengths
/// at initialization removes the checks from serialization and from the
/// verification hot loop.
pub struct Hccapx {
    pub message_pair: MessagePair,
    essid_len: u8,
    essid: [u8; MAX_ESSID_SIZE],
    pub key_version: KeyVersion,
    /// The MIC observed in the captured EAPOL-Key frame.
    pub key_mic: [u8; MIC_SIZE],
    pub mac_ap: MACAddress,
    pub nonce_ap: [u8; NONCE_SIZE],
    pub mac_sta: MACAddress,
    pub nonce_sta: [u8; NONCE_SIZE],
    eapol_len: u16,
    eapol: [u8; MAX_EAPOL_SIZE],
}
impl Hccapx {
    /// Assemble a record from its parts.
    ///
    /// This returns [None] if `essid` is longer than 32 bytes or `eapol` is
    /// longer than 256 bytes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        message_pair: MessagePair,
        essid: &[u8],
        key_version: KeyVersion,
        key_mic: [u8; MIC_SIZE],
        mac_ap: MACAddress,
        nonce_ap: [u8; NONCE_SIZE],
        mac_sta: MACAddress,
        nonce_sta: [u8; NONCE_SIZE],
        eapol: &[u8],
    ) -> Option<Self> {
        if essid.len() > MAX_ESSID_SIZE || eapol.len() > MAX_EAPOL_SIZE {
            return None;
        }
        let mut essid_buf = [0x00; MAX_ESSID_SIZE];
        essid_buf[..essid.len()].copy_from_slice(essid);
        let mut eapol_buf = [0x00; MAX_EAPOL_SIZE];
        eapol_buf[..eapol.len()].copy_from_slice(eapol);
        Some(Self {
            message_pair,
            essid_len: essid.len() as u8,
            essid: essid_buf,
            key_version,
            key_mic,
            mac_ap,
            nonce_ap,
            mac_sta,
            nonce_sta,
            eapol_len: eapol.len() as u16,
            eapol: eapol_buf,
        })
    }
    /// The network name, without the zero padding.
    pub fn essid(&self) -> &[u8] {
        &self.essid[..self.essid_len as usize]
    }
    /// The EAPOL-Key frame the MIC was computed over, with the MIC field
    /// zeroed, without the zero padding.
    pub fn eapol(&self) -> &[u8] {
        &self.eapol[..self.eapol_len as usize]
    }
}
impl TryFromCtx<'_> for Hccapx {
    type Error = scroll::Error;
    fn try_from_ctx(from: &[u8], _ctx: ()) -> Result<(Self, usize), Self::Error> {
        let mut offset = 0;

        let signature: u32 = from.gread_with(&mut offset, Endian::Little)?;
        if signature != HCCAPX_SIGNATURE {
            return Err(scroll::Error::BadInput {
                size: offset,
                msg: "Record signature wasn't HCPX.",
            });
        }
        let version: u32 = from.gread_with(&mut offset, Endian::Little)?;
        if version != HCCAPX_VERSION {
            return Err(scroll::Error::BadInput {
                size: offset,
                msg: "Unsupported hccapx container version.",
            });
        }
        let message_pair = MessagePair::from_bits(from.gread(&mut offset)?);
        let essid_len: u8 = from.gread(&mut offset)?;
        if essid_len as usize > MAX_ESSID_SIZE {
            return Err(scroll::Error::BadInput {
                size: offset,
                msg: "ESSID length exceeds 32 bytes.",
            });
        }
        let essid = from.gread(&mut offset)?;
        let key_version = KeyVersion::from_bits(from.gread(&mut offset)?);
        let key_mic = from.gread(&mut offset)?;
        let mac_ap = MACAddress::new(from.gread(&mut offset)?);
        let nonce_ap = from.gread(&mut offset)?;
        let mac_sta = MACAddress::new(from.gread(&mut offset)?);
        let nonce_sta = from.gread(&mut offset)?;
        let eapol_len: u16 = from.gread_with(&mut offset, Endian::Little)?;
        if eapol_len as usize > MAX_EAPOL_SIZE {
            return Err(scroll::Error::BadInput {
                size: offset,
                msg: "EAPOL length exceeds 256 bytes.",
            });
        }
        let eapol = from.gread(&mut offset)?;

        Ok((
            Self {
                message_pair,
                essid_len,
                essid,
                key_version,
                key_mic,
                mac_ap,
                nonce_ap,
                mac_sta,
                nonce_sta,
                eapol_len,
                eapol,
            },
            offset,
        ))
    }
}
impl TryIntoCtx for Hccapx {
    type Error = scroll::Error;
    fn try_into_ctx(self, buf: &mut [u8], _ctx: ()) -> Result<usize, Self::Error> {
        let mut offset = 0;

        buf.gwrite_with(HCCAPX_SIGNATURE, &mut offset, Endian::Little)?;
        buf.gwrite_with(HCCAPX_VERSION, &mut offset, Endian::Little)?;
        buf.gwrite(self.message_pair.into_bits(), &mut offset)?;
        buf.gwrite(self.essid_len, &mut offset)?;
        buf.gwrite(self.essid, &mut offset)?;
        buf.gwrite(self.key_version.into_bits(), &mut offset)?;
        buf.gwrite(self.key_mic, &mut offset)?;
        buf.gwrite(self.mac_ap, &mut offset)?;
        buf.gwrite(self.nonce_ap, &mut offset)?;
        buf.gwrite(self.mac_sta, &mut offset)?;
        buf.gwrite(self.nonce_sta, &mut offset)?;
        buf.gwrite_with(self.eapol_len, &mut offset, Endian::Little)?;
        buf.gwrite(self.eapol, &mut offset)?;

        Ok(offset)
    }
}
impl MeasureWith<()> for Hccapx {
    fn measure_with(&self, _ctx: &()) -> usize {
        HCCAPX_RECORD_SIZE
    }
}

#[derive(Clone, Copy, Debug)]
/// An iterator over the concatenated records of an hccapx file.
///
/// Every item consumes exactly [HCCAPX_RECORD_SIZE] bytes, so a malformed
/// record yields its parse error and the iterator carries on with the next
/// one; callers decide whether to skip or abort. Trailing bytes shorter
/// than a record yield a final error.
pub struct HccapxIterator<'a> {
    bytes: &'a [u8],
}
impl<'a> HccapxIterator<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}
impl Iterator for HccapxIterator<'_> {
    type Item = Result<Hccapx, scroll::Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.is_empty() {
            return None;
        }
        if self.bytes.len() < HCCAPX_RECORD_SIZE {
            self.bytes = &[];
            return Some(Err(scroll::Error::BadInput {
                size: 0,
                msg: "Trailing bytes shorter than a record.",
            }));
        }
        let record = self.bytes.pread(0);
        self.bytes = &self.bytes[HCCAPX_RECORD_SIZE..];
        Some(record)
    }
}
