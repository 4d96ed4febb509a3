//! Fixed little-endian wire type for ghost values.
//!
//! A ghost message is exactly one `f64`, carried as its IEEE-754 bit pattern
//! in little-endian byte order so ranks of mixed endianness agree.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use std::mem::size_of;

/// One ghost value on the wire.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq, Eq)]
pub struct WireScalar {
    pub bits_le: u64,
}

const_assert_eq!(size_of::<WireScalar>(), size_of::<f64>());

/// Byte length of every ghost message.
pub const GHOST_BYTES: usize = size_of::<WireScalar>();

impl WireScalar {
    pub fn of(x: f64) -> Self {
        Self {
            bits_le: x.to_bits().to_le(),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(u64::from_le(self.bits_le))
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Decode a received payload, which must be exactly [`GHOST_BYTES`] long.
    /// On a size mismatch the error carries the received length.
    pub fn decode(raw: &[u8]) -> Result<f64, usize> {
        if raw.len() != GHOST_BYTES {
            return Err(raw.len());
        }
        Ok(bytemuck::pod_read_unaligned::<WireScalar>(raw).get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_little_endian() {
        let w = WireScalar::of(1.0);
        assert_eq!(w.as_bytes(), &1.0f64.to_bits().to_le_bytes());
    }

    #[test]
    fn decode_keeps_exact_bits() {
        for x in [0.0, -0.0, 1.5e-300, f64::MAX, -7.25] {
            let got = WireScalar::decode(WireScalar::of(x).as_bytes()).unwrap();
            assert_eq!(got.to_bits(), x.to_bits());
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(WireScalar::decode(&[0u8; 4]), Err(4));
        assert_eq!(WireScalar::decode(&[]), Err(0));
        assert_eq!(WireScalar::decode(&[0u8; GHOST_BYTES + 1]), Err(9));
    }
}
