use std::fmt;

/// A 16-byte MD5 digest. Used both as a content hash (CKey) and an encoded
/// hash (EKey); the two kinds share a representation and are distinguished
/// only by which table they were looked up in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CascHash(pub [u8; 16]);

impl CascHash {
    pub const ZERO: Self = Self([0u8; 16]);

    pub fn from_hex(s: &str) -> Option<Self> {
        let mut out = [0u8; 16];
        hex::decode_to_slice(s, &mut out).ok()?;
        Some(Self(out))
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == [0u8; 16]
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for CascHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CascHash({})", self.to_hex())
    }
}

impl fmt::Display for CascHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 16]> for CascHash {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}
