use {
    crate::weight::Weight,
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A byte string output in the left string semiring.
///
/// `times` concatenates, `plus` is the longest common prefix and `divide_left` strips a prefix. This
/// is the output type term dictionaries use to point from a term prefix to its block metadata.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ByteWeight {
    bytes: Vec<u8>,
}

impl ByteWeight {
    /// Create a new weight holding the given bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the bytes of this weight.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of bytes in this weight.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Indicates whether this weight is the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the weight and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Weight for ByteWeight {
    #[inline]
    fn one() -> Self {
        Self::default()
    }

    fn times(&self, rhs: &Self) -> Self {
        let mut bytes = Vec::with_capacity(self.bytes.len() + rhs.bytes.len());
        bytes.extend_from_slice(&self.bytes);
        bytes.extend_from_slice(&rhs.bytes);
        Self {
            bytes,
        }
    }

    fn plus(&self, rhs: &Self) -> Self {
        let common = self.bytes.iter().zip(rhs.bytes.iter()).take_while(|(a, b)| a == b).count();
        Self::new(&self.bytes[..common])
    }

    fn divide_left(&self, rhs: &Self) -> Self {
        debug_assert!(self.bytes.starts_with(&rhs.bytes), "{rhs:?} is not a prefix of {self:?}");
        let start = rhs.bytes.len().min(self.bytes.len());
        Self::new(&self.bytes[start..])
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl From<&[u8]> for ByteWeight {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for ByteWeight {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<Vec<u8>> for ByteWeight {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl Debug for ByteWeight {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match std::str::from_utf8(&self.bytes) {
            Ok(s) => write!(f, "ByteWeight({s:?})"),
            Err(_) => write!(f, "ByteWeight({:#x?})", self.bytes),
        }
    }
}

impl Display for ByteWeight {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for b in &self.bytes {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ByteWeight,
        crate::weight::Weight,
        pretty_assertions::assert_eq,
    };

    #[test]
    fn test_semiring_ops() {
        let ab = ByteWeight::from("ab");
        let abc = ByteWeight::from("abc");
        let abd = ByteWeight::from("abd");

        assert!(ByteWeight::one().is_one());
        assert_eq!(ab.times(&ByteWeight::from("c")), abc);
        assert_eq!(ByteWeight::one().times(&abc), abc);
        assert_eq!(abc.plus(&abd), ab);
        assert_eq!(abc.plus(&ByteWeight::from("x")), ByteWeight::one());
        assert_eq!(abc.divide_left(&ab), ByteWeight::from("c"));
        assert_eq!(abc.divide_left(&ByteWeight::one()), abc);
        assert_eq!(abc.size(), 3);
    }

    #[test]
    fn test_factoring_restores_operand() {
        let a = ByteWeight::from("prefix-one");
        let b = ByteWeight::from("prefix-two");
        let common = a.plus(&b);
        assert_eq!(common.times(&a.divide_left(&common)), a);
        assert_eq!(common.times(&b.divide_left(&common)), b);
    }

    #[test]
    fn test_accessors() {
        let w = ByteWeight::from(&b"xyz"[..]);
        assert_eq!(w.as_bytes(), b"xyz");
        assert_eq!(w.len(), 3);
        assert!(!w.is_empty());
        assert!(ByteWeight::one().is_empty());
        assert_eq!(w.into_bytes(), b"xyz".to_vec());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format!("{:?}", ByteWeight::from("hi")), "ByteWeight(\"hi\")");
        assert_eq!(ByteWeight::new(vec![0x01, 0xff]).to_string(), "01ff");
    }
}
