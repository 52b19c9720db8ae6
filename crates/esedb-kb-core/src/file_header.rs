//! Declarative layout of the EDB file header.
//!
//! The header layout is static data consumed by external decoders; nothing
//! here parses records. The fields, in order, all little-endian:
//!
//! | offset | size | field              |
//! |-------:|-----:|--------------------|
//! |      0 |    4 | checksum           |
//! |      4 |    4 | signature          |
//! |      8 |    4 | format_version     |
//! |     12 |    4 | file_type          |
//! |     16 |    8 | database_time      |
//! |     24 |   28 | database_signature |
//! |     52 |    4 | database_state     |
//!
//! The signature field holds the constant `0x89abcdef`, which decoders use
//! to recognize an EDB file before reading anything else.

/// The expected value of the `signature` header field.
pub const SIGNATURE: u32 = 0x89ab_cdef;

/// Total size of the file header fields in bytes.
pub const HEADER_SIZE: usize = 60;

/// Primitive kind of a header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A little-endian unsigned 32-bit integer.
    U32,
    /// A little-endian unsigned 64-bit integer.
    U64,
    /// An opaque fixed-size byte sequence.
    Bytes(usize),
}

impl FieldKind {
    /// Returns the field size in bytes.
    pub fn size(self) -> usize {
        match self {
            FieldKind::U32 => 4,
            FieldKind::U64 => 8,
            FieldKind::Bytes(len) => len,
        }
    }
}

/// One field of the file header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// Field name.
    pub name: &'static str,
    /// Primitive kind and width.
    pub kind: FieldKind,
    /// Fixed expected value, when the field is a format constant.
    pub expected: Option<u32>,
}

/// The file header fields in on-disk order.
pub const LAYOUT: [HeaderField; 7] = [
    HeaderField {
        name: "checksum",
        kind: FieldKind::U32,
        expected: None,
    },
    HeaderField {
        name: "signature",
        kind: FieldKind::U32,
        expected: Some(SIGNATURE),
    },
    HeaderField {
        name: "format_version",
        kind: FieldKind::U32,
        expected: None,
    },
    HeaderField {
        name: "file_type",
        kind: FieldKind::U32,
        expected: None,
    },
    HeaderField {
        name: "database_time",
        kind: FieldKind::U64,
        expected: None,
    },
    HeaderField {
        name: "database_signature",
        kind: FieldKind::Bytes(28),
        expected: None,
    },
    HeaderField {
        name: "database_state",
        kind: FieldKind::U32,
        expected: None,
    },
];

/// Returns the sum of the layout's field sizes.
pub fn header_size() -> usize {
    LAYOUT.iter().map(|field| field.kind.size()).sum()
}

/// Looks up a header field by name.
pub fn field(name: &str) -> Option<&'static HeaderField> {
    LAYOUT.iter().find(|field| field.name == name)
}

/// Returns the byte offset of a header field.
pub fn field_offset(name: &str) -> Option<usize> {
    let mut offset = 0;

    for field in &LAYOUT {
        if field.name == name {
            return Some(offset);
        }
        offset += field.kind.size();
    }

    None
}

/// Checks whether a file prefix carries the EDB signature.
///
/// Reads the 4 bytes at the signature field's offset and compares them
/// against the little-endian constant; short buffers simply do not match.
pub fn starts_with_signature(data: &[u8]) -> bool {
    // Offset 4 is fixed by the layout above.
    match data.get(4..8) {
        Some(bytes) => bytes == SIGNATURE.to_le_bytes(),
        None => false,
    }
}
