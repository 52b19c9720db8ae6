//! The closed set of ESE column value types.
//!
//! ESE (JET Blue) defines a fixed table of column types, each with a numeric
//! code, a `JET_coltyp*` constant name, and a human-readable description.
//! The knowledge base resource files record the description string; the
//! numeric code is what an external decoder reads out of a database catalog.
//!
//! The enumeration is closed: a code or description outside the table is an
//! error, never a fallback variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// A column value type as defined by the ESE catalog.
///
/// Serializes as the human-readable description string (for example,
/// `"Integer 32-bit signed"`), which is the form used by the YAML resource
/// files and the asciidoc documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// An invalid column type (JET_coltypNil).
    #[serde(rename = "Null")]
    Null,

    /// A boolean stored as a single byte (JET_coltypBit).
    #[serde(rename = "Boolean")]
    Boolean,

    /// An unsigned 8-bit integer (JET_coltypUnsignedByte).
    #[serde(rename = "Integer 8-bit unsigned")]
    Integer8bitUnsigned,

    /// A signed 16-bit integer (JET_coltypShort).
    #[serde(rename = "Integer 16-bit signed")]
    Integer16bitSigned,

    /// A signed 32-bit integer (JET_coltypLong).
    #[serde(rename = "Integer 32-bit signed")]
    Integer32bitSigned,

    /// A signed 64-bit integer holding a currency amount (JET_coltypCurrency).
    #[serde(rename = "Currency")]
    Currency,

    /// A single-precision floating point value (JET_coltypIEEESingle).
    #[serde(rename = "Floating point 32-bit")]
    FloatingPoint32bit,

    /// A double-precision floating point value (JET_coltypIEEEDouble).
    #[serde(rename = "Floating point 64-bit")]
    FloatingPoint64bit,

    /// A date and time stored as a FILETIME value (JET_coltypDateTime).
    #[serde(rename = "Filetime")]
    Filetime,

    /// Raw binary data up to 255 bytes (JET_coltypBinary).
    #[serde(rename = "Binary data")]
    BinaryData,

    /// A text string up to 255 bytes (JET_coltypText).
    #[serde(rename = "Text")]
    Text,

    /// Binary data stored in overflow pages (JET_coltypLongBinary).
    #[serde(rename = "Large binary data")]
    LargeBinaryData,

    /// A text string stored in overflow pages (JET_coltypLongText).
    #[serde(rename = "Large text")]
    LargeText,

    /// A super large value, obsolete (JET_coltypSLV).
    #[serde(rename = "Super large value")]
    SuperLargeValue,

    /// An unsigned 32-bit integer (JET_coltypUnsignedLong).
    #[serde(rename = "Integer 32-bit unsigned")]
    Integer32bitUnsigned,

    /// A signed 64-bit integer (JET_coltypLongLong).
    #[serde(rename = "Integer 64-bit signed")]
    Integer64bitSigned,

    /// A 16-byte GUID (JET_coltypGUID).
    #[serde(rename = "GUID")]
    Guid,

    /// An unsigned 16-bit integer (JET_coltypUnsignedShort).
    #[serde(rename = "Integer 16-bit unsigned")]
    Integer16bitUnsigned,
}

/// Error raised when a numeric column type code is outside the known table.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(display("Unknown column value type code {code}"))]
pub struct UnknownValueTypeError {
    /// The unrecognized numeric code.
    pub code: u32,
}

/// Error raised when a description string does not name a known value type.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(display("Unknown column value type description '{description}'"))]
pub struct ParseValueTypeError {
    /// The unrecognized description string.
    pub description: String,
}

impl ValueType {
    /// All known value types, in numeric code order.
    pub const ALL: [ValueType; 18] = [
        ValueType::Null,
        ValueType::Boolean,
        ValueType::Integer8bitUnsigned,
        ValueType::Integer16bitSigned,
        ValueType::Integer32bitSigned,
        ValueType::Currency,
        ValueType::FloatingPoint32bit,
        ValueType::FloatingPoint64bit,
        ValueType::Filetime,
        ValueType::BinaryData,
        ValueType::Text,
        ValueType::LargeBinaryData,
        ValueType::LargeText,
        ValueType::SuperLargeValue,
        ValueType::Integer32bitUnsigned,
        ValueType::Integer64bitSigned,
        ValueType::Guid,
        ValueType::Integer16bitUnsigned,
    ];

    /// Returns the numeric column type code used in the database catalog.
    pub fn code(self) -> u32 {
        match self {
            ValueType::Null => 0,
            ValueType::Boolean => 1,
            ValueType::Integer8bitUnsigned => 2,
            ValueType::Integer16bitSigned => 3,
            ValueType::Integer32bitSigned => 4,
            ValueType::Currency => 5,
            ValueType::FloatingPoint32bit => 6,
            ValueType::FloatingPoint64bit => 7,
            ValueType::Filetime => 8,
            ValueType::BinaryData => 9,
            ValueType::Text => 10,
            ValueType::LargeBinaryData => 11,
            ValueType::LargeText => 12,
            ValueType::SuperLargeValue => 13,
            ValueType::Integer32bitUnsigned => 14,
            ValueType::Integer64bitSigned => 15,
            ValueType::Guid => 16,
            ValueType::Integer16bitUnsigned => 17,
        }
    }

    /// Returns the human-readable description used in resources and docs.
    pub fn description(self) -> &'static str {
        match self {
            ValueType::Null => "Null",
            ValueType::Boolean => "Boolean",
            ValueType::Integer8bitUnsigned => "Integer 8-bit unsigned",
            ValueType::Integer16bitSigned => "Integer 16-bit signed",
            ValueType::Integer32bitSigned => "Integer 32-bit signed",
            ValueType::Currency => "Currency",
            ValueType::FloatingPoint32bit => "Floating point 32-bit",
            ValueType::FloatingPoint64bit => "Floating point 64-bit",
            ValueType::Filetime => "Filetime",
            ValueType::BinaryData => "Binary data",
            ValueType::Text => "Text",
            ValueType::LargeBinaryData => "Large binary data",
            ValueType::LargeText => "Large text",
            ValueType::SuperLargeValue => "Super large value",
            ValueType::Integer32bitUnsigned => "Integer 32-bit unsigned",
            ValueType::Integer64bitSigned => "Integer 64-bit signed",
            ValueType::Guid => "GUID",
            ValueType::Integer16bitUnsigned => "Integer 16-bit unsigned",
        }
    }

    /// Returns the `JET_coltyp*` constant name for this value type.
    pub fn jet_identifier(self) -> &'static str {
        match self {
            ValueType::Null => "JET_coltypNil",
            ValueType::Boolean => "JET_coltypBit",
            ValueType::Integer8bitUnsigned => "JET_coltypUnsignedByte",
            ValueType::Integer16bitSigned => "JET_coltypShort",
            ValueType::Integer32bitSigned => "JET_coltypLong",
            ValueType::Currency => "JET_coltypCurrency",
            ValueType::FloatingPoint32bit => "JET_coltypIEEESingle",
            ValueType::FloatingPoint64bit => "JET_coltypIEEEDouble",
            ValueType::Filetime => "JET_coltypDateTime",
            ValueType::BinaryData => "JET_coltypBinary",
            ValueType::Text => "JET_coltypText",
            ValueType::LargeBinaryData => "JET_coltypLongBinary",
            ValueType::LargeText => "JET_coltypLongText",
            ValueType::SuperLargeValue => "JET_coltypSLV",
            ValueType::Integer32bitUnsigned => "JET_coltypUnsignedLong",
            ValueType::Integer64bitSigned => "JET_coltypLongLong",
            ValueType::Guid => "JET_coltypGUID",
            ValueType::Integer16bitUnsigned => "JET_coltypUnsignedShort",
        }
    }
}

impl TryFrom<u32> for ValueType {
    type Error = UnknownValueTypeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        ValueType::ALL
            .into_iter()
            .find(|value_type| value_type.code() == code)
            .ok_or(UnknownValueTypeError { code })
    }
}

impl FromStr for ValueType {
    type Err = ParseValueTypeError;

    fn from_str(description: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|value_type| value_type.description() == description)
            .ok_or_else(|| ParseValueTypeError {
                description: description.to_string(),
            })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dense_and_in_declaration_order() {
        for (index, value_type) in ValueType::ALL.into_iter().enumerate() {
            assert_eq!(value_type.code(), index as u32);
        }
    }

    #[test]
    fn code_roundtrip() {
        for value_type in ValueType::ALL {
            assert_eq!(ValueType::try_from(value_type.code()), Ok(value_type));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = ValueType::try_from(18).unwrap_err();
        assert_eq!(err, UnknownValueTypeError { code: 18 });
    }

    #[test]
    fn description_roundtrip() {
        for value_type in ValueType::ALL {
            let parsed: ValueType = value_type.description().parse().unwrap();
            assert_eq!(parsed, value_type);
        }
    }

    #[test]
    fn unknown_description_is_rejected() {
        let err = "Integer 128-bit signed".parse::<ValueType>().unwrap_err();
        assert_eq!(err.description, "Integer 128-bit signed");
    }

    #[test]
    fn jet_identifiers_match_known_constants() {
        let cases = [
            (ValueType::Boolean, "JET_coltypBit"),
            (ValueType::Integer32bitSigned, "JET_coltypLong"),
            (ValueType::Filetime, "JET_coltypDateTime"),
            (ValueType::LargeBinaryData, "JET_coltypLongBinary"),
            (ValueType::Guid, "JET_coltypGUID"),
        ];

        for (value_type, identifier) in cases {
            assert_eq!(value_type.jet_identifier(), identifier);
        }
    }

    #[test]
    fn serializes_as_description_string() {
        let yaml = serde_yaml::to_string(&ValueType::LargeBinaryData).unwrap();
        assert_eq!(yaml.trim(), "Large binary data");

        let decoded: ValueType = serde_yaml::from_str("Integer 32-bit signed").unwrap();
        assert_eq!(decoded, ValueType::Integer32bitSigned);
    }

    #[test]
    fn deserialize_rejects_unknown_description() {
        let result: Result<ValueType, _> = serde_yaml::from_str("Huge text");
        assert!(result.is_err());
    }
}
