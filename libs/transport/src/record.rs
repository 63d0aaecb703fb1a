//! Wire records for the shard transport protocol.

use serde::{Deserialize, Serialize};

/// A record on the wire.
///
/// Records travel as single lines of JSON over a stream connection, discriminated by the
/// `type` field. Shard values stay strings at this layer: the record checksum covers the
/// exact text that was received, so numeric parsing only happens after verification.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum WireRecord {
    /// Announces the content hash of the secret being dealt.
    #[serde(rename = "HASH")]
    Hash {
        /// Lowercase hex digest of the secret bytes.
        data: String,
    },

    /// Carries one shard.
    #[serde(rename = "SHARD")]
    Shard {
        /// The shard abscissa as a decimal string.
        x: String,

        /// The shard ordinate as a decimal string.
        y: String,

        /// The freshness nonce as a decimal string.
        nonce: String,

        /// Hex checksum over the exact string `"x,y,nonce"`.
        checksum: String,
    },
}

impl WireRecord {
    /// Serializes the record as a single newline-terminated line.
    pub fn to_line(&self) -> Result<String, EncodeRecordError> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    /// Parses a record from one line, with or without its line terminator.
    pub fn from_line(line: &str) -> Result<Self, DecodeRecordError> {
        Ok(serde_json::from_str(line.trim_end_matches(['\r', '\n']))?)
    }
}

/// An error when serializing a record.
#[derive(Debug, thiserror::Error)]
#[error("record serialization failed: {0}")]
pub struct EncodeRecordError(#[from] serde_json::Error);

/// An error when parsing a record.
#[derive(Debug, thiserror::Error)]
#[error("malformed record: {0}")]
pub struct DecodeRecordError(#[from] serde_json::Error);

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_record_line() {
        let record = WireRecord::Hash { data: "2cf24dba5fb0a30e".into() };
        let line = record.to_line().expect("serialization failed");
        assert_eq!(line, "{\"type\":\"HASH\",\"data\":\"2cf24dba5fb0a30e\"}\n");
        assert_eq!(WireRecord::from_line(&line).expect("parsing failed"), record);
    }

    #[test]
    fn shard_record_line() {
        let record = WireRecord::Shard {
            x: "12".into(),
            y: "3456".into(),
            nonce: "789".into(),
            checksum: "aabbcc".into(),
        };
        let line = record.to_line().expect("serialization failed");
        assert_eq!(
            line,
            "{\"type\":\"SHARD\",\"x\":\"12\",\"y\":\"3456\",\"nonce\":\"789\",\"checksum\":\"aabbcc\"}\n"
        );
        assert_eq!(WireRecord::from_line(&line).expect("parsing failed"), record);
    }

    #[test]
    fn field_order_does_not_matter_when_parsing() {
        let line = "{\"checksum\":\"aa\",\"nonce\":\"1\",\"y\":\"2\",\"x\":\"3\",\"type\":\"SHARD\"}";
        let record = WireRecord::from_line(line).expect("parsing failed");
        assert_eq!(
            record,
            WireRecord::Shard { x: "3".into(), y: "2".into(), nonce: "1".into(), checksum: "aa".into() }
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::not_json("not json at all")]
    #[case::unknown_type("{\"type\":\"NOPE\",\"data\":\"00\"}")]
    #[case::missing_field("{\"type\":\"SHARD\",\"x\":\"1\",\"y\":\"2\"}")]
    #[case::numeric_fields("{\"type\":\"SHARD\",\"x\":1,\"y\":2,\"nonce\":3,\"checksum\":\"aa\"}")]
    fn invalid_lines(#[case] line: &str) {
        assert!(WireRecord::from_line(line).is_err());
    }
}
