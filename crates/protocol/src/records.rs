//! JSON records sent ahead of the file byte stream.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Metadata for one listed file, sent to the client before any bytes.
///
/// Field names are PascalCase on the wire for compatibility with Go
/// `encoding/json` peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base name of the file (not the full listed path).
    #[serde(rename = "Name")]
    pub name: String,
    /// File size in bytes at resolution time.
    #[serde(rename = "Size")]
    pub size: i64,
}

/// The raw manifest bytes wrapped for wire transmission.
///
/// Serializes as a standard-alphabet base64 string, the way
/// `encoding/json` encodes a `[]byte`. The bytes are forwarded verbatim
/// rather than re-serialized so the client sees exactly what the server
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestBlob(pub Vec<u8>);

impl Serialize for ManifestBlob {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ManifestBlob {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)?;
        Ok(ManifestBlob(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_record_field_names() {
        let record = FileRecord {
            name: "a.txt".into(),
            size: 5,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Name":"a.txt","Size":5}"#);
    }

    #[test]
    fn file_record_parses_go_output() {
        let json = r#"{"Name":"level1.bin","Size":1048576}"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "level1.bin");
        assert_eq!(record.size, 1_048_576);
    }

    #[test]
    fn manifest_blob_encodes_base64() {
        let blob = ManifestBlob(b"MANIFEST".to_vec());
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, "\"TUFOSUZFU1Q=\"");
    }

    #[test]
    fn manifest_blob_roundtrip() {
        let blob = ManifestBlob(b"PROTOCOL_VERSION:1.0\nROOT_NAME:MyGame\n".to_vec());
        let json = serde_json::to_string(&blob).unwrap();
        let parsed: ManifestBlob = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn manifest_blob_rejects_invalid_base64() {
        let result: Result<ManifestBlob, _> = serde_json::from_str("\"not base64!!\"");
        assert!(result.is_err());
    }
}
