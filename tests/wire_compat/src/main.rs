fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

/// Pins the JSON wire encodings to Go `encoding/json` conventions so
/// mixed-language peers interoperate: PascalCase field names, base64
/// byte slices, one value per newline-terminated frame.
#[cfg(test)]
mod tests {
    use gamedepot_manifest::TreeManifest;
    use gamedepot_protocol::{FileRecord, ManifestBlob};

    const SAMPLE_MANIFEST: &str = "PROTOCOL_VERSION:1.0\n\
                                   ROOT_NAME:MyGame\n\
                                   GENERATED:2024-06-01T12:00:00.000000Z\n\
                                   TOTAL_DIRS:1\n\
                                   TOTAL_FILES:2\n\
                                   BEGIN_DIRECTORIES\n\
                                   DIR:data:0\n\
                                   BEGIN_FILES\n\
                                   FILE:a.txt\n\
                                   FILE:data/b.txt\n\
                                   END_MANIFEST\n";

    /// `base64.b64encode` of `SAMPLE_MANIFEST`, as Go would emit it for a
    /// `[]byte` value.
    const SAMPLE_MANIFEST_B64: &str = "UFJPVE9DT0xfVkVSU0lPTjoxLjAKUk9PVF9OQU1FOk15R2FtZQpHRU5FUkFURUQ6MjAyNC0wNi0wMVQxMjowMDowMC4wMDAwMDBaClRPVEFMX0RJUlM6MQpUT1RBTF9GSUxFUzoyCkJFR0lOX0RJUkVDVE9SSUVTCkRJUjpkYXRhOjAKQkVHSU5fRklMRVMKRklMRTphLnR4dApGSUxFOmRhdGEvYi50eHQKRU5EX01BTklGRVNUCg==";

    #[test]
    fn file_record_array_matches_go_encoding() {
        let records = vec![
            FileRecord {
                name: "a.txt".into(),
                size: 5,
            },
            FileRecord {
                name: "b.txt".into(),
                size: 3,
            },
        ];
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(
            json,
            r#"[{"Name":"a.txt","Size":5},{"Name":"b.txt","Size":3}]"#
        );
    }

    #[test]
    fn file_record_parses_go_fixture() {
        let fixture = r#"[{"Name":"game.exe","Size":73400320},{"Name":"l1.bin","Size":0}]"#;
        let records: Vec<FileRecord> = serde_json::from_str(fixture).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "game.exe");
        assert_eq!(records[0].size, 73_400_320);
        assert_eq!(records[1].size, 0);
    }

    #[test]
    fn manifest_blob_matches_go_base64() {
        let blob = ManifestBlob(SAMPLE_MANIFEST.as_bytes().to_vec());
        let json = serde_json::to_string(&blob).unwrap();
        assert_eq!(json, format!("\"{SAMPLE_MANIFEST_B64}\""));
    }

    #[test]
    fn manifest_blob_decodes_go_base64() {
        let blob: ManifestBlob =
            serde_json::from_str(&format!("\"{SAMPLE_MANIFEST_B64}\"")).unwrap();
        assert_eq!(blob.0, SAMPLE_MANIFEST.as_bytes());
    }

    #[test]
    fn blob_roundtrips_through_parse() {
        // Server-side flow: parse, wrap raw bytes, encode; the client must
        // recover byte-identical manifest text.
        let manifest = TreeManifest::parse(SAMPLE_MANIFEST.as_bytes().to_vec());
        let blob = ManifestBlob(manifest.raw_bytes().to_vec());
        let json = serde_json::to_string(&blob).unwrap();

        let decoded: ManifestBlob = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.0, SAMPLE_MANIFEST.as_bytes());

        let reparsed = TreeManifest::parse(decoded.0);
        assert_eq!(reparsed.files(), manifest.files());
        assert_eq!(reparsed.dirs(), manifest.dirs());
    }

    #[test]
    fn metadata_preamble_splits_on_newlines() {
        // The server writes each JSON value followed by `\n` (Go
        // `json.Encoder` framing); a client must be able to split the
        // preamble on newlines before the raw bytes begin.
        let blob = ManifestBlob(SAMPLE_MANIFEST.as_bytes().to_vec());
        let records = vec![FileRecord {
            name: "a.txt".into(),
            size: 5,
        }];

        let mut wire = serde_json::to_vec(&blob).unwrap();
        wire.push(b'\n');
        wire.extend(serde_json::to_vec(&records).unwrap());
        wire.push(b'\n');
        wire.extend(b"hello");

        let text = String::from_utf8(wire).unwrap();
        let mut frames = text.splitn(3, '\n');

        let got_blob: ManifestBlob = serde_json::from_str(frames.next().unwrap()).unwrap();
        assert_eq!(got_blob, blob);
        let got_records: Vec<FileRecord> =
            serde_json::from_str(frames.next().unwrap()).unwrap();
        assert_eq!(got_records, records);
        assert_eq!(frames.next().unwrap(), "hello");
    }
}
