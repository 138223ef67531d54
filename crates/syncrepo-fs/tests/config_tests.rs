use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use syncrepo_fs::{ConfigStore, Error, NormalizedPath};
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    remote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
}

fn sample() -> Sample {
    Sample {
        remote: "https://example.com/template.git".into(),
        prefix: None,
    }
}

#[test]
fn test_json_roundtrip_omits_absent_fields() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("syncrepo.json"));
    let store = ConfigStore::new();

    store.save(&path, &sample()).unwrap();
    let raw = std::fs::read_to_string(path.to_native()).unwrap();
    assert!(!raw.contains("prefix"));

    let loaded: Sample = store.load(&path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_toml_and_yaml_are_supported() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new();

    for name in ["syncrepo.toml", "syncrepo.yaml"] {
        let path = NormalizedPath::new(temp.path().join(name));
        store.save(&path, &sample()).unwrap();
        let loaded: Sample = store.load(&path).unwrap();
        assert_eq!(loaded, sample());
    }
}

#[test]
fn test_invalid_json_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("syncrepo.json"));
    std::fs::write(path.to_native(), "{ not json").unwrap();

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "JSON"));
}

#[test]
fn test_unknown_extension_rejected() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("syncrepo.ini"));

    let err = ConfigStore::new().save(&path, &sample()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert!(!path.exists());
}
