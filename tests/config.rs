use std::path::PathBuf;

use descgen::config::AppCfg;

#[test]
fn load_reads_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("descgen.yaml");
    std::fs::write(
        &path,
        "client:\n  endpoint: http://copy.internal:9000\n  timeout_secs: 7\nserver:\n  bind: 0.0.0.0:5050\n  provider:\n    kind: openai\n    model: gpt-test\n    max_tokens: 200\nout_dir: descriptions\n",
    )
    .unwrap();

    let cfg = AppCfg::load(Some(path.as_path())).unwrap();
    if std::env::var("DESCGEN_ENDPOINT").is_err() {
        assert_eq!(cfg.client.endpoint, "http://copy.internal:9000");
    }
    if std::env::var("DESCGEN_TIMEOUT_SECS").is_err() {
        assert_eq!(cfg.client.timeout_secs, 7);
    }
    if std::env::var("DESCGEN_BIND").is_err() {
        assert_eq!(cfg.server.bind, "0.0.0.0:5050");
    }
    if std::env::var("DESCGEN_PROVIDER").is_err() {
        assert_eq!(cfg.server.provider.kind, "openai");
    }
    if std::env::var("DESCGEN_OUT_DIR").is_err() {
        assert_eq!(cfg.out_dir, PathBuf::from("descriptions"));
    }
    assert_eq!(cfg.server.provider.max_tokens, Some(200));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = AppCfg::load(Some(path.as_path())).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Failed to read config file"), "{msg}");
    assert!(msg.contains("absent.yaml"), "{msg}");
}

#[test]
fn invalid_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "client: [not, a, map\n").unwrap();

    let err = AppCfg::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config YAML"));
}
