use docmeta_core::config::{ConfigError, ConfigLoader, LoadOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn load(cfg: &Path, env: &Path) -> Result<(), ConfigError> {
    ConfigLoader::load(LoadOptions { config_path: Some(cfg), env_file: Some(env), model: None })
        .map(|_| ())
}

#[test]
fn missing_file_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("nope/config.toml");
    let err = ConfigLoader::load(LoadOptions {
        config_path: Some(&cfg_path),
        ..Default::default()
    })
    .unwrap_err();
    match err {
        ConfigError::NotFound(_) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn bad_version_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let env_path = tmp.path().join(".env");
    write_file(&cfg_path, "version = 2\n");
    write_file(&env_path, "GEMINI_API_KEY=k\n");

    match load(&cfg_path, &env_path).unwrap_err() {
        ConfigError::BadVersion(2) => {}
        other => panic!("expected BadVersion(2), got {other:?}"),
    }
}

#[test]
fn invalid_toml_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let env_path = tmp.path().join(".env");
    write_file(&cfg_path, "version = \n[generation\n");
    write_file(&env_path, "GEMINI_API_KEY=k\n");

    match load(&cfg_path, &env_path).unwrap_err() {
        ConfigError::ParseError(path, _) => assert!(path.ends_with("config.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn invalid_endpoint_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let env_path = tmp.path().join(".env");
    write_file(
        &cfg_path,
        "version = 1\n[generation]\nendpoint = \"not a url\"\napi_key_env = \"DOCMETA_ERR_ENDPOINT_KEY\"\n",
    );
    write_file(&env_path, "DOCMETA_ERR_ENDPOINT_KEY=k\n");

    match load(&cfg_path, &env_path).unwrap_err() {
        ConfigError::InvalidEndpoint(raw, _) => assert_eq!(raw, "not a url"),
        other => panic!("expected InvalidEndpoint, got {other:?}"),
    }
}

#[test]
fn missing_api_key_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let env_path = tmp.path().join(".env");
    write_file(&cfg_path, "version = 1\n[generation]\napi_key_env = \"DOCMETA_ERR_UNSET_KEY\"\n");
    write_file(&env_path, "SOMETHING_ELSE=1\n");

    match load(&cfg_path, &env_path).unwrap_err() {
        ConfigError::MissingApiKey(var) => assert_eq!(var, "DOCMETA_ERR_UNSET_KEY"),
        other => panic!("expected MissingApiKey, got {other:?}"),
    }
}

#[test]
fn explicit_env_file_must_exist() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = 1\n");

    match load(&cfg_path, &tmp.path().join("missing.env")).unwrap_err() {
        ConfigError::EnvFile(path, _) => assert!(path.ends_with("missing.env")),
        other => panic!("expected EnvFile, got {other:?}"),
    }
}
