use complexity_common::config::SystemConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_load_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.toml");

    let config_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[model]
api_key = "test-key"
model = "gemini-2.5-pro"
temperature = 0.2

[harness]
program = "python3"
args = []
source_file = "bench.py"
timeout_secs = 30
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = SystemConfig::from_file(&config_path).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.body_limit_bytes, 10 * 1024 * 1024);
    assert_eq!(config.model.model, "gemini-2.5-pro");
    assert!(config.model.has_credential());
    assert_eq!(config.harness.program, "python3");
    assert!(config.harness.args.is_empty());
    assert_eq!(config.harness.source_file, "bench.py");
    assert_eq!(config.harness.timeout().as_secs(), 30);
}

#[test]
fn test_config_defaults_match_reference_service() {
    let config = SystemConfig::default();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.model.model, "gemini-2.5-flash");
    assert!((config.model.temperature - 0.1).abs() < f32::EPSILON);
    assert!(!config.model.has_credential());
    assert_eq!(config.harness.program, "go");
    assert_eq!(config.harness.args, vec!["run".to_string()]);
    assert_eq!(config.harness.source_file, "main.go");
    assert_eq!(config.harness.timeout().as_secs(), 600);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();

    let config = SystemConfig::from_file(&config_path).unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.harness.source_file, "main.go");
}

#[test]
fn test_config_validation_invalid_temperature() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid_temp.toml");

    fs::write(&config_path, "[model]\ntemperature = 3.0\n").unwrap();

    let result = SystemConfig::from_file(&config_path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("temperature"));
}

#[test]
fn test_config_validation_zero_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid_timeout.toml");

    fs::write(&config_path, "[harness]\ntimeout_secs = 0\n").unwrap();

    let result = SystemConfig::from_file(&config_path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("timeout_secs"));
}

#[test]
fn test_config_validation_source_file_with_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid_source.toml");

    fs::write(&config_path, "[harness]\nsource_file = \"../main.go\"\n").unwrap();

    let result = SystemConfig::from_file(&config_path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("source_file"));
}

#[test]
fn test_load_config_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = SystemConfig::load_config(temp_dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_load_config_keeps_file_credential() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("with_key.toml");
    fs::write(&config_path, "[model]\napi_key = \"from-file\"\n").unwrap();

    let config = SystemConfig::load_config(&config_path).unwrap();
    assert_eq!(config.model.api_key.as_deref(), Some("from-file"));
}
