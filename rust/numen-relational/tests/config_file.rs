use numen_core::Value;
use numen_relational::{Config, ConfigError, Engine, DEFAULT_EPSILON};
use std::path::PathBuf;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("numen-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_epsilon_from_file() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let path = temp_config("loose.toml", "epsilon = 0.01\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.epsilon, 0.01);

    let engine = Engine::with_config(config).unwrap();
    let r = engine.smaller(&[Value::Number(0.991), Value::Number(1.0)]).unwrap();
    assert_eq!(r, Value::Boolean(false));
}

#[test]
fn empty_file_keeps_defaults() {
    let path = temp_config("empty.toml", "");
    assert_eq!(Config::load_from(&path).unwrap().epsilon, DEFAULT_EPSILON);
}

#[test]
fn rejected_files() {
    let path = temp_config("negative.toml", "epsilon = -1.0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::InvalidEpsilon(e)) if e == -1.0
    ));

    let path = temp_config("broken.toml", "epsilon = \n");
    assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));

    let missing = std::env::temp_dir().join("numen-config-does-not-exist.toml");
    assert!(matches!(Config::load_from(&missing), Err(ConfigError::Io { .. })));
}

#[test]
fn reconfigure_running_engine() {
    let engine = Engine::new();
    let path = temp_config("tight.toml", "epsilon = 1e-3\n");
    engine.configure(Config::load_from(&path).unwrap()).unwrap();
    assert_eq!(engine.config().epsilon, 1e-3);
    assert_eq!(
        engine.equal(&[Value::Number(1.0005), Value::Number(1.0)]).unwrap(),
        Value::Boolean(true)
    );
}
