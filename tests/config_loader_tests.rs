use prms::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

const KEYS: &[&str] = &[
    "PRMS_PROFILE",
    "PRMS_LOG_LEVEL",
    "PRMS_LOG_FORMAT",
    "PRMS_DATABASE_URL",
    "PRMS_DB_MAX_CONNECTIONS",
    "PRMS_DB_ACQUIRE_TIMEOUT_MS",
    "PRMS_DB_SQL_LOGGING",
    "PRMS_ADMIN_USERNAME",
    "PRMS_ADMIN_EMAIL",
    "PRMS_ADMIN_PASSWORD",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.database_url, "sqlite://prms.db?mode=rwc");
    assert_eq!(cfg.db_max_connections, 10);
    assert_eq!(cfg.db_acquire_timeout_ms, 5000);
    assert!(!cfg.db_sql_logging);
    assert!(cfg.bootstrap_admin().is_none());
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "PRMS_DATABASE_URL=sqlite://base.db\nPRMS_LOG_FORMAT=pretty\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test",
        "PRMS_DATABASE_URL=sqlite://profile.db\nPRMS_DB_MAX_CONNECTIONS=3\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "PRMS_DATABASE_URL=postgres://prms:pw@localhost/prms_test\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "PRMS_PROFILE=test\nPRMS_DATABASE_URL=sqlite://local.db\nPRMS_DB_SQL_LOGGING=yes\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.database_url, "postgres://prms:pw@localhost/prms_test");
    assert_eq!(cfg.db_max_connections, 3);
    assert_eq!(cfg.log_format, "pretty");
    assert!(cfg.db_sql_logging);
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "PRMS_DATABASE_URL=sqlite://file.db\nPRMS_LOG_LEVEL=debug\n",
    );

    unsafe {
        env::set_var("PRMS_DATABASE_URL", "sqlite::memory:");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.log_level, "debug");

    clear_env();
}

#[test]
fn bootstrap_admin_from_env() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("PRMS_ADMIN_USERNAME", " admin ");
        env::set_var("PRMS_ADMIN_EMAIL", "admin@prms.com");
        env::set_var("PRMS_ADMIN_PASSWORD", " pass phrase ");
    }

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads");
    let admin = cfg.bootstrap_admin().expect("all three admin keys set");
    assert_eq!(admin.username, "admin");
    assert_eq!(admin.password, " pass phrase ");

    let json = cfg.redacted_json().unwrap();
    assert!(!json.contains("pass phrase"));

    clear_env();
}

#[test]
fn partial_bootstrap_admin_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("PRMS_ADMIN_USERNAME", "admin");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("username alone is not enough");
    assert!(matches!(err, ConfigError::IncompleteBootstrapAdmin));

    clear_env();
}

#[test]
fn invalid_values_return_errors() {
    let _guard = env_guard();
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));

    unsafe {
        env::set_var("PRMS_LOG_FORMAT", "xml");
    }
    let err = loader.load().expect_err("unknown log format");
    assert!(format!("{}", err).contains("log format"));
    clear_env();

    unsafe {
        env::set_var("PRMS_DB_SQL_LOGGING", "sometimes");
    }
    let err = loader.load().expect_err("not a boolean");
    assert!(matches!(err, ConfigError::InvalidBool { .. }));
    clear_env();

    unsafe {
        env::set_var("PRMS_DB_MAX_CONNECTIONS", "0");
    }
    let err = loader.load().expect_err("empty pool");
    assert!(matches!(err, ConfigError::InvalidMaxConnections { value: 0 }));
    clear_env();

    unsafe {
        env::set_var("PRMS_DB_MAX_CONNECTIONS", "abc");
    }
    let err = loader.load().expect_err("pool size is not a number");
    match err {
        ConfigError::InvalidNumber { key, value } => {
            assert_eq!(key, "PRMS_DB_MAX_CONNECTIONS");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    clear_env();

    write_env_file(&temp_dir, ".env", "PRMS_DB_ACQUIRE_TIMEOUT_MS=5s\n");
    let err = loader.load().expect_err("timeout is not a number");
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    clear_env();
}
