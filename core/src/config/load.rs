use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;

/// Get the default sentinel data directory: ~/.sentinel
pub fn get_sentinel_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".sentinel"))
}

pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: $SENTINEL_CONFIG (explicit path)
    let explicit = std::env::var("SENTINEL_CONFIG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    // Priority 2: ~/.sentinel/config.toml
    let home_config = get_sentinel_data_dir().ok().map(|d| d.join("config.toml"));

    // Priority 3: ./sentinel.toml (current directory)
    let local_config = Path::new("sentinel.toml");

    let mut cfg = if let Some(path) = explicit {
        load_from_path(path)?
    } else if let Some(path) = home_config.filter(|p| p.exists()) {
        load_from_path(path)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;

    // Not validated here: command line flags still apply on top.
    Ok(cfg)
}

/// Environment variable overrides, applied over the config file. Blank values
/// are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, var: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("SENTINEL_WORKERS") {
        cfg.executor.workers = v
            .trim()
            .parse()
            .with_context(|| format!("SENTINEL_WORKERS is not a number: {v}"))?;
    }
    if let Some(v) = non_blank("SENTINEL_QUEUE_CAPACITY") {
        cfg.executor.queue_capacity = v
            .trim()
            .parse()
            .with_context(|| format!("SENTINEL_QUEUE_CAPACITY is not a number: {v}"))?;
    }
    if let Some(v) = non_blank("SENTINEL_LOG_LEVEL") {
        cfg.logging.level = v;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorConfig;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_from_path_reads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[executor]\nworkers = 3\n\n[logging]\nlevel = \"debug\"\nfile = true"
        )
        .unwrap();

        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.executor, ExecutorConfig::new(3, 50));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.file);
        assert!(cfg.logging.console);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[executor\nworkers = ").unwrap();
        assert!(load_from_path(file.path()).is_err());
    }

    #[test]
    fn env_overrides_take_priority() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(
            &mut cfg,
            env(&[
                ("SENTINEL_WORKERS", "8"),
                ("SENTINEL_QUEUE_CAPACITY", " 16 "),
                ("SENTINEL_LOG_LEVEL", "warn"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.executor, ExecutorConfig::new(8, 16));
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, env(&[("SENTINEL_WORKERS", "  ")])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn out_of_range_values_survive_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[executor]\nworkers = 0").unwrap();

        let mut cfg = load_from_path(file.path()).unwrap();
        apply_env_overrides(&mut cfg, env(&[])).unwrap();
        assert_eq!(cfg.executor.workers, 0);
        assert!(cfg.executor.validate().is_err());
    }

    #[test]
    fn non_numeric_env_value_is_an_error() {
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, env(&[("SENTINEL_WORKERS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("SENTINEL_WORKERS"));
    }
}
