//! 환경 변수 기반 설정

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::time::Duration;
use tracing::warn;

const DOTENV_PATH: &str = ".env";
const DEFAULT_STORE_PATH: &str = "marketplace.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_COUNTDOWN_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub store_in_memory: bool,
    pub bind_addr: String,
    pub countdown_tick: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_in_memory: false,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            countdown_tick: Duration::from_millis(DEFAULT_COUNTDOWN_TICK_MS),
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 읽고, 없는 값은 `.env` 파일에서 찾는다.
    pub fn from_env() -> Self {
        Self::from_env_and_file(Path::new(DOTENV_PATH))
    }

    fn from_env_and_file(path: &Path) -> Self {
        // 프로세스 환경 변수가 파일보다 우선한다
        let file_vars: HashMap<String, String> = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let tick_ms = parse_or(
            "COUNTDOWN_TICK_MS",
            lookup("COUNTDOWN_TICK_MS"),
            DEFAULT_COUNTDOWN_TICK_MS,
        );

        Self {
            store_path: lookup("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            store_in_memory: parse_or("STORE_IN_MEMORY", lookup("STORE_IN_MEMORY"), false),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            countdown_tick: if tick_ms == 0 {
                defaults.countdown_tick
            } else {
                Duration::from_millis(tick_ms)
            },
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{:<12} --> {} 값을 해석할 수 없음: {:?}", "Config", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("STORE_PATH", "/tmp/leilao.json"),
            ("STORE_IN_MEMORY", "true"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("COUNTDOWN_TICK_MS", "250"),
        ]);

        assert_eq!(config.store_path, PathBuf::from("/tmp/leilao.json"));
        assert!(config.store_in_memory);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.countdown_tick, Duration::from_millis(250));
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[("STORE_IN_MEMORY", "talvez"), ("COUNTDOWN_TICK_MS", "0")]);

        assert!(!config.store_in_memory);
        assert_eq!(config.countdown_tick, Duration::from_millis(1000));
    }

    #[test]
    fn reads_values_from_dotenv_file() {
        let path = env::temp_dir().join(format!("auction-marketplace-{}.env", std::process::id()));
        std::fs::write(
            &path,
            "COUNTDOWN_TICK_MS=250\nSTORE_IN_MEMORY=true\n# comentário\n",
        )
        .unwrap();

        let config = AppConfig::from_env_and_file(&path);
        assert_eq!(config.countdown_tick, Duration::from_millis(250));
        assert!(config.store_in_memory);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_dotenv_file_uses_defaults() {
        let config = AppConfig::from_env_and_file(Path::new("/nonexistent/auction-marketplace.env"));
        assert_eq!(config.countdown_tick, Duration::from_millis(1000));
    }
}
