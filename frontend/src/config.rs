//! 应用配置
//!
//! 默认值适用于本地开发；构建时可通过环境变量覆盖：
//! - `TRACKLYTICS_API_BASE`: 后端地址
//! - `TRACKLYTICS_REFRESH_DELAY_MS`: 同步完成后刷新人格数据的延迟

use std::time::Duration;

use leptos::prelude::*;

const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_REFRESH_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端根地址，不带结尾的 `/`
    pub api_base_url: String,
    /// 同步成功后，等待后端完成人格计算再刷新的时间
    pub refresh_delay: Duration,
}

impl AppConfig {
    /// 读取构建时注入的配置
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("TRACKLYTICS_API_BASE"),
            option_env!("TRACKLYTICS_REFRESH_DELAY_MS"),
        )
    }

    fn from_vars(api_base: Option<&str>, refresh_delay_ms: Option<&str>) -> Self {
        let api_base_url = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let refresh_delay_ms = match refresh_delay_ms.map(str::trim) {
            None | Some("") => DEFAULT_REFRESH_DELAY_MS,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log_warn!(
                    "[Config] Invalid TRACKLYTICS_REFRESH_DELAY_MS '{}', using {}ms",
                    raw,
                    DEFAULT_REFRESH_DELAY_MS
                );
                DEFAULT_REFRESH_DELAY_MS
            }),
        };

        Self {
            api_base_url,
            refresh_delay: Duration::from_millis(refresh_delay_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}

/// 从 Context 获取应用配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_vars(None, None);
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.refresh_delay, Duration::from_millis(1000));
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = AppConfig::from_vars(Some(" https://api.tracklytics.app/ "), Some("2500"));
        assert_eq!(config.api_base_url, "https://api.tracklytics.app");
        assert_eq!(config.refresh_delay, Duration::from_millis(2500));
    }

    #[test]
    fn invalid_delay_falls_back_to_default() {
        let config = AppConfig::from_vars(Some(""), Some("soon"));
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.refresh_delay, Duration::from_millis(1000));
    }
}
