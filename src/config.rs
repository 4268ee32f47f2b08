use crate::error::{AppError, AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 管理端口地址，例如 https://127.0.0.1:8089
    pub base_url: String,
    /// 会话密钥（由外部获取后传入）
    pub session_key: String,
    /// reviewstatuses 集合所在的 app
    pub app: String,
    /// 状态/处置参考数据集合
    pub collection: String,
    /// 紧急程度 lookup 表名
    pub urgency_lookup: String,
    /// 逐条模式下同时发送的请求数量
    pub max_concurrent_requests: usize,
    /// 单个 HTTP 请求超时（秒），为空表示不限制
    pub request_timeout_secs: Option<u64>,
    /// 是否校验 TLS 证书
    pub verify_tls: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://127.0.0.1:8089".to_string(),
            session_key: String::new(),
            app: "SA-ThreatIntelligence".to_string(),
            collection: "reviewstatuses".to_string(),
            urgency_lookup: "urgency_lookup".to_string(),
            max_concurrent_requests: default_worker_count(),
            request_timeout_secs: None,
            verify_tls: true,
            verbose_logging: false,
        }
    }
}

/// 与常见线程池默认值一致：min(32, CPU 数 + 4)
pub fn default_worker_count() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(32)
}

impl Config {
    /// 从环境变量加载，缺省项使用默认值
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            base_url: std::env::var("NOTABLE_BASE_URL").unwrap_or(default.base_url),
            session_key: std::env::var("NOTABLE_SESSION_KEY").unwrap_or(default.session_key),
            app: std::env::var("NOTABLE_APP").unwrap_or(default.app),
            collection: std::env::var("NOTABLE_COLLECTION").unwrap_or(default.collection),
            urgency_lookup: std::env::var("NOTABLE_URGENCY_LOOKUP").unwrap_or(default.urgency_lookup),
            max_concurrent_requests: parse_env("NOTABLE_MAX_CONCURRENT_REQUESTS", "usize")?
                .unwrap_or(default.max_concurrent_requests),
            request_timeout_secs: parse_env("NOTABLE_REQUEST_TIMEOUT_SECS", "u64")?
                .or(default.request_timeout_secs),
            verify_tls: parse_env("NOTABLE_VERIFY_TLS", "bool")?.unwrap_or(default.verify_tls),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
        })
    }

    /// 从 TOML 文件加载，未出现的字段使用默认值
    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: String::new(),
                source: Box::new(e),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "base_url".to_string(),
            }
            .into());
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid {
                name: "max_concurrent_requests".to_string(),
                reason: "必须大于 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}
