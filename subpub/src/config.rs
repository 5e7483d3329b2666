//! 发布端配置（DispatcherConfig）
//!
//! 支持代码内构造、serde 反序列化以及从环境变量读取：
//! - `SUBPUB_QUEUE`：任务投递的队列名，默认 `default`；
//! - `SUBPUB_JOB_KIND`：默认提交方式，`enqueue` | `schedule`；
//! - `SUBPUB_DELAY_SECS`：默认延迟秒数（仅 `schedule` 生效）；
//! - `SUBPUB_RESOLVE_HANDLERS`：发布前是否先经 Resolver 确认处理器可解析，默认 `true`。
//!
use crate::error::{SubPubError, SubPubResult as Result};
use crate::options::{JobKind, JobOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_QUEUE: &str = "default";

/// 发布端配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// 任务投递的队列名
    pub queue: String,
    /// `publish` 未显式传入选项时使用的默认选项
    pub default_options: JobOptions,
    /// 发布前是否先解析处理器
    pub resolve_handlers: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue: DEFAULT_QUEUE.to_string(),
            default_options: JobOptions::default(),
            resolve_handlers: true,
        }
    }
}

impl DispatcherConfig {
    /// 从进程环境变量读取，缺失项使用默认值
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（便于测试与自定义配置源）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(queue) = lookup("SUBPUB_QUEUE") {
            let queue = queue.trim();
            if queue.is_empty() {
                return Err(SubPubError::config("SUBPUB_QUEUE must not be empty"));
            }
            config.queue = queue.to_string();
        }

        if let Some(kind) = lookup("SUBPUB_JOB_KIND") {
            config.default_options.kind = kind.parse::<JobKind>()?;
        }

        if let Some(secs) = lookup("SUBPUB_DELAY_SECS") {
            config.default_options.delay = Duration::from_secs(secs.trim().parse::<u64>()?);
        }

        if let Some(flag) = lookup("SUBPUB_RESOLVE_HANDLERS") {
            config.resolve_handlers = flag.trim().parse::<bool>()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = DispatcherConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DispatcherConfig::default());
        assert_eq!(config.queue, "default");
        assert!(config.resolve_handlers);
    }

    #[test]
    fn reads_all_keys() {
        let config = DispatcherConfig::from_lookup(lookup_from(&[
            ("SUBPUB_QUEUE", "critical"),
            ("SUBPUB_JOB_KIND", "schedule"),
            ("SUBPUB_DELAY_SECS", "15"),
            ("SUBPUB_RESOLVE_HANDLERS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.queue, "critical");
        assert_eq!(
            config.default_options,
            JobOptions::schedule(Duration::from_secs(15))
        );
        assert!(!config.resolve_handlers);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for pairs in [
            [("SUBPUB_DELAY_SECS", "soon")],
            [("SUBPUB_JOB_KIND", "later")],
            [("SUBPUB_RESOLVE_HANDLERS", "maybe")],
            [("SUBPUB_QUEUE", "  ")],
        ] {
            let err = DispatcherConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, SubPubError::Config { .. }), "{pairs:?}: {err}");
        }
    }

    #[test]
    fn deserializes_partial_document() {
        let config: DispatcherConfig = serde_json::from_value(serde_json::json!({
            "queue": "mail",
            "default_options": { "kind": "schedule", "delay": { "secs": 30, "nanos": 0 } }
        }))
        .unwrap();

        assert_eq!(config.queue, "mail");
        assert_eq!(config.default_options.delay, Duration::from_secs(30));
        assert!(config.resolve_handlers);
    }
}
