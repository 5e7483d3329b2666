//! 统一错误定义
//!
//! 覆盖序列化、依赖解析、任务提交与任务执行的最小必要集合，
//! 便于调用方通过 `?` 将发布/执行过程中的失败原样向上传播。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SubPubError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 依赖解析 ---
    #[error("service not registered: {type_name}")]
    Unresolved { type_name: &'static str },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // --- 任务提交 ---
    #[error("job client error: {reason}")]
    JobClient { reason: String },
    #[error("invalid delay: {reason}")]
    InvalidDelay { reason: String },

    // --- 任务执行 ---
    #[error("subscription not found: event={event}, handler={handler}")]
    SubscriptionNotFound { event: String, handler: String },
    #[error("ambiguous subscription: event={event}, handler={handler}, matches={matches}")]
    AmbiguousSubscription {
        event: String,
        handler: String,
        matches: usize,
    },
    #[error("unknown job method: {method}")]
    UnknownMethod { method: String },
    #[error("event handler error: handler={handler}, reason={source}")]
    Handler {
        handler: &'static str,
        #[source]
        source: anyhow::Error,
    },

    // --- 配置 ---
    #[error("config error: {reason}")]
    Config { reason: String },
}

impl SubPubError {
    pub fn job_client(reason: impl Into<String>) -> Self {
        Self::JobClient {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type SubPubResult<T> = Result<T, SubPubError>;

impl From<std::num::ParseIntError> for SubPubError {
    fn from(err: std::num::ParseIntError) -> Self {
        SubPubError::Config {
            reason: err.to_string(),
        }
    }
}

impl From<std::str::ParseBoolError> for SubPubError {
    fn from(err: std::str::ParseBoolError) -> Self {
        SubPubError::Config {
            reason: err.to_string(),
        }
    }
}
