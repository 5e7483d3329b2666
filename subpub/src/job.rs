//! 后台任务模型与任务客户端（JobClient）协议
//!
//! - `Job`：任务描述，指明目标处理器、执行方法与序列化后的事件参数；
//! - `JobState`：提交时附带的状态，立即入队或延迟调度；
//! - `JobClient`：外部任务系统的提交入口，本 crate 只调用、不实现排队/存储/执行。
//!
use crate::error::SubPubResult as Result;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct Job {
    /// 处理器名称（`Handler::NAME`）
    handler_type: String,
    /// 执行方法名
    method: String,
    /// 事件名称（`Event::NAME`）
    event_type: String,
    /// 序列化后的事件
    args: Value,
    /// 目标队列
    queue: String,
}

impl Job {
    pub fn handler_type(&self) -> &str {
        &self.handler_type
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn args(&self) -> &Value {
        &self.args
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }
}

/// 任务提交状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// 立即入队
    Enqueued { enqueued_at: DateTime<Utc> },
    /// 延迟调度：在 `enqueue_at` 之后入队
    Scheduled {
        delay: Duration,
        scheduled_at: DateTime<Utc>,
        enqueue_at: DateTime<Utc>,
    },
}

impl JobState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enqueued { .. } => "Enqueued",
            Self::Scheduled { .. } => "Scheduled",
        }
    }

    pub fn is_enqueued(&self) -> bool {
        matches!(self, Self::Enqueued { .. })
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    /// 该状态下任务可被执行的最早时间
    pub fn due_at(&self) -> DateTime<Utc> {
        match self {
            Self::Enqueued { enqueued_at } => *enqueued_at,
            Self::Scheduled { enqueue_at, .. } => *enqueue_at,
        }
    }
}

/// 外部任务系统返回的任务 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 任务客户端：向外部任务系统提交任务
///
/// 失败由实现方以 [`SubPubError::JobClient`](crate::error::SubPubError::JobClient) 等形式返回，
/// 发布端不做重试，原样向调用方传播。
pub trait JobClient: Send + Sync {
    fn create(&self, job: Job, state: JobState) -> Result<JobId>;
}

impl<C> JobClient for Arc<C>
where
    C: JobClient + ?Sized,
{
    fn create(&self, job: Job, state: JobState) -> Result<JobId> {
        (**self).create(job, state)
    }
}
