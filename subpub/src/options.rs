//! 发布选项（JobOptions）
//!
//! 控制一次发布生成的任务是立即入队还是延迟调度。
//!
use crate::error::{SubPubError, SubPubResult as Result};
use crate::job::JobState;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// 任务提交方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    #[default]
    Enqueue,
    Schedule,
}

impl FromStr for JobKind {
    type Err = SubPubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enqueue" => Ok(Self::Enqueue),
            "schedule" => Ok(Self::Schedule),
            other => Err(SubPubError::config(format!(
                "unknown job kind '{other}', expected 'enqueue' | 'schedule'"
            ))),
        }
    }
}

/// 发布选项，默认立即入队、无延迟
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct JobOptions {
    #[builder(default)]
    #[serde(default)]
    pub kind: JobKind,
    /// 仅在 `Schedule` 下生效
    #[builder(default)]
    #[serde(default)]
    pub delay: Duration,
}

impl JobOptions {
    pub fn enqueue() -> Self {
        Self::default()
    }

    pub fn schedule(delay: Duration) -> Self {
        Self {
            kind: JobKind::Schedule,
            delay,
        }
    }

    /// 根据选项生成提交状态
    ///
    /// - `Enqueue`：忽略 `delay`，始终为 `Enqueued`；
    /// - `Schedule` 且 `delay > 0`：`Scheduled`，在 `now + delay` 入队；
    /// - `Schedule` 且 `delay == 0`：退化为 `Enqueued`。
    pub fn to_state(&self, now: DateTime<Utc>) -> Result<JobState> {
        match self.kind {
            JobKind::Schedule if !self.delay.is_zero() => {
                let offset = chrono::Duration::from_std(self.delay).map_err(|e| {
                    SubPubError::InvalidDelay {
                        reason: e.to_string(),
                    }
                })?;
                let enqueue_at =
                    now.checked_add_signed(offset)
                        .ok_or_else(|| SubPubError::InvalidDelay {
                            reason: format!("delay {:?} overflows the schedule clock", self.delay),
                        })?;

                Ok(JobState::Scheduled {
                    delay: self.delay,
                    scheduled_at: now,
                    enqueue_at,
                })
            }
            _ => Ok(JobState::Enqueued { enqueued_at: now }),
        }
    }
}
