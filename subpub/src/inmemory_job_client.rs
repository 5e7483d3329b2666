//! 内存版任务客户端（InMemoryJobClient）
//!
//! 记录每次 `create` 提交的任务与状态，满足 `JobClient` 协议：
//! - 典型用途：测试环境、示例与本地开发；
//! - 不做执行、重试与持久化，取出到期任务后由调用方交给 `JobPerformer`。
//!
use crate::error::SubPubResult as Result;
use crate::job::{Job, JobClient, JobId, JobState};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// 一条已提交的任务
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedJob {
    pub id: JobId,
    pub job: Job,
    pub state: JobState,
}

#[derive(Clone, Default)]
pub struct InMemoryJobClient {
    jobs: Arc<Mutex<Vec<CreatedJob>>>,
}

impl InMemoryJobClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已提交任务的快照（按提交顺序）
    pub fn jobs(&self) -> Vec<CreatedJob> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 取出在 `now` 时刻已到期的任务：全部入队任务与 `enqueue_at <= now` 的调度任务
    pub fn drain_due(&self, now: DateTime<Utc>) -> Vec<CreatedJob> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut *jobs)
            .into_iter()
            .partition(|c| c.state.is_enqueued() || c.state.due_at() <= now);
        *jobs = pending;
        due
    }
}

impl JobClient for InMemoryJobClient {
    fn create(&self, job: Job, state: JobState) -> Result<JobId> {
        let id = JobId::new(Uuid::new_v4().to_string());
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CreatedJob {
                id: id.clone(),
                job,
                state,
            });
        Ok(id)
    }
}
