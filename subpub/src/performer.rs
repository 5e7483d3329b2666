//! 任务执行入口（JobPerformer）
//!
//! 外部任务系统取出任务后回调此处：按任务描述中的事件名与处理器名找到订阅，
//! 经 Resolver 解析处理器实例，反序列化事件并调用其 `run`。
//!
use crate::error::{SubPubError, SubPubResult as Result};
use crate::handler::EXECUTE_METHOD;
use crate::job::Job;
use crate::registry::SubscriptionRegistry;
use crate::resolver::Resolver;
use std::sync::Arc;

#[derive(Clone)]
pub struct JobPerformer {
    registry: Arc<SubscriptionRegistry>,
    resolver: Arc<dyn Resolver>,
}

impl JobPerformer {
    pub fn new(registry: Arc<SubscriptionRegistry>, resolver: Arc<dyn Resolver>) -> Self {
        Self { registry, resolver }
    }

    pub async fn perform(&self, job: &Job) -> Result<()> {
        if job.method() != EXECUTE_METHOD {
            return Err(SubPubError::UnknownMethod {
                method: job.method().to_string(),
            });
        }

        let subscription = self.registry.find(job.event_type(), job.handler_type())?;

        let result = subscription
            .invoke(self.resolver.clone(), job.args().clone())
            .await;

        match &result {
            Ok(()) => tracing::debug!(
                event = job.event_type(),
                handler = job.handler_type(),
                "job performed"
            ),
            Err(err) => tracing::warn!(
                event = job.event_type(),
                handler = job.handler_type(),
                error = %err,
                "job failed"
            ),
        }

        result
    }
}
