//! 事件分发（EventDispatcher）
//!
//! 根据事件的具体类型查找订阅，为每个处理器向任务客户端提交一个后台任务：
//! - 无订阅或事件从未注册：不提交任何任务，正常返回；
//! - 按注册顺序逐个提交，立即入队或延迟调度取决于 `JobOptions`；
//! - 解析或提交失败立即返回，后续处理器不再提交，已提交的任务不回滚。
//!
use crate::config::DispatcherConfig;
use crate::error::SubPubResult as Result;
use crate::event::Event;
use crate::handler::EXECUTE_METHOD;
use crate::job::{Job, JobClient, JobId, JobState};
use crate::options::JobOptions;
use crate::registry::{Subscription, SubscriptionRegistry};
use crate::resolver::Resolver;
use bon::Builder;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// 事件发布（Publish API）
///
/// - 负责把事件转换为若干后台任务；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
pub trait EventPublisher: Send + Sync {
    /// 以默认选项发布
    fn publish<E: Event>(&self, event: &E) -> Result<Vec<JobId>> {
        self.publish_with(event, JobOptions::default())
    }

    /// 以指定选项发布，返回按订阅顺序创建的任务 ID
    fn publish_with<E: Event>(&self, event: &E, options: JobOptions) -> Result<Vec<JobId>>;
}

/// 基于任务客户端的事件分发器
#[derive(Builder)]
pub struct EventDispatcher {
    registry: Arc<SubscriptionRegistry>,
    job_client: Arc<dyn JobClient>,
    resolver: Arc<dyn Resolver>,
    #[builder(default)]
    config: DispatcherConfig,
}

impl EventDispatcher {
    fn submit<E: Event>(
        &self,
        subscription: &Subscription,
        args: &Value,
        state: &JobState,
    ) -> Result<JobId> {
        if self.config.resolve_handlers {
            // 仅确认可解析，实例在执行端重新解析
            self.resolver
                .resolve(subscription.handler_id(), subscription.handler_name())?;
        }

        let job = Job::builder()
            .handler_type(subscription.handler_name().to_string())
            .method(EXECUTE_METHOD.to_string())
            .event_type(E::NAME.to_string())
            .args(args.clone())
            .queue(self.config.queue.clone())
            .build();

        self.job_client.create(job, state.clone())
    }
}

impl EventPublisher for EventDispatcher {
    fn publish<E: Event>(&self, event: &E) -> Result<Vec<JobId>> {
        self.publish_with(event, self.config.default_options)
    }

    fn publish_with<E: Event>(&self, event: &E, options: JobOptions) -> Result<Vec<JobId>> {
        let subscriptions = self.registry.subscriptions::<E>();
        if subscriptions.is_empty() {
            tracing::debug!(event = E::NAME, "no subscribers; nothing to dispatch");
            return Ok(Vec::new());
        }

        let args = serde_json::to_value(event)?;
        let state = options.to_state(Utc::now())?;
        let mut job_ids = Vec::with_capacity(subscriptions.len());

        for subscription in subscriptions {
            let job_id = self.submit::<E>(subscription, &args, &state)?;
            tracing::debug!(
                event = E::NAME,
                handler = subscription.handler_name(),
                state = state.name(),
                job_id = %job_id,
                "job created"
            );
            job_ids.push(job_id);
        }

        Ok(job_ids)
    }
}
