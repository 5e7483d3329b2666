//! 事件处理器（Handler / EventHandler）
//!
//! 处理器只暴露一个异步执行方法 `run`，由外部任务系统在后台调用。
//! 本 crate 从不直接构造处理器实例，仅记录其类型标识，实例由 [`Resolver`](crate::resolver::Resolver) 提供。
//!
use crate::event::Event;
use async_trait::async_trait;

/// 写入任务描述的执行方法名
pub const EXECUTE_METHOD: &str = "run";

/// 处理器元信息
pub trait Handler: Send + Sync + 'static {
    /// 处理器的稳定名称（写入任务描述，用于执行端路由）
    const NAME: &'static str;
}

/// 事件处理器：处理某一类型的事件
#[async_trait]
pub trait EventHandler<E>: Handler
where
    E: Event,
{
    /// 执行处理逻辑
    async fn run(&self, event: E) -> anyhow::Result<()>;
}
