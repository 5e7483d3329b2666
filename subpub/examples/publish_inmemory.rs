/// 内存版任务客户端示例
/// 展示 注册 -> 发布 -> 取出到期任务 -> 执行 的闭环
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use subpub::{
    EventDispatcher, EventHandler, EventPublisher, InMemoryJobClient, JobPerformer,
    ServiceProvider, SubscriptionRegistry,
};
use subpub_macros::{event, handler};

#[event(name = "greeting.requested")]
struct GreetingRequested {
    name: String,
}

#[handler]
struct Greeter;

#[async_trait]
impl EventHandler<GreetingRequested> for Greeter {
    async fn run(&self, event: GreetingRequested) -> anyhow::Result<()> {
        println!("hello, {}", event.name);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let provider = ServiceProvider::new();
    provider.add_singleton(Greeter);
    let provider = Arc::new(provider);

    let mut registry = SubscriptionRegistry::new();
    registry
        .register::<GreetingRequested>()
        .subscribe::<Greeter>();
    let registry = Arc::new(registry);

    let client = InMemoryJobClient::new();
    let dispatcher = EventDispatcher::builder()
        .registry(registry.clone())
        .job_client(Arc::new(client.clone()))
        .resolver(provider.clone())
        .build();

    let ids = dispatcher.publish(&GreetingRequested {
        name: "Bob".to_string(),
    })?;
    println!("created jobs: {ids:?}");

    let performer = JobPerformer::new(registry, provider);
    for created in client.drain_due(Utc::now()) {
        println!("job {} -> {}.{}", created.id, created.job.handler_type(), created.job.method());
        performer.perform(&created.job).await?;
    }

    Ok(())
}
