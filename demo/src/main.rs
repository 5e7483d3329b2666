use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use subpub::{
    DispatcherConfig, EventDispatcher, EventHandler, EventPublisher, InMemoryJobClient,
    JobOptions, JobPerformer, ServiceProvider, SubscriptionRegistry,
};
use subpub_macros::{event, handler};
use tracing_subscriber::EnvFilter;

#[event(name = "order.placed")]
struct OrderPlaced {
    order_id: u64,
    customer: String,
}

#[event(name = "order.cancelled")]
struct OrderCancelled {
    order_id: u64,
}

#[handler(name = "send_confirmation")]
struct SendConfirmation;

#[handler(name = "reserve_stock")]
struct ReserveStock;

#[handler(name = "refund")]
struct Refund;

#[async_trait]
impl EventHandler<OrderPlaced> for SendConfirmation {
    async fn run(&self, event: OrderPlaced) -> anyhow::Result<()> {
        tracing::info!(order_id = event.order_id, customer = %event.customer, "confirmation sent");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<OrderPlaced> for ReserveStock {
    async fn run(&self, event: OrderPlaced) -> anyhow::Result<()> {
        tracing::info!(order_id = event.order_id, "stock reserved");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<OrderCancelled> for Refund {
    async fn run(&self, event: OrderCancelled) -> anyhow::Result<()> {
        tracing::info!(order_id = event.order_id, "refund issued");
        Ok(())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env 可选
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = DispatcherConfig::from_env()?;

    let provider = ServiceProvider::new();
    provider
        .add_singleton(SendConfirmation)
        .add_singleton(ReserveStock)
        .add_singleton(Refund);
    tracing::debug!(services = ?provider.registered_services(), "handlers registered");
    let provider = Arc::new(provider);

    let mut registry = SubscriptionRegistry::new();
    registry
        .register::<OrderPlaced>()
        .subscribe::<SendConfirmation>()
        .subscribe::<ReserveStock>();
    registry.register::<OrderCancelled>().subscribe::<Refund>();
    let registry = Arc::new(registry);

    let client = InMemoryJobClient::new();
    let dispatcher = EventDispatcher::builder()
        .registry(registry.clone())
        .job_client(Arc::new(client.clone()))
        .resolver(provider.clone())
        .config(config)
        .build();
    let performer = JobPerformer::new(registry, provider);

    let placed = dispatcher.publish(&OrderPlaced {
        order_id: 42,
        customer: "Bob".to_string(),
    })?;
    let cancelled = dispatcher.publish_with(
        &OrderCancelled { order_id: 42 },
        JobOptions::schedule(Duration::from_secs(2)),
    )?;
    tracing::info!(
        placed = placed.len(),
        cancelled = cancelled.len(),
        "events published"
    );

    // 模拟外部任务系统：轮询到期任务并回调执行入口
    while !client.is_empty() {
        for created in client.drain_due(Utc::now()) {
            tracing::info!(job_id = %created.id, state = created.state.name(), "performing job");
            performer.perform(&created.job).await?;
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    Ok(())
}
