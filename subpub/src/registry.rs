//! 订阅注册表（SubscriptionRegistry）
//!
//! 维护“事件类型 → 有序处理器集合”的映射：
//! - 启动期通过 `register::<E>().subscribe::<H>()` 链式构建；
//! - 构建完成后以 `Arc` 共享，发布与执行期间只读，无需加锁；
//! - 同一事件重复订阅同一处理器不会产生重复条目。
//!
use crate::error::{SubPubError, SubPubResult as Result};
use crate::event::Event;
use crate::handler::EventHandler;
use crate::resolver::{Resolver, ResolverExt};
use serde_json::Value;
use std::any::TypeId;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

type InvokeFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

type InvokeFn = Arc<dyn Fn(Arc<dyn Resolver>, Value) -> InvokeFuture + Send + Sync>;

/// 一条订阅：某个处理器类型对某个事件类型的订阅
#[derive(Clone)]
pub struct Subscription {
    handler_id: TypeId,
    handler_name: &'static str,
    invoke: InvokeFn,
}

impl Subscription {
    fn new<E, H>() -> Self
    where
        E: Event,
        H: EventHandler<E>,
    {
        // 键与闭包同一泛型 (E, H)，执行端按名称找到条目后即可还原具体类型
        let invoke: InvokeFn = Arc::new(|resolver: Arc<dyn Resolver>, args: Value| -> InvokeFuture {
            Box::pin(async move {
                let handler = resolver.resolve_as::<H>()?;
                let event: E = serde_json::from_value(args)?;
                handler
                    .run(event)
                    .await
                    .map_err(|source| SubPubError::Handler {
                        handler: H::NAME,
                        source,
                    })
            })
        });

        Self {
            handler_id: TypeId::of::<H>(),
            handler_name: H::NAME,
            invoke,
        }
    }

    pub fn handler_id(&self) -> TypeId {
        self.handler_id
    }

    pub fn handler_name(&self) -> &'static str {
        self.handler_name
    }

    /// 解析处理器并以反序列化后的事件调用其 `run`
    pub(crate) fn invoke(&self, resolver: Arc<dyn Resolver>, args: Value) -> InvokeFuture {
        (self.invoke)(resolver, args)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("handler_name", &self.handler_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct EventSubscriptions {
    event_name: &'static str,
    subscriptions: Vec<Subscription>,
}

/// 订阅注册表
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    events: HashMap<TypeId, EventSubscriptions>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为事件类型 `E` 开启订阅构建；未订阅任何处理器的事件同样合法
    pub fn register<E: Event>(&mut self) -> SubscriptionBuilder<'_, E> {
        let key = TypeId::of::<E>();

        if !self.events.contains_key(&key)
            && self.events.values().any(|e| e.event_name == E::NAME)
        {
            tracing::warn!(
                event = E::NAME,
                "another event type is already registered under this name; jobs for it will be rejected as ambiguous"
            );
        }

        let entry = self.events.entry(key).or_insert_with(|| EventSubscriptions {
            event_name: E::NAME,
            subscriptions: Vec::new(),
        });

        SubscriptionBuilder {
            entry,
            _marker: PhantomData,
        }
    }

    /// 事件类型 `E` 的订阅（按注册顺序）；未注册时为空
    pub fn subscriptions<E: Event>(&self) -> &[Subscription] {
        self.events
            .get(&TypeId::of::<E>())
            .map(|e| e.subscriptions.as_slice())
            .unwrap_or_default()
    }

    /// 按任务描述中的名称查找订阅（执行端使用）
    ///
    /// 名称需唯一对应一条订阅：多个事件类型共用同一事件名，或同一事件下多个处理器共用
    /// 同一处理器名时返回 `AmbiguousSubscription`，不会任选其一执行。
    pub fn find(&self, event_name: &str, handler_name: &str) -> Result<&Subscription> {
        let matches: Vec<&Subscription> = self
            .events
            .values()
            .filter(|e| e.event_name == event_name)
            .flat_map(|e| e.subscriptions.iter())
            .filter(|s| s.handler_name == handler_name)
            .collect();

        match matches.as_slice() {
            [subscription] => Ok(*subscription),
            [] => Err(SubPubError::SubscriptionNotFound {
                event: event_name.to_string(),
                handler: handler_name.to_string(),
            }),
            many => Err(SubPubError::AmbiguousSubscription {
                event: event_name.to_string(),
                handler: handler_name.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// 已注册的事件类型数量
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 获取已注册的事件名列表（只读视图）
    pub fn registered_events(&self) -> Vec<&'static str> {
        self.events.values().map(|e| e.event_name).collect()
    }
}

/// 订阅构建器：借用注册表，以值传递的方式链式追加处理器
pub struct SubscriptionBuilder<'a, E: Event> {
    entry: &'a mut EventSubscriptions,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Event> SubscriptionBuilder<'_, E> {
    /// 订阅处理器 `H`；重复订阅同一处理器被忽略
    pub fn subscribe<H>(mut self) -> Self
    where
        H: EventHandler<E>,
    {
        let handler_id = TypeId::of::<H>();
        let subscriptions = &mut self.entry.subscriptions;

        if subscriptions.iter().any(|s| s.handler_id == handler_id) {
            tracing::debug!(
                event = E::NAME,
                handler = H::NAME,
                "handler already subscribed; ignoring"
            );
            return self;
        }

        if subscriptions.iter().any(|s| s.handler_name == H::NAME) {
            tracing::warn!(
                event = E::NAME,
                handler = H::NAME,
                "another handler type is already subscribed under this name; jobs for it will be rejected as ambiguous"
            );
        }

        subscriptions.push(Subscription::new::<E, H>());
        tracing::debug!(event = E::NAME, handler = H::NAME, "handler subscribed");
        self
    }

    /// 当前事件已订阅的处理器数量
    pub fn len(&self) -> usize {
        self.entry.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Ping;

    impl Event for Ping {
        const NAME: &'static str = "ping";
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Pong;

    impl Event for Pong {
        const NAME: &'static str = "pong";
    }

    struct First;
    struct Second;

    impl Handler for First {
        const NAME: &'static str = "first";
    }

    impl Handler for Second {
        const NAME: &'static str = "second";
    }

    #[async_trait]
    impl EventHandler<Ping> for First {
        async fn run(&self, _event: Ping) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl EventHandler<Pong> for First {
        async fn run(&self, _event: Pong) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl EventHandler<Ping> for Second {
        async fn run(&self, _event: Ping) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn names(subs: &[Subscription]) -> Vec<&'static str> {
        subs.iter().map(|s| s.handler_name()).collect()
    }

    #[test]
    fn subscriptions_keep_registration_order() {
        let mut registry = SubscriptionRegistry::new();
        registry
            .register::<Ping>()
            .subscribe::<Second>()
            .subscribe::<First>();

        assert_eq!(names(registry.subscriptions::<Ping>()), ["second", "first"]);
    }

    #[test]
    fn resubscribing_same_handler_is_idempotent() {
        let mut registry = SubscriptionRegistry::new();
        let builder = registry
            .register::<Ping>()
            .subscribe::<First>()
            .subscribe::<First>();
        assert_eq!(builder.len(), 1);

        // 再次 register 同一事件是追加，而非覆盖
        registry.register::<Ping>().subscribe::<Second>().subscribe::<First>();
        assert_eq!(names(registry.subscriptions::<Ping>()), ["first", "second"]);
        assert_eq!(registry.event_count(), 1);
    }

    #[test]
    fn event_without_handlers_is_legal() {
        let mut registry = SubscriptionRegistry::new();
        let builder = registry.register::<Ping>();
        assert!(builder.is_empty());

        assert!(registry.subscriptions::<Ping>().is_empty());
        assert!(!registry.is_empty());
    }

    #[test]
    fn unregistered_event_has_no_subscriptions() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.subscriptions::<Pong>().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn handlers_stay_scoped_to_their_event() {
        let mut registry = SubscriptionRegistry::new();
        registry
            .register::<Ping>()
            .subscribe::<First>()
            .subscribe::<Second>();
        registry.register::<Pong>().subscribe::<First>();

        assert_eq!(names(registry.subscriptions::<Ping>()), ["first", "second"]);
        assert_eq!(names(registry.subscriptions::<Pong>()), ["first"]);

        let mut events = registry.registered_events();
        events.sort_unstable();
        assert_eq!(events, ["ping", "pong"]);
    }

    #[test]
    fn find_by_names() {
        let mut registry = SubscriptionRegistry::new();
        registry.register::<Ping>().subscribe::<First>();
        registry.register::<Pong>().subscribe::<First>();

        let found = registry.find("pong", "first").unwrap();
        assert_eq!(found.handler_id(), TypeId::of::<First>());
        assert!(matches!(
            registry.find("pong", "second"),
            Err(SubPubError::SubscriptionNotFound { .. })
        ));
        assert!(matches!(
            registry.find("missing", "first"),
            Err(SubPubError::SubscriptionNotFound { .. })
        ));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct PingAlias;

    impl Event for PingAlias {
        const NAME: &'static str = "ping";
    }

    #[async_trait]
    impl EventHandler<PingAlias> for First {
        async fn run(&self, _event: PingAlias) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct FirstAlias;

    impl Handler for FirstAlias {
        const NAME: &'static str = "first";
    }

    #[async_trait]
    impl EventHandler<Ping> for FirstAlias {
        async fn run(&self, _event: Ping) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn shared_event_name_is_ambiguous() {
        let mut registry = SubscriptionRegistry::new();
        registry.register::<Ping>().subscribe::<First>();
        registry.register::<PingAlias>().subscribe::<First>();

        // 两个事件类型仍各自保有订阅，发布端按类型分发不受影响
        assert_eq!(registry.event_count(), 2);
        assert_eq!(names(registry.subscriptions::<PingAlias>()), ["first"]);

        for _ in 0..32 {
            match registry.find("ping", "first") {
                Err(SubPubError::AmbiguousSubscription { matches, .. }) => assert_eq!(matches, 2),
                other => panic!("unexpected lookup result: {other:?}"),
            }
        }
    }

    #[test]
    fn shared_handler_name_within_event_is_ambiguous() {
        let mut registry = SubscriptionRegistry::new();
        let builder = registry
            .register::<Ping>()
            .subscribe::<First>()
            .subscribe::<FirstAlias>();
        assert_eq!(builder.len(), 2);

        assert!(matches!(
            registry.find("ping", "first"),
            Err(SubPubError::AmbiguousSubscription { matches: 2, .. })
        ));
    }
}
