//! 依赖解析（Resolver）
//!
//! 发布端通过它确认处理器可被解析，执行端通过它取得处理器实例。
//! 采用显式注册：调用方把实例或工厂交给 [`ServiceProvider`]，不做反射式自动装配。
//!
use crate::error::{SubPubError, SubPubResult as Result};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

/// 可被解析的服务：任意 `Any + Send + Sync` 类型，额外携带自身类型名用于错误信息
pub trait Service: Any + Send + Sync {
    fn service_name(&self) -> &'static str;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> Service for T {
    fn service_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// 类型擦除后的服务实例
pub type Instance = Arc<dyn Service>;

type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 依赖解析器：按类型标识返回实例
pub trait Resolver: Send + Sync {
    /// `type_name` 仅用于错误信息
    fn resolve(&self, type_id: TypeId, type_name: &'static str) -> Result<Instance>;
}

impl<R> Resolver for Arc<R>
where
    R: Resolver + ?Sized,
{
    fn resolve(&self, type_id: TypeId, type_name: &'static str) -> Result<Instance> {
        (**self).resolve(type_id, type_name)
    }
}

/// 类型化的解析辅助方法
pub trait ResolverExt: Resolver {
    fn resolve_as<T>(&self) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let instance = self.resolve(TypeId::of::<T>(), type_name::<T>())?;
        let found = (*instance).service_name();
        instance
            .into_any()
            .downcast::<T>()
            .map_err(|_| SubPubError::TypeMismatch {
                expected: type_name::<T>(),
                found,
            })
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

/// 基于内存的服务注册表
/// - 通过 TypeId 注册实例工厂
/// - 支持单例与瞬时两种生命周期
pub struct ServiceProvider {
    services: DashMap<TypeId, (&'static str, Factory)>,
}

impl Default for ServiceProvider {
    fn default() -> Self {
        Self {
            services: DashMap::new(),
        }
    }
}

impl ServiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册单例：每次解析返回同一实例
    pub fn add_singleton<T>(&self, instance: T) -> &Self
    where
        T: Any + Send + Sync,
    {
        let shared: Instance = Arc::new(instance);
        let factory: Factory = Arc::new(move || shared.clone());
        self.insert::<T>(factory)
    }

    /// 注册瞬时服务：每次解析调用工厂创建新实例
    pub fn add_transient<T, F>(&self, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move || Arc::new(factory()) as Instance);
        self.insert::<T>(factory)
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// 已注册的服务类型名列表（只读视图）
    pub fn registered_services(&self) -> Vec<&'static str> {
        self.services.iter().map(|e| e.value().0).collect()
    }

    fn insert<T: Any>(&self, factory: Factory) -> &Self {
        // 后注册覆盖先注册
        if self
            .services
            .insert(TypeId::of::<T>(), (type_name::<T>(), factory))
            .is_some()
        {
            tracing::debug!(service = type_name::<T>(), "service registration replaced");
        }
        self
    }
}

impl Resolver for ServiceProvider {
    fn resolve(&self, type_id: TypeId, type_name: &'static str) -> Result<Instance> {
        let Some(factory) = self.services.get(&type_id).map(|e| e.value().1.clone()) else {
            return Err(SubPubError::Unresolved { type_name });
        };

        Ok(factory())
    }
}
