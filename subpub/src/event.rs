use serde::{Serialize, de::DeserializeOwned};

/// 事件（Event）
///
/// 描述“已经发生的事实”的不可变数据记录。
/// - 以具体 Rust 类型作为订阅与分发的依据（精确匹配，不做继承式匹配）；
/// - 需可序列化：发布时事件被序列化为任务参数，执行时再反序列化还原。
///
/// 关联常量：
/// - `NAME`：事件的稳定名称，写入任务描述，用于执行端路由。避免依赖 `type_name::<T>()`。
pub trait Event: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 事件的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;
}
