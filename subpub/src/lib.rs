//! 事件订阅/发布到后台任务的适配层（subpub）
//!
//! 应用代码发布强类型事件，订阅了该事件的每个处理器都会通过外部任务系统的
//! 客户端被提交为一个后台任务（立即入队或延迟调度）：
//! - 订阅注册表（`registry`）：事件类型 → 有序处理器集合，启动期构建、运行期只读；
//! - 事件分发（`dispatcher`）：按注册顺序为每个处理器调用一次 `JobClient::create`；
//! - 任务执行（`performer`）：外部任务系统回调时解析处理器并调用其 `run`；
//! - 依赖解析（`resolver`）与任务客户端（`job`）均为注入的协议，便于替换与测试。
//!
//! 本 crate 不实现排队、存储、重试与调度精度，这些均由外部任务系统负责。
//!
//! 典型用法：
//! 1. 为事件实现 `Event`，为处理器实现 `Handler` 与 `EventHandler<E>`；
//! 2. 启动期 `registry.register::<E>().subscribe::<H>()`；
//! 3. 以注册表、任务客户端与 Resolver 构建 `EventDispatcher`，调用 `publish`。
//!
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;
pub mod inmemory_job_client;
pub mod job;
pub mod options;
pub mod performer;
pub mod registry;
pub mod resolver;

pub use config::DispatcherConfig;
pub use dispatcher::{EventDispatcher, EventPublisher};
pub use error::{SubPubError, SubPubResult};
pub use event::Event;
pub use handler::{EXECUTE_METHOD, EventHandler, Handler};
pub use inmemory_job_client::{CreatedJob, InMemoryJobClient};
pub use job::{Job, JobClient, JobId, JobState};
pub use options::{JobKind, JobOptions};
pub use performer::JobPerformer;
pub use registry::{Subscription, SubscriptionBuilder, SubscriptionRegistry};
pub use resolver::{Instance, Resolver, ResolverExt, Service, ServiceProvider};

// 允许在本 crate 内部通过 ::subpub 进行自引用，
// 以便过程宏在本 crate 的测试中也能解析到 ::subpub 路径。
extern crate self as subpub;
