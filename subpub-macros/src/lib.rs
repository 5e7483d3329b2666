use proc_macro::TokenStream;

mod event;
mod handler;
mod utils;

/// 事件宏
/// - 用于 struct / enum，合并派生 `Debug, Clone, Serialize, Deserialize`
/// - 实现 `::subpub::event::Event`，`NAME` 默认取类型名
/// - 支持参数：`#[event(name = "user.registered")]`
#[proc_macro_attribute]
pub fn event(attr: TokenStream, item: TokenStream) -> TokenStream {
    event::expand(attr, item)
}

/// 处理器宏
/// - 实现 `::subpub::handler::Handler`，`NAME` 默认取类型名
/// - 支持参数：`#[handler(name = "send_welcome_mail")]`
#[proc_macro_attribute]
pub fn handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    handler::expand(attr, item)
}
