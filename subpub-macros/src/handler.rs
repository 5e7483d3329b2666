use crate::utils::{NameAttrConfig, ident_and_generics};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, parse_macro_input};

/// #[handler] 宏实现
/// - 生成 `::subpub::handler::Handler` 实现，`NAME` 默认取 `模块路径::类型名`
/// - 不改动目标类型本身，`EventHandler<E>` 仍需手写
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as NameAttrConfig);
    let input = parse_macro_input!(item as Item);

    let (ident, generics) = match ident_and_generics(&input, "handler") {
        Ok(pair) => pair,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = cfg.name_or(ident);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics ::subpub::handler::Handler for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}
