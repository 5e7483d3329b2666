use crate::utils::{NameAttrConfig, ensure_derives, ident_and_generics};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Item, parse_macro_input};

/// #[event] 宏实现
/// - 支持 struct 与 enum
/// - 合并默认派生：Debug, Clone, Serialize, Deserialize
/// - 生成 `::subpub::event::Event` 实现，`NAME` 默认取 `模块路径::类型名`，可用 `#[event(name = "...")]` 覆写
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as NameAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];

    let merged = match &mut input {
        Item::Struct(s) => ensure_derives(&mut s.attrs, &required),
        Item::Enum(e) => ensure_derives(&mut e.attrs, &required),
        _ => Ok(()),
    };
    if let Err(err) = merged {
        return err.to_compile_error().into();
    }

    let (ident, generics) = match ident_and_generics(&input, "event") {
        Ok(pair) => pair,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = cfg.name_or(ident);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics ::subpub::event::Event for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}
