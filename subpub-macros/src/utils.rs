use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, Ident, Item, Result, Token};

/// 把默认派生并入目标项已有的 `#[derive]`，按末段名称去重（`Serialize` 与 `serde::Serialize` 视为同一个）
pub(crate) fn ensure_derives(attrs: &mut Vec<Attribute>, required: &[syn::Path]) -> Result<()> {
    let mut derives = required.to_vec();
    let mut others = Vec::with_capacity(attrs.len() + 1);

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("derive") {
            others.push(attr);
            continue;
        }
        let listed = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)?;
        for path in listed {
            if !derives.iter().any(|d| same_derive(d, &path)) {
                derives.push(path);
            }
        }
    }

    others.insert(0, syn::parse_quote!(#[derive(#(#derives),*)]));
    *attrs = others;
    Ok(())
}

fn same_derive(a: &syn::Path, b: &syn::Path) -> bool {
    match (a.segments.last(), b.segments.last()) {
        (Some(x), Some(y)) => x.ident == y.ident,
        _ => false,
    }
}

/// 目标项的标识与泛型（仅支持 struct / enum）
pub(crate) fn ident_and_generics<'a>(
    item: &'a Item,
    macro_name: &str,
) -> Result<(&'a Ident, &'a syn::Generics)> {
    match item {
        Item::Struct(s) => Ok((&s.ident, &s.generics)),
        Item::Enum(e) => Ok((&e.ident, &e.generics)),
        other => Err(syn::Error::new(
            other.span(),
            format!("#[{macro_name}] can only be used on struct or enum types"),
        )),
    }
}

/// 解析形如 `name = "..."` 的宏参数；为空时返回 `None`
pub(crate) struct NameAttrConfig {
    pub(crate) name: Option<syn::LitStr>,
}

impl Parse for NameAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<syn::LitStr> = None;

        if input.is_empty() {
            return Ok(Self { name });
        }

        let pairs = Punctuated::<syn::MetaNameValue, Token![,]>::parse_terminated(input)?;

        for kv in pairs {
            if !kv.path.is_ident("name") {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "unknown key in attribute; expected 'name'",
                ));
            }
            if name.is_some() {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "duplicate key 'name' in attribute",
                ));
            }
            let lit = match kv.value {
                Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) => lit,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected string literal for 'name'",
                    ));
                }
            };
            if lit.value().trim().is_empty() {
                return Err(syn::Error::new(lit.span(), "'name' must not be empty"));
            }
            name = Some(lit);
        }

        Ok(Self { name })
    }
}

impl NameAttrConfig {
    /// 未指定时取 `模块路径::类型名`，不同模块下的同名类型不会撞名
    pub(crate) fn name_or(&self, ident: &Ident) -> TokenStream2 {
        match &self.name {
            Some(lit) => lit.to_token_stream(),
            None => quote! {
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident))
            },
        }
    }
}
