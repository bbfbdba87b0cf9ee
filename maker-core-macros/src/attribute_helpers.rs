//! 属性解析辅助函数

use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

/// 字符串参数：`("value")` 或 `(name = "value")`
struct StringArg(LitStr);

impl Parse for StringArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(StringArg(input.parse()?));
        }

        let _key: syn::Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        Ok(StringArg(input.parse()?))
    }
}

/// 查找指定名称的属性
pub(crate) fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

pub(crate) fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    find_attr(attrs, name).is_some()
}

/// 读取属性的字符串参数
///
/// 支持格式：
/// - `#[attr]` - 无参数，返回 None
/// - `#[attr("value")]`
/// - `#[attr(name = "value")]`
/// - `#[attr = "value"]`
pub(crate) fn string_arg(attr: &Attribute) -> syn::Result<Option<String>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(list) if list.tokens.is_empty() => Ok(None),
        Meta::List(_) => attr.parse_args::<StringArg>().map(|arg| Some(arg.0.value())),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) => Ok(Some(s.value())),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
    }
}

/// 读取指定属性的字符串参数；属性不存在时返回 None
pub(crate) fn get_string_attr(attrs: &[Attribute], name: &str) -> syn::Result<Option<String>> {
    match find_attr(attrs, name) {
        Some(attr) => string_arg(attr),
        None => Ok(None),
    }
}

/// 将 snake_case 字段名转换为 camelCase bean 名称
/// 例如: order_service -> orderService
pub(crate) fn snake_to_camel(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.trim_start_matches("r#").chars() {
        if ch == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_string_arg_forms() {
        assert_eq!(string_arg(&parse_quote!(#[component])).unwrap(), None);
        assert_eq!(
            string_arg(&parse_quote!(#[component("userService")])).unwrap(),
            Some("userService".to_string())
        );
        assert_eq!(
            string_arg(&parse_quote!(#[component(name = "userService")])).unwrap(),
            Some("userService".to_string())
        );
        assert_eq!(
            string_arg(&parse_quote!(#[scope = "prototype"])).unwrap(),
            Some("prototype".to_string())
        );
        assert!(string_arg(&parse_quote!(#[scope(42)])).is_err());
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("order_service"), "orderService");
        assert_eq!(snake_to_camel("db"), "db");
        assert_eq!(snake_to_camel("_private_field"), "privateField");
        assert_eq!(snake_to_camel("r#type"), "type");
    }
}
