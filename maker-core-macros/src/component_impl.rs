use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use proc_macro_error::abort;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Type};

use crate::attribute_helpers::{get_string_attr, has_attr, snake_to_camel};

/// 需要注入的字段
struct AutowiredField<'a> {
    ident: &'a syn::Ident,
    /// 依赖的具体类型（Arc<T> 中的 T）
    bean_type: &'a Type,
    bean_name: String,
    optional: bool,
}

pub(crate) fn derive_component_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        abort!(
            input.generics,
            "#[derive(Component)] does not support generic types";
            help = "wrap the generic type in a concrete newtype"
        );
    }

    // 组件标记：未指定名称时为空串，由扫描器使用默认名称
    let component_name = get_string_attr(&input.attrs, "component")?.unwrap_or_default();
    let scope = get_string_attr(&input.attrs, "scope")?;
    let lazy = has_attr(&input.attrs, "lazy");
    let bean_name_aware = has_attr(&input.attrs, "bean_name_aware");
    let initializing_bean = has_attr(&input.attrs, "initializing_bean");

    let autowired = collect_autowired_fields(input)?;

    let scope_annotation = scope.map(|value| {
        quote! { annotations.push(::maker_core::Annotation::Scope(#value.to_string())); }
    });
    let lazy_annotation = lazy.then(|| {
        quote! { annotations.push(::maker_core::Annotation::Lazy); }
    });

    let injection_points = autowired.iter().map(|field| {
        let field_name = field.ident.to_string();
        let bean_name = &field.bean_name;
        quote! { ::maker_core::InjectionPoint::new(#field_name, #bean_name) }
    });

    let set_field_arms = autowired.iter().map(|field| {
        let ident = field.ident;
        let field_name = ident.to_string();
        let bean_type = field.bean_type;
        let value = quote! { ::maker_core::downcast_bean::<#bean_type>(field, value)? };
        let assign = if field.optional {
            quote! { self.#ident = ::std::option::Option::Some(#value); }
        } else {
            quote! { self.#ident = #value; }
        };
        quote! {
            #field_name => {
                #assign
                ::std::result::Result::Ok(())
            }
        }
    });

    let bean_name_aware_impl = bean_name_aware.then(|| {
        quote! {
            fn as_bean_name_aware(&mut self) -> ::std::option::Option<&mut dyn ::maker_core::BeanNameAware> {
                ::std::option::Option::Some(self)
            }
        }
    });
    let initializing_bean_impl = initializing_bean.then(|| {
        quote! {
            fn as_initializing_bean(&mut self) -> ::std::option::Option<&mut dyn ::maker_core::InitializingBean> {
                ::std::option::Option::Some(self)
            }
        }
    });

    let descriptor = format_ident!("__{}Descriptor", name);

    Ok(quote! {
        const _: () = {
            struct #descriptor;

            impl ::maker_core::Annotated for #descriptor {
                fn type_name(&self) -> &str {
                    ::std::any::type_name::<#name>()
                }

                #[allow(unused_mut)]
                fn annotations(&self) -> ::std::vec::Vec<::maker_core::Annotation> {
                    let mut annotations = ::std::vec![
                        ::maker_core::Annotation::Component(#component_name.to_string())
                    ];
                    #scope_annotation
                    #lazy_annotation
                    annotations
                }
            }

            impl ::maker_core::TypeDescriptor for #descriptor {
                fn injection_points(&self) -> ::std::vec::Vec<::maker_core::InjectionPoint> {
                    ::std::vec![#(#injection_points),*]
                }

                fn instantiate(&self) -> ::maker_core::anyhow::Result<::std::boxed::Box<dyn ::maker_core::Instance>> {
                    ::std::result::Result::Ok(::std::boxed::Box::new(
                        <#name as ::std::default::Default>::default()
                    ))
                }
            }

            impl ::maker_core::Instance for #name {
                #[allow(unreachable_code, unused_variables)]
                fn set_field(
                    &mut self,
                    field: &str,
                    value: ::maker_core::SharedBean,
                ) -> ::maker_core::anyhow::Result<()> {
                    match field {
                        #(#set_field_arms)*
                        _ => ::std::result::Result::Err(
                            ::maker_core::unknown_field(::std::any::type_name::<Self>(), field)
                        ),
                    }
                }

                #bean_name_aware_impl

                #initializing_bean_impl

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                    self
                }

                fn into_shared(self: ::std::boxed::Box<Self>) -> ::maker_core::SharedBean {
                    ::std::sync::Arc::new(*self)
                }
            }

            impl ::maker_core::Component for #name {
                fn descriptor() -> ::std::sync::Arc<dyn ::maker_core::TypeDescriptor> {
                    ::std::sync::Arc::new(#descriptor)
                }
            }

            // 自动向inventory登记Component
            ::maker_core::inventory::submit! {
                ::maker_core::ComponentRegistration::new(
                    ::std::module_path!(),
                    ::std::stringify!(#name),
                    <#name as ::maker_core::Component>::descriptor,
                )
            }
        };
    })
}

/// 收集带 #[autowired] 的字段
fn collect_autowired_fields(input: &DeriveInput) -> syn::Result<Vec<AutowiredField<'_>>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => abort!(
                input.ident,
                "#[derive(Component)] requires named fields or a unit struct"
            ),
        },
        _ => abort!(input.ident, "#[derive(Component)] can only be used on structs"),
    };

    let mut autowired = Vec::new();
    for field in fields {
        if !has_attr(&field.attrs, "autowired") {
            continue;
        }
        autowired.push(autowired_field(field)?);
    }
    Ok(autowired)
}

fn autowired_field(field: &Field) -> syn::Result<AutowiredField<'_>> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "#[autowired] requires a named field"));
    };

    // 检测是否为 Option<Arc<T>>
    let (arc_type, optional) = match generic_argument(&field.ty, "Option") {
        Some(inner) => (inner, true),
        None => (&field.ty, false),
    };

    let Some(bean_type) = generic_argument(arc_type, "Arc") else {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "#[autowired] fields must be `Option<Arc<T>>` or `Arc<T>`",
        ));
    };

    // 未指定名称时使用字段名的 camelCase 形式
    let bean_name = get_string_attr(&field.attrs, "autowired")?
        .unwrap_or_else(|| snake_to_camel(&ident.to_string()));

    Ok(AutowiredField {
        ident,
        bean_type,
        bean_name,
        optional,
    })
}

/// 辅助函数：从 Wrapper<T> 类型中提取 T
fn generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == wrapper {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_ty)) = args.args.first() {
                        return Some(inner_ty);
                    }
                }
            }
        }
    }
    None
}
