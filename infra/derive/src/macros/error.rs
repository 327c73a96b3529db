use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant};

/// What the generator needs to know about one variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    /// Present only when the variant is exactly `{ source, context }`, so a `From` can build it.
    convertible_source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<&'a Attribute>,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "keel_error requires named fields for source/context handling",
            ));
        };

        let context = fields.named.iter().find(|field| is_named(field, "context"));
        if let Some(field) = context
            && !is_context_type(&field.ty)
        {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "context field must be Option<Cow<'static, str>>",
            ));
        }

        let source = fields
            .named
            .iter()
            .find(|field| is_named(field, "source") || field_has_attr(field, "source"));
        if source.is_some() && context.is_none() {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "keel_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            ));
        }

        let convertible_source = source
            .filter(|_| fields.named.len() == 2)
            .and_then(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)));

        Ok(Self {
            ident: &variant.ident,
            convertible_source,
            has_context: context.is_some(),
            cfg_attrs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
        })
    }
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    expand(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "keel_error can only be applied to enums"));
    };
    let variants =
        data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let vis = &input.vis;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(input);
    let derive_attr = if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) };

    let context_arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg_attrs = &v.cfg_attrs;
        quote! { #(#cfg_attrs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    let source_impls = variants
        .iter()
        .filter(|v| v.ident != "Internal")
        .filter_map(|v| v.convertible_source.map(|source| source_impl(name, &ext, v, source)));

    let internal_impls = variants
        .iter()
        .find(|v| v.ident == "Internal")
        .map(|internal| internal_impls(name, internal));

    Ok(quote! {
        #derive_attr
        #input

        #vis trait #ext<T> {
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    #[allow(unreachable_patterns)]
                    match &mut error {
                        #(#context_arms)*
                        _ => {}
                    }
                    error
                })
            }
        }

        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<::std::borrow::Cow<'static, str>>) -> ::std::borrow::Cow<'static, str> {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| ::std::borrow::Cow::Owned(format!(" ({c})")))
        }
    })
}

fn source_impl(
    name: &Ident,
    ext: &Ident,
    variant: &ErrorVariant<'_>,
    (field, ty): (&Ident, &Type),
) -> TokenStream {
    let ident = variant.ident;
    let cfg_attrs = &variant.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfg_attrs)*
        impl<T> #ext<T> for ::core::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> ::core::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    }
}

fn internal_impls(name: &Ident, internal: &ErrorVariant<'_>) -> TokenStream {
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Borrowed(s), context: None }
            }
        }

        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self {
                Self::Internal { message: ::std::borrow::Cow::Owned(s), context: None }
            }
        }
    }
}

/// `Debug` and `thiserror::Error`, minus whatever the enum already derives.
fn missing_derives(input: &DeriveInput) -> Vec<TokenStream> {
    let mut derived = FxHashSet::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                derived.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut missing = Vec::new();
    if !derived.contains("Debug") {
        missing.push(quote!(Debug));
    }
    if !derived.contains("Error") {
        missing.push(quote!(::thiserror::Error));
    }
    missing
}

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == name)
}

fn field_has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn is_context_type(ty: &Type) -> bool {
    let rendered = quote!(#ty).to_string().replace(' ', "");
    let Some(inner) = rendered.strip_prefix("Option<").and_then(|rest| rest.strip_suffix('>')) else {
        return false;
    };
    inner == "Cow<'static,str>" || inner.ends_with("::Cow<'static,str>")
}
