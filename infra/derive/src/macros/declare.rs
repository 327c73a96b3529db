use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::punctuated::Punctuated;
use syn::{DeriveInput, Expr, ExprLit, Lit, LitStr, Path, Token, Type};

#[derive(Default)]
struct DeclareArgs {
    capabilities: Vec<Type>,
    keys: Vec<Expr>,
    constructor: Option<Path>,
    name: Option<LitStr>,
    global: bool,
}

impl DeclareArgs {
    fn parse(args: TokenStream, allow_service_args: bool) -> syn::Result<Self> {
        let mut parsed = Self::default();
        if args.is_empty() {
            return Ok(parsed);
        }

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("constructor") {
                parsed.constructor = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse()?);
            } else if allow_service_args && meta.path.is_ident("implements") {
                let content;
                syn::parenthesized!(content in meta.input);
                let types: Punctuated<Type, Token![,]> =
                    content.parse_terminated(Type::parse, Token![,])?;
                parsed.capabilities.extend(types);
            } else if allow_service_args && meta.path.is_ident("key") {
                parsed.keys.push(meta.value()?.parse()?);
            } else if allow_service_args && meta.path.is_ident("global") {
                parsed.global = true;
            } else {
                return Err(meta.error("unsupported argument"));
            }
            Ok(())
        });
        syn::parse::Parser::parse2(parser, args)?;

        Ok(parsed)
    }
}

pub fn expand_service(args: TokenStream, input: DeriveInput) -> TokenStream {
    expand(args, input, false).unwrap_or_else(syn::Error::into_compile_error)
}

pub fn expand_profile(args: TokenStream, input: DeriveInput) -> TokenStream {
    expand(args, input, true).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(args: TokenStream, input: DeriveInput, profile: bool) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic types cannot be declared; declare a concrete type instead",
        ));
    }

    let args = DeclareArgs::parse(args, !profile)?;
    let ident = &input.ident;
    let registry = quote!(::keel_kernel::domain::registry);

    let constructor = args.constructor.map_or_else(
        || quote!(<#ident as ::core::default::Default>::default),
        |path| quote!(#path),
    );
    let name = args.name.map(|name| quote!(.named(#name)));
    let global = args.global.then(|| quote!(.global()));
    let capabilities = args.capabilities.iter().map(|capability| {
        quote!(.implements::<#capability>(|it| it as ::std::sync::Arc<#capability>))
    });
    let keys = args.keys.iter().map(key_call);
    let mapping_profile = profile.then(|| quote!(.mapping_profile()));

    Ok(quote! {
        #input

        impl #registry::Declare for #ident {
            fn declare() -> #registry::CandidateType {
                #registry::TypeDeclaration::<#ident>::new(#constructor)
                    #name
                    #global
                    #(#capabilities)*
                    #(#keys)*
                    #mapping_profile
                    .declare()
            }
        }
    })
}

/// Unsuffixed integer literals become `BindingKey::Number`; anything else goes through `Into`.
fn key_call(key: &Expr) -> TokenStream {
    match key {
        Expr::Lit(ExprLit { lit: Lit::Int(int), .. }) if int.suffix().is_empty() => {
            quote!(.keyed(::keel_kernel::domain::registry::BindingKey::Number(#int)))
        }
        _ => quote!(.keyed(#key)),
    }
}
