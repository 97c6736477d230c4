use buildergen_build::{BuildError, DeclarationKind, EmitOptions, Marker, MarkerKind, emit_tokens, extract_record, resolve};
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Error, Item, ItemStruct, Path, Result};

/// Expand `#[record_builder]`: the item is always returned, followed by any error.
pub fn expand(args: TokenStream2, input: TokenStream2) -> TokenStream2 {
    let item = match syn::parse2::<Item>(input.clone()) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };

    match generate(args, &item) {
        Ok(builder) => quote! { #input #builder },
        Err(err) => {
            let error = err.to_compile_error();
            quote! { #input #error }
        }
    }
}

fn generate(args: TokenStream2, item: &Item) -> Result<TokenStream2> {
    let marker = Marker::from_args(MarkerKind::Record, args)?;

    let Item::Struct(item) = item else {
        let error = BuildError::unsupported(MarkerKind::Record, item_kind(item));
        return Err(Error::new(Span::call_site(), error));
    };

    let target: Path = item.ident.clone().into();
    let extraction = extract_record(item, &target).map_err(|err| spanned(item, err))?;

    if !marker.inline {
        if let Some(name) = marker.name_override() {
            syn::parse_str::<syn::Ident>(name).map_err(|_| {
                Error::new(Span::call_site(), BuildError::InvalidBuilderName { name: name.to_string() })
            })?;
        }
        return Ok(TokenStream2::new());
    }

    // Inline builders live next to the struct and name it without a path.
    let naming = resolve(&item.ident.to_string(), &[], marker.name_override(), "")
        .map_err(|err| Error::new(Span::call_site(), err))?;
    emit_tokens(&naming, &extraction.target, &extraction.components, &EmitOptions::default())
        .map_err(|err| Error::new(Span::call_site(), err))
}

fn spanned(item: &ItemStruct, err: BuildError) -> Error {
    if item.generics.params.is_empty() {
        Error::new_spanned(&item.fields, err)
    } else {
        Error::new_spanned(&item.generics, err)
    }
}

pub fn item_kind(item: &Item) -> &'static str {
    let kind = match item {
        Item::Struct(_) => DeclarationKind::Struct,
        Item::Enum(_) => DeclarationKind::Enum,
        Item::Union(_) => DeclarationKind::Union,
        Item::Trait(_) => DeclarationKind::Trait,
        Item::Fn(_) => DeclarationKind::Function,
        Item::Mod(_) => DeclarationKind::Module,
        Item::Const(_) => DeclarationKind::Const,
        Item::Static(_) => DeclarationKind::Static,
        Item::Type(_) => DeclarationKind::TypeAlias,
        Item::Impl(_) => DeclarationKind::Impl,
        _ => return "item",
    };
    kind.as_str()
}
