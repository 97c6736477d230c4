use buildergen_build::{BuildError, Marker, MarkerKind, extract_constructor};
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Error, ImplItemFn, Item, Result, parse_quote};

use crate::record::item_kind;

/// Expand `#[instance_builder]`: validate the function and return it unchanged.
///
/// The macro sees only the function, so whether it sits in a generic `impl`
/// is checked by the build-time generator.
pub fn expand(args: TokenStream2, input: TokenStream2) -> TokenStream2 {
    match validate(args, input.clone()) {
        Ok(()) => input,
        Err(err) => {
            let error = err.to_compile_error();
            quote! { #input #error }
        }
    }
}

fn validate(args: TokenStream2, input: TokenStream2) -> Result<()> {
    let marker = Marker::from_args(MarkerKind::Instance, args)?;

    let function = match syn::parse2::<ImplItemFn>(input.clone()) {
        Ok(function) => function,
        Err(_) => {
            let item: Item = syn::parse2(input)?;
            let error = BuildError::unsupported(MarkerKind::Instance, item_kind(&item));
            return Err(Error::new(Span::call_site(), error));
        }
    };

    extract_constructor(&function, false, &parse_quote!(Self)).map_err(|err| Error::new_spanned(&function.sig, err))?;

    if let Some(name) = marker.name_override() {
        syn::parse_str::<syn::Ident>(name)
            .map_err(|_| Error::new(Span::call_site(), BuildError::InvalidBuilderName { name: name.to_string() }))?;
    }
    Ok(())
}
