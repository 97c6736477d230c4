//! Component extraction from marked structs and constructors.

use syn::visit::Visit;
use syn::visit_mut::VisitMut;
use syn::{
    FnArg, Fields, ImplItemFn, ItemStruct, Pat, PatIdent, Path, ReturnType, Type, TypeImplTrait, TypePath,
    TypeReference, parse_quote,
};

use crate::error::{BuildError, BuildResult};
use crate::marker::MarkerKind;
use crate::model::{Component, Construction, Extraction, Target};

/// Components of a marked struct: its named fields in declaration order.
///
/// A unit struct has no components. Tuple structs and generic structs are rejected.
pub fn extract_record(item: &ItemStruct, target: &Path) -> BuildResult<Extraction> {
    if !item.generics.params.is_empty() {
        return Err(BuildError::unsupported(MarkerKind::Record, "generic struct"));
    }

    let components = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                let name = field.ident.clone()?;
                Some(Component::new(name, rewrite_self(&field.ty, target)))
            })
            .collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => return Err(BuildError::unsupported(MarkerKind::Record, "tuple struct")),
    };

    Ok(Extraction {
        target: Target {
            visibility: item.vis.clone(),
            construction: Construction::Literal,
        },
        components,
    })
}

/// Components of a marked associated function: its parameters in declaration order.
pub fn extract_constructor(item: &ImplItemFn, impl_generics: bool, target: &Path) -> BuildResult<Extraction> {
    let sig = &item.sig;
    let unsupported = |found: &str| Err(BuildError::unsupported(MarkerKind::Instance, found));

    if sig.receiver().is_some() {
        return unsupported("method");
    }
    if impl_generics || !sig.generics.params.is_empty() {
        return unsupported("generic function");
    }
    if sig.asyncness.is_some() {
        return unsupported("async function");
    }

    let mut components = Vec::with_capacity(sig.inputs.len());
    for input in &sig.inputs {
        let FnArg::Typed(arg) = input else {
            return unsupported("method");
        };
        let name = match &*arg.pat {
            Pat::Ident(PatIdent {
                ident,
                by_ref: None,
                subpat: None,
                ..
            }) => ident.clone(),
            _ => return unsupported("function with destructured parameters"),
        };
        if borrows_or_hides_type(&arg.ty) {
            return unsupported("function with borrowed or `impl Trait` parameters");
        }
        components.push(Component::new(name, rewrite_self(&arg.ty, target)));
    }

    let output = match &sig.output {
        ReturnType::Default => parse_quote!(()),
        ReturnType::Type(_, ty) => rewrite_self(ty, target),
    };

    Ok(Extraction {
        target: Target {
            visibility: item.vis.clone(),
            construction: Construction::Call {
                function: sig.ident.clone(),
                output,
            },
        },
        components,
    })
}

/// Replace a leading `Self` segment with the target path, so the type can be
/// written outside the target's `impl`.
fn rewrite_self(ty: &Type, target: &Path) -> Type {
    let mut ty = ty.clone();
    SelfRewriter { target }.visit_type_mut(&mut ty);
    ty
}

struct SelfRewriter<'a> {
    target: &'a Path,
}

impl VisitMut for SelfRewriter<'_> {
    fn visit_type_path_mut(&mut self, ty: &mut TypePath) {
        let starts_with_self = ty.qself.is_none()
            && ty.path.leading_colon.is_none()
            && ty.path.segments.first().is_some_and(|segment| segment.ident == "Self");
        if starts_with_self {
            let mut path = self.target.clone();
            path.segments.extend(ty.path.segments.iter().skip(1).cloned());
            ty.path = path;
        }
        syn::visit_mut::visit_type_path_mut(self, ty);
    }
}

/// Parameter types that cannot be stored in a builder slot without a lifetime or type parameter.
fn borrows_or_hides_type(ty: &Type) -> bool {
    #[derive(Default)]
    struct Finder {
        found: bool,
    }

    impl<'ast> Visit<'ast> for Finder {
        fn visit_type_reference(&mut self, reference: &'ast TypeReference) {
            let is_static = reference.lifetime.as_ref().is_some_and(|lifetime| lifetime.ident == "static");
            if !is_static {
                self.found = true;
            }
            syn::visit::visit_type_reference(self, reference);
        }

        fn visit_type_impl_trait(&mut self, _: &'ast TypeImplTrait) {
            self.found = true;
        }
    }

    let mut finder = Finder::default();
    finder.visit_type(ty);
    finder.found
}
