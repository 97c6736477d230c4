//! Step builder emission.
//!
//! For a target with components `c0 .. c(n-1)` and builder name `B`, the unit
//! holds `B` and the phases `B1 .. Bn`:
//!
//! - `B` owns one `Option` slot per component and starts empty.
//! - `B` and every phase but the last expose one setter, for the next
//!   component, returning the following phase.
//! - Each phase owns the outer `B` in its `builder` field; setters write the
//!   slot through it and move the same storage forward.
//! - The last phase (or `B` itself when there are no components) exposes
//!   `build`, which hands the slots to the target in declaration order.

use std::fmt::Write;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Ident, Path, Type};

use crate::error::{BuildError, BuildResult};
use crate::model::{Component, Construction, EmittedUnit, Naming, SetterStyle, Target};

/// Knobs that change the emitted text without changing its shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    pub setter_style: SetterStyle,
}

/// Name of the setter for `component` under `style`.
///
/// `Camel` upper-cases only the first character, and only when it is a letter.
pub fn setter_name(component: &Ident, style: SetterStyle) -> String {
    let name = component.unraw().to_string();
    match style {
        SetterStyle::Snake => format!("set_{name}"),
        SetterStyle::Camel => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) if first.is_alphabetic() => {
                    format!("set{}{}", first.to_uppercase(), chars.as_str())
                }
                _ => format!("set{name}"),
            }
        }
    }
}

/// Emit the builder items as tokens.
pub fn emit_tokens(
    naming: &Naming,
    target: &Target,
    components: &[Component],
    options: &EmitOptions,
) -> BuildResult<TokenStream> {
    let builder = naming.builder_ident()?;
    let target_path = naming.target_path()?;
    let vis = &target.visibility;
    let phases: Vec<Ident> = (1..=components.len())
        .map(|index| format_ident!("{}{}", builder, index))
        .collect();

    let step = |index: usize| -> TokenStream {
        let storage = if index == 0 { quote!(self) } else { quote!(self.builder) };
        match components.get(index) {
            Some(component) => setter(component, &storage, &phases[index], vis, options.setter_style),
            None => build(&builder, &storage, &target_path, target, components),
        }
    };

    let names: Vec<&Ident> = components.iter().map(|component| &component.name).collect();
    let types: Vec<&Type> = components.iter().map(|component| &component.ty).collect();
    let outer_doc = format!(" Step builder for [`{}`].", naming.target_qualified_name);
    let outer_step = step(0);

    let phase_items: Vec<TokenStream> = phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            let set = index + 1;
            let doc = format!(" [`{builder}`] with {set} of {} components set.", components.len());
            let phase_step = step(set);
            quote! {
                #[doc = #doc]
                #[must_use]
                #vis struct #phase {
                    builder: #builder,
                }

                impl #phase {
                    fn new(builder: #builder) -> Self {
                        #phase { builder }
                    }

                    #phase_step
                }
            }
        })
        .collect();

    Ok(quote! {
        #[doc = #outer_doc]
        #[must_use]
        #vis struct #builder {
            #( #names: ::core::option::Option<#types>, )*
        }

        impl #builder {
            /// Starts a builder with no component set.
            #vis fn new() -> Self {
                #builder {
                    #( #names: ::core::option::Option::None, )*
                }
            }

            #outer_step
        }

        impl ::core::default::Default for #builder {
            fn default() -> Self {
                Self::new()
            }
        }

        #( #phase_items )*
    })
}

fn setter(
    component: &Component,
    storage: &TokenStream,
    next: &Ident,
    vis: &syn::Visibility,
    style: SetterStyle,
) -> TokenStream {
    let name = &component.name;
    let ty = &component.ty;
    let setter = format_ident!("{}", setter_name(name, style));
    let doc = format!(" Sets `{}` and advances to [`{next}`].", name.unraw());
    quote! {
        #[doc = #doc]
        #[allow(non_snake_case)]
        #vis fn #setter(mut self, #name: #ty) -> #next {
            #storage.#name = ::core::option::Option::Some(#name);
            #next::new(#storage)
        }
    }
}

fn build(builder: &Ident, storage: &TokenStream, target_path: &Path, target: &Target, components: &[Component]) -> TokenStream {
    let vis = &target.visibility;
    let names: Vec<&Ident> = components.iter().map(|component| &component.name).collect();
    let values: Vec<TokenStream> = names
        .iter()
        .map(|name| {
            let message = format!("`{}` is set before build", name.unraw());
            quote!(#name.expect(#message))
        })
        .collect();

    let (output, construct) = match &target.construction {
        Construction::Literal => (
            quote!(#target_path),
            quote! { #target_path { #( #names: #values ),* } },
        ),
        Construction::Call { function, output } => (
            quote!(#output),
            quote! { #target_path::#function( #( #values ),* ) },
        ),
    };
    let unpack = if components.is_empty() {
        TokenStream::new()
    } else {
        quote! { let #builder { #( #names ),* } = #storage; }
    };

    quote! {
        /// Builds the target from the stored components, in declaration order.
        #vis fn build(self) -> #output {
            #unpack
            #construct
        }
    }
}

/// Emit one formatted source unit.
///
/// The text opens with a `// module:` line when the unit lives below the crate root.
pub fn emit(
    naming: &Naming,
    target: &Target,
    components: &[Component],
    options: &EmitOptions,
) -> BuildResult<EmittedUnit> {
    let address = naming.address();
    let tokens = emit_tokens(naming, target, components, options)?;
    let file: syn::File = syn::parse2(tokens).map_err(|source| BuildError::Render {
        address: address.clone(),
        source,
    })?;

    let mut source = String::new();
    if !naming.package_name.is_empty() {
        let _ = writeln!(source, "// module: {}", naming.package_name);
    }
    let _ = writeln!(source, "// @generated by buildergen from `{}`. Do not edit.", naming.target_qualified_name);
    source.push('\n');
    source.push_str(&prettyplease::unparse(&file));

    Ok(EmittedUnit {
        address,
        package_name: naming.package_name.clone(),
        builder_name: naming.builder_name.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::resolve;
    use crate::model::Scope;
    use quote::ToTokens;
    use syn::{Expr, ImplItem, ImplItemFn, Item, ReturnType, Stmt, Visibility, parse_quote};

    fn component(name: &str, ty: Type) -> Component {
        Component::new(Ident::new(name, proc_macro2::Span::call_site()), ty)
    }

    fn literal() -> Target {
        Target {
            visibility: parse_quote!(pub),
            construction: Construction::Literal,
        }
    }

    fn naming(target: &str, package: &str) -> Naming {
        resolve(target, &[Scope::Module { path: package.into() }], None, "crate").unwrap()
    }

    fn parse(naming: &Naming, target: &Target, components: &[Component]) -> syn::File {
        let unit = emit(naming, target, components, &EmitOptions::default()).unwrap();
        syn::parse_file(&unit.source).unwrap()
    }

    fn struct_names(file: &syn::File) -> Vec<String> {
        file.items
            .iter()
            .filter_map(|item| match item {
                Item::Struct(item) => Some(item.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    fn methods<'a>(file: &'a syn::File, self_ty: &str) -> Vec<&'a ImplItemFn> {
        file.items
            .iter()
            .filter_map(|item| match item {
                Item::Impl(item) if item.trait_.is_none() => Some(item),
                _ => None,
            })
            .filter(|item| item.self_ty.to_token_stream().to_string() == self_ty)
            .flat_map(|item| item.items.iter())
            .filter_map(|item| match item {
                ImplItem::Fn(method) => Some(method),
                _ => None,
            })
            .collect()
    }

    fn public_methods<'a>(file: &'a syn::File, self_ty: &str) -> Vec<&'a ImplItemFn> {
        methods(file, self_ty)
            .into_iter()
            .filter(|method| matches!(method.vis, Visibility::Public(_)))
            .collect()
    }

    fn returns(method: &ImplItemFn) -> String {
        match &method.sig.output {
            ReturnType::Type(_, ty) => ty.to_token_stream().to_string(),
            ReturnType::Default => "()".into(),
        }
    }

    fn tail(method: &ImplItemFn) -> &Expr {
        match method.block.stmts.last() {
            Some(Stmt::Expr(expr, None)) => expr,
            other => panic!("expected a tail expression, found {other:?}"),
        }
    }

    fn point() -> Vec<Component> {
        vec![component("x", parse_quote!(i32)), component("y", parse_quote!(i32))]
    }

    #[test]
    fn top_level_two_components() {
        let file = parse(&naming("Point", "pkg"), &literal(), &point());

        assert_eq!(struct_names(&file), ["PointBuilder", "PointBuilder1", "PointBuilder2"]);

        let outer = public_methods(&file, "PointBuilder");
        let names: Vec<String> = outer.iter().map(|m| m.sig.ident.to_string()).collect();
        assert_eq!(names, ["new", "set_x"]);
        assert_eq!(returns(outer[1]), "PointBuilder1");

        let first = public_methods(&file, "PointBuilder1");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sig.ident, "set_y");
        assert_eq!(returns(first[0]), "PointBuilder2");

        let last = public_methods(&file, "PointBuilder2");
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].sig.ident, "build");
        assert_eq!(returns(last[0]), "crate :: pkg :: Point");

        let Expr::Struct(literal) = tail(last[0]) else {
            panic!("expected a struct literal");
        };
        assert_eq!(literal.path.to_token_stream().to_string(), "crate :: pkg :: Point");
        let fields: Vec<String> = literal
            .fields
            .iter()
            .map(|field| field.member.to_token_stream().to_string())
            .collect();
        assert_eq!(fields, ["x", "y"]);
    }

    #[test]
    fn setters_take_component_types() {
        let components = vec![
            component("name", parse_quote!(String)),
            component("tags", parse_quote!(Vec<String>)),
            component("score", parse_quote!(Option<f64>)),
        ];
        let file = parse(&naming("Entry", ""), &literal(), &components);
        let owners = ["EntryBuilder", "EntryBuilder1", "EntryBuilder2"];

        for (index, owner) in owners.iter().enumerate() {
            let setters: Vec<&ImplItemFn> = public_methods(&file, owner)
                .into_iter()
                .filter(|m| m.sig.ident.to_string().starts_with("set_"))
                .collect();
            assert_eq!(setters.len(), 1, "{owner} should expose exactly one setter");

            let setter = setters[0];
            assert_eq!(returns(setter), format!("EntryBuilder{}", index + 1));
            let params: Vec<String> = setter
                .sig
                .inputs
                .iter()
                .filter_map(|arg| match arg {
                    syn::FnArg::Typed(arg) => Some(arg.ty.to_token_stream().to_string()),
                    syn::FnArg::Receiver(_) => None,
                })
                .collect();
            assert_eq!(params, [components[index].ty.to_token_stream().to_string()]);
        }
    }

    #[test]
    fn exactly_one_build_on_the_last_phase() {
        let components: Vec<Component> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| component(name, parse_quote!(u8)))
            .collect();
        let file = parse(&naming("Quad", "pkg"), &literal(), &components);

        let builds: Vec<String> = struct_names(&file)
            .into_iter()
            .filter(|owner| methods(&file, owner).iter().any(|m| m.sig.ident == "build"))
            .collect();
        assert_eq!(builds, ["QuadBuilder4"]);
    }

    #[test]
    fn phase_types_hold_only_the_back_reference() {
        let file = parse(&naming("Point", "pkg"), &literal(), &point());
        for item in &file.items {
            let Item::Struct(item) = item else { continue };
            let fields: Vec<String> = item
                .fields
                .iter()
                .map(|field| field.ident.as_ref().unwrap().to_string())
                .collect();
            if item.ident == "PointBuilder" {
                assert_eq!(fields, ["x", "y"]);
            } else {
                assert_eq!(fields, ["builder"]);
            }
        }
    }

    #[test]
    fn constructor_call_is_positional() {
        let target = Target {
            visibility: parse_quote!(pub),
            construction: Construction::Call {
                function: parse_quote!(new),
                output: parse_quote!(crate::pkg::Pair),
            },
        };
        let components = vec![component("k", parse_quote!(String)), component("v", parse_quote!(String))];
        let file = parse(&naming("Pair", "pkg"), &target, &components);

        let build = public_methods(&file, "PairBuilder2")[0];
        let Expr::Call(call) = tail(build) else {
            panic!("expected a call");
        };
        assert_eq!(call.func.to_token_stream().to_string(), "crate :: pkg :: Pair :: new");
        let args: Vec<String> = call.args.iter().map(|arg| arg.to_token_stream().to_string()).collect();
        assert_eq!(
            args,
            [
                "k . expect (\"`k` is set before build\")",
                "v . expect (\"`v` is set before build\")"
            ]
        );
    }

    #[test]
    fn separators_match_component_count() {
        for count in 0..5usize {
            let components: Vec<Component> = (0..count)
                .map(|index| component(&format!("c{index}"), parse_quote!(u8)))
                .collect();
            let naming = naming("Wide", "");
            let tokens = emit_tokens(&naming, &literal(), &components, &EmitOptions::default()).unwrap();
            let file: syn::File = syn::parse2(tokens).unwrap();

            let owner = if count == 0 { "WideBuilder".to_string() } else { format!("WideBuilder{count}") };
            let build = methods(&file, &owner).into_iter().find(|m| m.sig.ident == "build").unwrap();
            let Expr::Struct(literal) = tail(build) else {
                panic!("expected a struct literal");
            };
            let separators = literal.fields.pairs().filter(|pair| pair.punct().is_some()).count();
            assert_eq!(separators, count.saturating_sub(1));
        }
    }

    #[test]
    fn zero_components_emit_a_single_type() {
        let file = parse(&naming("Unit", "pkg"), &literal(), &[]);

        assert_eq!(struct_names(&file), ["UnitBuilder"]);
        let outer = public_methods(&file, "UnitBuilder");
        let names: Vec<String> = outer.iter().map(|m| m.sig.ident.to_string()).collect();
        assert_eq!(names, ["new", "build"]);

        let build = outer[1];
        assert_eq!(build.sig.inputs.len(), 1, "build only takes self");
        assert_eq!(tail(build).to_token_stream().to_string(), "crate :: pkg :: Unit { }");
    }

    #[test]
    fn zero_argument_constructor_call() {
        let target = Target {
            visibility: Visibility::Inherited,
            construction: Construction::Call {
                function: parse_quote!(empty),
                output: parse_quote!(crate::Bag),
            },
        };
        let file = parse(&naming("Bag", ""), &target, &[]);
        let build = methods(&file, "BagBuilder").into_iter().find(|m| m.sig.ident == "build").unwrap();
        assert_eq!(tail(build).to_token_stream().to_string(), "crate :: Bag :: empty ()");
    }

    #[test]
    fn explicit_name_is_used_verbatim() {
        let naming = resolve("X", &[Scope::Module { path: "pkg".into() }], Some("MyB"), "crate").unwrap();
        let unit = emit(&naming, &literal(), &[component("v", parse_quote!(bool))], &EmitOptions::default()).unwrap();
        let file = syn::parse_file(&unit.source).unwrap();

        assert_eq!(unit.address, "pkg::MyB");
        assert_eq!(struct_names(&file), ["MyB", "MyB1"]);
    }

    #[test]
    fn nested_target_uses_suffixed_names() {
        let scopes = [
            Scope::Type { name: "Outer".into() },
            Scope::Module { path: "pkg".into() },
        ];
        let naming = resolve("Inner", &scopes, None, "crate").unwrap();
        let file = parse(&naming, &literal(), &[component("a", parse_quote!(String))]);

        assert_eq!(struct_names(&file), ["InnerBuilderOuter", "InnerBuilderOuter1"]);
        assert_eq!(public_methods(&file, "InnerBuilderOuter")[1].sig.ident, "set_a");
    }

    #[test]
    fn emission_is_deterministic() {
        let first = emit(&naming("Point", "pkg"), &literal(), &point(), &EmitOptions::default()).unwrap();
        let second = emit(&naming("Point", "pkg"), &literal(), &point(), &EmitOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn module_line_only_below_the_root() {
        let nested = emit(&naming("Point", "pkg"), &literal(), &point(), &EmitOptions::default()).unwrap();
        assert!(nested.source.starts_with("// module: pkg\n"));

        let root = emit(&naming("Point", ""), &literal(), &point(), &EmitOptions::default()).unwrap();
        assert!(root.source.starts_with("// @generated"));
        assert!(!root.source.contains("// module:"));
    }

    #[test]
    fn inherits_target_visibility() {
        let target = Target {
            visibility: parse_quote!(pub(crate)),
            construction: Construction::Literal,
        };
        let file = parse(&naming("Point", "pkg"), &target, &point());
        for item in &file.items {
            if let Item::Struct(item) = item {
                assert_eq!(item.vis.to_token_stream().to_string(), "pub (crate)");
            }
        }
    }

    #[test]
    fn setter_name_styles() {
        let ident = |name: &str| -> Ident { syn::parse_str::<Ident>(name).unwrap() };

        assert_eq!(setter_name(&ident("x"), SetterStyle::Snake), "set_x");
        assert_eq!(setter_name(&ident("first_name"), SetterStyle::Snake), "set_first_name");
        assert_eq!(setter_name(&ident("r#type"), SetterStyle::Snake), "set_type");

        assert_eq!(setter_name(&ident("x"), SetterStyle::Camel), "setX");
        assert_eq!(setter_name(&ident("firstName"), SetterStyle::Camel), "setFirstName");
        assert_eq!(setter_name(&ident("_hidden"), SetterStyle::Camel), "set_hidden");
        assert_eq!(setter_name(&ident("r#type"), SetterStyle::Camel), "setType");
    }

    #[test]
    fn camel_setters_in_emitted_unit() {
        let options = EmitOptions {
            setter_style: SetterStyle::Camel,
        };
        let unit = emit(&naming("Point", "pkg"), &literal(), &point(), &options).unwrap();
        let file = syn::parse_file(&unit.source).unwrap();

        assert_eq!(public_methods(&file, "PointBuilder")[1].sig.ident, "setX");
        assert_eq!(public_methods(&file, "PointBuilder1")[0].sig.ident, "setY");
    }

    #[test]
    fn setters_allow_non_snake_case_names() {
        let components = vec![component("x", parse_quote!(i32)), component("_y", parse_quote!(i32))];

        for setter_style in [SetterStyle::Snake, SetterStyle::Camel] {
            let unit = emit(&naming("Point", "pkg"), &literal(), &components, &EmitOptions { setter_style }).unwrap();
            let file = syn::parse_file(&unit.source).unwrap();

            let setters: Vec<&ImplItemFn> = ["PointBuilder", "PointBuilder1"]
                .iter()
                .flat_map(|owner| methods(&file, owner))
                .filter(|method| method.sig.ident.to_string().starts_with("set"))
                .collect();
            assert_eq!(setters.len(), 2);
            for setter in setters {
                assert!(
                    setter
                        .attrs
                        .iter()
                        .any(|attr| attr.meta.to_token_stream().to_string() == "allow (non_snake_case)"),
                    "{} is missing #[allow(non_snake_case)]",
                    setter.sig.ident
                );
            }
        }
    }
}
