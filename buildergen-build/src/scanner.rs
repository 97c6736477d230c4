//! Source file scanner for discovering marked declarations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use proc_macro2::Span;
use syn::visit::{self, Visit};
use syn::{
    Attribute, ExprClosure, Field, ImplItemFn, ItemConst, ItemEnum, ItemFn, ItemImpl, ItemMod, ItemStatic,
    ItemStruct, ItemTrait, ItemType, ItemUnion, Local, Pat, TraitItemFn, Type, Variant,
};
use walkdir::{DirEntry, WalkDir};

use crate::marker::Marker;
use crate::model::{AnnotatedElement, Declaration, DeclarationKind, Location, Scope};

/// Scan a source root (usually a crate's `src/`) recursively for marked declarations.
///
/// Files that cannot be read or parsed are logged and skipped.
pub fn scan_directory(path: &Path) -> Result<Vec<AnnotatedElement>> {
    if !path.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    let mut elements = Vec::new();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        match scan_file(entry.path(), path) {
            Ok(found) => elements.extend(found),
            Err(err) => warn!("skipping {}: {err:#}", entry.path().display()),
        }
    }

    Ok(elements)
}

/// Hidden entries and build output.
fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && name == "target")
}

/// Scan a single Rust file below `base_path`.
pub fn scan_file(file_path: &Path, base_path: &Path) -> Result<Vec<AnnotatedElement>> {
    let content =
        fs::read_to_string(file_path).with_context(|| format!("Failed to read {}", file_path.display()))?;
    let module_path = compute_module_path(file_path, base_path);
    scan_source(&content, &module_path, file_path)
        .with_context(|| format!("Failed to parse {}", file_path.display()))
}

/// Scan source text that forms the module `module_path`.
pub fn scan_source(content: &str, module_path: &str, file_path: &Path) -> syn::Result<Vec<AnnotatedElement>> {
    let syntax = syn::parse_file(content)?;

    let mut collector = Collector {
        file: file_path,
        scopes: vec![Scope::Module {
            path: module_path.to_string(),
        }],
        impls: Vec::new(),
        elements: Vec::new(),
    };
    collector.visit_file(&syntax);

    debug!(
        "{}: {} marked declaration(s) in module `{module_path}`",
        file_path.display(),
        collector.elements.len()
    );
    Ok(collector.elements)
}

/// Compute the module path of a file relative to the source root.
/// e.g., "src/shapes/solid/mod.rs" -> "shapes::solid", "src/lib.rs" -> ""
pub fn compute_module_path(file_path: &Path, base_path: &Path) -> String {
    let relative = file_path.strip_prefix(base_path).unwrap_or(file_path);

    let without_extension = relative.with_extension("");
    let mut parts: Vec<&str> = without_extension
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    // Remove "mod", "lib" or "main" from the end if present
    if let Some(last) = parts.last()
        && (*last == "mod" || *last == "lib" || *last == "main")
    {
        parts.pop();
    }

    parts.join("::")
}

struct ImplContext {
    class: Option<syn::Ident>,
    generic: bool,
    /// Self type written as `module::Type`; the target lives outside the impl's module.
    qualified: bool,
}

struct Collector<'a> {
    file: &'a Path,
    /// Enclosing scopes, outermost first.
    scopes: Vec<Scope>,
    impls: Vec<ImplContext>,
    elements: Vec<AnnotatedElement>,
}

impl Collector<'_> {
    fn record(&mut self, attrs: &[Attribute], span: Span, declaration: impl Fn() -> Declaration) {
        for attr in attrs {
            let marker = match Marker::from_attribute(attr) {
                None => continue,
                Some(Ok(marker)) => marker,
                Some(Err(err)) => {
                    warn!("{}: ignoring malformed marker: {err}", self.location(span));
                    continue;
                }
            };
            if marker.inline {
                debug!("{}: {} expands inline", self.location(span), marker.kind);
                continue;
            }
            self.elements.push(AnnotatedElement {
                marker,
                declaration: declaration(),
                scopes: self.scopes.iter().rev().cloned().collect(),
                location: Some(self.location(span)),
            });
        }
    }

    fn location(&self, span: Span) -> Location {
        let start = span.start();
        Location {
            file: self.file.to_path_buf(),
            line: start.line,
            column: start.column + 1,
        }
    }

    fn in_body(&self) -> bool {
        self.scopes.iter().any(|scope| matches!(scope, Scope::Other { .. }))
    }

    fn scoped(&mut self, scope: Scope, walk: impl FnOnce(&mut Self)) {
        self.scopes.push(scope);
        walk(self);
        self.scopes.pop();
    }

    fn body(kind: &'static str, name: impl ToString) -> Scope {
        Scope::Other {
            kind,
            name: name.to_string(),
        }
    }
}

fn other(kind: DeclarationKind, name: impl ToString) -> impl Fn() -> Declaration {
    let name = name.to_string();
    move || Declaration::Other {
        kind,
        name: name.clone(),
    }
}

struct SelfType {
    ident: syn::Ident,
    generic: bool,
    qualified: bool,
}

/// Simple name of an `impl` self type. A leading `self::` is ignored.
fn self_type(ty: &Type) -> Option<SelfType> {
    let Type::Path(path) = ty else { return None };
    if path.qself.is_some() {
        return None;
    }
    let segments = &path.path.segments;
    let last = segments.last()?;
    let absolute = path.path.leading_colon.is_some();
    let in_self = !absolute && segments.first().is_some_and(|segment| segment.ident == "self");
    Some(SelfType {
        ident: last.ident.clone(),
        generic: !last.arguments.is_none(),
        qualified: absolute || segments.len() - usize::from(in_self) > 1,
    })
}

impl<'ast> Visit<'ast> for Collector<'_> {
    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        self.record(&item.attrs, item.ident.span(), || Declaration::Struct(item.clone()));
        visit::visit_item_struct(self, item);
    }

    fn visit_field(&mut self, field: &'ast Field) {
        let name = field
            .ident
            .as_ref()
            .map_or_else(|| "<unnamed>".to_string(), ToString::to_string);
        let span = field.ident.as_ref().map_or_else(Span::call_site, syn::Ident::span);
        self.record(&field.attrs, span, other(DeclarationKind::Field, name));
        visit::visit_field(self, field);
    }

    fn visit_item_enum(&mut self, item: &'ast ItemEnum) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Enum, &item.ident));
        visit::visit_item_enum(self, item);
    }

    fn visit_variant(&mut self, variant: &'ast Variant) {
        self.record(
            &variant.attrs,
            variant.ident.span(),
            other(DeclarationKind::Variant, &variant.ident),
        );
        visit::visit_variant(self, variant);
    }

    fn visit_item_union(&mut self, item: &'ast ItemUnion) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Union, &item.ident));
        visit::visit_item_union(self, item);
    }

    fn visit_item_trait(&mut self, item: &'ast ItemTrait) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Trait, &item.ident));
        let scope = Scope::Type {
            name: item.ident.to_string(),
        };
        self.scoped(scope, |this| visit::visit_item_trait(this, item));
    }

    fn visit_trait_item_fn(&mut self, item: &'ast TraitItemFn) {
        let name = &item.sig.ident;
        self.record(&item.attrs, name.span(), other(DeclarationKind::TraitFunction, name));
        self.scoped(Self::body("function", name), |this| visit::visit_trait_item_fn(this, item));
    }

    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        let resolved = self_type(&item.self_ty);
        let name = resolved
            .as_ref()
            .map_or_else(|| "<unnamed>".to_string(), |ty| ty.ident.to_string());
        let span = resolved.as_ref().map_or_else(|| item.impl_token.span, |ty| ty.ident.span());
        self.record(&item.attrs, span, other(DeclarationKind::Impl, &name));

        self.impls.push(ImplContext {
            generic: !item.generics.params.is_empty() || resolved.as_ref().is_some_and(|ty| ty.generic),
            qualified: resolved.as_ref().is_some_and(|ty| ty.qualified),
            class: resolved.map(|ty| ty.ident),
        });
        self.scoped(Scope::Type { name }, |this| visit::visit_item_impl(this, item));
        self.impls.pop();
    }

    fn visit_impl_item_fn(&mut self, item: &'ast ImplItemFn) {
        let name = &item.sig.ident;
        let context = self.impls.last();
        let declaration = match context.and_then(|ctx| ctx.class.clone().map(|class| (class, ctx))) {
            _ if item.sig.receiver().is_some() => Declaration::Other {
                kind: DeclarationKind::Method,
                name: name.to_string(),
            },
            Some((class, ctx)) if ctx.qualified => Declaration::Other {
                kind: DeclarationKind::QualifiedAssociatedFunction,
                name: format!("{class}::{name}"),
            },
            Some((class, ctx)) => Declaration::Constructor {
                class,
                impl_generics: ctx.generic,
                item: item.clone(),
            },
            None => Declaration::Other {
                kind: DeclarationKind::Function,
                name: name.to_string(),
            },
        };
        self.record(&item.attrs, name.span(), || declaration.clone());
        self.scoped(Self::body("function", name), |this| visit::visit_impl_item_fn(this, item));
    }

    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        let name = &item.sig.ident;
        self.record(&item.attrs, name.span(), other(DeclarationKind::Function, name));
        self.scoped(Self::body("function", name), |this| visit::visit_item_fn(this, item));
    }

    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Module, &item.ident));
        if item.content.is_none() {
            return;
        }

        let scope = if self.in_body() {
            Self::body("module in a function body", &item.ident)
        } else {
            let parent = self
                .scopes
                .iter()
                .rev()
                .find_map(|scope| match scope {
                    Scope::Module { path } => Some(path.as_str()),
                    _ => None,
                })
                .unwrap_or_default();
            let path = if parent.is_empty() {
                item.ident.to_string()
            } else {
                format!("{parent}::{}", item.ident)
            };
            Scope::Module { path }
        };
        self.scoped(scope, |this| visit::visit_item_mod(this, item));
    }

    fn visit_item_const(&mut self, item: &'ast ItemConst) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Const, &item.ident));
        self.scoped(Self::body("constant", &item.ident), |this| visit::visit_item_const(this, item));
    }

    fn visit_item_static(&mut self, item: &'ast ItemStatic) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::Static, &item.ident));
        self.scoped(Self::body("static", &item.ident), |this| visit::visit_item_static(this, item));
    }

    fn visit_item_type(&mut self, item: &'ast ItemType) {
        self.record(&item.attrs, item.ident.span(), other(DeclarationKind::TypeAlias, &item.ident));
        visit::visit_item_type(self, item);
    }

    fn visit_local(&mut self, local: &'ast Local) {
        let (name, span) = match &local.pat {
            Pat::Ident(pat) => (pat.ident.to_string(), pat.ident.span()),
            Pat::Type(typed) => match &*typed.pat {
                Pat::Ident(pat) => (pat.ident.to_string(), pat.ident.span()),
                _ => ("<pattern>".to_string(), local.let_token.span),
            },
            _ => ("<pattern>".to_string(), local.let_token.span),
        };
        self.record(&local.attrs, span, other(DeclarationKind::LocalVariable, name));
        visit::visit_local(self, local);
    }

    fn visit_expr_closure(&mut self, closure: &'ast ExprClosure) {
        self.scoped(Self::body("closure", "<closure>"), |this| visit::visit_expr_closure(this, closure));
    }
}
