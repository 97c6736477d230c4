//! Shared data model for naming, extraction and emission.

use std::fmt;
use std::path::PathBuf;

use syn::{Ident, ImplItemFn, ItemStruct, Type, Visibility};

use crate::marker::Marker;

/// One positional component of an aggregate: a struct field or a constructor parameter.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: Ident,
    pub ty: Type,
}

impl Component {
    pub fn new(name: Ident, ty: Type) -> Self {
        Self { name, ty }
    }
}

/// Names an emitted builder and the type it constructs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Module path of the unit relative to the crate root (e.g. `shapes::solid`), empty at the root.
    pub package_name: String,
    /// Identifier of the outer builder type.
    pub builder_name: String,
    /// Path to the target type as it is written in the generated code.
    pub target_qualified_name: String,
}

impl Naming {
    /// Logical address of the unit: `package::Builder`, or just `Builder` at the crate root.
    pub fn address(&self) -> String {
        if self.package_name.is_empty() {
            self.builder_name.clone()
        } else {
            format!("{}::{}", self.package_name, self.builder_name)
        }
    }
}

/// How `build()` turns the stored components into the target.
#[derive(Debug, Clone)]
pub enum Construction {
    /// `Target { c0: .., c1: .. }`, returning the target itself.
    Literal,
    /// `Target::function(c0, c1)`, returning whatever the constructor returns.
    Call { function: Ident, output: Type },
}

/// What the builder produces and how visible it is.
#[derive(Debug, Clone)]
pub struct Target {
    pub visibility: Visibility,
    pub construction: Construction,
}

/// Result of component extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub target: Target,
    pub components: Vec<Component>,
}

/// A generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    pub address: String,
    pub package_name: String,
    pub builder_name: String,
    pub source: String,
}

/// A scope enclosing a marked declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// A module, identified by its full path relative to the crate root.
    Module { path: String },
    /// A nominal type scope (`impl` or `trait` body).
    Type { name: String },
    /// Any other scope, such as a function body.
    Other { kind: &'static str, name: String },
}

/// Declaration kinds, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Struct,
    Enum,
    Union,
    Trait,
    Function,
    AssociatedFunction,
    /// Associated function in an `impl` whose self type is named through a path.
    QualifiedAssociatedFunction,
    Method,
    TraitFunction,
    Field,
    Variant,
    Module,
    Const,
    Static,
    TypeAlias,
    Impl,
    LocalVariable,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Trait => "trait",
            Self::Function => "function",
            Self::AssociatedFunction => "associated function",
            Self::QualifiedAssociatedFunction => "associated function of a path-qualified type",
            Self::Method => "method",
            Self::TraitFunction => "trait function",
            Self::Field => "field",
            Self::Variant => "enum variant",
            Self::Module => "module",
            Self::Const => "constant",
            Self::Static => "static",
            Self::TypeAlias => "type alias",
            Self::Impl => "impl block",
            Self::LocalVariable => "local variable",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The item a marker was found on.
#[derive(Debug, Clone)]
pub enum Declaration {
    Struct(ItemStruct),
    Constructor {
        /// Simple name of the `impl` self type.
        class: Ident,
        /// Whether the enclosing `impl` declares generic parameters.
        impl_generics: bool,
        item: ImplItemFn,
    },
    Other { kind: DeclarationKind, name: String },
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Self::Struct(_) => DeclarationKind::Struct,
            Self::Constructor { .. } => DeclarationKind::AssociatedFunction,
            Self::Other { kind, .. } => *kind,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Struct(item) => item.ident.to_string(),
            Self::Constructor { class, item, .. } => format!("{class}::{}", item.sig.ident),
            Self::Other { name, .. } => name.clone(),
        }
    }
}

/// Source position of a marked element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A declaration carrying a marker, with its enclosing scopes innermost first.
#[derive(Debug, Clone)]
pub struct AnnotatedElement {
    pub marker: Marker,
    pub declaration: Declaration,
    pub scopes: Vec<Scope>,
    pub location: Option<Location>,
}

/// Naming convention for generated setters.
///
/// `Camel` gives the classic step builder names (`x` → `setX`, `k` → `setK`).
/// `Snake` is the default because it follows Rust naming (`set_x`). Setters of
/// either style are emitted with `#[allow(non_snake_case)]`, so both compile
/// cleanly under `#![deny(warnings)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetterStyle {
    /// `set_name`
    #[default]
    Snake,
    /// `setName`
    Camel,
}

impl std::str::FromStr for SetterStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake" => Ok(Self::Snake),
            "camel" => Ok(Self::Camel),
            other => Err(format!("unknown setter style `{other}` (expected `snake` or `camel`)")),
        }
    }
}
