//! Marker attributes: `#[record_builder]` and `#[instance_builder]`.

use std::fmt;

use proc_macro2::TokenStream;
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Attribute, LitStr, Meta};

/// Crate name accepted as a path prefix, as in `#[buildergen::record_builder]`.
const CRATE_PREFIX: &str = "buildergen";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKind {
    /// Placed on a struct; components are its fields.
    Record,
    /// Placed on an associated function; components are its parameters.
    Instance,
}

impl MarkerKind {
    /// Processing order of a batch.
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Record, MarkerKind::Instance];

    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Record => "record_builder",
            Self::Instance => "instance_builder",
        }
    }

    /// The declarations this marker may be placed on, for diagnostics.
    pub fn accepts(self) -> &'static str {
        match self {
            Self::Record => "structs",
            Self::Instance => "associated functions",
        }
    }

    /// Recognise `record_builder` / `buildergen::record_builder` style attribute paths.
    pub fn of_attribute(attr: &Attribute) -> Option<Self> {
        let path = attr.path();
        let last = path.segments.last()?;
        match path.segments.len() {
            1 => {}
            2 if path.segments[0].ident == CRATE_PREFIX => {}
            _ => return None,
        }
        Self::ALL.into_iter().find(|kind| last.ident == kind.attribute_name())
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.attribute_name())
    }
}

/// A parsed marker attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Explicit builder identifier from `name = "..."`.
    pub name: Option<String>,
    /// Expand the builder in place instead of through the build-time generator.
    pub inline: bool,
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            name: None,
            inline: false,
        }
    }

    /// The explicit builder name, if one was given and is non-empty.
    pub fn name_override(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Parse the marker carried by `attr`, if it is one.
    pub fn from_attribute(attr: &Attribute) -> Option<syn::Result<Self>> {
        let kind = MarkerKind::of_attribute(attr)?;
        let mut marker = Self::new(kind);
        let parsed = match &attr.meta {
            Meta::Path(_) => Ok(()),
            _ => attr.parse_nested_meta(|meta| marker.parse_option(meta)),
        };
        Some(parsed.map(|()| marker))
    }

    /// Parse the argument tokens of an attribute macro invocation.
    pub fn from_args(kind: MarkerKind, args: TokenStream) -> syn::Result<Self> {
        let mut marker = Self::new(kind);
        syn::meta::parser(|meta| marker.parse_option(meta)).parse2(args)?;
        Ok(marker)
    }

    fn parse_option(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            self.name = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("inline") {
            if self.kind != MarkerKind::Record {
                return Err(meta.error("`inline` is only supported by `record_builder`"));
            }
            self.inline = true;
            Ok(())
        } else {
            Err(meta.error(format!("unsupported {} option", self.kind)))
        }
    }
}
