//! Builder naming from the scopes enclosing a declaration.

use syn::{Ident, Path};

use crate::error::{BuildError, BuildResult};
use crate::model::{Naming, Scope};

impl Naming {
    pub fn builder_ident(&self) -> BuildResult<Ident> {
        syn::parse_str(&self.builder_name).map_err(|_| BuildError::InvalidBuilderName {
            name: self.builder_name.clone(),
        })
    }

    pub fn target_path(&self) -> BuildResult<Path> {
        syn::parse_str(&self.target_qualified_name).map_err(|_| BuildError::InvalidTargetPath {
            path: self.target_qualified_name.clone(),
        })
    }
}

/// Resolve the naming of the builder for `target`.
///
/// `scopes` lists the scopes enclosing the target, innermost first. Type scopes
/// are collected into a suffix (outermost first) until the first module, whose
/// path becomes the package. `root` prefixes the qualified target path; pass an
/// empty root to get a path relative to the package.
pub fn resolve(target: &str, scopes: &[Scope], name_override: Option<&str>, root: &str) -> BuildResult<Naming> {
    let mut package_name = String::new();
    let mut nominal: Vec<&str> = Vec::new();

    for scope in scopes {
        match scope {
            Scope::Type { name } => nominal.insert(0, name),
            Scope::Module { path } => {
                package_name = path.clone();
                break;
            }
            Scope::Other { kind, name } => {
                return Err(BuildError::UnsupportedEnclosingScope {
                    kind: *kind,
                    name: name.clone(),
                });
            }
        }
    }

    let builder_name = match name_override.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("{target}Builder{}", nominal.concat()),
    };
    let target_qualified_name = [root, package_name.as_str()]
        .into_iter()
        .chain(nominal.iter().copied())
        .chain([target])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("::");

    let naming = Naming {
        package_name,
        builder_name,
        target_qualified_name,
    };
    naming.builder_ident()?;
    Ok(naming)
}
