use proc_macro::TokenStream;

mod instance;
mod record;

/// Mark a struct for step builder generation.
///
/// Options:
/// - `name = "Ident"`: builder name instead of `<Struct>Builder`
/// - `inline`: expand the builder right after the struct instead of through
///   the build script
///
/// # Example
///
/// ```text
/// #[record_builder(inline)]
/// pub struct Point { x: i32, y: i32 }
///
/// let point = PointBuilder::new().set_x(1).set_y(2).build();
/// ```
#[proc_macro_attribute]
pub fn record_builder(args: TokenStream, item: TokenStream) -> TokenStream {
    record::expand(args.into(), item.into()).into()
}

/// Mark an associated function as the constructor a step builder calls.
///
/// Options:
/// - `name = "Ident"`: builder name instead of `<Type>Builder`
#[proc_macro_attribute]
pub fn instance_builder(args: TokenStream, item: TokenStream) -> TokenStream {
    instance::expand(args.into(), item.into()).into()
}
