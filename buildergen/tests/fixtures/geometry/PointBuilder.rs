// module: geometry
// @generated by buildergen from `crate::geometry::Point`. Do not edit.

/// Step builder for [`crate::geometry::Point`].
#[must_use]
pub struct PointBuilder {
    x: ::core::option::Option<i32>,
    y: ::core::option::Option<i32>,
}
impl PointBuilder {
    /// Starts a builder with no component set.
    pub fn new() -> Self {
        PointBuilder {
            x: ::core::option::Option::None,
            y: ::core::option::Option::None,
        }
    }
    /// Sets `x` and advances to [`PointBuilder1`].
    #[allow(non_snake_case)]
    pub fn set_x(mut self, x: i32) -> PointBuilder1 {
        self.x = ::core::option::Option::Some(x);
        PointBuilder1::new(self)
    }
}
impl ::core::default::Default for PointBuilder {
    fn default() -> Self {
        Self::new()
    }
}
/// [`PointBuilder`] with 1 of 2 components set.
#[must_use]
pub struct PointBuilder1 {
    builder: PointBuilder,
}
impl PointBuilder1 {
    fn new(builder: PointBuilder) -> Self {
        PointBuilder1 { builder }
    }
    /// Sets `y` and advances to [`PointBuilder2`].
    #[allow(non_snake_case)]
    pub fn set_y(mut self, y: i32) -> PointBuilder2 {
        self.builder.y = ::core::option::Option::Some(y);
        PointBuilder2::new(self.builder)
    }
}
/// [`PointBuilder`] with 2 of 2 components set.
#[must_use]
pub struct PointBuilder2 {
    builder: PointBuilder,
}
impl PointBuilder2 {
    fn new(builder: PointBuilder) -> Self {
        PointBuilder2 { builder }
    }
    /// Builds the target from the stored components, in declaration order.
    pub fn build(self) -> crate::geometry::Point {
        let PointBuilder { x, y } = self.builder;
        crate::geometry::Point {
            x: x.expect("`x` is set before build"),
            y: y.expect("`y` is set before build"),
        }
    }
}
