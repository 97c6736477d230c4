//! Units written outside `OUT_DIR`, as `buildergen generate` does.

mod geometry {
    #[buildergen::record_builder]
    #[derive(Debug, PartialEq)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }

    buildergen::include_builder!(from "tests/fixtures", "geometry/PointBuilder");
}

use geometry::{Point, PointBuilder};

#[test]
fn includes_units_from_a_named_directory() {
    let point = PointBuilder::new().set_x(2).set_y(5).build();
    assert_eq!(point, Point { x: 2, y: 5 });
}
