#[buildergen::record_builder]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

buildergen::include_builder!("geometry/PointBuilder");

/// Same simple name, different module: the builders live at different addresses.
pub mod solid {
    #[buildergen::record_builder]
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Point {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }

    buildergen::include_builder!("geometry/solid/PointBuilder");
}
