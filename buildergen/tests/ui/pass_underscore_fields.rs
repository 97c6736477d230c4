#![deny(warnings)]

use buildergen::record_builder;

#[record_builder(inline)]
struct Window {
    _title: String,
    width: u32,
}

fn main() {
    let window = WindowBuilder::new()
        .set__title("main".to_string())
        .set_width(640)
        .build();
    assert_eq!(window.width, 640);
    assert_eq!(window._title, "main");
}
