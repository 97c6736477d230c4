#![allow(unused)]

use buildergen::record_builder;

#[record_builder(inline)]
pub struct Rect {
    width: u32,
    height: u32,
}

fn main() {
    let rect = RectBuilder::new().set_width(3).build();
}
