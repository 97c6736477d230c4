use buildergen::record_builder;

#[record_builder]
pub enum Shape {
    Circle,
}

fn main() {
    let _ = Shape::Circle;
}
