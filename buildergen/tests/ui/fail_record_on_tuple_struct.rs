use buildergen::record_builder;

#[record_builder]
pub struct Meters(f64);

fn main() {
    let meters = Meters(1.5);
    assert_eq!(meters.0, 1.5);
}
