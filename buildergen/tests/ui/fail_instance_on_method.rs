use buildergen::instance_builder;

pub struct Counter {
    count: u32,
}

impl Counter {
    #[instance_builder]
    pub fn count(&self) -> u32 {
        self.count
    }
}

fn main() {
    assert_eq!(Counter { count: 2 }.count(), 2);
}
