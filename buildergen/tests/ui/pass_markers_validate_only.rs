#[buildergen::record_builder(name = "SettingsMaker")]
#[derive(Debug, Default)]
pub struct Settings {
    pub level: u8,
}

pub struct Pair {
    key: String,
    value: String,
}

impl Pair {
    #[buildergen::instance_builder(name = "PairMaker")]
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn main() {
    let settings = Settings::default();
    assert_eq!(settings.level, 0);

    let pair = Pair::new("k".to_string(), "v".to_string());
    assert_eq!(pair.key(), "k");
    assert_eq!(pair.value, "v");
}
