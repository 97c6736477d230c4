#[buildergen::record_builder]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Defaults;

buildergen::include_builder!("config/DefaultsBuilder");

#[buildergen::record_builder(name = "LimitsSpec")]
#[derive(Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_connections: u32,
    pub timeout_secs: u64,
}

buildergen::include_builder!("config/LimitsSpec");
