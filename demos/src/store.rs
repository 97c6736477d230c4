/// Only the constructor knows the components, so it carries the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    key: String,
    value: String,
}

impl Pair {
    #[buildergen::instance_builder]
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

buildergen::include_builder!("store/PairBuilder");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// The builder returns whatever the constructor returns.
    #[buildergen::instance_builder(name = "EndpointParts")]
    pub fn parse(host: String, port: u16) -> Result<Self, String> {
        if host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        Ok(Self { host, port })
    }

    pub fn url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

buildergen::include_builder!("store/EndpointParts");
