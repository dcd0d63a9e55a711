use crate::{Config, FlowGenerator};

pub struct GeneratorBuilder {
    config: Config,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> FlowGenerator {
        FlowGenerator::new_with_config(self.config)
    }
}
