use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named set of clients and the categories blocked for them around the
/// clock. An empty device list means the group covers every client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub devices: Vec<String>,

    #[serde(default)]
    pub block: Vec<Category>,

    #[serde(default)]
    pub safe_search: bool,

    #[serde(skip)]
    devices_set: HashSet<String>,

    #[serde(skip)]
    block_set: HashSet<Category>,
}

impl GroupConfig {
    pub fn new(devices: Vec<String>, block: Vec<Category>, safe_search: bool) -> Self {
        let mut group = Self {
            devices,
            block,
            safe_search,
            devices_set: HashSet::new(),
            block_set: HashSet::new(),
        };
        group.precompute();
        group
    }

    pub(super) fn precompute(&mut self) {
        self.devices_set = self.devices.iter().cloned().collect();
        self.block_set = self.block.iter().copied().collect();
    }

    pub fn applies_to_client(&self, client: &str) -> bool {
        self.devices_set.is_empty() || self.devices_set.contains(client)
    }

    pub fn blocks(&self, category: Category) -> bool {
        self.block_set.contains(&category)
    }
}
