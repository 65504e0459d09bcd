use serde::{Deserialize, Serialize};

use crate::core::mapping::CustomMapping;
use crate::core::types::{Chain, CountType, FormatId};

pub const DEFAULT_TITLE: &str = "Import V(D)J Data";
pub const DEFAULT_BLOCK_LABEL: &str = "Select Clonotype Definition";

/// Structural arguments of an import, as chosen by the user.
///
/// The JSON form uses camelCase keys (`datasetRef`, `customMapping`,
/// `primaryCount`); every key is optional and missing chains default to all six.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatId>,

    #[serde(default = "default_chains")]
    pub chains: Vec<Chain>,

    #[serde(default)]
    pub custom_mapping: CustomMapping,

    #[serde(default)]
    pub primary_count: CountType,
}

fn default_chains() -> Vec<Chain> {
    Chain::ALL.to_vec()
}

impl Default for ImportArgs {
    fn default() -> Self {
        Self {
            dataset_ref: None,
            format: None,
            chains: default_chains(),
            custom_mapping: CustomMapping::default(),
            primary_count: CountType::default(),
        }
    }
}

impl ImportArgs {
    #[must_use]
    pub fn with_dataset(mut self, dataset_ref: impl Into<String>) -> Self {
        self.dataset_ref = Some(dataset_ref.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatId) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_chains(mut self, chains: Vec<Chain>) -> Self {
        self.chains = chains;
        self
    }

    #[must_use]
    pub fn with_custom_mapping(mut self, mapping: CustomMapping) -> Self {
        self.custom_mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_primary_count(mut self, primary_count: CountType) -> Self {
        self.primary_count = primary_count;
        self
    }

    /// Block label shown before the user picks a format.
    #[must_use]
    pub fn block_label(&self) -> String {
        match self.format {
            Some(format) => format!("{} clonotypes", format.display_name()),
            None => DEFAULT_BLOCK_LABEL.to_string(),
        }
    }
}
