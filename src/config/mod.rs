//! CLI configuration
//!
//! Settings come from command-line arguments, then an optional config file,
//! then built-in defaults (CLI > File > Defaults).

pub mod loader;

pub use loader::load_config;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Files loaded when none are named on the command line
    #[serde(deserialize_with = "string_or_list")]
    pub files: Vec<String>,
    /// Resolver pass ceiling
    pub max_passes: Option<usize>,
}

impl CliConfig {
    /// Pick the file list: explicit arguments win over the configured list.
    /// An empty result means the library default applies.
    pub fn files_or<'a>(&'a self, cli_files: &'a [String]) -> &'a [String] {
        if cli_files.is_empty() {
            &self.files
        } else {
            cli_files
        }
    }
}

/// Accept either `["a", "b"]` or `"a, b"`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        String(String),
        List(Vec<String>),
    }

    let items = match StringOrList::deserialize(deserializer)? {
        StringOrList::String(s) => s.split(',').map(str::to_string).collect::<Vec<_>>(),
        StringOrList::List(list) => list,
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
