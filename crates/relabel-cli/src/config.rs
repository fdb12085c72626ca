use crate::cli::RemapArgs;
use crate::error::{CliError, Result};
use relabel::engine::remap::{DEFAULT_CHAIN_MAP, DEFAULT_REQUIRED_CHAINS, RemapConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialRemapConfig {
    required_chains: Option<Vec<char>>,
    chain_map: Option<BTreeMap<char, char>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    remap: PartialRemapConfig,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Layers the built-in table, this file, and the command line, in that order.
    /// `--map` entries override single substitutions; `--require` replaces the
    /// whole required set.
    pub fn merge_with_cli(self, args: &RemapArgs) -> Result<RemapConfig> {
        let PartialRemapConfig {
            required_chains,
            chain_map,
        } = self.remap;

        let required: Vec<char> = match (&args.require, required_chains) {
            (Some(cli), _) => cli.clone(),
            (None, Some(file)) => file,
            (None, None) => DEFAULT_REQUIRED_CHAINS.iter().copied().collect(),
        };

        let builder = RemapConfig::builder()
            .chain_map(DEFAULT_CHAIN_MAP.entries().map(|(&k, &v)| (k, v)))
            .chain_map(chain_map.unwrap_or_default())
            .chain_map(args.map.iter().copied())
            .require(required);

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::PathBuf;

    fn args(map: Vec<(char, char)>, require: Option<Vec<char>>) -> RemapArgs {
        RemapArgs {
            input: PathBuf::from("in"),
            output_dir: PathBuf::from("out"),
            config: None,
            map,
            require,
        }
    }

    #[test]
    fn no_file_and_no_flags_gives_default_table() {
        let config = PartialConfig::default()
            .merge_with_cli(&args(vec![], None))
            .unwrap();
        assert_eq!(config, RemapConfig::default());
    }

    #[test]
    fn file_values_overlay_defaults_and_cli_overlays_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relabel.toml");
        fs::write(
            &path,
            r#"
[remap]
required-chains = ["A", "B", "C"]

[remap.chain-map]
C = "B"
F = "B"
"#,
        )
        .unwrap();

        let partial = PartialConfig::from_file(&path).unwrap();
        let config = partial
            .merge_with_cli(&args(vec![('F', 'A')], None))
            .unwrap();

        assert_eq!(config.required, BTreeSet::from(['A', 'B', 'C']));
        assert_eq!(config.chain_map[&'C'], 'B');
        assert_eq!(config.chain_map[&'F'], 'A');
        assert_eq!(config.chain_map[&'E'], 'B');
    }

    #[test]
    fn cli_require_replaces_required_set() {
        let config = PartialConfig::default()
            .merge_with_cli(&args(vec![], Some(vec!['D', 'E'])))
            .unwrap();
        assert_eq!(config.required, BTreeSet::from(['D', 'E']));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[remap]\nchains = [\"A\"]\n").unwrap();
        assert!(matches!(
            PartialConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn non_ascii_identifiers_surface_as_config_errors() {
        let result = PartialConfig::default().merge_with_cli(&args(vec![('C', 'é')], None));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
