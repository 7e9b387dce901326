use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::matrix::GeneratorConfig;
use crate::search::Strategy;

/// 命令行参数；未给出的项依次回退到配置文件与内置默认值。
#[derive(Parser, Debug, Default)]
#[command(name = "sparse-rowscan", version, about = "Sparse priority queue testing")]
pub struct Cli {
    /// Density of the sparse matrix [default: 0.1]
    #[arg(short, long)]
    pub density: Option<f64>,

    /// Number of rows [default: 10000]
    #[arg(short = 'r', long)]
    pub nrow: Option<usize>,

    /// Number of columns [default: 100000]
    #[arg(short = 'c', long)]
    pub ncol: Option<usize>,

    /// Generator seed [default: 1234567]
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Strategy to benchmark (repeatable) [default: all]
    #[arg(long = "strategy", value_enum)]
    pub strategies: Vec<Strategy>,

    /// TOML config file with the same keys
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with an error when any strategy disagrees with the reference
    #[arg(long)]
    pub strict: bool,
}

/// 配置文件（TOML），所有键可选。
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub density: Option<f64>,
    pub nrow: Option<usize>,
    pub ncol: Option<usize>,
    pub seed: Option<u64>,
    pub strategies: Option<Vec<Strategy>>,
    pub json: Option<bool>,
    pub strict: Option<bool>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }
}

/// 合并后的运行参数。
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub generator: GeneratorConfig,
    pub strategies: Vec<Strategy>,
    pub json: bool,
    pub strict: bool,
}

impl Settings {
    /// 优先级：命令行 > 配置文件 > 默认值。
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    pub fn merge(cli: Cli, file: FileConfig) -> Self {
        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            nrow: cli.nrow.or(file.nrow).unwrap_or(defaults.nrow),
            ncol: cli.ncol.or(file.ncol).unwrap_or(defaults.ncol),
            density: cli.density.or(file.density).unwrap_or(defaults.density),
            seed: cli.seed.or(file.seed).unwrap_or(defaults.seed),
        };

        let strategies = if !cli.strategies.is_empty() {
            cli.strategies
        } else {
            file.strategies
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| Strategy::ALL.to_vec())
        };

        Self {
            generator,
            strategies,
            json: cli.json || file.json.unwrap_or(false),
            strict: cli.strict || file.strict.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let s = Settings::merge(Cli::default(), FileConfig::default());
        assert_eq!(s.generator, GeneratorConfig::default());
        assert_eq!(s.generator.nrow, 10_000);
        assert_eq!(s.generator.ncol, 100_000);
        assert_eq!(s.strategies, Strategy::ALL.to_vec());
        assert!(!s.json && !s.strict);
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig::parse(
            "density = 0.25\nnrow = 50\nstrategies = [\"heap\"]\nstrict = true\n",
            Path::new("bench.toml"),
        )
        .unwrap();
        let cli = Cli::parse_from(["sparse-rowscan", "-r", "70", "--strategy", "shortcircuit"]);
        let s = Settings::merge(cli, file);
        assert_eq!(s.generator.nrow, 70);
        assert_eq!(s.generator.density, 0.25);
        assert_eq!(s.generator.ncol, 100_000);
        assert_eq!(s.strategies, vec![Strategy::Shortcircuit]);
        assert!(s.strict);
    }

    #[test]
    fn file_strategies_used_when_cli_has_none() {
        let file = FileConfig::parse("strategies = [\"cached\", \"heap\"]", Path::new("x.toml")).unwrap();
        let s = Settings::merge(Cli::default(), file);
        assert_eq!(s.strategies, vec![Strategy::Cached, Strategy::Heap]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = FileConfig::parse("colums = 3", Path::new("typo.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = FileConfig::load(Path::new("/nonexistent/sparse-rowscan.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn cli_parses_short_flags() {
        let cli = Cli::parse_from(["sparse-rowscan", "-d", "0.5", "-c", "12", "-s", "9", "--json"]);
        assert_eq!(cli.density, Some(0.5));
        assert_eq!(cli.ncol, Some(12));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.json);
    }
}
