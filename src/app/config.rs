use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional on-disk configuration, every key overridable from the CLI.
#[derive(Deserialize, Debug, Default)]
struct FileConfig {
    scan: Option<PathBuf>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    show_excluded: Option<bool>,
    show_skipped: Option<bool>,
    output_file: Option<PathBuf>,
}

/// Looks for a project-local `sick.toml` first, then the user-level
/// `<config_dir>/sick/config.toml`.
fn find_config_file(base_dir: &Path) -> Option<PathBuf> {
    let local = base_dir.join("sick.toml");
    if local.exists() {
        return Some(local);
    }

    let global = dirs::config_dir()?.join("sick").join("config.toml");
    global.exists().then_some(global)
}

fn load_config_file(base_dir: &Path) -> Result<FileConfig> {
    let Some(path) = find_config_file(base_dir) else {
        return Ok(FileConfig::default());
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let parsed: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    log::debug!("Loaded config from {}", path.display());
    Ok(parsed)
}

/// Extensions are matched in dotted form; accept them written either way.
fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}

fn absolutize(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

pub fn resolve_config(cli: Cli, base_dir: &Path) -> Result<RuntimeConfig> {
    let file = load_config_file(base_dir)?;
    Ok(merge(cli, file, base_dir))
}

/// Precedence: built-in defaults, then the config file, then CLI flags.
/// A flag replaces the file value outright rather than merging with it.
fn merge(cli: Cli, file: FileConfig, base_dir: &Path) -> RuntimeConfig {
    let scan = cli
        .scan
        .or(file.scan)
        .unwrap_or_else(|| PathBuf::from("."));
    let output = cli
        .output
        .or(file.output_file)
        .unwrap_or_else(|| PathBuf::from("output.sick"));
    let extensions = cli
        .extensions
        .or(file.extensions)
        .unwrap_or_else(|| vec![".js".into(), ".ts".into(), ".json".into()]);

    RuntimeConfig {
        scan_root: absolutize(base_dir, scan),
        base_dir: base_dir.to_path_buf(),
        include_dirs: cli.include.or(file.include).unwrap_or_default(),
        exclude_patterns: cli.exclude.or(file.exclude).unwrap_or_else(|| {
            vec![
                "node_modules".into(),
                ".git".into(),
                "dist".into(),
                "build".into(),
            ]
        }),
        include_extensions: normalize_extensions(extensions),
        show_excluded: cli.show_excluded.or(file.show_excluded).unwrap_or(true),
        show_skipped: cli.show_skipped.or(file.show_skipped).unwrap_or(true),
        output_path: absolutize(base_dir, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let config = merge(Cli::default(), FileConfig::default(), &base());

        assert_eq!(config.scan_root, PathBuf::from("/work/."));
        assert_eq!(config.output_path, PathBuf::from("/work/output.sick"));
        assert_eq!(
            config.exclude_patterns,
            vec!["node_modules", ".git", "dist", "build"]
        );
        assert_eq!(config.include_extensions, vec![".js", ".ts", ".json"]);
        assert!(config.include_dirs.is_empty());
        assert!(config.show_excluded);
        assert!(config.show_skipped);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = FileConfig {
            exclude: Some(vec!["target".into()]),
            show_skipped: Some(false),
            output_file: Some(PathBuf::from("ctx.txt")),
            ..FileConfig::default()
        };

        let config = merge(Cli::default(), file, &base());

        assert_eq!(config.exclude_patterns, vec!["target"]);
        assert!(!config.show_skipped);
        assert_eq!(config.output_path, PathBuf::from("/work/ctx.txt"));
    }

    #[test]
    fn cli_flags_override_the_file() {
        let file = FileConfig {
            extensions: Some(vec![".py".into()]),
            show_excluded: Some(false),
            ..FileConfig::default()
        };
        let cli = Cli {
            extensions: Some(vec![".rs".into()]),
            show_excluded: Some(true),
            ..Cli::default()
        };

        let config = merge(cli, file, &base());

        assert_eq!(config.include_extensions, vec![".rs"]);
        assert!(config.show_excluded);
    }

    #[test]
    fn extensions_gain_a_leading_dot() {
        let cli = Cli {
            extensions: Some(vec!["rs".into(), ".toml".into()]),
            ..Cli::default()
        };

        let config = merge(cli, FileConfig::default(), &base());

        assert_eq!(config.include_extensions, vec![".rs", ".toml"]);
    }

    #[test]
    fn absolute_paths_are_kept_as_given() {
        let cli = Cli {
            scan: Some(PathBuf::from("/srv/project")),
            output: Some(PathBuf::from("/tmp/out.sick")),
            ..Cli::default()
        };

        let config = merge(cli, FileConfig::default(), &base());

        assert_eq!(config.scan_root, PathBuf::from("/srv/project"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.sick"));
    }
}
