//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["scholar.toml", ".scholar.toml"];
const ENV_PREFIX: &str = "SCHOLAR_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SCHOLAR_*` environment variables (`SCHOLAR_MODEL__NAME` sets `model.name`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./scholar.toml` or `./.scholar.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/scholar-ai/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::layered(config_path, Path::new("."), Self::global_config_path())
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Every layer, with `SCHOLAR_*` variables over the files
    fn layered(config_path: Option<&Path>, project_dir: &Path, global_path: Option<PathBuf>) -> Figment {
        Self::figment(config_path, project_dir, global_path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// File layers only, rooted at `project_dir`
    fn figment(config_path: Option<&Path>, project_dir: &Path, global_path: Option<PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        if let Some(path) = Self::find_project_config(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        // An explicit path that does not exist is an error, not a silent skip
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/scholar-ai/config.toml if set,
    /// otherwise falls back to ~/.config/scholar-ai/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scholar-ai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::find_project_config(Path::new("."))
    }

    fn find_project_config(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        let env_vars: Vec<String> = std::env::vars()
            .map(|(k, _)| k)
            .filter(|k| k.starts_with(ENV_PREFIX))
            .collect();
        if env_vars.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", env_vars.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./scholar.toml or ./.scholar.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [FOUND] Default: built-in defaults");
    }
}
