//! Gallery configuration.
//!
//! Handles loading and validating `config.toml`. Stock defaults are the base
//! layer; a user file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! cache_directory = "cache"   # Thumbnails and index files live here
//!
//! [cache]
//! expiration = 0              # Minutes an index stays fresh (0 = caching disabled)
//!
//! [gallery]
//! images_per_page = 0         # 0 = show every image on one page
//!
//! [thumbnails]
//! size = 100                  # Square edge in pixels
//! quality = 75                # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! The resolved [`GalleryConfig`] is built once and borrowed by every
//! component; nothing mutates it after loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Unable to create cache directory {path}: {source}")]
    CacheDirCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cache directory {path} is not writable: {source}")]
    CacheDirNotWritable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Gallery configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory holding thumbnails and index files.
    #[serde(default = "default_cache_directory")]
    pub cache_directory: PathBuf,
    pub cache: CacheConfig,
    pub gallery: PagingConfig,
    pub thumbnails: ThumbnailsConfig,
}

fn default_cache_directory() -> PathBuf {
    PathBuf::from("cache")
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cache_directory: default_cache_directory(),
            cache: CacheConfig::default(),
            gallery: PagingConfig::default(),
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size must be non-zero".into(),
            ));
        }
        if !(1..=100).contains(&self.thumbnails.quality) {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.cache_directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "cache_directory must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Index caching settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Minutes a directory index stays fresh. Zero or negative disables
    /// caching: every request rescans.
    pub expiration: i64,
}

/// Pagination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagingConfig {
    /// Images per page; 0 shows everything on a single page.
    pub images_per_page: usize,
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Edge length of the square thumbnail, in pixels.
    pub size: u32,
    /// Encoding quality for lossy output (JPEG only).
    pub quality: u8,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            size: 100,
            quality: 75,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file yields the stock defaults; an invalid one is an error.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Make sure the cache directory exists and accepts writes.
///
/// This is setup work done once before serving; the gallery itself assumes
/// the directory is ready.
pub fn prepare_cache_dir(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| ConfigError::CacheDirCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // Probe with a real write; permission bits alone lie on some mounts.
    tempfile::NamedTempFile::new_in(dir)
        .and_then(|mut probe| probe.write_all(b"ok"))
        .map_err(|source| ConfigError::CacheDirNotWritable {
            path: dir.to_path_buf(),
            source,
        })
}

/// URL prefix under which cached files are referenced from markup.
///
/// Relative cache dirs are used as written. Absolute ones are made relative
/// to the working directory when they live beneath it.
pub fn public_prefix(cache_dir: &Path) -> String {
    let relative = if cache_dir.is_absolute() {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| cache_dir.strip_prefix(cwd).ok().map(Path::to_path_buf))
            .unwrap_or_else(|| cache_dir.to_path_buf())
    } else {
        cache_dir.to_path_buf()
    };
    url_path(&relative)
}

/// Join path components with `/`, dropping `.` segments.
pub(crate) fn url_path(path: &Path) -> String {
    let mut parts = Vec::new();
    let mut absolute = false;
    for component in path.components() {
        match component {
            Component::RootDir => absolute = true,
            Component::CurDir | Component::Prefix(_) => {}
            Component::ParentDir => parts.push("..".to_string()),
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Snapgal Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory for thumbnails and directory indexes. Must be writable; it is
# created on startup if missing.
cache_directory = "cache"

# ---------------------------------------------------------------------------
# Index cache
# ---------------------------------------------------------------------------
[cache]
# Minutes a directory index stays fresh before the directory is rescanned.
# 0 disables caching: every request rescans the directory.
expiration = 0

# ---------------------------------------------------------------------------
# Gallery layout
# ---------------------------------------------------------------------------
[gallery]
# Images shown per page. 0 shows every image on a single page.
images_per_page = 0

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Edge length in pixels of the square, center-cropped thumbnails.
size = 100

# JPEG encoding quality (1 = worst, 100 = best). PNG and GIF are lossless.
quality = 75
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = GalleryConfig::default();
        assert_eq!(config.cache_directory, PathBuf::from("cache"));
        assert_eq!(config.cache.expiration, 0);
        assert_eq!(config.gallery.images_per_page, 0);
        assert_eq!(config.thumbnails.size, 100);
        assert_eq!(config.thumbnails.quality, 75);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
images_per_page = 24
"#;
        let config: GalleryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gallery.images_per_page, 24);
        // Defaults preserved
        assert_eq!(config.thumbnails.size, 100);
        assert_eq!(config.cache_directory, PathBuf::from("cache"));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.thumbnails.size, 100);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
cache_directory = "thumbs"

[cache]
expiration = 30

[thumbnails]
size = 150
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.cache_directory, PathBuf::from("thumbs"));
        assert_eq!(config.cache.expiration, 30);
        assert_eq!(config.thumbnails.size, 150);
        assert_eq!(config.thumbnails.quality, 75);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn negative_expiration_is_accepted() {
        let config = resolve_config(Some(toml::from_str("[cache]\nexpiration = -5").unwrap()))
            .unwrap();
        assert_eq!(config.cache.expiration, -5);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = resolve_config(Some(toml::from_str("[gallery]\nper_page = 3").unwrap()));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result = resolve_config(Some(toml::from_str("[colors]\nbg = 1").unwrap()));
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_zero_thumbnail_size() {
        let mut config = GalleryConfig::default();
        config.thumbnails.size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = GalleryConfig::default();
        config.thumbnails.quality = 0;
        assert!(config.validate().is_err());
        config.thumbnails.quality = 101;
        assert!(config.validate().is_err());
        config.thumbnails.quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(GalleryConfig::default().validate().is_ok());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_table() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[thumbnails]\nsize = 64").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["thumbnails"]["size"].as_integer(), Some(64));
        assert_eq!(merged["thumbnails"]["quality"].as_integer(), Some(75));
    }

    // =========================================================================
    // Cache directory setup
    // =========================================================================

    #[test]
    fn prepare_cache_dir_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested/cache");
        prepare_cache_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Probe file is cleaned up
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn prepare_cache_dir_fails_when_path_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("cache");
        fs::write(&file, "not a dir").unwrap();
        assert!(matches!(
            prepare_cache_dir(&file),
            Err(ConfigError::CacheDirNotWritable { .. })
        ));
    }

    // =========================================================================
    // Public prefix
    // =========================================================================

    #[test]
    fn public_prefix_keeps_relative_paths() {
        assert_eq!(public_prefix(Path::new("cache")), "cache");
        assert_eq!(public_prefix(Path::new("./resources/cache")), "resources/cache");
    }

    #[test]
    fn public_prefix_strips_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(public_prefix(&cwd.join("cache").join("thumbs")), "cache/thumbs");
    }

    #[test]
    fn public_prefix_outside_working_directory_stays_absolute() {
        let tmp = TempDir::new().unwrap();
        let prefix = public_prefix(tmp.path());
        assert!(prefix.starts_with('/'));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        let defaults = GalleryConfig::default();
        assert_eq!(config.cache_directory, defaults.cache_directory);
        assert_eq!(config.cache.expiration, defaults.cache.expiration);
        assert_eq!(
            config.gallery.images_per_page,
            defaults.gallery.images_per_page
        );
        assert_eq!(config.thumbnails.size, defaults.thumbnails.size);
        assert_eq!(config.thumbnails.quality, defaults.thumbnails.quality);
    }
}
