use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lexis_storage::{BatchWriter, SqliteStore};
use lexis_types::primitives::{AssetClass, DEFAULT_ASSET_NAME, DEFAULT_COLLECTION_CLASS};

use crate::error::RegistryError;

/// File name written by [`RegistryConfig::init`].
pub const CONFIG_FILE_NAME: &str = "lexis.toml";

/// Database file used by the sqlite backend inside `data_dir`.
pub const SQLITE_FILE_NAME: &str = "registry.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names reported in mint events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(default = "default_class")]
    pub class: String,
    #[serde(default = "default_asset")]
    pub asset: String,
}

fn default_class() -> String {
    DEFAULT_COLLECTION_CLASS.to_string()
}

fn default_asset() -> String {
    DEFAULT_ASSET_NAME.to_string()
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            class: default_class(),
            asset: default_asset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend: "memory" or "sqlite".
    #[serde(default = "default_db_type")]
    pub db_type: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_db_type() -> String {
    "memory".to_string()
}

fn default_data_dir() -> String {
    "./lexis-data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_type: default_db_type(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        toml::from_str(&contents).map_err(|e| RegistryError::Config {
            reason: format!("failed to parse config file '{}': {}", path.display(), e),
        })
    }

    /// Write a default configuration file into `dir`, creating it if needed.
    pub fn init(dir: impl AsRef<Path>) -> Result<PathBuf, RegistryError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let toml_str =
            toml::to_string_pretty(&RegistryConfig::default()).map_err(|e| RegistryError::Config {
                reason: format!("failed to serialize default config: {}", e),
            })?;
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, toml_str)?;
        Ok(path)
    }

    pub fn asset_class(&self) -> AssetClass {
        AssetClass::new(&self.collection.class, &self.collection.asset)
    }

    /// Build the configured backend. `None` means state lives only in memory.
    pub fn open_store(&self) -> Result<Option<Arc<dyn BatchWriter>>, RegistryError> {
        match self.storage.db_type.as_str() {
            "memory" => Ok(None),
            "sqlite" => {
                let dir = Path::new(&self.storage.data_dir);
                std::fs::create_dir_all(dir)?;
                let store: Arc<dyn BatchWriter> =
                    Arc::new(SqliteStore::open(dir.join(SQLITE_FILE_NAME))?);
                Ok(Some(store))
            }
            other => Err(RegistryError::Config {
                reason: format!("unknown storage backend '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.collection.class, "ai-assistant");
        assert_eq!(config.collection.asset, "ai-knowledge");
        assert_eq!(config.storage.db_type, "memory");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [storage]
            db_type = "sqlite"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.db_type, "sqlite");
        assert_eq!(config.storage.data_dir, "./lexis-data");
        assert_eq!(config.collection.asset, "ai-knowledge");
    }

    #[test]
    fn test_init_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = RegistryConfig::init(tmp.path().join("conf")).unwrap();
        assert!(path.ends_with(CONFIG_FILE_NAME));
        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.asset_class(), AssetClass::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let err = RegistryConfig::load("/nonexistent/path/lexis.toml").unwrap_err();
        assert!(matches!(err, RegistryError::Config { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "storage = 12").unwrap();
        assert!(matches!(
            RegistryConfig::load(&path),
            Err(RegistryError::Config { .. })
        ));
    }

    #[test]
    fn test_open_store_backends() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = RegistryConfig::default();
        assert!(config.open_store().unwrap().is_none());

        config.storage.db_type = "sqlite".to_string();
        config.storage.data_dir = tmp.path().join("db").to_string_lossy().into_owned();
        assert!(config.open_store().unwrap().is_some());
        assert!(tmp.path().join("db").join(SQLITE_FILE_NAME).exists());

        config.storage.db_type = "rocksdb".to_string();
        assert!(matches!(
            config.open_store(),
            Err(RegistryError::Config { .. })
        ));
    }
}
