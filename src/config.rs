// ============================================================================
// Configuration
// ============================================================================
// Lit les réglages de l'application depuis un fichier JSON
//
// Emplacement :
// - $WAZITO_CONFIG si la variable est définie
// - sinon ~/.config/wazito/config.json (Linux), équivalent via dirs ailleurs
//
// Un fichier absent n'est pas une erreur : on prend les valeurs par défaut.
// Chaque champ absent du fichier prend aussi sa valeur par défaut.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Variable d'environnement pour forcer le chemin du fichier
pub const CONFIG_ENV_VAR: &str = "WAZITO_CONFIG";

/// Durée de vie maximale d'une notification (une heure)
pub const MAX_NOTIFICATION_TTL_SECS: i64 = 3600;

/// Erreurs de chargement de la configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Réglages de l'application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Intervalle de polling clavier (et donc de tick), en millisecondes
    pub tick_rate_ms: u64,

    /// Répertoire des fichiers de log (rotation quotidienne)
    pub log_dir: PathBuf,

    /// Filtre tracing utilisé quand RUST_LOG n'est pas défini
    pub log_filter: String,

    /// Nombre maximal de notifications affichées en même temps
    pub max_notifications: usize,

    /// Durée de vie d'une notification, en secondes
    pub notification_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            log_dir: PathBuf::from("./logs"),
            log_filter: "wazito=debug,info".to_string(),
            max_notifications: 5,
            notification_ttl_secs: 8,
        }
    }
}

impl Config {
    /// Chemin du fichier de configuration
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wazito")
            .join("config.json")
    }

    /// Charge la configuration depuis l'emplacement par défaut
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Charge la configuration depuis un fichier précis
    ///
    /// - Fichier absent : Config::default()
    /// - Fichier illisible ou JSON invalide : erreur
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "tick_rate_ms must be greater than 0".to_string(),
            });
        }

        if self.max_notifications == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_notifications must be greater than 0".to_string(),
            });
        }

        if !(0..=MAX_NOTIFICATION_TTL_SECS).contains(&self.notification_ttl_secs) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "notification_ttl_secs must be between 0 and {}",
                    MAX_NOTIFICATION_TTL_SECS
                ),
            });
        }

        Ok(())
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms)
    }

    /// Durée de vie des notifications, bornée même si validate() n'a pas été appelé
    pub fn notification_ttl(&self) -> chrono::Duration {
        let secs = self.notification_ttl_secs.clamp(0, MAX_NOTIFICATION_TTL_SECS);
        chrono::Duration::seconds(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tick_rate_ms": 100, "log_filter": "wazito=trace" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_filter, "wazito=trace");
        assert_eq!(config.max_notifications, 5);
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tick_rate_ms": 0 }"#).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ValidationError { .. })
        ));

        let config = Config {
            max_notifications: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_notification_ttl_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        for ttl in ["9223372036854775807", "-1", "3601"] {
            fs::write(&path, format!(r#"{{ "notification_ttl_secs": {} }}"#, ttl)).unwrap();
            assert!(matches!(
                Config::load_from(&path),
                Err(ConfigError::ValidationError { .. })
            ));
        }

        fs::write(&path, r#"{ "notification_ttl_secs": 3600 }"#).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().notification_ttl_secs, 3600);
    }

    #[test]
    fn test_notification_ttl_is_clamped() {
        let config = Config {
            notification_ttl_secs: i64::MAX,
            ..Config::default()
        };
        assert_eq!(
            config.notification_ttl(),
            chrono::Duration::seconds(MAX_NOTIFICATION_TTL_SECS)
        );

        let negative = Config {
            notification_ttl_secs: -5,
            ..Config::default()
        };
        assert_eq!(negative.notification_ttl(), chrono::Duration::zero());
    }
}
