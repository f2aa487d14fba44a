use vidly_core::{ConfigError, ListConfig, SortColumn};

use crate::model::MovieColumn;

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Application configuration.
///
/// Controls the movies list paging, its initial sort, and log output.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub list: ListConfig,
    /// Sort applied when the movies list first loads.
    pub default_sort: SortColumn<MovieColumn>,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            list: ListConfig::default(),
            default_sort: SortColumn::asc(MovieColumn::Title),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] for a zero page size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.list.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidly_core::SortDirection;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.list.page_size, 4);
        assert_eq!(config.default_sort.column, MovieColumn::Title);
        assert_eq!(config.default_sort.direction, SortDirection::Asc);
        assert_eq!(config.log.filter, "info");
        assert!(!config.log.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = AppConfig {
            list: ListConfig { page_size: 0 },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPageSize { page_size: 0 })
        ));
    }
}
