//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Empty configuration; every lookup falls through to defaults.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn has_section(&self, section: &str) -> bool {
        self.config
            .sections()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
path = nifty_historical.csv
date_format = %d %b %Y

[backtest]
lookback = 200
pct_change = 0.15
direction = short
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("nifty_historical.csv".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "date_format"),
            Some("%d %b %Y".to_string())
        );
        assert_eq!(
            adapter.get_string("backtest", "direction"),
            Some("short".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nlookback = 20\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_value_trims_and_drops_blank() {
        let adapter =
            FileConfigAdapter::from_string("[report]\ntrade_log =\nsummary =   out.txt  \n").unwrap();
        assert_eq!(adapter.get_value("report", "trade_log"), None);
        assert_eq!(adapter.get_value("report", "summary"), Some("out.txt".to_string()));
    }

    #[test]
    fn has_section() {
        let adapter = FileConfigAdapter::from_string("[compare]\nlookback_1 = 20\n").unwrap();
        assert!(adapter.has_section("compare"));
        assert!(!adapter.has_section("report"));
    }

    #[test]
    fn empty_has_nothing() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_value("data", "path"), None);
        assert!(!adapter.has_section("data"));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\nsummary = /tmp/summary.txt\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "summary"),
            Some("/tmp/summary.txt".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
