//! Command-line flags and the JSON configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::board::{BoardConfig, DEFAULT_LOOKAHEAD_MINS, StopFilterConfig};
use crate::domain::{InvalidStopId, StopId};
use crate::transit::DEFAULT_BASE_URL;

/// Stop shown when neither `--id`, `--station` nor `--config` is given
/// (S+U Alexanderplatz).
pub const DEFAULT_STOP_ID: &str = "900000100003";

/// Errors turning flags and files into a [`BoardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file lists no stations")]
    NoStations,

    #[error("update interval must be at least one second")]
    ZeroInterval,

    #[error(transparent)]
    InvalidStop(#[from] InvalidStopId),
}

/// Live public transport departures in the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "departure-board", version, long_about = None)]
pub struct Cli {
    /// Stop id to monitor [default: 900000100003]
    #[arg(long)]
    pub id: Option<String>,

    /// Label shown for the stop instead of the provider's name
    #[arg(long)]
    pub label: Option<String>,

    /// Comma separated transport modes to show (e.g. "bus,subway")
    #[arg(long)]
    pub filter_mode: Option<String>,

    /// Comma separated destinations to show
    #[arg(long)]
    pub filter_destination: Option<String>,

    /// Comma separated line names to show
    #[arg(long)]
    pub filter_line: Option<String>,

    /// Minutes of departures to request per stop
    #[arg(long = "min", default_value_t = DEFAULT_LOOKAHEAD_MINS)]
    pub lookahead_minutes: u32,

    /// Only show services that carry bicycles
    #[arg(long)]
    pub bicycle: bool,

    /// Seconds between refreshes
    #[arg(long, default_value_t = 60)]
    pub interval: u64,

    /// JSON file listing several stations; replaces the single-stop flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print stations matching NAME and exit
    #[arg(long, value_name = "NAME")]
    pub search: Option<String>,

    /// Monitor the first station matching NAME (ignored when --id is set)
    #[arg(long, value_name = "NAME")]
    pub station: Option<String>,

    /// Base URL of the transport.rest API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Serve departures from `{stop_id}.json` files in DIR instead of the API
    #[arg(long, value_name = "DIR")]
    pub mock_dir: Option<PathBuf>,

    /// Where to write logs [default: departure-board.log in the temp dir]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Whether `--station` still needs resolving to a stop id.
    pub fn needs_station_lookup(&self) -> bool {
        self.id.is_none() && self.config.is_none() && self.station.is_some()
    }

    /// Build the board configuration from the flags, loading `--config`
    /// when given.
    pub fn board_config(&self) -> Result<BoardConfig, ConfigError> {
        if let Some(path) = &self.config {
            return ConfigFile::load(path)?.into_board_config(self.interval);
        }

        let stop = StopId::parse(self.id.as_deref().unwrap_or(DEFAULT_STOP_ID))?;
        let mut filter = StopFilterConfig::new(stop)
            .with_lookahead(self.lookahead_minutes)
            .with_modes(self.filter_mode.as_deref().unwrap_or_default())
            .with_destinations(self.filter_destination.as_deref().unwrap_or_default())
            .with_lines(self.filter_line.as_deref().unwrap_or_default())
            .with_bicycle_only(self.bicycle);
        if let Some(label) = &self.label {
            filter = filter.with_label(label);
        }

        Ok(BoardConfig::new(vec![filter]).with_refresh_interval(refresh_interval(self.interval)?))
    }
}

fn refresh_interval(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroInterval);
    }
    Ok(Duration::from_secs(secs))
}

/// On-disk configuration listing several stations.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub update_interval_secs: Option<u64>,
    #[serde(default)]
    pub stations: Vec<StationEntry>,
}

/// One station in a [`ConfigFile`]. Filters use the same comma separated
/// form as the command-line flags.
#[derive(Debug, Clone, Deserialize)]
pub struct StationEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub filter_mode: Option<String>,
    #[serde(default)]
    pub filter_destination: Option<String>,
    #[serde(default)]
    pub filter_line: Option<String>,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub bicycle: bool,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate into a [`BoardConfig`]. `default_interval_secs` applies
    /// when the file does not set its own interval.
    pub fn into_board_config(self, default_interval_secs: u64) -> Result<BoardConfig, ConfigError> {
        if self.stations.is_empty() {
            return Err(ConfigError::NoStations);
        }

        let stops = self
            .stations
            .into_iter()
            .map(StationEntry::into_filter)
            .collect::<Result<Vec<_>, _>>()?;
        let interval = refresh_interval(self.update_interval_secs.unwrap_or(default_interval_secs))?;

        Ok(BoardConfig::new(stops).with_refresh_interval(interval))
    }
}

impl StationEntry {
    fn into_filter(self) -> Result<StopFilterConfig, ConfigError> {
        let mut filter = StopFilterConfig::new(StopId::parse(&self.id)?)
            .with_lookahead(self.min.unwrap_or(DEFAULT_LOOKAHEAD_MINS))
            .with_modes(self.filter_mode.as_deref().unwrap_or_default())
            .with_destinations(self.filter_destination.as_deref().unwrap_or_default())
            .with_lines(self.filter_line.as_deref().unwrap_or_default())
            .with_bicycle_only(self.bicycle);
        if let Some(name) = self.name {
            filter = filter.with_label(name);
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::AllowList;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("departure-board").chain(args.iter().copied())).unwrap()
    }

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.lookahead_minutes, 60);
        assert_eq!(cli.interval, 60);
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);

        let config = cli.board_config().unwrap();
        assert_eq!(config.stops.len(), 1);
        assert_eq!(config.stops[0].stop.as_str(), DEFAULT_STOP_ID);
        assert_eq!(config.stops[0].modes, None);
        assert!(!config.stops[0].bicycle_only);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert!(!config.is_multi_stop());
    }

    #[test]
    fn single_stop_flags() {
        let cli = cli(&[
            "--id",
            "900000051353",
            "--label",
            "Rathaus",
            "--filter-mode",
            "bus, subway",
            "--filter-line",
            "M27",
            "--min",
            "30",
            "--bicycle",
            "--interval",
            "15",
        ]);

        let config = cli.board_config().unwrap();
        let stop = &config.stops[0];
        assert_eq!(stop.stop.as_str(), "900000051353");
        assert_eq!(stop.label.as_deref(), Some("Rathaus"));
        assert_eq!(stop.modes, AllowList::parse("BUS,SUBWAY"));
        assert_eq!(stop.destinations, None);
        assert_eq!(stop.lines, AllowList::parse("m27"));
        assert_eq!(stop.lookahead_minutes, 30);
        assert!(stop.bicycle_only);
        assert_eq!(config.refresh_interval, Duration::from_secs(15));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = cli(&["--interval", "0"]).board_config().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));
    }

    #[test]
    fn blank_id_rejected() {
        let err = cli(&["--id", "  "]).board_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStop(_)));
    }

    #[test]
    fn station_lookup_only_without_id() {
        assert!(cli(&["--station", "Alexanderplatz"]).needs_station_lookup());
        assert!(!cli(&["--station", "Alexanderplatz", "--id", "900000100003"]).needs_station_lookup());
        assert!(!cli(&[]).needs_station_lookup());
    }

    #[test]
    fn loads_multi_station_file() {
        let file = config_file(
            r#"{
                "update_interval_secs": 30,
                "stations": [
                    { "id": "900000100003", "name": "Alex", "filter_mode": "subway" },
                    { "id": "900000051353", "min": 20, "bicycle": true }
                ]
            }"#,
        );
        let path = file.path().to_str().unwrap();

        // Single-stop flags are replaced by the file
        let config = cli(&["--config", path, "--label", "ignored"]).board_config().unwrap();
        assert!(config.is_multi_stop());
        assert_eq!(config.refresh_interval, Duration::from_secs(30));

        assert_eq!(config.stops[0].label.as_deref(), Some("Alex"));
        assert_eq!(config.stops[0].modes, AllowList::parse("subway"));
        assert_eq!(config.stops[0].lookahead_minutes, DEFAULT_LOOKAHEAD_MINS);

        assert_eq!(config.stops[1].label, None);
        assert_eq!(config.stops[1].lookahead_minutes, 20);
        assert!(config.stops[1].bicycle_only);
    }

    #[test]
    fn file_interval_falls_back_to_flag() {
        let file = config_file(r#"{ "stations": [ { "id": "900000100003" } ] }"#);
        let path = file.path().to_str().unwrap();

        let config = cli(&["--config", path, "--interval", "45"]).board_config().unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(45));
    }

    #[test]
    fn empty_station_list() {
        let file = config_file(r#"{ "update_interval_secs": 60, "stations": [] }"#);
        let err = ConfigFile::load(file.path())
            .unwrap()
            .into_board_config(60)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoStations));
    }

    #[test]
    fn zero_interval_in_file() {
        let file = config_file(r#"{ "update_interval_secs": 0, "stations": [ { "id": "1" } ] }"#);
        let err = ConfigFile::load(file.path())
            .unwrap()
            .into_board_config(60)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));
    }

    #[test]
    fn malformed_file() {
        let file = config_file("{ not json");
        let err = ConfigFile::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config file"));
    }

    #[test]
    fn missing_file() {
        let err = ConfigFile::load(Path::new("/nonexistent/departure-board.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
