use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Window must be at least 1")]
    InvalidWindow,
    #[error("Threshold must be positive, got {0}")]
    NonPositiveThreshold(f64),
    #[error("Oversold threshold ({oversold}) must be below overbought threshold ({overbought})")]
    InvalidThresholds { oversold: f64, overbought: f64 },
    #[error("Initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
}

//strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyType {
    SmaCross,
    EmaCross,
    RsiThreshold,
}

impl StrategyType {
    //parse strategy type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sma" | "sma_cross" => Some(StrategyType::SmaCross),
            "ema" | "ema_cross" => Some(StrategyType::EmaCross),
            "rsi" | "rsi_threshold" => Some(StrategyType::RsiThreshold),
            _ => None,
        }
    }
}

//sma crossover strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmaParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        SmaParams {
            short_window: 20,
            long_window: 50,
        }
    }
}

//ema crossover strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmaParams {
    pub short_span: usize,
    pub long_span: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        EmaParams {
            short_span: 12,
            long_span: 26,
        }
    }
}

//rsi threshold strategy parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RsiParams {
    pub window: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            window: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

//strategy selection with variant-specific parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StrategyConfig {
    SmaCross(SmaParams),
    EmaCross(EmaParams),
    RsiThreshold(RsiParams),
}

impl StrategyConfig {
    //default parameters for a strategy type
    pub fn default_for(strategy_type: StrategyType) -> Self {
        match strategy_type {
            StrategyType::SmaCross => StrategyConfig::SmaCross(SmaParams::default()),
            StrategyType::EmaCross => StrategyConfig::EmaCross(EmaParams::default()),
            StrategyType::RsiThreshold => StrategyConfig::RsiThreshold(RsiParams::default()),
        }
    }

    //checks parameters before a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            StrategyConfig::SmaCross(p) => {
                if p.short_window == 0 || p.long_window == 0 {
                    return Err(ConfigError::InvalidWindow);
                }
            }
            StrategyConfig::EmaCross(p) => {
                if p.short_span == 0 || p.long_span == 0 {
                    return Err(ConfigError::InvalidWindow);
                }
            }
            StrategyConfig::RsiThreshold(p) => {
                if p.window == 0 {
                    return Err(ConfigError::InvalidWindow);
                }
                for threshold in [p.oversold, p.overbought] {
                    if threshold <= 0.0 {
                        return Err(ConfigError::NonPositiveThreshold(threshold));
                    }
                }
                if p.oversold >= p.overbought {
                    return Err(ConfigError::InvalidThresholds {
                        oversold: p.oversold,
                        overbought: p.overbought,
                    });
                }
            }
        }
        Ok(())
    }

    //human-readable name for reports
    pub fn label(&self) -> String {
        match self {
            StrategyConfig::SmaCross(p) => {
                format!("SMA Crossover ({}/{})", p.short_window, p.long_window)
            }
            StrategyConfig::EmaCross(p) => {
                format!("EMA Crossover ({}/{})", p.short_span, p.long_span)
            }
            StrategyConfig::RsiThreshold(p) => format!("RSI Threshold (window={})", p.window),
        }
    }
}

//complete backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfiguration {
    //data
    pub data_path: PathBuf,
    pub symbol: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    //account settings
    pub initial_capital: f64,

    //strategy
    pub strategy: StrategyConfig,

    //optional output paths
    pub output_portfolio_csv: Option<PathBuf>,
    pub output_signals_csv: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        BacktestConfiguration {
            data_path: PathBuf::from("data.csv"),
            symbol: "AAPL".to_string(),
            start_date: None,
            end_date: None,
            initial_capital: 10000.0,
            strategy: StrategyConfig::SmaCross(SmaParams::default()),
            output_portfolio_csv: None,
            output_signals_csv: None,
        }
    }
}

impl BacktestConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_names() {
        assert_eq!(StrategyType::parse("sma"), Some(StrategyType::SmaCross));
        assert_eq!(StrategyType::parse("EMA"), Some(StrategyType::EmaCross));
        assert_eq!(
            StrategyType::parse("rsi_threshold"),
            Some(StrategyType::RsiThreshold)
        );
        assert_eq!(StrategyType::parse("macd"), None);
    }

    #[test]
    fn default_parameters_validate() {
        for strategy_type in [
            StrategyType::SmaCross,
            StrategyType::EmaCross,
            StrategyType::RsiThreshold,
        ] {
            assert!(StrategyConfig::default_for(strategy_type).validate().is_ok());
        }
    }

    #[test]
    fn zero_window_rejected() {
        let config = StrategyConfig::SmaCross(SmaParams {
            short_window: 0,
            long_window: 50,
        });
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindow));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let config = StrategyConfig::RsiThreshold(RsiParams {
            window: 14,
            oversold: 70.0,
            overbought: 30.0,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let config = StrategyConfig::RsiThreshold(RsiParams {
            window: 14,
            oversold: -5.0,
            overbought: 70.0,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveThreshold(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backtest.json");

        let config = BacktestConfiguration {
            symbol: "MSFT".to_string(),
            strategy: StrategyConfig::RsiThreshold(RsiParams::default()),
            ..Default::default()
        };

        config.to_json_file(&path).unwrap();
        let loaded = BacktestConfiguration::from_json_file(&path).unwrap();

        assert_eq!(loaded.symbol, "MSFT");
        assert_eq!(loaded.strategy, config.strategy);
        assert_eq!(loaded.initial_capital, config.initial_capital);
    }
}
