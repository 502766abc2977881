use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use horchata::prelude::*;
use prettytable::{Cell, Row, Table};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "horchata")]
#[command(about = "A Rust-based strategy backtesting engine for daily equity data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest
    Run {
        //path to csv data file
        #[arg(long)]
        data: PathBuf,

        //symbol to trade (eg aapl, msft)
        #[arg(long)]
        symbol: String,

        //strategy type (sma, ema, rsi)
        #[arg(long)]
        strategy: String,

        //start of the date range (inclusive)
        #[arg(long)]
        start: Option<NaiveDate>,

        //end of the date range (inclusive)
        #[arg(long)]
        end: Option<NaiveDate>,

        //initial investment capital
        #[arg(long, default_value = "10000")]
        initial_capital: f64,

        //crossover strategy parameters
        //short lookback (for sma/ema strategies)
        #[arg(long)]
        short: Option<usize>,

        //long lookback (for sma/ema strategies)
        #[arg(long)]
        long: Option<usize>,

        //rsi strategy parameters
        //rsi lookback window (for rsi strategy)
        #[arg(long)]
        rsi_window: Option<usize>,

        //rsi oversold threshold (for rsi strategy)
        #[arg(long)]
        oversold: Option<f64>,

        //rsi overbought threshold (for rsi strategy)
        #[arg(long)]
        overbought: Option<f64>,

        //output options
        //output path for portfolio curve csv
        #[arg(long)]
        output_portfolio_csv: Option<PathBuf>,

        //output path for signal events csv
        #[arg(long)]
        output_signals_csv: Option<PathBuf>,
    },

    //run a backtest from a json configuration file
    RunConfig {
        //path to configuration json
        #[arg(long)]
        config: PathBuf,
    },

    //run the default strategies side by side
    Compare {
        //path to csv data file
        #[arg(long)]
        data: PathBuf,

        //symbol to trade
        #[arg(long)]
        symbol: String,

        //start of the date range (inclusive)
        #[arg(long)]
        start: Option<NaiveDate>,

        //end of the date range (inclusive)
        #[arg(long)]
        end: Option<NaiveDate>,

        //initial investment capital
        #[arg(long, default_value = "10000")]
        initial_capital: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            symbol,
            strategy,
            start,
            end,
            initial_capital,
            short,
            long,
            rsi_window,
            oversold,
            overbought,
            output_portfolio_csv,
            output_signals_csv,
        } => {
            let config = build_strategy(&strategy, short, long, rsi_window, oversold, overbought)?;
            run_single(
                data,
                symbol,
                start,
                end,
                initial_capital,
                config,
                output_portfolio_csv,
                output_signals_csv,
            )?;
        }
        Commands::RunConfig { config } => {
            let configuration = BacktestConfiguration::from_json_file(&config)
                .context(format!("Failed to load configuration from {:?}", config))?;
            run_single(
                configuration.data_path,
                configuration.symbol,
                configuration.start_date,
                configuration.end_date,
                configuration.initial_capital,
                configuration.strategy,
                configuration.output_portfolio_csv,
                configuration.output_signals_csv,
            )?;
        }
        Commands::Compare {
            data,
            symbol,
            start,
            end,
            initial_capital,
        } => {
            run_comparison(data, symbol, start, end, initial_capital)?;
        }
    }

    Ok(())
}

//builds a strategy config from cli flags, falling back to standard defaults
fn build_strategy(
    strategy_name: &str,
    short: Option<usize>,
    long: Option<usize>,
    rsi_window: Option<usize>,
    oversold: Option<f64>,
    overbought: Option<f64>,
) -> Result<StrategyConfig> {
    let strategy_type = StrategyType::parse(strategy_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown strategy: {}", strategy_name))?;

    let config = match strategy_type {
        StrategyType::SmaCross => {
            let mut params = SmaParams::default();
            if let Some(short) = short {
                params.short_window = short;
            }
            if let Some(long) = long {
                params.long_window = long;
            }
            StrategyConfig::SmaCross(params)
        }
        StrategyType::EmaCross => {
            let mut params = EmaParams::default();
            if let Some(short) = short {
                params.short_span = short;
            }
            if let Some(long) = long {
                params.long_span = long;
            }
            StrategyConfig::EmaCross(params)
        }
        StrategyType::RsiThreshold => {
            let mut params = RsiParams::default();
            if let Some(window) = rsi_window {
                params.window = window;
            }
            if let Some(oversold) = oversold {
                params.oversold = oversold;
            }
            if let Some(overbought) = overbought {
                params.overbought = overbought;
            }
            StrategyConfig::RsiThreshold(params)
        }
    };

    Ok(config)
}

//loads a symbol's bars from csv and restricts them to the date range
fn load_series(
    data_path: &PathBuf,
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Bar>> {
    println!("Loading data from {:?}...", data_path);
    let all_bars =
        load_csv(data_path).context(format!("Failed to load data from {:?}", data_path))?;

    let bars = filter_by_symbol(&all_bars, symbol);
    let bars = slice_by_date(&bars, symbol, start, end)?;

    println!("Loaded {} bars for {}", bars.len(), symbol);
    println!(
        "Date range: {} to {}\n",
        bars.first().unwrap().date,
        bars.last().unwrap().date
    );

    Ok(bars)
}

#[allow(clippy::too_many_arguments)]
fn run_single(
    data_path: PathBuf,
    symbol: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    initial_capital: f64,
    config: StrategyConfig,
    output_portfolio_csv: Option<PathBuf>,
    output_signals_csv: Option<PathBuf>,
) -> Result<()> {
    println!("Horchata Equity Backtesting Engine");
    println!("==================================\n");

    let bars = load_series(&data_path, &symbol, start, end)?;

    println!("Strategy: {}", config.label());
    println!("Initial capital: ${:.2}\n", initial_capital);

    println!("Running backtest...\n");
    let result = run_backtest(&bars, &config, initial_capital)?;

    println!("Backtest Results");
    println!("================\n");
    result.metrics.pretty_print_table();

    if let Some(portfolio_path) = output_portfolio_csv {
        save_portfolio_csv(&result.portfolio, &portfolio_path)?;
        println!("\nPortfolio curve saved to {:?}", portfolio_path);
    }

    if let Some(signals_path) = output_signals_csv {
        save_signals_csv(&bars, &result.signals, &result.changes, &signals_path)?;
        println!("Signal events saved to {:?}", signals_path);
    }

    Ok(())
}

fn run_comparison(
    data_path: PathBuf,
    symbol: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    initial_capital: f64,
) -> Result<()> {
    println!("Horchata Equity Backtesting Engine");
    println!("==================================\n");

    let bars = load_series(&data_path, &symbol, start, end)?;

    let configs: Vec<(String, StrategyConfig)> = [
        StrategyConfig::default_for(StrategyType::SmaCross),
        StrategyConfig::default_for(StrategyType::EmaCross),
        StrategyConfig::default_for(StrategyType::RsiThreshold),
    ]
    .into_iter()
    .map(|config| (config.label(), config))
    .collect();

    println!("Running {} strategies...\n", configs.len());
    let results = run_many(&bars, &configs, initial_capital)?;

    println!("Strategy Comparison");
    println!("===================\n");

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Strategy"),
        Cell::new("Return"),
        Cell::new("Buy & Hold"),
        Cell::new("Sharpe"),
        Cell::new("Max DD"),
        Cell::new("Trades"),
        Cell::new("Win Rate"),
    ]));

    for (label, result) in &results {
        let metrics = &result.metrics;
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&format!("{:.2}%", metrics.total_return_pct)),
            Cell::new(&format!("{:.2}%", metrics.buy_and_hold_return_pct)),
            Cell::new(&format!("{:.2}", metrics.sharpe_ratio)),
            Cell::new(&format!("{:.2}%", metrics.max_drawdown_pct)),
            Cell::new(&format!("{}", metrics.num_trades)),
            Cell::new(&format!("{:.2}%", metrics.win_rate_pct)),
        ]));
    }

    table.printstd();

    Ok(())
}

fn save_portfolio_csv(portfolio: &[PortfolioState], path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,position,shares,cash,holdings,portfolio_value")?;

    for state in portfolio {
        writeln!(
            file,
            "{},{:?},{},{},{},{}",
            state.date,
            state.position,
            state.shares,
            state.cash,
            state.holdings,
            state.portfolio_value
        )?;
    }

    Ok(())
}

fn save_signals_csv(
    bars: &[Bar],
    signals: &[i8],
    changes: &[Option<i8>],
    path: &PathBuf,
) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,close,signal,position_change")?;

    for (index, bar) in bars.iter().enumerate() {
        let change = match changes[index] {
            Some(c) => c.to_string(),
            None => String::new(),
        };
        writeln!(
            file,
            "{},{},{},{}",
            bar.date, bar.close, signals[index], change
        )?;
    }

    Ok(())
}
