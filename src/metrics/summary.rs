use crate::data::Bar;
use crate::metrics::timeseries::{calculate_returns, max_drawdown_pct, round2};
use crate::portfolio::PortfolioState;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

//summary metrics for a completed backtest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsRecord {
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub buy_and_hold_return_pct: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub num_trades: usize,
    pub win_rate_pct: f64,
}

impl MetricsRecord {
    //derives summary metrics from the simulated portfolio series
    pub fn from_backtest(
        bars: &[Bar],
        portfolio: &[PortfolioState],
        changes: &[Option<i8>],
        initial_capital: f64,
    ) -> Self {
        let values: Vec<f64> = portfolio.iter().map(|state| state.portfolio_value).collect();
        let final_value = values.last().copied().unwrap_or(initial_capital);

        let total_return_pct = (final_value - initial_capital) / initial_capital * 100.0;

        //benchmark that ignores signals entirely
        let buy_and_hold_return_pct = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => (last.close - first.close) / first.close * 100.0,
            _ => 0.0,
        };

        let returns = calculate_returns(&values);
        let trade_stats = pair_trades(bars, changes);

        MetricsRecord {
            initial_capital,
            final_value,
            total_return_pct: round2(total_return_pct),
            buy_and_hold_return_pct: round2(buy_and_hold_return_pct),
            sharpe_ratio: round2(sharpe_ratio(&returns)),
            sortino_ratio: round2(sortino_ratio(&returns)),
            volatility_pct: round2(volatility(&returns) * 100.0),
            max_drawdown_pct: round2(max_drawdown_pct(&values)),
            num_trades: trade_stats.num_trades,
            win_rate_pct: round2(trade_stats.win_rate_pct),
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Initial Capital"),
            Cell::new(&format!("${:.2}", self.initial_capital)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Value"),
            Cell::new(&format!("${:.2}", self.final_value)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}%", self.total_return_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Buy & Hold Return"),
            Cell::new(&format!("{:.2}%", self.buy_and_hold_return_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.2}", self.sharpe_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sortino Ratio"),
            Cell::new(&format!("{:.2}", self.sortino_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Volatility"),
            Cell::new(&format!("{:.2}%", self.volatility_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Number of Trades"),
            Cell::new(&format!("{}", self.num_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.win_rate_pct)),
        ]));

        table.printstd();
    }
}

struct TradeStats {
    num_trades: usize,
    win_rate_pct: f64,
}

//pairs consecutive defined nonzero position-change events as entry/exit
//a trailing unmatched entry is discarded by the integer division
fn pair_trades(bars: &[Bar], changes: &[Option<i8>]) -> TradeStats {
    let events: Vec<usize> = changes
        .iter()
        .enumerate()
        .filter_map(|(index, change)| match change {
            Some(c) if *c != 0 => Some(index),
            _ => None,
        })
        .collect();

    let num_trades = events.len() / 2;
    if num_trades == 0 {
        return TradeStats {
            num_trades: 0,
            win_rate_pct: 0.0,
        };
    }

    let wins = events
        .chunks_exact(2)
        .filter(|pair| bars[pair[1]].close > bars[pair[0]].close)
        .count();

    TradeStats {
        num_trades,
        win_rate_pct: wins as f64 / num_trades as f64 * 100.0,
    }
}

//annualized sharpe over daily returns, zero when volatility is zero
fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 {
        return 0.0;
    }

    mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}

//annualized sortino using downside deviation, zero when there is no downside
fn sortino_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let downside: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).copied().collect();
    if downside.len() < 2 {
        return 0.0;
    }

    let downside_dev = downside.std_dev();
    if downside_dev == 0.0 {
        return 0.0;
    }

    returns.mean() / downside_dev * TRADING_DAYS_PER_YEAR.sqrt()
}

//annualized volatility of daily returns
fn volatility(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    returns.std_dev() * TRADING_DAYS_PER_YEAR.sqrt()
}
