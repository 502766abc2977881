use crate::data::bar::Bar;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("No bars found for symbol {symbol} in the requested range")]
    Unavailable { symbol: String },
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    symbol: String,
}

//loads daily bars from a csv file
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        //parse date
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").context(format!(
            "Failed to parse date '{}' at line {}",
            record.date,
            index + 2
        ))?;

        //create bar
        let bar = Bar::new_unchecked(
            date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
            record.symbol,
        );

        bars.push(bar);
    }

    //sort by date to ensure chronological order
    bars.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(bars)
}

//filters bars by symbol
pub fn filter_by_symbol(bars: &[Bar], symbol: &str) -> Vec<Bar> {
    bars.iter()
        .filter(|bar| bar.symbol == symbol)
        .cloned()
        .collect()
}

//restricts bars to an inclusive date range
//an open bound keeps that end of the series unrestricted
pub fn slice_by_date(
    bars: &[Bar],
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<Bar>, DataError> {
    let selected: Vec<Bar> = bars
        .iter()
        .filter(|bar| {
            start.map_or(true, |s| bar.date >= s) && end.map_or(true, |e| bar.date <= e)
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(DataError::Unavailable {
            symbol: symbol.to_string(),
        });
    }

    Ok(selected)
}
