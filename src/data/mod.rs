pub mod bar;
pub mod loader;

pub use bar::{closes, Bar, BarError};
pub use loader::{filter_by_symbol, load_csv, slice_by_date, DataError};
