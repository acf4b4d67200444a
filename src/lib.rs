//! covid_hospi
//!
//! Fetch the daily French COVID-19 hospital statistics (data.gouv.fr), aggregate
//! them nationally per day, and chart hospitalizations, resuscitations,
//! discharges and deaths with the lockdown and curfew periods marked.
//! Pairs with the `hospi` CLI and the `hospi-gui` desktop app.
//!
//! ### Features
//! - Fetch the feed from its URL or read a local snapshot
//! - National daily totals with derived deaths per day
//! - Five series toggles with French labels and preset defaults
//! - SVG/PNG charts (or an RGB buffer for on-screen display)
//! - CSV/JSON export and per-series summary statistics
//!
//! ### Example
//! ```no_run
//! use covid_hospi::{Client, SeriesSelection, Source};
//!
//! let client = Client::new()?;
//! let days = covid_hospi::loader::load(&client, &Source::default())?;
//! covid_hospi::viz::plot_data(&days, &SeriesSelection::default(), "covid.png", 1600, 1200)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod models;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod viz;

pub use api::{Client, Source};
pub use error::LoadError;
pub use models::{DailyAggregate, Metric, RawRecord, SeriesSelection};
