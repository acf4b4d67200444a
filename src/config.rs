//! Fixed parameters of the feed and of the chart layout.

/// Daily hospital data published by Santé publique France on data.gouv.fr.
pub const SOURCE_URL: &str =
    "https://www.data.gouv.fr/fr/datasets/r/63352e38-d353-4b54-bfd1-f1b3ee1cabd7";

/// Format of the `jour` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the x-axis tick labels (month-day).
pub const TICK_DATE_FORMAT: &str = "%m-%d";

/// Field separator of the feed.
pub const DELIMITER: u8 = b';';

/// `sexe` value of rows that cover both sexes.
pub const COMBINED_SEX: u8 = 0;

/// Days between two x-axis ticks.
pub const X_INTERVAL_DAYS: i64 = 10;

/// Y-axis tick step when only a subset of the primary series is shown.
/// Doubled when all four are shown.
pub const Y_INTERVAL: i64 = 2500;

/// Vertical offset (in data units) of the daily-deaths peak label.
pub const DAILY_PEAK_LABEL_OFFSET: f64 = 20.0;

/// Default figure size in pixels (16 x 12 inches at 100 dpi).
pub const DEFAULT_WIDTH: u32 = 1600;
pub const DEFAULT_HEIGHT: u32 = 1200;

pub const TITLE_FONT_PX: u32 = 16;
pub const LABEL_FONT_PX: u32 = 13;
pub const DESC_FONT_PX: u32 = 14;

/// Environment variable pointing at a TTF/OTF font for chart text.
pub const FONT_ENV: &str = "HOSPI_FONT";

/// Geographic label appended to the chart title.
pub const AREA_LABEL: &str = "France";
