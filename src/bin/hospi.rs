use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use covid_hospi::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SOURCE_URL};
use covid_hospi::selection::{self, PROMPT};
use covid_hospi::{Client, SeriesSelection, Source};
use covid_hospi::{loader, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hospi",
    version,
    about = "Fetch, aggregate & chart French COVID-19 hospital data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the feed and draw the chart (optionally export data and print stats).
    Plot(PlotArgs),
    /// List the series toggles with their default values.
    Toggles,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Feed location: URL or local CSV file.
    #[arg(short, long, default_value = SOURCE_URL)]
    source: String,
    /// Chart path (.svg or .png).
    #[arg(short, long, default_value = "covid-hospi.png")]
    out: PathBuf,
    /// Width of the chart.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    /// Height of the chart.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// Patients hospitalisés
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    hosp: bool,
    /// Personnes en réanimation
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    rea: bool,
    /// Retours à domicile
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    rad: bool,
    /// Nombre cumulé de personnes décédées
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    dc_cumul: bool,
    /// Nombre de décès par jour (right axis)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    dc_non_cumul: bool,
    /// Save the daily aggregate to file (format inferred by --format or extension).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (csv or json). If omitted, inferred from --export extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-series statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

impl PlotArgs {
    fn selection(&self) -> SeriesSelection {
        SeriesSelection {
            hosp: self.hosp,
            rea: self.rea,
            rad: self.rad,
            dc_cumul: self.dc_cumul,
            dc_non_cumul: self.dc_non_cumul,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Toggles => cmd_toggles(),
    }
}

fn cmd_toggles() -> Result<()> {
    println!("{PROMPT}");
    for t in selection::toggles() {
        let mark = if t.value { 'x' } else { ' ' };
        println!("[{mark}] --{:<14} {}", t.metric.column().replace('_', "-"), t.label);
    }
    Ok(())
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let client = Client::new()?;
    let source: Source = args.source.parse()?;
    let days = loader::load(&client, &source)?;

    if let Some(path) = args.export.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&days, path)?,
            "json" => storage::save_json(&days, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} days to {}", days.len(), path.display());
    }

    if viz::plot_data(&days, &args.selection(), &args.out, args.width, args.height)? {
        eprintln!("Wrote chart to {}", args.out.display());
    } else {
        eprintln!("No chart: select at least one of --hosp, --rea, --rad, --dc-cumul");
    }

    if args.stats {
        for s in stats::summarize(&days) {
            let max = s
                .max
                .map(|p| format!("{} ({})", p.value, p.date))
                .unwrap_or_else(|| "NA".into());
            println!(
                "{:<13} count={} min={} max={} mean={} median={} last={}",
                s.metric.column(),
                s.count,
                fmt_opt(s.min.map(|v| v as f64)),
                max,
                fmt_opt(s.mean),
                fmt_opt(s.median),
                fmt_opt(s.last.map(|v| v as f64)),
            );
        }
    }

    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 2 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}
