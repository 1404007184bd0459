use clap::Parser;
use std::path::PathBuf;

use crate::{
    resolver::ResolveMode,
    selection::{Brand, Country, DEFAULT_AGE, Gender, MAX_AGE, MIN_AGE, Selection, Source},
};

#[derive(Debug, Parser)]
#[command(name = "user-insights")]
#[command(about = "Terminal dashboard: climate, anthropometrics, BMR and reported issues per country")]
pub struct Cli {
    /// Directory with the CSV data files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Age resolution: `first-match` or `aggregate`
    #[arg(long, default_value = "first-match")]
    pub mode: ResolveMode,

    /// Keep loaded reference tables in memory between submits
    #[arg(long)]
    pub cache: bool,

    #[arg(long, default_value = "USA")]
    pub country: Country,

    #[arg(long, default_value_t = DEFAULT_AGE, value_parser = clap::value_parser!(u32).range(i64::from(MIN_AGE)..=i64::from(MAX_AGE)))]
    pub age: u32,

    #[arg(long, default_value = "Male")]
    pub gender: Gender,

    #[arg(long, default_value = "Defender")]
    pub brand: Brand,

    #[arg(long, default_value = "GCI")]
    pub source: Source,

    /// Print one report as JSON and exit instead of starting the dashboard
    #[arg(long)]
    pub headless: bool,

    /// Log destination (the terminal is owned by the dashboard)
    #[arg(long, default_value = "user_insights.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub mode: ResolveMode,
    pub cache: bool,
    pub selection: Selection,
    pub headless: bool,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mode: ResolveMode::default(),
            cache: false,
            selection: Selection::default(),
            headless: false,
            log_file: PathBuf::from("user_insights.log"),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            data_dir: cli.data_dir,
            mode: cli.mode,
            cache: cli.cache,
            selection: Selection {
                country: cli.country,
                age: cli.age,
                gender: cli.gender,
                brand: cli.brand,
                source: cli.source,
            },
            headless: cli.headless,
            log_file: cli.log_file,
        }
    }
}
