use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use geometry_core::{EngineConfig, Point2D, TransformAccumulator};
use geometry_pipeline::load_document_from_path;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("direction").args(["to_node", "to_page"])))]
struct Cli {
    /// Path to the JSON document snapshot
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Snapshot id of the element to measure
    #[arg(long, value_name = "ID")]
    element: String,

    /// Point to convert, as `X,Y`
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    point: Option<Point2D>,

    /// Treat the point as page coordinates and map it into the element
    #[arg(long)]
    to_node: bool,

    /// Treat the point as element coordinates and map it onto the page (default)
    #[arg(long)]
    to_page: bool,

    /// Print the element-to-page matrix
    #[arg(long)]
    matrix: bool,

    /// Engine config (JSON); environment overrides are applied on top
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
enum Direction {
    ToPage,
    ToNode,
}

#[derive(Serialize, Debug)]
struct Report {
    element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point: Option<Point2D>,
    /// Row-major 3x3.
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<[f64; 9]>,
}

fn parse_point(s: &str) -> Result<Point2D, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid x `{x}`: {e}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid y `{y}`: {e}"))?;
    Ok(Point2D::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    Ok(config.with_env())
}

fn run(cli: &Cli) -> Result<Report> {
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "engine config");

    let loaded = load_document_from_path(&cli.snapshot)?;
    let element = loaded.require(&cli.element)?;
    info!(element = %cli.element, node = %element, "measuring element");

    let mut engine = TransformAccumulator::with_config(config);
    let matrix = engine.get_element_to_page_matrix(&loaded.document, element);

    let mut report = Report {
        element: cli.element.clone(),
        direction: None,
        input: None,
        point: None,
        matrix: None,
    };

    // With neither a point nor --matrix there is nothing else to print.
    if cli.matrix || cli.point.is_none() {
        report.matrix = Some(matrix.to_row_major());
    }

    if let Some(input) = cli.point {
        let (direction, point) = if cli.to_node {
            let local = engine
                .convert_point_from_page_to_node(&loaded.document, element, input)
                .with_context(|| format!("cannot map page point into `{}`", cli.element))?;
            (Direction::ToNode, local)
        } else {
            let page = engine.convert_point_from_node_to_page(&loaded.document, element, input);
            (Direction::ToPage, page)
        };
        report.direction = Some(direction);
        report.input = Some(input);
        report.point = Some(point);
    }

    Ok(report)
}

fn main() {
    let cli = Cli::parse();

    // Initialize Logging
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(cli.log_level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}
