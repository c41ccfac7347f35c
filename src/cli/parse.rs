use clap::{Args, Parser, Subcommand};

use crate::core::{color::Color, constants::DEFAULT_ZOOM};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "braille-linegraph",
    about = "Multi-series braille line graphs for the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plot named series from a CSV file (`name,value[,value…]` rows)
    Csv(CsvArgs),
    /// Animated random-walk load graph
    Demo(DemoArgs),
    /// Show available color names / hex syntax
    Colors,
}

/// Options shared by every plotting subcommand.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Dot columns between consecutive samples
    #[arg(short, long, default_value_t = DEFAULT_ZOOM, value_parser = clap::value_parser!(u32).range(1..))]
    pub zoom: u32,

    /// Color for series without an explicit `--color`
    #[arg(long, default_value = "industrial")]
    pub default_color: Color,

    /// Per-series color, `NAME=COLOR` (repeatable)
    #[arg(long = "color", value_name = "NAME=COLOR", value_parser = parse_assignment::<Color>)]
    pub colors: Vec<(String, Color)>,

    /// Per-series legend label, `NAME=TEXT` (repeatable)
    #[arg(long = "label", value_name = "NAME=TEXT", value_parser = parse_assignment::<String>)]
    pub labels: Vec<(String, String)>,

    /// Clamp samples into 0..=100 instead of letting them fall off the graph
    #[arg(long)]
    pub clamp: bool,

    /// Graph title
    #[arg(short, long)]
    pub title: Option<String>,
}

/// `braille-linegraph csv …`
#[derive(Parser, Debug)]
pub struct CsvArgs {
    /// CSV path (use `-` for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    #[command(flatten)]
    pub graph: GraphArgs,
}

/// `braille-linegraph demo …`
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Number of series (`cpu0`, `cpu1`, …)
    #[arg(long, default_value_t = 3)]
    pub series: usize,
    #[arg(long, default_value_t = 600)]
    pub steps: usize,
    #[arg(long, default_value_t = 8.0)]
    pub sigma: f64,
    #[arg(long, default_value_t = 10)]
    pub fps: u64,

    #[command(flatten)]
    pub graph: GraphArgs,
}

/// `NAME=VALUE` with a typed value.
fn parse_assignment<T>(s: &str) -> Result<(String, T), String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty series name in `{s}`"));
    }
    let value = value.parse::<T>().map_err(|e| e.to_string())?;
    Ok((name.to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_parse() {
        assert_eq!(
            parse_assignment::<Color>("cpu=blue"),
            Ok(("cpu".to_owned(), Color::Blue))
        );
        assert_eq!(
            parse_assignment::<String>("cpu=%"),
            Ok(("cpu".to_owned(), "%".to_owned()))
        );
        assert!(parse_assignment::<Color>("cpu").is_err());
        assert!(parse_assignment::<Color>("=red").is_err());
        assert!(parse_assignment::<Color>("cpu=#12").is_err());
    }

    #[test]
    fn csv_command_line() {
        let cli = Cli::try_parse_from([
            "braille-linegraph",
            "csv",
            "load.csv",
            "--zoom",
            "3",
            "--color",
            "cpu=red",
            "--label",
            "cpu=%",
            "--clamp",
        ])
        .unwrap();
        let Command::Csv(a) = cli.cmd else {
            panic!("expected csv");
        };
        assert_eq!(a.file, "load.csv");
        assert_eq!(a.graph.zoom, 3);
        assert_eq!(a.graph.colors, [("cpu".to_owned(), Color::Red)]);
        assert_eq!(a.graph.labels, [("cpu".to_owned(), "%".to_owned())]);
        assert!(a.graph.clamp);
        assert_eq!(a.graph.default_color, Color::Orange);
    }

    #[test]
    fn zero_zoom_is_refused() {
        assert!(Cli::try_parse_from(["braille-linegraph", "csv", "--zoom", "0"]).is_err());
    }
}
