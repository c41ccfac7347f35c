use std::{
    io::{Write, stdout},
    time::{Duration, Instant},
};

use terminal_size::{Height, Width};
use tracing::{debug, info};

use crate::{
    core::{
        bounds::{graph_dims, min_graph_dims, terminal_geometry},
        color::{Color, colorize},
        config::{GraphConfig, ValuePolicy},
        data::{SeriesData, read_series_from_path},
        error::GraphError,
        rng::{Lcg, LoadWalk},
    },
    render::{CellBuffer, LineGraph, Presenter},
};

use super::parse::{CsvArgs, DemoArgs, GraphArgs};

/// Build the graph configuration from loaded series + shared options.
fn build_config(g: &GraphArgs, data: SeriesData) -> Result<GraphConfig, GraphError> {
    let mut cfg = GraphConfig::new();
    cfg.set_zoom(g.zoom)?;
    cfg.set_default_color(g.default_color);
    if g.clamp {
        cfg.set_value_policy(ValuePolicy::Clamp);
    }
    for (name, samples) in data {
        cfg.set_samples(&name, samples)?;
    }
    for (name, c) in &g.colors {
        cfg.set_color(name, *c)?;
    }
    for (name, l) in &g.labels {
        cfg.set_label(name, l.as_str())?;
    }
    Ok(cfg)
}

/// Bordered frame sized to the terminal.
fn terminal_frame(title: &str, color: Color) -> Result<CellBuffer, GraphError> {
    sized_frame(terminal_geometry(), title, color)
}

fn sized_frame(
    term: (Width, Height),
    title: &str,
    color: Color,
) -> Result<CellBuffer, GraphError> {
    let (w, h) = graph_dims(term);
    let (want_w, want_h) = min_graph_dims();
    if w < want_w || h < want_h {
        return Err(GraphError::GraphTooSmall {
            want_w,
            want_h,
            got_w: w,
            got_h: h,
        });
    }
    Ok(CellBuffer::bordered(w, h, title, color))
}

pub fn csv(a: &CsvArgs) -> Result<(), GraphError> {
    let t_ingest = Instant::now();
    let data = read_series_from_path(&a.file)?;
    debug!(
        series = data.len(),
        micros = t_ingest.elapsed().as_micros(),
        "csv ingested"
    );

    let cfg = build_config(&a.graph, data)?;
    let graph = LineGraph::with_config(cfg);
    let title = a.graph.title.as_deref().unwrap_or(&a.file);
    let mut frame = terminal_frame(title, a.graph.default_color)?;
    graph.draw(&mut frame);

    let mut out = stdout().lock();
    frame.write_ansi(&mut out)?;
    out.flush()?;
    Ok(())
}

pub fn demo(a: &DemoArgs) -> Result<(), GraphError> {
    if a.series == 0 {
        return Err(GraphError::EmptyData);
    }
    let mut rng = Lcg::seed_from_time();
    let mut walks: Vec<(String, LoadWalk)> = (0..a.series)
        .map(|i| {
            let start = 20.0 + 60.0 * (rng.randn().abs() / 3.0).min(1.0);
            (format!("cpu{i}"), LoadWalk::new(rng.fork(), start, a.sigma))
        })
        .collect();

    let mut graph = LineGraph::with_config(build_config(&a.graph, SeriesData::new())?);
    let mut presenter = Presenter::delta();
    let frame_pause = Duration::from_micros(1_000_000 / a.fps.max(1));
    let title = a.graph.title.clone().unwrap_or_else(|| "load".to_owned());
    let demo_start = Instant::now();
    let mut out = stdout();

    for step in 0..a.steps {
        for (name, walk) in &mut walks {
            if let Some(v) = walk.next() {
                graph.config_mut().push_sample(name, v)?;
            }
        }
        if step == 0 {
            // colours and labels need the series to exist first
            for (name, c) in &a.graph.colors {
                graph.config_mut().set_color(name, *c)?;
            }
            for (name, l) in &a.graph.labels {
                graph.config_mut().set_label(name, l.as_str())?;
            }
        }

        // Terminal geometry – recalc every frame (handles resizes)
        let mut frame = terminal_frame(&title, a.graph.default_color)?;
        let keep = history_len(frame.width(), graph.config().zoom());
        graph.config_mut().truncate_history(keep);
        graph.draw(&mut frame);
        presenter.present(&mut out, &frame)?;

        std::thread::sleep(frame_pause);
    }

    info!(
        frames = a.steps,
        millis = demo_start.elapsed().as_millis(),
        "demo complete"
    );
    Ok(())
}

/// Samples worth keeping: enough to reach the left wall plus one to clip against.
fn history_len(frame_width: usize, zoom: u32) -> usize {
    let dots = frame_width * 2;
    dots / usize::try_from(zoom.max(1)).unwrap_or(1) + 2
}

/// Pretty-print available color names + an example hex code.
pub fn colors() {
    println!("\nPossible colors:");
    for (name, c) in Color::NAMED {
        let shown = if c == Color::Orange {
            "orange | industrial"
        } else {
            name
        };
        println!("{}", colorize(c, shown));
    }
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(Color::Rgb(0x50, 0x50, 0x50), "#505050")
    );
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::parse::{Cli, Command};

    fn graph_args(argv: &[&str]) -> GraphArgs {
        let mut full = vec!["braille-linegraph", "csv", "-"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().cmd {
            Command::Csv(a) => a.graph,
            _ => unreachable!(),
        }
    }

    #[test]
    fn config_from_args() {
        let mut data = SeriesData::new();
        data.insert("cpu".into(), vec![10.0, 150.0]);
        let g = graph_args(&["--color", "cpu=blue", "--label", "cpu=%", "--clamp", "-z", "2"]);
        let cfg = build_config(&g, data).unwrap();
        assert_eq!(cfg.zoom(), 2);
        assert_eq!(cfg.resolve_color("cpu"), Color::Blue);
        assert_eq!(cfg.label("cpu"), "%");
        assert_eq!(cfg.samples("cpu"), Some(&[10.0, 100.0][..]));
    }

    #[test]
    fn colour_for_missing_series_fails() {
        let g = graph_args(&["--color", "gpu=blue"]);
        let err = build_config(&g, SeriesData::new()).unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }

    #[test]
    fn tiny_terminal_is_refused() {
        let err = sized_frame((Width(10), Height(5)), "t", Color::White).unwrap_err();
        assert!(matches!(
            err,
            GraphError::GraphTooSmall {
                want_w: 16,
                want_h: 6,
                got_w: 10,
                got_h: 4,
            }
        ));
        // wide enough but one row short once the prompt row is kept free
        assert!(sized_frame((Width(80), Height(6)), "t", Color::White).is_err());
    }

    #[test]
    fn frame_fills_the_terminal() {
        let frame = sized_frame((Width(80), Height(24)), "t", Color::White).unwrap();
        assert_eq!((frame.width(), frame.height()), (80, 23));
    }

    #[test]
    fn history_reaches_past_left_wall() {
        // 80 columns = 160 dots, zoom 5 -> 32 steps + newest + one to clip
        assert_eq!(history_len(80, 5), 34);
        assert_eq!(history_len(80, 1), 162);
    }
}
