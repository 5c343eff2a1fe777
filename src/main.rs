use clap::Parser;
use raceline::kurbo::Point;
use raceline::{BehavioralParameters, PhysicalParameters, PointSequence};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "raceline", about = "Track boundary polygon to racing line and speed profile")]
struct Cli {
    /// Boundary file: one "x y" or "x,y" pair per line, '#' starts a comment
    #[arg(short, long)]
    input: PathBuf,

    /// Vehicle top speed in km/h
    #[arg(long, default_value = "55")]
    top_speed: f64,

    /// Tyre/track friction coefficient
    #[arg(long, default_value = "1.5")]
    friction: f64,

    /// Gravitational acceleration in m/s²
    #[arg(long, default_value = "9.8")]
    gravity: f64,

    /// Image scale in pixels per meter
    #[arg(long, default_value = "1.0")]
    pixels_per_meter: f64,

    /// Real track length in meters; overrides --pixels-per-meter using the boundary perimeter
    #[arg(long)]
    track_length: Option<f64>,

    /// How far the line swings out at slow corners (0.0–1.0)
    #[arg(long, default_value = "0.7")]
    aggressiveness: f64,

    /// Weight of the previous point's offset (0.0–1.0)
    #[arg(long, default_value = "0.5")]
    smoothness: f64,

    /// Maximum lateral offset in pixels
    #[arg(long, default_value = "20")]
    max_displacement: f64,

    /// Number of arc-length-uniform points
    #[arg(short = 'n', long, default_value = "100")]
    points: usize,

    /// Curve-simplification tolerance in pixels (off if omitted)
    #[arg(long)]
    epsilon: Option<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.input)?;
    let boundary = PointSequence::closed(parse_boundary(&text)?);

    let mut physical = PhysicalParameters::from_kmh(cli.top_speed)
        .with_friction(cli.friction)
        .with_gravity(cli.gravity)
        .with_pixels_per_meter(cli.pixels_per_meter);
    if let Some(length) = cli.track_length {
        physical = physical.with_track_length(boundary.perimeter(), length);
    }

    let behavior = BehavioralParameters {
        aggressiveness: cli.aggressiveness,
        smoothness: cli.smoothness,
        max_displacement: cli.max_displacement,
        target_points: cli.points,
        simplify_epsilon: cli.epsilon,
    };

    eprintln!();
    eprintln!("  raceline \u{00b7} {}", cli.input.display());
    eprintln!(
        "  Boundary    {} vertices, perimeter {:.1} px, {:.2} px/m",
        boundary.len(),
        boundary.perimeter(),
        physical.pixels_per_meter,
    );

    let result = raceline::compute_racing_line(&boundary, &physical, &behavior)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    writeln!(out, "x,y,speed_kmh,offset")?;
    for ((p, v), d) in result
        .line
        .points()
        .iter()
        .zip(&result.speeds.values)
        .zip(&result.displacements)
    {
        writeln!(out, "{:.3},{:.3},{:.2},{:.3}", p.x, p.y, raceline::mps_to_kmh(*v), d)?;
    }
    out.flush()?;

    eprintln!(
        "  Result      {} points \u{00b7} speed {:.1}\u{2013}{:.1} km/h \u{00b7} max offset {:.2} px",
        result.line.len(),
        raceline::mps_to_kmh(result.speeds.min()),
        raceline::mps_to_kmh(result.speeds.max()),
        result.max_offset(),
    );
    eprintln!();

    Ok(())
}

/// Parse "x y" / "x,y" lines into points.
fn parse_boundary(text: &str) -> Result<Vec<Point>, String> {
    let mut points = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        let [x, y] = fields.as_slice() else {
            return Err(format!("line {}: expected two coordinates", lineno + 1));
        };
        let parse = |s: &str| {
            s.parse::<f64>()
                .map_err(|e| format!("line {}: {}: {}", lineno + 1, s, e))
        };
        points.push(Point::new(parse(*x)?, parse(*y)?));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators_and_comments() {
        let text = "# track\n0 0\n10,0\n\n 10 , 10 # corner\n0\t10\n";
        let points = parse_boundary(text).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn reports_bad_lines() {
        assert!(parse_boundary("1 2 3\n").unwrap_err().contains("line 1"));
        assert!(parse_boundary("0 0\nx 1\n").unwrap_err().contains("line 2"));
    }
}
