//! Easement curve fitting demo.
//!
//! Usage:
//! ```text
//! cargo run --example fit                   # every method
//! cargo run --example fit -- radius 600     # static arc of radius 600
//! cargo run --example fit -- length 300     # static arc 300 long
//! cargo run --example fit -- point          # curve from a curved start
//! RUST_LOG=easement=debug cargo run --example fit
//! ```

use easement::geometry::Quadrant;
use easement::operations::fit::{Curve, CurveFitter, FitSettings};
use easement::{Orientation, Result, Speed, TrackPoint};

const MINIMUM_RADIUS: f64 = 500.0;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for easement.
    // Override with RUST_LOG env var (e.g. RUST_LOG=easement=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("easement=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let method = args.first().map_or("all", String::as_str);
    let value = |default: f64| {
        args.get(1)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    };

    let speed: Speed = "120 km/h".parse()?;
    println!("Speed tolerance: {speed}, minimum radius: {MINIMUM_RADIUS}");

    let start = TrackPoint::from_quadrant(217.027, 34.523, 48.882, Quadrant::NE, 0.0)?;
    let end = TrackPoint::from_quadrant(467.962, 465.900, 12.762, Quadrant::NE, 0.0)?;
    let settings = FitSettings {
        split_static: true,
        ..FitSettings::default()
    };
    let fitter = CurveFitter::new(start, MINIMUM_RADIUS, speed.kmh())?.with_settings(settings)?;

    if matches!(method, "all" | "radius") {
        let radius = value(600.0);
        let curve = fitter.fit_by_radius(&end, radius, Orientation::Unresolved)?;
        print_curve(&format!("Fit by radius {radius}"), &curve);
    }

    if matches!(method, "all" | "length") {
        let length = value(300.0);
        let curve = fitter.fit_by_length(&end, length, Orientation::Unresolved)?;
        print_curve(&format!("Fit by static length {length}"), &curve);
    }

    if matches!(method, "all" | "point") {
        let curved = TrackPoint::from_quadrant(354.667, 137.112, 59.824, Quadrant::NE, 0.0)?;
        let add = TrackPoint::from_quadrant(287.741, 92.965, 53.356, Quadrant::NE, 0.0)?;
        let target = TrackPoint::from_quadrant(582.769, 223.772, 75.449, Quadrant::NE, 0.0)?;
        let curve = CurveFitter::new(curved, MINIMUM_RADIUS, speed.kmh())?
            .fit_to_point(&target, Some(&add))?;
        print_curve("Fit to point", &curve);
    }

    Ok(())
}

fn print_curve(title: &str, curve: &Curve) {
    println!();
    println!("{title}");
    for point in curve {
        let (rotation, quadrant) = point.quadrant();
        let length = point
            .origin_length()
            .map_or_else(String::new, |l| format!(", length {l:.3}"));
        println!(
            "  {:<9} ({:>10.3}, {:>10.3}) {rotation:.3}° {quadrant}, {}{length}",
            format!("{:?}", point.kind()),
            point.x(),
            point.z(),
            point.direction(),
        );
    }
    println!(
        "  static length {:.3}, total length {:.3}",
        curve.static_length(),
        curve.length()
    );
}
