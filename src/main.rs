use anyhow::{bail, Context, Result};
use clap::Parser;
use route_picker::{
    sdk::geometry::GeometryStrategy,
    sdk::map::geographic_to_web_mercator,
    sdk::util::log::init_logging,
    ClickEvent, ClickOutcome, GeoPoint, HeadlessMap, PickerConfig, RemoteRoutingProvider,
    RoutePicker, RoutingConfig, TransportMode,
};

/// Picks an origin and a destination on a headless map and prints the route
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Origin as "LAT,LON" (e.g., "-34.6037,-58.3816")
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: GeoPoint,

    /// Destination as "LAT,LON"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: GeoPoint,

    /// Transport mode (truck or car)
    #[arg(short, long, default_value = "truck")]
    mode: TransportMode,

    /// Draw every section of the route instead of only the first one
    #[arg(long)]
    all_sections: bool,

    /// [Optional] Print the route line as GeoJSON after the report
    #[arg(long)]
    geojson: bool,
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let point = GeoPoint::new(
        lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?,
        lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?,
    );
    if !point.is_valid() {
        return Err(format!("{s:?} is not a valid coordinate"));
    }
    Ok(point)
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = PickerConfig {
        routing: RoutingConfig::from_env().context("Invalid routing configuration")?,
        geometry: if cli.all_sections {
            GeometryStrategy::AllSections
        } else {
            GeometryStrategy::FirstSection
        },
        default_mode: cli.mode,
        ..PickerConfig::default()
    };
    log::info!("Routing service at {}", config.routing.base_url);

    let provider = RemoteRoutingProvider::new(&config.routing)
        .context("Failed to build the routing HTTP client")?;
    let mut picker = RoutePicker::new(HeadlessMap::new(0.0), provider, &config);

    for point in [cli.from, cli.to] {
        let event = ClickEvent::at(geographic_to_web_mercator(point));
        if let ClickOutcome::Rejected(e) = picker.on_map_click(&event) {
            bail!("Point {} was rejected: {}", point, e);
        }
    }

    print!("{}", picker.report());

    if cli.geojson {
        if let Some((_, layer)) = picker.map().layers().next() {
            println!("{}", layer.geometry.to_json_string());
        }
    }

    Ok(())
}
