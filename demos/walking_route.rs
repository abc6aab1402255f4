//! Request a walking route between two addresses and print the path.
//!
//! Run with: cargo run --example walking_route -- "강남역" "선릉역" ["역삼역" ...]
//!
//! Needs `TMAP_APP_KEY` in the environment or a `.env` file.

use waypath::{RoutePlanner, TmapClient, TmapConfig, TravelMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: walking_route <start address> <end address> [waypoint address ...]");
        std::process::exit(2);
    }
    let waypoints: Vec<&str> = args[2..].iter().map(String::as_str).collect();

    let client = TmapClient::new(TmapConfig::from_env()?)?;
    let planner = RoutePlanner::new(&client, &client);

    let route = planner.route_by_address(TravelMode::Walking, &args[0], &args[1], &waypoints)?;

    println!("Route {} -> {}", route.request.start_name, route.request.end_name);
    if let Some(summary) = route.summary {
        println!(
            "  {:.0} m, about {:.0} min",
            summary.distance_m,
            summary.duration_s / 60.0
        );
    }
    println!("  {} points, {:.2} km along the path", route.path.len(), route.path.length_km());
    if let Some(center) = route.path.center() {
        println!("  map centre: ({:.5}, {:.5})", center.latitude, center.longitude);
    }

    println!("{}", serde_json::to_string_pretty(&route.path)?);
    Ok(())
}
