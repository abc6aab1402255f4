//! Find the recorded locations closest to an address.
//!
//! Run with: cargo run --example nearest_visits -- Records.json "서울시청" [k]
//!
//! Needs `TMAP_APP_KEY` in the environment or a `.env` file.

use std::fs::File;
use std::io::BufReader;

use waypath::{LocationHistory, NearestNeighborFinder, TmapClient, TmapConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: nearest_visits <Records.json> <address> [k]");
        std::process::exit(2);
    }
    let k: usize = match args.get(2) {
        Some(k) => k.parse()?,
        None => 5,
    };

    let history = LocationHistory::from_takeout_reader(BufReader::new(File::open(&args[0])?))?;
    println!("{} admitted history samples", history.len());

    let client = TmapClient::new(TmapConfig::from_env()?)?;
    let finder = NearestNeighborFinder::new(&history, &client);
    let result = finder.nearest_to_address(&args[1], k)?;

    println!(
        "Centre: {} ({:.5}, {:.5})",
        result.center.address, result.center.coordinate.latitude, result.center.coordinate.longitude
    );
    for (i, marker) in result.markers.iter().enumerate() {
        println!(
            "  {}. {:.3} km  t={}  ({:.5}, {:.5})",
            i + 1,
            marker.distance_km,
            marker.sample.timestamp_ms,
            marker.sample.coordinate.latitude,
            marker.sample.coordinate.longitude
        );
    }
    Ok(())
}
