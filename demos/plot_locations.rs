//! Plots a handful of Tennessee cities and prints the map snapshot.
//!
//! Run with `RUST_LOG=debug` to see layers and controls being added.

use crimpy::prelude::*;

fn main() -> crimpy::Result<()> {
    crimpy::init_logging();

    let cities: Vec<Location> = serde_json::from_str(
        r#"[
            {"name": "Knoxville", "latitude": 35.9606, "longitude": -83.9207},
            {"name": "Nashville", "latitude": 36.1627, "longitude": -86.7816},
            {"name": "Memphis", "latitude": 35.1495, "longitude": -90.0490},
            {"name": "Chattanooga", "latitude": 35.0456, "longitude": -85.3097}
        ]"#,
    )?;

    let mut map = MapBuilder::new()
        .zoom(6.0)
        .basemap("Esri.WorldTopoMap")
        .build()?;
    map.add_search_control(Position::TopLeft, SearchOptions::default())?;
    map.add_toolbar(Position::TopRight)?;
    add_locations_to_map_with(&mut map, &cities, ClusterMode::Grouped)?;

    for event in map.process_events() {
        log::debug!("{:?}", event);
    }

    println!("{}", serde_json::to_string_pretty(&map.to_json())?);
    println!(
        "tag {} / lucky number {}",
        generate_random_string(&RandomStringOptions::default())?,
        generate_lucky_number(3)?
    );
    Ok(())
}
