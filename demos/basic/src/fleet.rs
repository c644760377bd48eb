//! Embedded demo fleet, loaded from CSV.
//!
//! ```csv
//! driver_id,x,y,speed_kmh,route
//! 1,0,0,40,1 2 3 4 5
//! 4,3,9,35,
//! ```
//!
//! `route` is a space-separated list of waypoint ids and may be empty.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use rd_core::{Driver, NodeId, Point};

pub const FLEET_CSV: &str = "\
driver_id,x,y,speed_kmh,route\n\
1,0,0,40,1 2 3 4 5\n\
2,5,5,50,6 7 3 8 9\n\
3,10,-3,60,10 11 4 12\n\
4,-4,6,35,13 14 15 5\n\
";

#[derive(Deserialize)]
struct DriverRecord {
    driver_id: u32,
    x:         f64,
    y:         f64,
    speed_kmh: f64,
    route:     String,
}

/// Parse drivers from any CSV source.
pub fn load_drivers_reader<R: Read>(reader: R) -> Result<Vec<Driver>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut drivers = Vec::new();

    for (line, result) in csv_reader.deserialize::<DriverRecord>().enumerate() {
        let row = result.with_context(|| format!("driver row {}", line + 1))?;
        let route = parse_route(&row.route)
            .with_context(|| format!("route of driver {}", row.driver_id))?;
        drivers.push(
            Driver::new(row.driver_id, Point::new(row.x, row.y), row.speed_kmh).with_route(route),
        );
    }
    Ok(drivers)
}

fn parse_route(s: &str) -> Result<Vec<NodeId>> {
    s.split_whitespace()
        .map(|n| n.parse::<u32>().map(NodeId).with_context(|| format!("invalid waypoint {n:?}")))
        .collect()
}
