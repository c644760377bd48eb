//! basic: a walkthrough of the ride_dispatch engine.
//!
//! Loads a four-driver fleet, serves one immediate request by proximity,
//! one by route overlap, then replays two rides booked for later in the
//! evening.  Log verbosity is fixed by `LOG_LEVEL`.

mod fleet;

use std::io::Cursor;

use anyhow::Result;
use tracing::Level;

use rd_core::{DispatchConfig, DriverId, Point, Rider};
use rd_dispatch::{Assignment, Dispatcher, RideQueue, SharedRoster};
use rd_match::Strategy;
use rd_spatial::RouteGraph;

use fleet::{FLEET_CSV, load_drivers_reader};

const LOG_LEVEL: Level = Level::INFO;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(LOG_LEVEL).init();

    println!("=== basic: ride_dispatch walkthrough ===");

    // 1. Fleet.
    let drivers = load_drivers_reader(Cursor::new(FLEET_CSV))?;
    let roster = SharedRoster::from_drivers(drivers)?;
    {
        let r = roster.read();
        let graph = RouteGraph::from_drivers(r.drivers());
        println!(
            "Fleet: {} drivers | route graph: {} waypoints, {} links",
            r.len(),
            graph.node_count(),
            graph.edge_count(),
        );
    }
    let dispatcher = Dispatcher::new(roster, DispatchConfig::default())?;

    // 2. Immediate request: closest driver wins and drives to the rider.
    println!("\n--- Immediate ride ---");
    let a = dispatcher.assign_immediate(&Rider::new(1001, Point::new(1.0, 1.0)))?;
    report(&a);

    // 3. Route request: best overlap between the rider's trip and planned routes.
    println!("\n--- Route-matched ride ---");
    let rider = Rider::new(1004, Point::new(1.0, 1.0)).with_trip(1u32, 12u32);
    let a = dispatcher.assign_by_route(&rider)?;
    report(&a);
    let path: Vec<String> = a.rider_path.iter().map(|n| n.get().to_string()).collect();
    println!("  rider path: {}", path.join(" -> "));

    // An isolated destination cannot be reached from the rider's pickup.
    dispatcher
        .roster()
        .add_driver(rd_core::Driver::new(5, Point::new(20.0, 20.0), 30.0).with_route([40u32]))?;
    let stranded = Rider::new(1005, Point::new(1.0, 1.0)).with_trip(1u32, 40u32);
    match dispatcher.assign_by_route(&stranded) {
        Ok(a) => report(&a),
        Err(e) if e.is_no_path() => println!("Rider 1005: {e}"),
        Err(e) => return Err(e.into()),
    }

    // 4. Routes on file.
    println!("\n--- Driver routes ---");
    for id in [DriverId(1), DriverId(2)] {
        let route = dispatcher.roster().read().route(id)?.to_vec();
        let route: Vec<String> = route.iter().map(|n| n.get().to_string()).collect();
        println!("  {id}: {}", route.join(" -> "));
    }

    // 5. Scheduled rides, replayed in booking order.
    println!("\n--- Scheduled rides ---");
    let mut queue = RideQueue::new();
    queue.schedule(Rider::new(1002, Point::new(7.0, 8.0)), "17:30".parse()?, Strategy::Nearest);
    queue.schedule(Rider::new(1003, Point::new(2.0, 2.0)), "18:15".parse()?, Strategy::Nearest);

    for outcome in dispatcher.process_scheduled(&mut queue) {
        print!("[{}] ", outcome.request.at);
        match outcome.result {
            Ok(a) => report(&a),
            Err(e) => println!("{} not assigned: {e}", outcome.request.rider.id),
        }
    }

    Ok(())
}

fn report(a: &Assignment) {
    let overlap = a.overlap.map(|o| format!(", overlap {o}")).unwrap_or_default();
    println!(
        "{} -> {} ({}{overlap}): {:.2} km, fare {:.2}, ETA {}",
        a.rider, a.driver, a.strategy, a.quote.distance_km, a.quote.fare, a.quote.eta,
    );
}
