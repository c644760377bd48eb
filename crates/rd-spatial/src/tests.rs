//! Unit tests for rd-spatial.
//!
//! All tests use hand-crafted or seeded-random snapshots.

#[cfg(test)]
mod helpers {
    use rand::rngs::SmallRng;
    use rand::Rng;

    use rd_core::{Driver, NodeId, Point};

    /// The three-driver roster from the dispatch walkthrough.
    ///
    ///   1:(0,0) 40 km/h   2:(5,5) 50 km/h   3:(10,-3) 60 km/h
    pub fn three_drivers() -> Vec<Driver> {
        vec![
            Driver::new(1, Point::new(0.0, 0.0), 40.0),
            Driver::new(2, Point::new(5.0, 5.0), 50.0),
            Driver::new(3, Point::new(10.0, -3.0), 60.0),
        ]
    }

    /// Four overlapping routes sharing waypoints 3, 4 and 5.
    ///
    /// ```text
    ///   route 1:  1  2  3  4  5
    ///   route 2:  6  7  3  8  9
    ///   route 3: 10 11  4 12
    ///   route 4: 13 14 15  5
    /// ```
    pub fn four_routes() -> Vec<Vec<NodeId>> {
        [
            vec![1, 2, 3, 4, 5],
            vec![6, 7, 3, 8, 9],
            vec![10, 11, 4, 12],
            vec![13, 14, 15, 5],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(NodeId).collect())
        .collect()
    }

    pub fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    pub fn random_drivers(rng: &mut SmallRng, n: usize) -> Vec<Driver> {
        (0..n)
            .map(|i| {
                let p = Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
                Driver::new(i as u32 * 3 + 1, p, rng.gen_range(0.0..80.0))
            })
            .collect()
    }

    /// Sparse random routes over node ids `0..max_node`.
    pub fn random_routes(rng: &mut SmallRng, routes: usize, max_node: u32) -> Vec<Vec<NodeId>> {
        (0..routes)
            .map(|_| {
                let len = rng.gen_range(0..5);
                (0..len).map(|_| NodeId(rng.gen_range(0..max_node))).collect()
            })
            .collect()
    }
}

// ── Proximity: one-shot heap scan ─────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rd_core::{Driver, DriverId, Point};

    use crate::{SpatialError, nearest};

    #[test]
    fn picks_closest_driver() {
        let drivers = super::helpers::three_drivers();
        let hit = nearest(&drivers, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(hit.driver.id, DriverId(1));
        assert_eq!(hit.driver.position, Point::new(0.0, 0.0));
        assert!((hit.distance_km - 1.414_213_562).abs() < 1e-6, "got {}", hit.distance_km);
    }

    #[test]
    fn empty_pool() {
        assert_eq!(nearest(&[], Point::new(0.0, 0.0)), Err(SpatialError::EmptyDriverPool));
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        // 9 and 4 are both exactly 5 km from the origin; input order must not matter.
        let a = vec![
            Driver::new(9, Point::new(3.0, 4.0), 30.0),
            Driver::new(4, Point::new(-4.0, -3.0), 30.0),
            Driver::new(1, Point::new(10.0, 0.0), 30.0),
        ];
        let mut b = a.clone();
        b.reverse();
        for drivers in [a, b] {
            let hit = nearest(&drivers, Point::new(0.0, 0.0)).unwrap();
            assert_eq!(hit.driver.id, DriverId(4));
            assert_eq!(hit.distance_km, 5.0);
        }
    }

    #[test]
    fn co_located_drivers() {
        let drivers = vec![
            Driver::new(7, Point::new(2.0, 2.0), 10.0),
            Driver::new(5, Point::new(2.0, 2.0), 10.0),
        ];
        let hit = nearest(&drivers, Point::new(2.0, 2.0)).unwrap();
        assert_eq!(hit.driver.id, DriverId(5));
        assert_eq!(hit.distance_km, 0.0);
    }

    #[test]
    fn matches_brute_force_scan() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.gen_range(1..40);
            let drivers = super::helpers::random_drivers(&mut rng, n);
            let at = Point::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0));

            let expected = drivers
                .iter()
                .min_by(|a, b| {
                    a.position
                        .distance(at)
                        .total_cmp(&b.position.distance(at))
                        .then(a.id.cmp(&b.id))
                })
                .unwrap();

            let hit = nearest(&drivers, at).unwrap();
            assert_eq!(hit.driver.id, expected.id);
            assert!((hit.distance_km - expected.position.distance(at)).abs() < 1e-9);
        }
    }
}

// ── Proximity: R-tree index ───────────────────────────────────────────────────

#[cfg(test)]
mod geo_index {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rd_core::{Driver, DriverId, Point};

    use crate::{GeoIndex, SpatialError, nearest};

    #[test]
    fn empty_index() {
        let idx = GeoIndex::build(&[]);
        assert!(idx.is_empty());
        assert_eq!(idx.nearest(Point::new(0.0, 0.0)), Err(SpatialError::EmptyDriverPool));
        assert!(idx.k_nearest(Point::new(0.0, 0.0), 3).is_empty());
    }

    #[test]
    fn nearest_walkthrough() {
        let idx = GeoIndex::build(&super::helpers::three_drivers());
        assert_eq!(idx.len(), 3);
        let hit = idx.nearest(Point::new(1.0, 1.0)).unwrap();
        assert_eq!(hit.id, DriverId(1));
        assert!((hit.distance_km - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        let drivers = vec![
            Driver::new(9, Point::new(0.0, 1.0), 30.0),
            Driver::new(2, Point::new(1.0, 0.0), 30.0),
            Driver::new(6, Point::new(0.0, -1.0), 30.0),
        ];
        let idx = GeoIndex::build(&drivers);
        assert_eq!(idx.nearest(Point::new(0.0, 0.0)).unwrap().id, DriverId(2));
    }

    #[test]
    fn k_nearest_order_and_ties() {
        let drivers = vec![
            Driver::new(1, Point::new(0.0, 0.0), 30.0),
            Driver::new(8, Point::new(0.0, 2.0), 30.0),
            Driver::new(3, Point::new(2.0, 0.0), 30.0),
            Driver::new(5, Point::new(9.0, 9.0), 30.0),
        ];
        let idx = GeoIndex::build(&drivers);
        let ids: Vec<_> = idx
            .k_nearest(Point::new(0.0, 0.0), 2)
            .into_iter()
            .map(|n| n.id)
            .collect();
        // 3 and 8 are tied for second place; the lower id wins the slot.
        assert_eq!(ids, vec![DriverId(1), DriverId(3)]);

        let all = idx.k_nearest(Point::new(0.0, 0.0), 10);
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().unwrap().id, DriverId(5));
    }

    #[test]
    fn within_radius_sorted() {
        let idx = GeoIndex::build(&super::helpers::three_drivers());
        let hits = idx.within_radius(Point::new(1.0, 1.0), 6.0);
        let ids: Vec<_> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![DriverId(1), DriverId(2)]);
        // (5,5) sits exactly 5 km from (2,1); the boundary is inclusive.
        let edge = idx.within_radius(Point::new(2.0, 1.0), 5.0);
        assert!(edge.iter().any(|n| n.id == DriverId(2)));
        assert!(idx.within_radius(Point::new(100.0, 100.0), 1.0).is_empty());
    }

    #[test]
    fn within_radius_rejects_negative_and_nan() {
        let idx = GeoIndex::build(&super::helpers::three_drivers());
        assert!(idx.within_radius(Point::new(1.0, 1.0), -6.0).is_empty());
        assert!(idx.within_radius(Point::new(1.0, 1.0), f64::NAN).is_empty());
        // Zero radius still finds a driver sitting exactly on the point.
        let hits = idx.within_radius(Point::new(0.0, 0.0), 0.0);
        assert_eq!(hits.iter().map(|n| n.id).collect::<Vec<_>>(), vec![DriverId(1)]);
    }

    #[test]
    fn agrees_with_heap_scan() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let n = rng.gen_range(1..60);
            let drivers = super::helpers::random_drivers(&mut rng, n);
            let idx = GeoIndex::build(&drivers);
            for _ in 0..5 {
                let at = Point::new(rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0));
                let a = nearest(&drivers, at).unwrap();
                let b = idx.nearest(at).unwrap();
                assert_eq!(a.driver.id, b.id);
                assert_eq!(a.distance_km, b.distance_km);
            }
        }
    }
}

// ── Route graph construction ──────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use rd_core::{Driver, NodeId, Point};

    use crate::{RouteGraph, RouteGraphBuilder};

    #[test]
    fn empty_build() {
        let g = RouteGraph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn four_route_structure() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        assert_eq!(g.node_count(), 15);
        assert_eq!(g.edge_count(), 14);
        // 3 joins routes one and two; 4 joins one and three; 5 joins one and four.
        assert_eq!(g.degree(NodeId(3)), 4);
        assert_eq!(g.degree(NodeId(4)), 4);
        assert_eq!(g.degree(NodeId(5)), 2);
        let n3: Vec<_> = g.neighbors(NodeId(3)).collect();
        assert_eq!(n3, super::helpers::ids(&[2, 4, 7, 8]));
    }

    #[test]
    fn edges_are_symmetric() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        for &u in g.nodes() {
            for v in g.neighbors(u) {
                assert!(g.has_edge(v, u), "{u}–{v} missing reverse");
            }
        }
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut b = RouteGraphBuilder::new();
        b.add_route(&super::helpers::ids(&[1, 2, 3]));
        b.add_route(&super::helpers::ids(&[3, 2, 1]));
        b.add_edge(NodeId(1), NodeId(2));
        let g = b.build();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(NodeId(2)), 2);
    }

    #[test]
    fn repeated_waypoint_adds_no_self_loop() {
        let g = RouteGraph::from_routes([super::helpers::ids(&[4, 4, 5])]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.has_edge(NodeId(4), NodeId(4)));
    }

    #[test]
    fn single_waypoint_route_is_isolated_node() {
        let g = RouteGraph::from_routes([super::helpers::ids(&[1, 2]), super::helpers::ids(&[99])]);
        assert!(g.contains(NodeId(99)));
        assert_eq!(g.degree(NodeId(99)), 0);
        assert!(!g.is_connected(NodeId(1), NodeId(99)));
    }

    #[test]
    fn empty_routes_ignored() {
        let g = RouteGraph::from_routes([Vec::<NodeId>::new(), Vec::new()]);
        assert!(g.is_empty());
    }

    #[test]
    fn from_drivers_uses_routes() {
        let drivers = vec![
            Driver::new(1, Point::default(), 40.0).with_route([1u32, 2]),
            Driver::new(2, Point::default(), 40.0),
        ];
        let g = RouteGraph::from_drivers(&drivers);
        assert_eq!(g.node_count(), 2);
        assert!(g.has_edge(NodeId(2), NodeId(1)));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut rng = SmallRng::seed_from_u64(3);
        let routes = super::helpers::random_routes(&mut rng, 20, 30);
        let a = RouteGraph::from_routes(&routes);
        let b = RouteGraph::from_routes(&routes);
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.edge_count(), b.edge_count());
        for &u in a.nodes() {
            for &v in a.nodes() {
                assert_eq!(a.is_connected(u, v), b.is_connected(u, v));
            }
        }
    }
}

// ── Shortest path ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod shortest_path {
    use std::collections::{BTreeMap, BTreeSet, VecDeque};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rd_core::NodeId;

    use crate::{BfsPathFinder, Path, PathFinder, RouteGraph, SpatialError, shortest_path};

    #[test]
    fn four_route_path() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        let p = shortest_path(&g, NodeId(1), NodeId(12)).unwrap();
        assert_eq!(p.nodes(), super::helpers::ids(&[1, 2, 3, 4, 12]).as_slice());
        assert_eq!(p.hops(), 4);
        assert_eq!(p.source(), NodeId(1));
        assert_eq!(p.destination(), NodeId(12));
    }

    #[test]
    fn undirected_reverse_path() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        let p = BfsPathFinder.shortest_path(&g, NodeId(12), NodeId(1)).unwrap();
        assert_eq!(p.nodes(), super::helpers::ids(&[12, 4, 3, 2, 1]).as_slice());
    }

    #[test]
    fn source_equals_destination() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        let p = shortest_path(&g, NodeId(7), NodeId(7)).unwrap();
        assert_eq!(p.nodes(), &[NodeId(7)]);
        assert!(p.is_trivial());

        // Holds even for a node the graph has never seen.
        let p = shortest_path(&RouteGraph::empty(), NodeId(500), NodeId(500)).unwrap();
        assert_eq!(p.nodes(), &[NodeId(500)]);
    }

    #[test]
    fn path_from_nodes_is_never_empty() {
        assert_eq!(Path::try_from(Vec::<NodeId>::new()), Err(SpatialError::EmptyPath));

        let p = Path::try_from(super::helpers::ids(&[3, 4, 12])).unwrap();
        assert_eq!(p.hops(), 2);
        assert_eq!(p.source(), NodeId(3));
        assert_eq!(Vec::from(p), super::helpers::ids(&[3, 4, 12]));
    }

    #[test]
    fn unreachable_destination() {
        let mut routes = super::helpers::four_routes();
        routes.push(super::helpers::ids(&[40, 41]));
        let g = RouteGraph::from_routes(routes);
        assert_eq!(
            shortest_path(&g, NodeId(1), NodeId(41)),
            Err(SpatialError::NoPath { from: NodeId(1), to: NodeId(41) }),
        );
        assert!(shortest_path(&g, NodeId(1), NodeId(999)).is_err());
        assert!(shortest_path(&g, NodeId(999), NodeId(1)).is_err());
    }

    #[test]
    fn prefers_fewest_hops_then_lowest_ids() {
        // Two 2-hop routes 1→2→4 and 1→3→4, plus a 3-hop detour.
        let g = RouteGraph::from_routes([
            super::helpers::ids(&[1, 3, 4]),
            super::helpers::ids(&[1, 2, 4]),
            super::helpers::ids(&[1, 5, 6, 4]),
        ]);
        let p = shortest_path(&g, NodeId(1), NodeId(4)).unwrap();
        assert_eq!(p.nodes(), super::helpers::ids(&[1, 2, 4]).as_slice());
    }

    /// Independent hop-count BFS over a `BTreeMap` adjacency.
    fn reference_hops(routes: &[Vec<NodeId>], from: NodeId, to: NodeId) -> Option<usize> {
        let mut adj: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
        for r in routes {
            for w in r.windows(2) {
                adj.entry(w[0]).or_default().insert(w[1]);
                adj.entry(w[1]).or_default().insert(w[0]);
            }
        }
        let mut dist = BTreeMap::from([(from, 0usize)]);
        let mut queue = VecDeque::from([from]);
        while let Some(u) = queue.pop_front() {
            let d = dist[&u];
            for &v in adj.get(&u).into_iter().flatten() {
                if !dist.contains_key(&v) {
                    dist.insert(v, d + 1);
                    queue.push_back(v);
                }
            }
        }
        dist.get(&to).copied()
    }

    #[test]
    fn matches_reference_bfs_on_random_graphs() {
        let mut rng = SmallRng::seed_from_u64(1234);
        for _ in 0..100 {
            let count = rng.gen_range(1..15);
            let routes = super::helpers::random_routes(&mut rng, count, 25);
            let g = RouteGraph::from_routes(&routes);
            for _ in 0..10 {
                let from = NodeId(rng.gen_range(0..25));
                let to = NodeId(rng.gen_range(0..25));
                match (shortest_path(&g, from, to), reference_hops(&routes, from, to)) {
                    (Ok(p), Some(hops)) => {
                        assert_eq!(p.hops(), hops, "{from} → {to}");
                        assert_eq!(p.source(), from);
                        assert_eq!(p.destination(), to);
                        for w in p.nodes().windows(2) {
                            assert!(g.has_edge(w[0], w[1]), "path uses missing edge {}–{}", w[0], w[1]);
                        }
                    }
                    (Err(e), None) => assert_eq!(e, SpatialError::NoPath { from, to }),
                    (got, want) => panic!("{from} → {to}: got {got:?}, reference {want:?}"),
                }
            }
        }
    }

    #[test]
    fn node_set_membership() {
        let g = RouteGraph::from_routes(super::helpers::four_routes());
        let p = shortest_path(&g, NodeId(1), NodeId(12)).unwrap();
        let set = p.node_set();
        assert_eq!(set.len(), 5);
        assert!(set.contains(&NodeId(4)));
        assert!(!set.contains(&NodeId(5)));
    }
}
