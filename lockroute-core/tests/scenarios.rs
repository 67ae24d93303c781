use geo::Point;
use lockroute_core::prelude::*;

fn planner(waypoints: &[(f64, f64)], locks: Vec<Lock>) -> RoutePlanner {
    let mut planner = RoutePlanner::default();
    planner.replace_locks(locks);
    for &(lon, lat) in waypoints {
        planner.add_waypoint(Point::new(lon, lat));
    }
    planner
}

#[test]
fn single_waypoint_has_no_route() {
    let planner = planner(&[(2.35, 48.85)], builtin_locks());

    assert!(planner.route().is_none());
    assert!(planner.locks_on_route().is_empty());
    assert!(planner.eta().is_none());
}

#[test]
fn short_route_with_one_lock() {
    let mut planner = planner(
        &[(2.35, 48.85), (2.45, 48.85)],
        vec![Lock::new("l1", "Test Lock", Point::new(2.40, 48.85))],
    );
    planner.update_settings(&SettingsPatch {
        boat_speed_kmh: Some(8.0),
        lock_transit_min: Some(30.0),
    });

    let route = planner.route().expect("route for two waypoints");
    assert!(route.distance_km > 0.0);
    assert_eq!(planner.locks_on_route().len(), 1);

    let eta = planner.eta().expect("eta with a route");
    assert_eq!(eta.lock_count, 1);
    assert_eq!(eta.lock_time_min, 30.0);
    assert_eq!(eta.total_time_min, eta.water_time_min + eta.lock_time_min);
    assert_eq!(eta.distance_km, route.distance_km);
}

#[test]
fn eighty_km_without_locks() {
    let eta = calculate_eta(&lockroute_core::EtaInput {
        distance_km: 80.0,
        boat_speed_kmh: 8.0,
        lock_count: 0,
        lock_transit_min: 30.0,
    });
    assert_eq!(eta.water_time_min, 600.0);
    assert_eq!(eta.total_time_min, 600.0);
    assert_eq!(eta.total_formatted, "10 h 0 min");
}

#[test]
fn forty_km_with_three_locks() {
    let eta = calculate_eta(&lockroute_core::EtaInput {
        distance_km: 40.0,
        boat_speed_kmh: 8.0,
        lock_count: 3,
        lock_transit_min: 30.0,
    });
    assert_eq!(eta.water_time_min, 300.0);
    assert_eq!(eta.lock_time_min, 90.0);
    assert_eq!(eta.total_time_min, 390.0);
}

#[test]
fn distant_lock_never_on_paris_rouen_route() {
    let far = Lock::new("far", "Marseille area", Point::new(5.0, 43.0));
    let mut locks = builtin_locks();
    locks.push(far);

    let planner = planner(&[(2.35, 48.85), (1.70, 49.10), (1.10, 49.44)], locks);
    assert!(planner.route().is_some());
    assert!(planner.locks_on_route().iter().all(|l| l.id != "far"));
}

#[test]
fn seine_locks_on_a_route_through_them() {
    // Waypoints placed on Bougival and Meulan locks
    let planner = planner(
        &[(2.35, 48.85), (2.1357, 48.8664), (1.9052, 49.0014), (1.10, 49.44)],
        builtin_locks(),
    );

    let ids: Vec<&str> = planner
        .locks_on_route()
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert!(ids.contains(&"mock-lock-001"));
    assert!(ids.contains(&"mock-lock-002"));
    // Candidate order is preserved
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(planner.eta().unwrap().lock_count, ids.len());
}

#[test]
fn coincident_waypoints_still_estimate() {
    let planner = planner(
        &[(2.40, 48.85), (2.40, 48.85)],
        vec![Lock::new("here", "Here", Point::new(2.40, 48.85))],
    );

    assert_eq!(planner.route().unwrap().distance_km, 0.0);
    assert!(planner.locks_on_route().is_empty());
    let eta = planner.eta().unwrap();
    assert_eq!(eta.total_time_min, 0.0);
    assert_eq!(eta.total_formatted, "0 min");
}

#[test]
fn derived_state_tracks_every_mutation() {
    let mut planner = planner(&[], builtin_locks());
    planner.set_signs(builtin_signs());

    let start = planner.add_waypoint(Point::new(2.35, 48.85));
    assert!(planner.guidance().is_some());

    let end = planner.add_waypoint(Point::new(1.10, 49.44));
    let before = planner.eta().unwrap().total_time_min;

    planner.update_settings(&SettingsPatch::speed(16.0));
    assert!(planner.eta().unwrap().total_time_min < before);

    planner.update_waypoint_position(end, Point::new(1.9052, 49.0014));
    assert!(planner.route().unwrap().distance_km < 100.0);

    planner.remove_waypoint(start);
    assert!(planner.route().is_none());
    assert!(planner.eta().is_none());
    assert!(planner.locks_on_route().is_empty());

    planner.clear_waypoints();
    assert!(planner.waypoints().is_empty());
    assert_eq!(planner.signs().len(), 13);
}

#[test]
fn corridor_width_is_the_same_at_both_ends_of_a_long_route() {
    let east_of_meridian = |id: &str, lat: f64, metres: f64| {
        let dlon = (metres / (6_371_008.8 * lat.to_radians().cos())).to_degrees();
        Lock::new(id, id, Point::new(2.35 + dlon, lat))
    };
    let locks = vec![
        east_of_meridian("north-96m", 48.8, 96.0),
        east_of_meridian("north-104m", 48.8, 104.0),
        east_of_meridian("south-96m", 43.05, 96.0),
        east_of_meridian("south-104m", 43.05, 104.0),
    ];

    let planner = planner(&[(2.35, 43.0), (2.35, 48.85)], locks);
    let matched: Vec<&str> = planner
        .locks_on_route()
        .iter()
        .map(|lock| lock.id.as_str())
        .collect();

    assert_eq!(matched, vec!["north-96m", "south-96m"]);
    assert_eq!(planner.eta().map(|eta| eta.lock_count), Some(2));
}
