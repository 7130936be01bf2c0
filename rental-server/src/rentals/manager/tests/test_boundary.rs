use super::*;
use shared::geo;

/// Point `meters` due north of the Trg Republike center.
fn north_of_trg(meters: f64) -> Point {
    let deg = meters / (6_371_000.0 * std::f64::consts::PI / 180.0);
    Point::new(44.8166 + deg, 20.4602)
}

#[tokio::test]
async fn return_exactly_on_zone_boundary_is_accepted() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    // Shrink the zone to the exact distance of the return point so the test
    // exercises the inclusive comparison, not float luck.
    let point = north_of_trg(180.0);
    let result: Result<(), ()> = manager.store().commit(|state| {
        let zone = state
            .parking_zones
            .iter_mut()
            .find(|z| z.id == "pz_1")
            .unwrap();
        zone.radius_meters = geo::haversine_meters(point, zone.center());
        // Leave only the one zone so the others cannot absorb the return
        let keep = zone.id.clone();
        state.parking_zones.retain(|z| z.id == keep);
        Ok(())
    });
    result.unwrap();

    let finished = manager
        .end_rental(EndRental {
            position: point,
            ..end_input(&rental.id)
        })
        .await
        .unwrap();
    assert_eq!(finished.status, RentalStatus::Finished);
}

#[tokio::test]
async fn one_meter_past_the_boundary_is_rejected() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let boundary = north_of_trg(180.0);
    let result: Result<(), ()> = manager.store().commit(|state| {
        let zone = state
            .parking_zones
            .iter_mut()
            .find(|z| z.id == "pz_1")
            .unwrap();
        zone.radius_meters = geo::haversine_meters(boundary, zone.center());
        let keep = zone.id.clone();
        state.parking_zones.retain(|z| z.id == keep);
        Ok(())
    });
    result.unwrap();

    let err = manager
        .end_rental(EndRental {
            position: north_of_trg(181.0),
            ..end_input(&rental.id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RentalError::NotInParkingZone { .. }));
}

#[tokio::test]
async fn no_zones_at_all_yields_no_nearest_hint() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let result: Result<(), ()> = manager.store().commit(|state| {
        state.parking_zones.clear();
        Ok(())
    });
    result.unwrap();

    let err = manager.end_rental(end_input(&rental.id)).await.unwrap_err();
    match err {
        RentalError::NotInParkingZone { nearest } => assert!(nearest.is_none()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn clock_skew_never_produces_a_negative_price() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    // A start timestamp from a device with a fast clock
    backdate_rental(&manager, &rental.id, -10 * 60 * 1000);

    let finished = manager.end_rental(end_input(&rental.id)).await.unwrap();
    assert_eq!(finished.total_price, Some(0.0));
}

#[tokio::test]
async fn ending_unknown_rental_fails() {
    let manager = create_test_manager();
    let err = manager.end_rental(end_input("ren_404")).await.unwrap_err();
    assert!(matches!(err, RentalError::RentalNotFound(_)));
}

#[tokio::test]
async fn missing_bike_during_close_is_reported() {
    // Data-integrity violation: the bike vanished while its rental was
    // active. The close must fail loudly, not corrupt the ledger.
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let result: Result<(), ()> = manager.store().commit(|state| {
        state.bikes.retain(|b| b.id != "bike_1");
        Ok(())
    });
    result.unwrap();

    let err = manager.end_rental(end_input(&rental.id)).await.unwrap_err();
    assert!(matches!(err, RentalError::BikeNotFound(_)));
    manager
        .store()
        .read(|s| assert!(s.rental(&rental.id).unwrap().is_active()));
}
