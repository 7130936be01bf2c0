use super::*;

const THIRTY_MINUTES_MS: i64 = 30 * 60 * 1000;

#[tokio::test]
async fn thirty_minutes_on_city_bike_costs_sixty() {
    // Scenario: bike_1 at 120 RSD/h, returned at the Trg Republike center
    // after 30 simulated minutes.
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();
    backdate_rental(&manager, &rental.id, THIRTY_MINUTES_MS);

    let finished = manager.end_rental(end_input(&rental.id)).await.unwrap();

    assert_eq!(finished.status, RentalStatus::Finished);
    assert_eq!(finished.total_price, Some(60.0));
    assert_eq!(finished.end_lat, Some(44.8166));
    assert_eq!(finished.end_lng, Some(20.4602));
    assert_eq!(
        finished.return_photo.as_deref(),
        Some("photos/return_x.jpg")
    );

    // Bike released at the return location, not its pre-rental spot
    manager.store().read(|s| {
        let bike = s.bike("bike_1").unwrap();
        assert_eq!(bike.status, shared::models::BikeStatus::Available);
        assert_eq!(bike.lat, 44.8166);
        assert_eq!(bike.lng, 20.4602);
    });
}

#[tokio::test]
async fn return_outside_every_zone_fails_with_guidance() {
    // Scenario: end position far from any zone leaves the rental active and
    // the bike rented, and tells the caller where the nearest zone is.
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let err = manager
        .end_rental(EndRental {
            position: Point::new(44.9, 20.9),
            ..end_input(&rental.id)
        })
        .await
        .unwrap_err();

    let RentalError::NotInParkingZone { nearest } = err else {
        panic!("expected NotInParkingZone");
    };
    let nearest = nearest.expect("nearest zone hint");
    assert!(nearest.distance_meters > 0.0);
    manager
        .store()
        .read(|s| assert!(s.parking_zones.iter().any(|z| z.id == nearest.zone_id)));

    // No mutation happened
    manager.store().read(|s| {
        assert!(s.rental(&rental.id).unwrap().is_active());
        assert_eq!(
            s.bike("bike_1").unwrap().status,
            shared::models::BikeStatus::Rented
        );
    });
}

#[tokio::test]
async fn missing_photo_blocks_the_return() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let err = manager
        .end_rental(EndRental {
            photo_ref: "  ".to_string(),
            ..end_input(&rental.id)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RentalError::PhotoRequired));
    manager
        .store()
        .read(|s| assert!(s.rental(&rental.id).unwrap().is_active()));

    // Retry with a photo succeeds — the failed attempt left state intact
    assert!(manager.end_rental(end_input(&rental.id)).await.is_ok());
}

#[tokio::test]
async fn second_close_fails_and_changes_nothing() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();
    backdate_rental(&manager, &rental.id, THIRTY_MINUTES_MS);

    let finished = manager.end_rental(end_input(&rental.id)).await.unwrap();

    let err = manager
        .end_rental(EndRental {
            photo_ref: "photos/other.jpg".to_string(),
            ..end_input(&rental.id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RentalError::InvalidState(_)));

    // No double-charge, no photo overwrite
    manager.store().read(|s| {
        let stored = s.rental(&rental.id).unwrap();
        assert_eq!(stored.total_price, finished.total_price);
        assert_eq!(stored.return_photo, finished.return_photo);
        assert_eq!(stored.end_at, finished.end_at);
    });
}

#[tokio::test]
async fn rent_again_after_return() {
    let manager = create_test_manager();
    let first = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();
    manager.end_rental(end_input(&first.id)).await.unwrap();

    // Same user, same bike — the full cycle works again
    let second = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(bike_status(&manager, "bike_1"), shared::models::BikeStatus::Rented);
}

#[tokio::test]
async fn foreign_rental_reads_as_not_found() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let err = manager
        .end_rental(EndRental {
            user_id: Some("usr_2".to_string()),
            ..end_input(&rental.id)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RentalError::RentalNotFound(_)));

    // The owner can still close it
    assert!(
        manager
            .end_rental(EndRental {
                user_id: Some("usr_1".to_string()),
                ..end_input(&rental.id)
            })
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn finish_notification_carries_the_price() {
    let manager = create_test_manager();
    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();
    backdate_rental(&manager, &rental.id, THIRTY_MINUTES_MS);
    manager.end_rental(end_input(&rental.id)).await.unwrap();

    manager.store().read(|s| {
        // Newest first: finish notification precedes the start one
        assert_eq!(s.notifications.len(), 2);
        assert!(s.notifications[0].message.contains("60 RSD"));
        assert_eq!(s.notifications[0].related_rental_id, Some(rental.id.clone()));
    });
}
