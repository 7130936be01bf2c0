use super::*;

#[tokio::test]
async fn start_rental_flips_bike_and_opens_ledger() {
    let manager = create_test_manager();

    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    assert_eq!(rental.status, RentalStatus::Active);
    assert_eq!(rental.bike_id, "bike_1");
    assert_eq!(rental.start_lat, Some(44.8158));
    assert_eq!(bike_status(&manager, "bike_1"), shared::models::BikeStatus::Rented);

    // Notification appended newest first
    manager.store().read(|s| {
        assert_eq!(s.notifications.len(), 1);
        assert_eq!(s.notifications[0].user_id, "usr_1");
        assert_eq!(s.notifications[0].related_rental_id, Some(rental.id.clone()));
    });
}

#[tokio::test]
async fn start_rental_unknown_bike_fails() {
    let manager = create_test_manager();

    let err = manager
        .start_rental(start_input("usr_1", "bike_404"))
        .await
        .unwrap_err();

    assert!(matches!(err, RentalError::BikeNotFound(_)));
    manager.store().read(|s| assert!(s.rentals.is_empty()));
}

#[tokio::test]
async fn start_rental_rejects_maintenance_bike() {
    let manager = create_test_manager();

    let err = manager
        .start_rental(start_input("usr_1", "bike_9"))
        .await
        .unwrap_err();

    assert!(matches!(err, RentalError::BikeUnavailable(_)));
    assert_eq!(
        bike_status(&manager, "bike_9"),
        shared::models::BikeStatus::Maintenance
    );
}

#[tokio::test]
async fn second_rental_for_same_user_fails() {
    // Scenario: U1 holds R1 on B1; startRental(U1, B2) must fail and leave
    // B2 untouched.
    let manager = create_test_manager();
    let first = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let err = manager
        .start_rental(start_input("usr_1", "bike_2"))
        .await
        .unwrap_err();

    match err {
        RentalError::AlreadyActive(id) => assert_eq!(id, first.id),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        bike_status(&manager, "bike_2"),
        shared::models::BikeStatus::Available
    );
    manager.store().read(|s| assert_eq!(s.rentals.len(), 1));
}

#[tokio::test]
async fn rented_bike_is_exclusive_across_users() {
    let manager = create_test_manager();
    manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let err = manager
        .start_rental(start_input("usr_2", "bike_1"))
        .await
        .unwrap_err();

    assert!(matches!(err, RentalError::BikeUnavailable(_)));

    // Exactly one active rental references the bike
    manager.store().read(|s| {
        let active: Vec<_> = s
            .rentals
            .iter()
            .filter(|r| r.bike_id == "bike_1" && r.is_active())
            .collect();
        assert_eq!(active.len(), 1);
    });
}

#[tokio::test]
async fn active_rental_lookup() {
    let manager = create_test_manager();
    assert!(manager.active_rental_for("usr_1").is_none());

    let rental = manager
        .start_rental(start_input("usr_1", "bike_1"))
        .await
        .unwrap();

    let active = manager.active_rental_for("usr_1").unwrap();
    assert_eq!(active.id, rental.id);
    assert!(manager.active_rental_for("usr_2").is_none());
}
