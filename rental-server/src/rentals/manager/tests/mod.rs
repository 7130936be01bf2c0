use super::*;
use crate::store::{StateStore, seed};
use shared::models::RentalStatus;

mod test_boundary;
mod test_core;
mod test_flows;

fn create_test_manager() -> RentalManager {
    RentalManager::new(Arc::new(StateStore::in_memory(seed::initial_state())))
}

fn start_input(user_id: &str, bike_id: &str) -> StartRental {
    StartRental {
        user_id: user_id.to_string(),
        bike_id: bike_id.to_string(),
        position: Some(Point::new(44.8158, 20.4600)),
    }
}

/// End at the Trg Republike zone center with a valid photo.
fn end_input(rental_id: &str) -> EndRental {
    EndRental {
        rental_id: rental_id.to_string(),
        user_id: None,
        position: Point::new(44.8166, 20.4602),
        photo_ref: "photos/return_x.jpg".to_string(),
    }
}

/// Shift a rental's start back in time to simulate elapsed duration.
fn backdate_rental(manager: &RentalManager, rental_id: &str, by_ms: i64) {
    let result: Result<(), ()> = manager.store().commit(|state| {
        let rental = state
            .rentals
            .iter_mut()
            .find(|r| r.id == rental_id)
            .expect("rental to backdate");
        rental.start_at -= by_ms;
        Ok(())
    });
    result.expect("backdate commit");
}

fn bike_status(manager: &RentalManager, bike_id: &str) -> shared::models::BikeStatus {
    manager
        .store()
        .read(|s| s.bike(bike_id).expect("bike").status)
}
