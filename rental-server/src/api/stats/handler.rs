//! Dashboard aggregates

use axum::{Json, extract::State};
use serde::Serialize;

use shared::models::{BikeStatus, IssueStatus, RentalStatus};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::rentals::money::round2;
use crate::utils::AppResult;

#[derive(Serialize)]
pub struct BikeStats {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub disabled: usize,
}

#[derive(Serialize)]
pub struct RentalStats {
    pub total: usize,
    pub active: usize,
    pub finished: usize,
    /// Sum of finished rental prices, in RSD
    pub revenue: f64,
}

#[derive(Serialize)]
pub struct UserStats {
    pub total: usize,
}

#[derive(Serialize)]
pub struct IssueStats {
    pub total: usize,
    pub open: usize,
}

#[derive(Serialize)]
pub struct DashboardStats {
    pub bikes: BikeStats,
    pub rentals: RentalStats,
    pub users: UserStats,
    pub issues: IssueStats,
}

/// GET /api/stats
pub async fn dashboard(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.store.read(|s| {
        let count_bikes =
            |status: BikeStatus| s.bikes.iter().filter(|b| b.status == status).count();

        let revenue: f64 = s
            .rentals
            .iter()
            .filter(|r| r.status == RentalStatus::Finished)
            .filter_map(|r| r.total_price)
            .sum();

        DashboardStats {
            bikes: BikeStats {
                total: s.bikes.len(),
                available: count_bikes(BikeStatus::Available),
                rented: count_bikes(BikeStatus::Rented),
                maintenance: count_bikes(BikeStatus::Maintenance),
                disabled: count_bikes(BikeStatus::Disabled),
            },
            rentals: RentalStats {
                total: s.rentals.len(),
                active: s.rentals.iter().filter(|r| r.is_active()).count(),
                finished: s
                    .rentals
                    .iter()
                    .filter(|r| r.status == RentalStatus::Finished)
                    .count(),
                revenue: round2(revenue),
            },
            users: UserStats {
                total: s.users.len(),
            },
            issues: IssueStats {
                total: s.issues.len(),
                open: s
                    .issues
                    .iter()
                    .filter(|i| i.status == IssueStatus::Open)
                    .count(),
            },
        }
    });

    Ok(Json(stats))
}
