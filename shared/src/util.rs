/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed resource id, e.g. `ren_7f3a…`.
///
/// The prefix keeps ids self-describing in the state file (`usr_`, `bike_`,
/// `ren_`, `pz_`, `not_`, `iss_`); the UUID part guarantees uniqueness across
/// devices that may later merge state through sync.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_ids_are_unique_and_prefixed() {
        let a = prefixed_id("ren");
        let b = prefixed_id("ren");
        assert!(a.starts_with("ren_"));
        assert_ne!(a, b);
    }
}
