//! Collection names used across the document store. The store is
//! schema-less; these constants are the only registry of what exists.

pub const ADMINS: &str = "admins";
pub const DOCTORS: &str = "doctors";
pub const PATIENTS: &str = "patients";
pub const APPOINTMENTS: &str = "appointments";
pub const HEALTH_RECORDS: &str = "healthRecords";

/// Collection holding profiles for a given role, e.g. "DOCTOR" -> "doctors".
pub fn for_role(role: &str) -> String {
    format!("{}s", role.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_maps_to_collection() {
        assert_eq!(for_role("ADMIN"), "admins");
        assert_eq!(for_role("Doctor"), "doctors");
        assert_eq!(for_role("PATIENT"), "patients");
    }
}
