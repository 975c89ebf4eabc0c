//! Candidate appointment slots: half-hour boundaries in the clinic's
//! fixed 09:00-17:00 day, start inclusive, end exclusive.

const DAY_START_MINUTES: u32 = 9 * 60;
const DAY_END_MINUTES: u32 = 17 * 60;
const SLOT_MINUTES: u32 = 30;

/// All 16 candidate slots, "09:00" through "16:30", zero-padded.
pub fn generate_slots() -> Vec<String> {
    (DAY_START_MINUTES..DAY_END_MINUTES)
        .step_by(SLOT_MINUTES as usize)
        .map(|minutes| format!("{:02}:{:02}", minutes / 60, minutes % 60))
        .collect()
}

/// Candidate slots minus the booked times, generation order preserved.
/// Matching is exact on the formatted string.
pub fn available_slots(booked: &[String]) -> Vec<String> {
    generate_slots()
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}
