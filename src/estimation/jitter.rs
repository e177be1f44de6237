//! Seeded pseudo-random helpers.
//!
//! The same seed always yields the same value, so a reading taken twice in
//! the same 3-minute window is identical.

/// Jitter spread in percentage points (values land in ±7.5).
pub const JITTER_SPREAD: f64 = 15.0;
/// Minutes sharing one jitter value.
pub const JITTER_BUCKET_MINUTES: u8 = 3;

/// Maps a seed to a value in `[0, 1)`.
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    let fraction = x - x.floor();
    // a tiny negative x rounds x - floor(x) up to exactly 1.0
    if fraction >= 1.0 { 0.0 } else { fraction }
}

pub fn jitter_seed(day_of_month: u8, hour: u8, minute: u8, zone_index: usize) -> f64 {
    let bucket = minute / JITTER_BUCKET_MINUTES;
    f64::from(day_of_month) * 1000.0
        + f64::from(hour) * 100.0
        + f64::from(bucket) * 10.0
        + zone_index as f64
}

/// Offset in percentage points for one zone at one moment.
pub fn zone_jitter(day_of_month: u8, hour: u8, minute: u8, zone_index: usize) -> f64 {
    let seed = jitter_seed(day_of_month, hour, minute, zone_index);
    (seeded_random(seed) - 0.5) * JITTER_SPREAD
}

/// Rounds half-way cases toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
