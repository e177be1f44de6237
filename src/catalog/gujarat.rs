//! Built-in catalog for the four Gujarat temples.

use super::{Catalog, Coordinates, CrowdTables, DailyTimings, Festival, TempleMetadata, Zone};
use std::collections::BTreeMap;

/// Fraction of peak crowd per hour. Rushes line up with the morning and
/// evening aarti, with a lull in the early afternoon.
pub const HOURLY_CROWD_PATTERN: [f64; 24] = [
    0.05, 0.02, 0.02, 0.03, 0.08, 0.25, // 00:00-05:00
    0.65, 0.85, 0.75, 0.55, 0.45, 0.50, // 06:00-11:00
    0.40, 0.30, 0.25, 0.30, 0.45, 0.65, // 12:00-17:00
    0.80, 0.90, 0.70, 0.40, 0.20, 0.10, // 18:00-23:00
];

/// Winter and festival months peak; the monsoon is the trough.
pub const MONTHLY_MULTIPLIERS: [f64; 12] = [
    1.2, 1.3, 1.1, 0.7, 0.5, 0.4, 0.6, 0.7, 0.8, 1.4, 1.3, 1.5,
];

pub const ZONE_FACTORS: [(&str, f64); 7] = [
    ("mainDarshan", 0.85),
    ("garbhaGriha", 1.0),
    ("pradakshina", 0.55),
    ("museum", 0.30),
    ("gomtiGhat", 0.45),
    ("gabbarHill", 0.50),
    ("ropeway", 0.60),
];

pub fn catalog() -> Catalog {
    Catalog {
        tables: tables(),
        temples: vec![somnath(), dwarka(), ambaji(), pavagadh()],
    }
}

pub fn tables() -> CrowdTables {
    CrowdTables {
        hourly_pattern: HOURLY_CROWD_PATTERN,
        month_multipliers: MONTHLY_MULTIPLIERS,
        zone_factors: ZONE_FACTORS
            .iter()
            .map(|(zone_id, factor)| (zone_id.to_string(), *factor))
            .collect::<BTreeMap<_, _>>(),
        default_zone_factor: 0.5,
        forecast_zone_factor: 0.7,
        weekly_hourly_average: 0.55,
    }
}

fn zone(id: &str, name: &str, capacity: u32) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
    }
}

fn festival(name: &str, month: &str, crowd_multiplier: f64) -> Festival {
    Festival {
        name: name.to_string(),
        month: month.to_string(),
        crowd_multiplier,
    }
}

fn timings(open: &str, close: &str, aarti: &[&str]) -> DailyTimings {
    DailyTimings {
        open: open.to_string(),
        close: close.to_string(),
        aarti: aarti.iter().map(|time| time.to_string()).collect(),
    }
}

fn somnath() -> TempleMetadata {
    TempleMetadata {
        id: "somnath".to_string(),
        name: "Somnath Temple".to_string(),
        deity: "Lord Shiva (Jyotirlinga)".to_string(),
        location: "Prabhas Patan, Veraval".to_string(),
        district: "Gir Somnath".to_string(),
        state: "Gujarat".to_string(),
        coordinates: Coordinates {
            lat: 20.8880,
            lng: 70.4013,
        },
        daily_timings: timings("06:00", "21:00", &["07:00", "12:00", "19:00"]),
        average_daily_visitors: 25_000,
        peak_capacity: 8_000,
        zones: vec![
            zone("mainDarshan", "Main Darshan Hall", 2000),
            zone("garbhaGriha", "Garbha Griha", 500),
            zone("pradakshina", "Pradakshina Path", 1500),
            zone("museum", "Museum & Exhibition", 800),
        ],
        festivals: vec![
            festival("Maha Shivratri", "February/March", 3.5),
            festival("Shravan Month", "July/August", 2.8),
            festival("Kartik Purnima", "November", 2.5),
            festival("Diwali", "October/November", 2.0),
        ],
        // Mondays draw Shiva devotees
        day_multipliers: [1.4, 1.3, 0.7, 0.6, 0.7, 0.9, 1.5],
    }
}

fn dwarka() -> TempleMetadata {
    TempleMetadata {
        id: "dwarka".to_string(),
        name: "Dwarkadhish Temple".to_string(),
        deity: "Lord Krishna (Dwarkadhish)".to_string(),
        location: "Dwarka".to_string(),
        district: "Devbhumi Dwarka".to_string(),
        state: "Gujarat".to_string(),
        coordinates: Coordinates {
            lat: 22.2395,
            lng: 68.9685,
        },
        daily_timings: timings("06:30", "21:30", &["06:30", "10:30", "17:30", "19:30"]),
        average_daily_visitors: 20_000,
        peak_capacity: 6_000,
        zones: vec![
            zone("mainDarshan", "Nij Mandir (Main Hall)", 1500),
            zone("garbhaGriha", "Garbha Griha", 400),
            zone("pradakshina", "Pradakshina Path", 1200),
            zone("gomtiGhat", "Gomti Ghat", 2000),
        ],
        festivals: vec![
            festival("Janmashtami", "August/September", 4.0),
            festival("Holi", "March", 2.5),
            festival("Diwali", "October/November", 2.2),
            festival("Sharad Purnima", "October", 2.0),
        ],
        day_multipliers: [1.5, 0.7, 0.6, 0.6, 0.7, 0.9, 1.4],
    }
}

fn ambaji() -> TempleMetadata {
    TempleMetadata {
        id: "ambaji".to_string(),
        name: "Ambaji Temple".to_string(),
        deity: "Goddess Amba (Shakti Peetha)".to_string(),
        location: "Ambaji".to_string(),
        district: "Banaskantha".to_string(),
        state: "Gujarat".to_string(),
        coordinates: Coordinates {
            lat: 24.3309,
            lng: 72.8431,
        },
        daily_timings: timings("07:00", "20:30", &["07:00", "12:00", "19:30"]),
        average_daily_visitors: 15_000,
        peak_capacity: 5_000,
        zones: vec![
            zone("mainDarshan", "Main Darshan Hall", 1200),
            zone("garbhaGriha", "Garbha Griha", 300),
            zone("pradakshina", "Pradakshina Path", 1000),
            zone("gabbarHill", "Gabbar Hill Path", 1500),
        ],
        festivals: vec![
            festival("Navratri (Sharad)", "September/October", 5.0),
            festival("Chaitra Navratri", "March/April", 3.5),
            festival("Bhadrapad Purnima Fair", "August/September", 3.0),
            festival("Diwali", "October/November", 2.0),
        ],
        // Saturday is the Devi day
        day_multipliers: [1.3, 0.6, 0.8, 0.7, 0.7, 0.9, 1.5],
    }
}

fn pavagadh() -> TempleMetadata {
    TempleMetadata {
        id: "pavagadh".to_string(),
        name: "Kalika Mata Temple".to_string(),
        deity: "Goddess Kalika (Mahakali)".to_string(),
        location: "Pavagadh Hill, Champaner".to_string(),
        district: "Panchmahal".to_string(),
        state: "Gujarat".to_string(),
        coordinates: Coordinates {
            lat: 22.4839,
            lng: 73.5316,
        },
        daily_timings: timings("05:00", "20:00", &["05:30", "12:00", "18:30"]),
        average_daily_visitors: 12_000,
        peak_capacity: 4_000,
        zones: vec![
            zone("mainDarshan", "Main Darshan Hall", 800),
            zone("garbhaGriha", "Garbha Griha", 200),
            zone("pradakshina", "Pradakshina Path", 600),
            zone("ropeway", "Ropeway Station", 1200),
        ],
        festivals: vec![
            festival("Navratri", "September/October", 4.5),
            festival("Maha Shivratri", "February/March", 2.8),
            festival("Dussehra", "October", 2.5),
            festival("Diwali", "October/November", 2.0),
        ],
        day_multipliers: [1.4, 0.7, 0.7, 0.6, 0.7, 0.8, 1.4],
    }
}
