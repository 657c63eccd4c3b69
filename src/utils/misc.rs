pub fn time_to_string(time: chrono::Duration) -> String {
    match time.num_seconds() {
        i64::MIN..=59 => {
            let seconds = time.num_seconds().max(0);
            let second_suffix = if seconds == 1 { "" } else { "s" };
            format!("{} second{}", seconds, second_suffix)
        }
        60..=3599 => {
            let minute_suffix = if time.num_minutes() == 1 { "" } else { "s" };
            format!("{} minute{}", time.num_minutes(), minute_suffix)
        }
        3600..=86399 => {
            let hour_suffix = if time.num_hours() == 1 { "" } else { "s" };
            format!("{} hour{}", time.num_hours(), hour_suffix)
        }
        _ => {
            let day_suffix = if time.num_days() == 1 { "" } else { "s" };
            format!("{} day{}", time.num_days(), day_suffix)
        }
    }
}

/// Uptime as days/hours/minutes/seconds, dropping leading zero units.
pub fn uptime_to_string(uptime: std::time::Duration) -> String {
    let total = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3600,
        (total % 3600) / 60,
        total % 60,
    );

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m {seconds}s"),
        _ => format!("{days}d {hours}h {minutes}m {seconds}s"),
    }
}

pub fn bytes_to_string(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{bytes} B"),
        _ => format!("{value:.2} {}", UNITS[unit]),
    }
}
