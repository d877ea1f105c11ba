//! Display formatting for table cells and chart labels.

/// Sensor values render with two decimals everywhere.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// `HH:mm[:ss]` to `h:mm AM/PM`. Unparseable input comes back unchanged.
pub fn format_time_12h(time: &str) -> String {
    let mut parts = time.splitn(3, ':');
    let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
        return time.to_string();
    };
    let Ok(hour) = h.parse::<u32>() else {
        return time.to_string();
    };
    if hour > 23 || m.len() != 2 || m.parse::<u32>().map(|m| m > 59).unwrap_or(true) {
        return time.to_string();
    }
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display_hour}:{m} {suffix}")
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `YYYY-MM-DD` to `Mon D, YYYY`. Unparseable input comes back unchanged.
pub fn format_date_long(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return date.to_string();
    };
    let (Ok(month), Ok(day)) = (m.parse::<usize>(), d.parse::<u32>()) else {
        return date.to_string();
    };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || y.len() != 4 {
        return date.to_string();
    }
    format!("{} {}, {}", MONTHS[month - 1], day, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_get_two_decimals() {
        assert_eq!(format_value(7.0), "7.00");
        assert_eq!(format_value(6.849), "6.85");
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(format_time_12h("00:05:00"), "12:05 AM");
        assert_eq!(format_time_12h("09:30:15"), "9:30 AM");
        assert_eq!(format_time_12h("12:00:00"), "12:00 PM");
        assert_eq!(format_time_12h("23:59"), "11:59 PM");
        assert_eq!(format_time_12h("not a time"), "not a time");
    }

    #[test]
    fn long_dates() {
        assert_eq!(format_date_long("2026-08-07"), "Aug 7, 2026");
        assert_eq!(format_date_long("2026-01-01"), "Jan 1, 2026");
        assert_eq!(format_date_long("garbage"), "garbage");
        assert_eq!(format_date_long("2026-13-01"), "2026-13-01");
    }
}
