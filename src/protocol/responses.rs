//! Time protocol responses
//!
//! Wire-format strings sent back to clients.

use chrono::Timelike;

/// Line delimiter for both directions
pub const DELIMITER: &[u8] = b"\r\n";

/// Reply to any unrecognized command
pub const INVALID_REQUEST: &str = "INVALID REQUEST\r\n";

/// Format a `TIME` reply, e.g. `JAM 14:03:07\r\n`
pub fn format_time_response<T: Timelike>(time: &T) -> String {
    format!(
        "JAM {:02}:{:02}:{:02}\r\n",
        time.hour(),
        time.minute(),
        time.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_format_time_zero_pads() {
        let time = NaiveTime::from_hms_opt(4, 3, 7).unwrap();
        assert_eq!(format_time_response(&time), "JAM 04:03:07\r\n");
    }

    #[test]
    fn test_format_time_is_24_hour() {
        let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(format_time_response(&time), "JAM 23:59:59\r\n");
    }

    #[test]
    fn test_format_time_drops_subseconds() {
        let time = NaiveTime::from_hms_milli_opt(12, 0, 0, 999).unwrap();
        assert_eq!(format_time_response(&time), "JAM 12:00:00\r\n");
    }
}
