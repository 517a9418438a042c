//! Results history export (CSV)

use chrono::{DateTime, SecondsFormat, Utc};

use dw_engine::ResultLog;

/// CSV header row
pub const RESULTS_CSV_HEADER: &str = "Spin #,Winner,Forced,Timestamp";

/// Quote a field if it contains a separator, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render the result log as CSV, one row per record in spin order
pub fn results_csv(log: &ResultLog) -> String {
    let mut out = String::with_capacity(32 * (log.len() + 1));
    out.push_str(RESULTS_CSV_HEADER);
    out.push_str("\r\n");

    for record in log.records() {
        out.push_str(&format!(
            "{},{},{},{}\r\n",
            record.spin_number,
            csv_field(&record.winner),
            record.forced,
            record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    out
}

/// Timestamped results file name, e.g. `wheel_results_20250301_101500.csv`
pub fn results_file_name(now: DateTime<Utc>) -> String {
    format!("wheel_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dw_core::SpinRecord;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_empty_log_is_header_only() {
        assert_eq!(results_csv(&ResultLog::new()), "Spin #,Winner,Forced,Timestamp\r\n");
    }

    #[test]
    fn test_rows() {
        let log = ResultLog::from_records(vec![
            SpinRecord::new(1, "Alice", false).at(at(10, 0)),
            SpinRecord::new(2, "Amy", true).at(at(10, 1)),
        ]);

        let csv = results_csv(&log);
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[1], "1,Alice,false,2025-03-01T10:00:00Z");
        assert_eq!(lines[2], "2,Amy,true,2025-03-01T10:01:00Z");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(csv_field("Bob"), "Bob");
        assert_eq!(csv_field("Smith, Jr."), "\"Smith, Jr.\"");
        assert_eq!(csv_field("The \"Boss\""), "\"The \"\"Boss\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_results_file_name() {
        assert_eq!(results_file_name(at(9, 5)), "wheel_results_20250301_090500.csv");
    }
}
