// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Formats a duration in seconds as `H:MM:SS`, or `M:SS` when there are no
/// whole hours.
///
/// Fractional seconds are truncated. Negative and non-finite values format as
/// `0:00`.
///
/// This is the text form stored in submission rows, so it must stay in step
/// with [`parse_time`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(3600.0), "1:00:00");
/// ```
pub(crate) fn format_time(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Parses `H:MM:SS`, `M:SS` or a bare number of seconds back into seconds.
///
/// Returns `None` for anything else, including empty components, negative
/// numbers and totals too large to represent.
pub(crate) fn parse_time(text: &str) -> Option<f64> {
    let parts = text
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let seconds = match parts.as_slice() {
        [h, m, s] => h.checked_mul(3600)?.checked_add(m.checked_mul(60)?)?.checked_add(*s)?,
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        [s] => *s,
        _ => return None,
    };

    Some(seconds as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_without_padding() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn switches_to_hours_at_one_hour() {
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(3661.0), "1:01:01");
        assert_eq!(format_time(36_000.0 + 59.0), "10:00:59");
    }

    #[test]
    fn truncates_fractions_and_clamps_invalid_input() {
        assert_eq!(format_time(90.99), "1:30");
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn parses_both_layouts() {
        assert_eq!(parse_time("1:05"), Some(65.0));
        assert_eq!(parse_time("1:01:01"), Some(3661.0));
        assert_eq!(parse_time("0:00"), Some(0.0));
        assert_eq!(parse_time("42"), Some(42.0));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("abc"), None);
        assert_eq!(parse_time("1::05"), None);
        assert_eq!(parse_time("1:2:3:4"), None);
        assert_eq!(parse_time("-1:00"), None);
    }

    #[test]
    fn oversized_components_are_rejected() {
        assert_eq!(parse_time("9999999999999999:00:00"), None);
        assert_eq!(parse_time("999999999999999999:00"), None);
    }

    #[test]
    fn round_trips_whole_seconds() {
        for t in (0..4000).chain([7199, 7200, 86_399, 360_000]) {
            let text = format_time(t as f64);
            assert_eq!(parse_time(&text), Some(t as f64), "round trip of {t} via {text}");
            assert_eq!(text.matches(':').count() == 2, t >= 3600, "layout of {text}");
        }
    }
}
