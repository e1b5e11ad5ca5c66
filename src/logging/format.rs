const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// format an uptime as `d+HH:mm:ss.SSS`, zero padding the days to `days_width`
pub fn format_timestamp_ms(timestamp_ms: u64, days_width: usize) -> String {
    let days = timestamp_ms / MS_PER_DAY;
    let hours = (timestamp_ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (timestamp_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (timestamp_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let milliseconds = timestamp_ms % MS_PER_SECOND;

    format!(
        "{:0days_width$}+{:02}:{:02}:{:02}.{:03}",
        days,
        hours,
        minutes,
        seconds,
        milliseconds,
        days_width = days_width
    )
}
