//! Time formatting helpers.

/// Format a millisecond duration for humans.
pub fn format_millis(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        let secs = ms / 1_000;
        let rest = ms % 1_000;
        if rest == 0 {
            format!("{secs}s")
        } else {
            format!("{secs}.{:02}s", rest / 10)
        }
    } else {
        format!("{}m {:02}s", ms / 60_000, (ms % 60_000) / 1_000)
    }
}
