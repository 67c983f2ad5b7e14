//! Process resident-memory probe
//!
//! The inference stage reports the resident-set-size delta across one
//! forward pass. RSS is read from `/proc/self/status`; on platforms where
//! that file does not exist the probe returns `None` and the delta
//! degrades to zero.

/// Get the current process resident set size in MB
pub fn rss_mb() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;

    for line in status.lines() {
        if line.starts_with("VmRSS:") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                let kb: f64 = parts[1].parse().ok()?;
                return Some(kb / 1024.0);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rss_probe() {
        // The probe is allowed to be unavailable off-Linux, but when it
        // reports a value it must be a positive number of megabytes.
        if let Some(mb) = rss_mb() {
            assert!(mb > 0.0);
        }
    }
}
