//! Human-Readable Formatting

/// Format a hashrate with an auto-selected unit (H/s through TH/s).
pub fn format_hps(hps: f64) -> String {
    const UNITS: [(&str, f64); 4] = [
        ("TH/s", 1e12),
        ("GH/s", 1e9),
        ("MH/s", 1e6),
        ("KH/s", 1e3),
    ];
    for (unit, scale) in UNITS {
        if hps >= scale {
            return format!("{:.3} {unit}", hps / scale);
        }
    }
    format!("{hps:.3} H/s")
}
