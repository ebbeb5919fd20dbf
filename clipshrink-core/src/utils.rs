//! Small helpers shared by the summary output.

use std::path::Path;

/// Elapsed run time as `HH:MM:SS`, truncating fractions. Negative or
/// non-finite input renders as `??:??:??`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Space freed by a run, in the largest binary unit that keeps the value >= 1.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Last path component, lossily converted. Paths like `/` or `..` have none
/// and yield `CoreError::PathError`.
pub fn get_filename_safe(path: &Path) -> crate::CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            crate::CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.0), "00:00:59");
        assert_eq!(format_duration(60.0), "00:01:00");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(90061.0), "25:01:01");

        // Fractional seconds truncate
        assert_eq!(format_duration(59.9), "00:00:59");

        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::INFINITY), "??:??:??");
        assert_eq!(format_duration(f64::NAN), "??:??:??");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(1024 * 1024 * 60), "60.00 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024 * 2), "2.00 GiB");
    }

    #[test]
    fn test_get_filename_safe() {
        assert_eq!(
            get_filename_safe(Path::new("/footage/day1/clip.MTS")).unwrap(),
            "clip.MTS"
        );
        assert_eq!(get_filename_safe(Path::new("HB clip.mp4")).unwrap(), "HB clip.mp4");

        assert!(get_filename_safe(Path::new("/")).is_err());
        assert!(get_filename_safe(Path::new("")).is_err());
        assert!(get_filename_safe(Path::new("/footage/..")).is_err());
    }
}
