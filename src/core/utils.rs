//! Small text helpers for user-facing messages

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Number of cells in the download progress bar
pub const PROGRESS_BAR_CELLS: usize = 10;

/// Formats a byte count with a 1024 base, at most two decimals.
///
/// # Example
///
/// ```
/// use telegraph_uploader::core::utils::human_readable;
///
/// assert_eq!(human_readable(512), "512 B");
/// assert_eq!(human_readable(1536), "1.5 KB");
/// ```
pub fn human_readable(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = SIZE_UNITS[0];
    for (i, candidate) in SIZE_UNITS.iter().enumerate() {
        unit = candidate;
        if size < 1024.0 || i == SIZE_UNITS.len() - 1 {
            break;
        }
        size /= 1024.0;
    }
    format!("{} {}", format_two_decimals(size), unit)
}

fn format_two_decimals(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Renders the progress message shown while a photo is being fetched from Telegram.
///
/// A zero `total` is treated as a finished transfer.
pub fn progress_text(done: u64, total: u64) -> String {
    let filled = if total == 0 {
        PROGRESS_BAR_CELLS
    } else {
        let ratio = (done.min(total) as f64) / (total as f64);
        ((ratio * PROGRESS_BAR_CELLS as f64).floor() as usize).min(PROGRESS_BAR_CELLS)
    };

    format!(
        "[{}{}]\n{} of {}",
        "▪️".repeat(filled),
        "▫️".repeat(PROGRESS_BAR_CELLS - filled),
        human_readable(done),
        human_readable(total)
    )
}
