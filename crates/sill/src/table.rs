use sill_core::{DisplayInfo, FrameReport, Segment, WindowRecord};

/// Print a formatted table of windows
pub fn print_windows_table(windows: &[WindowRecord]) {
    let title_width = windows
        .iter()
        .map(|w| w.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 40);

    let rows: Vec<Vec<String>> = windows
        .iter()
        .map(|w| {
            vec![
                w.depth.to_string(),
                w.handle.to_string(),
                w.title.clone(),
                format!("{}x{}", w.rect.width(), w.rect.height()),
                format!("x:{} y:{}", w.rect.left, w.rect.top),
            ]
        })
        .collect();

    print_table(
        &["Depth", "Handle", "Title", "Size", "Position"],
        &[5, 10, title_width, 11, 13],
        &rows,
    );
    println!("\nTotal: {} window(s)", windows.len());
}

/// Print a formatted table of monitors
pub fn print_monitors_table(displays: &[DisplayInfo]) {
    let name_width = displays
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let rows: Vec<Vec<String>> = displays
        .iter()
        .map(|d| {
            vec![
                d.index.to_string(),
                d.name.clone(),
                format!("{}x{}", d.screen_width(), d.screen_height()),
                format!("x:{} y:{}", d.monitor_area.left, d.monitor_area.top),
                if d.is_primary { "Yes" } else { "No" }.to_string(),
            ]
        })
        .collect();

    print_table(
        &["Index", "Name", "Size", "Position", "Primary"],
        &[5, name_width, 11, 13, 7],
        &rows,
    );
    println!("\nTotal: {} monitor(s)", displays.len());
}

/// Print a formatted table of resolved segments in Y-up screen space
pub fn print_segments_table(segments: &[Segment]) {
    let id_width = segments
        .iter()
        .map(|s| s.id.chars().count())
        .max()
        .unwrap_or(2)
        .clamp(2, 40);

    let rows: Vec<Vec<String>> = segments
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                format!("{:.0}", s.start.x),
                format!("{:.0}", s.end.x),
                format!("{:.0}", s.start.y),
                format!("{:.0}", s.length()),
            ]
        })
        .collect();

    print_table(
        &["ID", "Start X", "End X", "Y", "Length"],
        &[id_width, 8, 8, 6, 8],
        &rows,
    );
    println!("\nTotal: {} segment(s)", segments.len());
}

/// One line per frame for `sill run`
pub fn format_frame_line(report: &FrameReport) -> String {
    format!(
        "frame {:>5}  windows {:>3}  segments {:>3}  +{} -{} ~{}  active {:>3}  culled {}  {:>5.1} fps",
        report.frame,
        report.windows,
        report.segments,
        report.sync.allocated,
        report.sync.retired,
        report.sync.reconfigured,
        report.sync.active,
        report.culled,
        report.fps,
    )
}

fn border(left: &str, mid: &str, right: &str, widths: &[usize]) -> String {
    let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, cells.join(mid), right)
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {} ", truncate(cell, width)))
        .collect();
    format!("│{}│", cells.join("│"))
}

fn print_table(headers: &[&str], widths: &[usize], rows: &[Vec<String>]) {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    println!("{}", border("┌", "┬", "┐", widths));
    println!("{}", row(&headers, widths));
    println!("{}", border("├", "┼", "┤", widths));
    for cells in rows {
        println!("{}", row(cells, widths));
    }
    println!("{}", border("└", "┴", "┘", widths));
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so multi-byte titles are safe.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
