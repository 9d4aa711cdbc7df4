use crossterm::style::{Color, Stylize};

use super::aggregate::Distribution;
use crate::scanner::format_size;

/// Rendering options for the distribution report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Width of the count and size bars
    pub bar_width: usize,
    /// Use ANSI colours in output
    pub colors: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            bar_width: 40,
            colors: true,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }
}

fn paint(text: &str, color: Color, bold: bool, options: &ReportOptions) -> String {
    if !options.colors {
        return text.to_string();
    }
    if bold {
        format!("{}", text.with(color).bold())
    } else {
        format!("{}", text.with(color))
    }
}

fn bar(value: u64, max: u64, color: Color, options: &ReportOptions) -> String {
    let width = options.bar_width;
    let filled = if max > 0 {
        ((value as f64 / max as f64) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    let full = "█".repeat(filled);
    let empty = "░".repeat(width - filled);

    if options.colors {
        format!("{}{}", full.with(color), empty.dim())
    } else {
        format!("{}{}", full, empty)
    }
}

fn divider(options: &ReportOptions) -> String {
    "─".repeat(options.bar_width + 20)
}

/// Render the file type distribution with count and size bars.
pub fn render_distribution(dist: &Distribution, options: &ReportOptions) -> String {
    if dist.is_empty() {
        return "No files found matching filters\n".to_string();
    }

    let mut output = String::new();

    let max_count = dist.stats.iter().map(|s| s.count).max().unwrap_or(0);
    let max_size = dist
        .stats
        .iter()
        .map(|s| s.total_size_bytes)
        .max()
        .unwrap_or(0);

    output.push_str(&divider(options));
    output.push('\n');
    let title = format!(
        "File Type Distribution ({} files, {} total)",
        dist.grand_count,
        format_size(dist.grand_size_bytes)
    );
    output.push_str(&paint(&title, Color::Yellow, true, options));
    output.push('\n');
    output.push_str(&divider(options));
    output.push('\n');

    for stat in &dist.stats {
        let label = format!("{:<12}", stat.file_type);
        output.push_str(&format!(
            "\n{} {:>5} files  {:>10}\n",
            paint(&label, Color::Cyan, true, options),
            stat.count,
            format_size(stat.total_size_bytes)
        ));
        output.push_str(&format!(
            "  Count: {}\n",
            bar(stat.count, max_count, Color::Green, options)
        ));
        output.push_str(&format!(
            "  Size:  {}\n",
            bar(stat.total_size_bytes, max_size, Color::Yellow, options)
        ));
    }

    output.push_str(&divider(options));
    output.push('\n');
    output.push_str(&format!("\n{}\n", paint("Summary:", Color::White, true, options)));
    output.push_str(&format!(
        "  Total Files: {}\n",
        paint(&dist.grand_count.to_string(), Color::Yellow, true, options)
    ));
    output.push_str(&format!(
        "  Total Size:  {}\n",
        paint(&format_size(dist.grand_size_bytes), Color::Yellow, true, options)
    ));
    output.push_str(&format!(
        "  File Types:  {}\n",
        paint(&dist.stats.len().to_string(), Color::Yellow, true, options)
    ));
    output.push_str(&divider(options));
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::FileTypeStats;

    fn sample() -> Distribution {
        Distribution {
            stats: vec![
                FileTypeStats {
                    file_type: "pdf".to_string(),
                    count: 2,
                    total_size_bytes: 20 * 1024 * 1024,
                },
                FileTypeStats {
                    file_type: "txt".to_string(),
                    count: 1,
                    total_size_bytes: 0,
                },
            ],
            grand_count: 3,
            grand_size_bytes: 20 * 1024 * 1024,
        }
    }

    fn plain() -> ReportOptions {
        ReportOptions::new().with_colors(false).with_bar_width(10)
    }

    #[test]
    fn test_empty_distribution() {
        let out = render_distribution(&Distribution::default(), &plain());
        assert_eq!(out, "No files found matching filters\n");
    }

    #[test]
    fn test_header_and_summary() {
        let out = render_distribution(&sample(), &plain());
        assert!(out.contains("File Type Distribution (3 files, 20 MiB total)"));
        assert!(out.contains("  Total Files: 3"));
        assert!(out.contains("  File Types:  2"));
    }

    #[test]
    fn test_rows_follow_distribution_order() {
        let out = render_distribution(&sample(), &plain());
        let pdf = out.find("pdf").unwrap();
        let txt = out.find("txt").unwrap();
        assert!(pdf < txt);
        assert!(out.contains("pdf              2 files      20 MiB"));
    }

    #[test]
    fn test_bars_scale_to_max() {
        let out = render_distribution(&sample(), &plain());
        assert!(out.contains("  Count: ██████████\n"));
        assert!(out.contains("  Count: █████░░░░░\n"));
        assert!(out.contains("  Size:  ░░░░░░░░░░\n"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let out = render_distribution(&sample(), &plain());
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let out = render_distribution(&sample(), &ReportOptions::default());
        assert!(out.contains('\u{1b}'));
    }
}
