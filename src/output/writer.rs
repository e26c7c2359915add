//! Info report rendering

use comfy_table::presets::NOTHING;
use comfy_table::{Table, TableComponent};

use crate::domain::model::InfoRow;
use crate::error::{FfrError, FfrResult};
use crate::output::ReportFormat;
use crate::utils::{human, truncate_one_decimal};

const HEADERS: [&str; 9] = [
    "FILE",
    "SIZE",
    "BITRATE",
    "LENGTH",
    "FRAMERATE",
    "WIDTH",
    "HEIGHT",
    "CODEC",
    "INDEXES",
];

/// Smallest usable value of the file name column width
pub const MIN_NAME_LENGTH: usize = 16;

/// Shorten a name longer than `max` to its head, `...` and its last 9 characters
pub fn shorten_name(name: &str, max: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max {
        return name.to_string();
    }

    let head: String = chars[..max.saturating_sub(12)].iter().collect();
    let tail: String = chars[chars.len().saturating_sub(9)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Renders info rows as a table, JSON or YAML
#[derive(Debug, Clone)]
pub struct ReportWriter {
    max_name_length: usize,
    skip_keyframes: bool,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(max_name_length: usize, skip_keyframes: bool) -> Self {
        Self {
            max_name_length,
            skip_keyframes,
        }
    }

    pub fn render(&self, rows: &[InfoRow], format: ReportFormat) -> FfrResult<String> {
        match format {
            ReportFormat::Text => Ok(self.render_table(rows)),
            ReportFormat::Json => serde_json::to_string_pretty(rows)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| FfrError::Report {
                    message: e.to_string(),
                }),
            ReportFormat::Yaml => serde_yaml::to_string(rows).map_err(|e| FfrError::Report {
                message: e.to_string(),
            }),
        }
    }

    fn cells(&self, row: &InfoRow) -> Vec<String> {
        let indexes = match (&row.keyframes, self.skip_keyframes) {
            (Some(times), false) => times
                .iter()
                .map(|t| format!("{:.1}", t))
                .collect::<Vec<_>>()
                .join(" "),
            _ => "SKIPPED".to_string(),
        };

        vec![
            shorten_name(&row.name, self.max_name_length),
            human(row.size, " ", "B"),
            human(row.bit_rate, " ", "bit"),
            truncate_one_decimal(row.length).to_string(),
            truncate_one_decimal(row.frame_rate).to_string(),
            row.width.to_string(),
            row.height.to_string(),
            row.codec.clone(),
            indexes,
        ]
    }

    /// Borderless table with left aligned columns and an underlined header
    pub fn render_table(&self, rows: &[InfoRow]) -> String {
        let mut table = Table::new();
        table
            .load_preset(NOTHING)
            .set_style(TableComponent::HeaderLines, '-')
            .set_header(HEADERS);
        for row in rows {
            table.add_row(self.cells(row));
        }
        for column in table.column_iter_mut() {
            column.set_padding((0, 2));
        }

        let mut out = String::new();
        for line in table.to_string().lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> InfoRow {
        InfoRow {
            name: "foo.mp4".to_string(),
            size: 1_500_000,
            bit_rate: 4_000_000,
            length: 10.04,
            frame_rate: 29.97,
            width: 320,
            height: 240,
            codec: "h264".to_string(),
            keyframes: Some(vec![0.0, 2.0]),
        }
    }

    #[test]
    fn test_shorten_name() {
        assert_eq!(shorten_name("short.mp4", 16), "short.mp4");
        let long = "a-very-long-file-name-with-descriptions.mp4";
        let short = shorten_name(long, 20);
        assert_eq!(short, "a-very-l...tions.mp4");
        assert_eq!(short.len(), 8 + 3 + 9);
    }

    #[test]
    fn test_table() {
        let table = ReportWriter::new(50, false).render_table(&[row()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FILE"));
        assert!(lines[0].contains("SIZE"));
        assert!(lines[0].ends_with("INDEXES"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].starts_with("foo.mp4"));
        assert!(lines[2].contains("1.5 MB"));
        assert!(lines[2].contains("4.0 Mbit"));
        assert!(lines[2].contains("10"));
        assert!(lines[2].contains("29.9"));
        assert!(lines[2].ends_with("0.0 2.0"));
    }

    #[test]
    fn test_table_skipped_keyframes() {
        let table = ReportWriter::new(50, true).render_table(&[row()]);
        assert!(table.lines().nth(2).unwrap().ends_with("SKIPPED"));
    }

    #[test]
    fn test_table_columns_line_up() {
        let mut other = row();
        other.name = "a-much-longer-name.mp4".to_string();
        other.codec = "hevc".to_string();
        let table = ReportWriter::new(50, false).render_table(&[row(), other]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);

        let size_column = lines[0].find("SIZE").unwrap();
        assert_eq!(lines[2].find("1.5 MB"), Some(size_column));
        assert_eq!(lines[3].find("1.5 MB"), Some(size_column));
        assert!(size_column > "a-much-longer-name.mp4".len());
    }

    #[test]
    fn test_json_and_yaml() {
        let writer = ReportWriter::new(50, false);
        let json = writer.render(&[row()], ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "foo.mp4");
        assert_eq!(parsed[0]["width"], 320);

        let yaml = writer.render(&[row()], ReportFormat::Yaml).unwrap();
        assert!(yaml.contains("name: foo.mp4"));
    }
}
