use xform_engine::render::DrawReport;

/// Formats 16 matrix values as 4 lines of 4 space-separated numbers.
///
/// Row `i` holds `elements[i * 4 .. i * 4 + 4]`; every line ends with `\n`.
pub fn format_matrix(elements: &[f32; 16]) -> String {
    elements
        .chunks_exact(4)
        .map(|row| {
            let cells: Vec<String> = row.iter().map(f32::to_string).collect();
            cells.join(" ") + "\n"
        })
        .collect()
}

/// Text display of the matrix used by the last draw.
///
/// Prints to stdout whenever the text changes.
#[derive(Debug, Default)]
pub struct MatrixText {
    current: String,
}

impl MatrixText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the display from a draw; returns `true` if the text changed.
    pub fn update(&mut self, report: &DrawReport) -> bool {
        let text = format_matrix(&report.matrix);
        if text == self.current {
            return false;
        }

        log::info!("matrix:\n{}", text.trim_end());
        print!("{text}");
        println!();
        self.current = text;
        true
    }

    pub fn text(&self) -> &str {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;

    #[test]
    fn identity_prints_four_lines() {
        assert_eq!(
            format_matrix(&Preset::Reset.matrix()),
            "1 0 0 0\n0 1 0 0\n0 0 1 0\n0 0 0 1\n"
        );
    }

    #[test]
    fn negative_and_fractional_values() {
        let mut m = Preset::MySolution.matrix();
        m[0] = 0.5;
        assert_eq!(format_matrix(&m), "0.5 0 0 0\n0 3 0 -8\n0 0 5 -4\n0 0 0 1\n");
    }

    #[test]
    fn rows_follow_element_order() {
        let m: [f32; 16] = std::array::from_fn(|i| i as f32 - 7.5);
        let text = format_matrix(&m);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "-7.5 -6.5 -5.5 -4.5");
        assert_eq!(lines[3], "4.5 5.5 6.5 7.5");
        assert!(text.ends_with("7.5\n"));
    }

    #[test]
    fn update_reports_changes_only() {
        let mut text = MatrixText::new();
        let report = DrawReport { matrix: Preset::KeySolution.matrix(), vertex_count: 3 };

        assert!(text.update(&report));
        assert_eq!(text.text(), "2 0 0 0\n0 3 0 8\n0 0 5 4\n0 0 0 1\n");
        assert!(!text.update(&report));
    }
}
