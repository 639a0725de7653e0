use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};

use crate::error::RepoError;
use crate::model::{IdentMap, UserScore};
use crate::report::Format;

const CHART_WIDTH: u32 = 640;
const CHART_BAR_AREA: u32 = 420;
const CHART_ROW_HEIGHT: u32 = 24;
const CHART_LABEL_WIDTH: u32 = 160;

/// Writes one score table (per-repository or run-wide) in the selected
/// formats under the output directory.
pub struct ReportGenerator<'a> {
    scores: &'a IdentMap<UserScore>,
    label: String,
    output_dir: PathBuf,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(
        scores: &'a IdentMap<UserScore>,
        label: impl ToString,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scores,
            label: label.to_string(),
            output_dir: output_dir.into(),
        }
    }

    /// A renderer without an implementation (html) is reported, not an error.
    pub fn dispatch(&self, format: Format) -> Result<(), RepoError> {
        match format {
            Format::Text => self.generate_table(),
            Format::Csv => self.generate_csv(),
            Format::Chart => self.generate_chart(),
            Format::Html => {
                warn!("html report generation is not implemented yet");
                Ok(())
            }
        }
    }

    pub fn generate_csv(&self) -> Result<(), RepoError> {
        let mut out = String::from("name,pr_fb,pr_doc,pr_typo,is_fb,is_doc,total\n");
        for (identity, score) in self.scores.iter() {
            out.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                identity,
                score.pr_fb,
                score.pr_doc,
                score.pr_typo,
                score.is_fb,
                score.is_doc,
                score.total
            ));
        }
        self.write(self.target_path("csv"), out)
    }

    pub fn generate_table(&self) -> Result<(), RepoError> {
        let mut doc = Markdown::new();
        doc.header1(format!("{} scores", self.label));

        if !self.scores.is_empty() {
            let headings = ["name", "PR_fb", "PR_doc", "PR_typo", "IS_fb", "IS_doc", "total"]
                .iter()
                .map(|h| Heading::new(h.to_string(), Some(HeadingAlignment::Center)))
                .collect::<Vec<_>>();
            let rows = self
                .scores
                .iter()
                .map(|(identity, score)| {
                    vec![
                        identity.to_string(),
                        score.pr_fb.to_string(),
                        score.pr_doc.to_string(),
                        score.pr_typo.to_string(),
                        score.is_fb.to_string(),
                        score.is_doc.to_string(),
                        score.total.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            let mut table = MarkdownTable::new(rows);
            table.with_headings(headings);
            doc.paragraph(table.as_markdown().unwrap());
        }

        self.write(self.target_path("txt"), doc.render())
    }

    /// Horizontal bar chart of per-identity totals, one row per contributor.
    pub fn generate_chart(&self) -> Result<(), RepoError> {
        let max_total = self
            .scores
            .iter()
            .map(|(_, score)| score.total)
            .max()
            .unwrap_or(0)
            .max(1);
        let height = CHART_ROW_HEIGHT * (self.scores.len() as u32 + 1);

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{height}\">\n"
        );
        for (row, (identity, score)) in self.scores.iter().enumerate() {
            let y = CHART_ROW_HEIGHT * row as u32 + CHART_ROW_HEIGHT / 2;
            let bar = CHART_BAR_AREA * score.total / max_total;
            svg.push_str(&format!(
                "  <text x=\"4\" y=\"{}\" font-size=\"12\">{}</text>\n",
                y + 4,
                xml_escape(identity)
            ));
            svg.push_str(&format!(
                "  <rect x=\"{CHART_LABEL_WIDTH}\" y=\"{}\" width=\"{bar}\" height=\"14\" fill=\"#4c78a8\"/>\n",
                y - 7
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"12\">{}</text>\n",
                CHART_LABEL_WIDTH + bar + 6,
                y + 4,
                score.total
            ));
        }
        svg.push_str("</svg>\n");

        self.write(self.target_path("svg"), svg)
    }

    fn target_path(&self, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{extension}", self.label))
    }

    fn write(&self, path: PathBuf, content: String) -> Result<(), RepoError> {
        self.ensure_output_dir().map_err(RepoError::Report)?;
        fs::write(path, content).map_err(RepoError::Report)
    }

    fn ensure_output_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> IdentMap<UserScore> {
        [
            ("alice", UserScore::new(1, 2, 3, 4, 5, 15)),
            ("bob", UserScore::new(2, 0, 0, 1, 0, 8)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn csv_has_header_and_one_row_per_identity() {
        let dir = tempfile::tempdir().unwrap();
        let scores = scores();
        let generator = ReportGenerator::new(&scores, "demo", dir.path());
        generator.generate_csv().unwrap();

        let content = fs::read_to_string(dir.path().join("demo.csv")).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "name,pr_fb,pr_doc,pr_typo,is_fb,is_doc,total");
        assert_eq!(lines[1], "alice,1,2,3,4,5,15");
        assert_eq!(lines[2], "bob,2,0,0,1,0,8");
    }

    #[test]
    fn table_lists_every_identity() {
        let dir = tempfile::tempdir().unwrap();
        let scores = scores();
        let generator = ReportGenerator::new(&scores, "demo", dir.path());
        generator.generate_table().unwrap();

        let content = fs::read_to_string(dir.path().join("demo.txt")).unwrap();
        assert!(content.contains("# demo scores"));
        assert!(content.contains("alice"));
        assert!(content.contains("bob"));
        assert!(content.contains("15"));
    }

    #[test]
    fn table_for_empty_scores_still_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let scores = IdentMap::new();
        let generator = ReportGenerator::new(&scores, "empty", dir.path());
        generator.generate_table().unwrap();
        assert!(dir.path().join("empty.txt").exists());
    }

    #[test]
    fn chart_is_svg_with_one_bar_per_identity() {
        let dir = tempfile::tempdir().unwrap();
        let scores = scores();
        let generator = ReportGenerator::new(&scores, "demo", dir.path());
        generator.generate_chart().unwrap();

        let content = fs::read_to_string(dir.path().join("demo.svg")).unwrap();
        assert!(content.starts_with("<svg"));
        assert_eq!(content.matches("<rect").count(), 2);
        assert!(content.contains("alice"));
    }

    #[test]
    fn html_dispatch_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let scores = scores();
        let generator = ReportGenerator::new(&scores, "demo", dir.path());
        assert!(generator.dispatch(Format::Html).is_ok());
        assert!(!dir.path().join("demo.html").exists());
    }

    #[test]
    fn creates_missing_output_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let scores = scores();
        let generator = ReportGenerator::new(&scores, "demo", &nested);
        generator.generate_csv().unwrap();
        assert!(nested.join("demo.csv").exists());
    }
}
