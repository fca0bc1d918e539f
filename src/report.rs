use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atomic_write_file::AtomicWriteFile;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::coordinator::CategoryFailure;
use crate::types::RankedResult;

pub const REPORT_TITLE: &str = "News Analysis Report";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot write report to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Line added before any section was started")]
    NoSection,
}

/// Destination of the per-category results.
///
/// Methods take `&mut self`: a sink is never written concurrently, the
/// report replays its sections one at a time.
pub trait ReportSink {
    fn begin_section(&mut self, heading: &str) -> Result<(), ReportError>;
    fn add_line(&mut self, word: &str, count: usize) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionOrder {
    /// Order in which categories first appear in the dataset.
    #[default]
    FirstSeen,
    /// Category name, ascending.
    Name,
    /// Order in which counting tasks completed. Not reproducible.
    Completion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub category: String,
    /// Position of the category in the dataset (first-seen order).
    pub position: usize,
    pub ranked: RankedResult,
    pub failure: Option<CategoryFailure>,
}

/// Results of every category, appended as the counting tasks join.
#[derive(Debug, Clone, Default)]
pub struct Report {
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn section(&self, category: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &CategoryFailure)> {
        self.sections
            .iter()
            .filter_map(|s| s.failure.as_ref().map(|f| (s.category.as_str(), f)))
    }

    pub fn sort(&mut self, order: SectionOrder) {
        match order {
            SectionOrder::FirstSeen => self.sections.sort_by_key(|s| s.position),
            SectionOrder::Name => self.sections.sort_by(|a, b| a.category.cmp(&b.category)),
            SectionOrder::Completion => {}
        }
    }

    /// Sends every section to `sink`, in the current order. Failed categories
    /// still get their heading.
    pub fn write_to<S: ReportSink + ?Sized>(&self, sink: &mut S) -> Result<(), ReportError> {
        for section in &self.sections {
            sink.begin_section(&section.category)?;
            for entry in &section.ranked {
                sink.add_line(&entry.word, entry.count)?;
            }
        }
        Ok(())
    }
}

/// HTML document with one `<h1>` per category and one `<p>word: count</p>`
/// per ranked word.
#[derive(Debug, Clone)]
pub struct HtmlReport {
    contents: String,
    in_section: bool,
}

impl Default for HtmlReport {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlReport {
    pub fn new() -> Self {
        Self {
            contents: format!("<html>\n<head>\n<title>{REPORT_TITLE}</title>\n</head>\n<body>\n"),
            in_section: false,
        }
    }

    pub fn finish(mut self) -> String {
        self.contents.push_str("</body>\n</html>");
        self.contents
    }

    /// Closes the document and writes it to `path`. The file is replaced
    /// atomically: readers see either the old report or the new one.
    #[instrument(skip(self))]
    pub fn render(self, path: &Path) -> Result<(), ReportError> {
        let io_err = |source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let html = self.finish();
        let mut file = AtomicWriteFile::open(path).map_err(io_err)?;
        file.write_all(html.as_bytes()).map_err(io_err)?;
        file.commit().map_err(io_err)?;

        info!("Report written to {:?}", path);

        Ok(())
    }
}

impl ReportSink for HtmlReport {
    fn begin_section(&mut self, heading: &str) -> Result<(), ReportError> {
        let _ = writeln!(self.contents, "<h1>{}</h1>", escape_html(heading));
        self.in_section = true;
        Ok(())
    }

    fn add_line(&mut self, word: &str, count: usize) -> Result<(), ReportError> {
        if !self.in_section {
            return Err(ReportError::NoSection);
        }
        let _ = writeln!(self.contents, "<p>{}: {}</p>", escape_html(word), count);
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::RankedWord;

    fn section(category: &str, position: usize, ranked: RankedResult) -> ReportSection {
        ReportSection {
            category: category.to_string(),
            position,
            ranked,
            failure: None,
        }
    }

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.push(section("sports", 2, vec![RankedWord::new("goal", 4)]));
        report.push(section(
            "tech",
            0,
            vec![RankedWord::new("ai", 3), RankedWord::new("beats", 1)],
        ));
        report.push(section("arts", 1, vec![]));
        report
    }

    fn categories(report: &Report) -> Vec<&str> {
        report.sections().iter().map(|s| s.category.as_str()).collect()
    }

    #[test]
    fn test_sort_sections() {
        let mut report = sample_report();
        report.sort(SectionOrder::Completion);
        assert_eq!(categories(&report), vec!["sports", "tech", "arts"]);

        report.sort(SectionOrder::FirstSeen);
        assert_eq!(categories(&report), vec!["tech", "arts", "sports"]);

        report.sort(SectionOrder::Name);
        assert_eq!(categories(&report), vec!["arts", "sports", "tech"]);
    }

    #[test]
    fn test_html_report() {
        let mut report = sample_report();
        report.sort(SectionOrder::FirstSeen);

        let mut html = HtmlReport::new();
        report.write_to(&mut html).unwrap();

        assert_eq!(
            html.finish(),
            "<html>\n<head>\n<title>News Analysis Report</title>\n</head>\n<body>\n\
             <h1>tech</h1>\n<p>ai: 3</p>\n<p>beats: 1</p>\n\
             <h1>arts</h1>\n\
             <h1>sports</h1>\n<p>goal: 4</p>\n\
             </body>\n</html>"
        );
    }

    #[test]
    fn test_html_escape() {
        let mut html = HtmlReport::new();
        html.begin_section("Arts & <Culture>").unwrap();
        let contents = html.finish();
        assert!(contents.contains("<h1>Arts &amp; &lt;Culture&gt;</h1>"));
    }

    #[test]
    fn test_line_without_section() {
        let mut html = HtmlReport::new();
        let err = html.add_line("ai", 1).unwrap_err();
        assert!(matches!(err, ReportError::NoSection));
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("output.html");

        let mut html = HtmlReport::new();
        html.begin_section("tech").unwrap();
        html.add_line("ai", 3).unwrap();
        html.render(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<html>"));
        assert!(written.contains("<h1>tech</h1>\n<p>ai: 3</p>\n"));
        assert!(written.ends_with("</body>\n</html>"));
    }
}
