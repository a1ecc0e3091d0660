//! README document assembly.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

use super::Badge;
use crate::output::{write_text, OutputError};

/// Timestamp format used in the "last updated" line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Line written under a section without badges
pub const NO_DATA_LINE: &str = "_No data available._";

/// Fixed README sections, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    GoogleScholar,
    Orcid,
    PeerReviews,
    ResearchGate,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::GoogleScholar,
        Section::Orcid,
        Section::PeerReviews,
        Section::ResearchGate,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::GoogleScholar => "Google Scholar",
            Section::Orcid => "ORCID",
            Section::PeerReviews => "Peer Reviews",
            Section::ResearchGate => "ResearchGate",
        }
    }
}

/// README built from rendered badges
#[derive(Debug, Clone)]
pub struct ReadmeDocument {
    title: String,
    generated_at: DateTime<Utc>,
    biography: Option<String>,
    sections: BTreeMap<Section, Vec<Badge>>,
}

impl ReadmeDocument {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
            biography: None,
            sections: Section::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }

    /// Biography shown as a quote in the ORCID section
    pub fn set_biography(&mut self, biography: impl Into<String>) {
        self.biography = Some(biography.into());
    }

    pub fn push_badge(&mut self, section: Section, badge: Badge) {
        self.sections.entry(section).or_default().push(badge);
    }

    pub fn badges(&self, section: Section) -> &[Badge] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn render(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        out.push_str(&format!(
            "_Last updated: {}_\n",
            self.generated_at.format(TIMESTAMP_FORMAT)
        ));

        for (section, badges) in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.title()));

            if *section == Section::Orcid {
                if let Some(bio) = &self.biography {
                    for line in bio.lines().map(str::trim_end) {
                        if line.is_empty() {
                            out.push_str(">\n");
                        } else {
                            out.push_str(&format!("> {}\n", line));
                        }
                    }
                    out.push('\n');
                }
            }

            if badges.is_empty() {
                out.push_str(NO_DATA_LINE);
                out.push('\n');
            } else {
                for badge in badges {
                    out.push_str(&badge.render());
                    out.push('\n');
                }
            }
        }

        out
    }

    /// Overwrite `path` with the rendered document
    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        write_text(&self.render(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_render_empty_document() {
        let doc = ReadmeDocument::new("Research Metrics", timestamp());
        let text = doc.render();

        assert!(text.starts_with("# Research Metrics\n\n_Last updated: 2026-10-19 08:30:00 UTC_\n"));
        for section in Section::ALL {
            assert!(text.contains(&format!("## {}\n\n{}\n", section.title(), NO_DATA_LINE)));
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let mut doc = ReadmeDocument::new("Metrics", timestamp());
        doc.push_badge(Section::ResearchGate, Badge::new("Reads", "10", "teal"));
        doc.push_badge(Section::GoogleScholar, Badge::new("Citations", "5", "blue"));

        let text = doc.render();
        let positions: Vec<usize> = Section::ALL
            .iter()
            .map(|s| text.find(&format!("## {}", s.title())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_badges_and_biography() {
        let mut doc = ReadmeDocument::new("Metrics", timestamp());
        doc.set_biography("Line one.\n\nLine two.");
        doc.push_badge(Section::Orcid, Badge::new("Reviews", "3", "green"));

        let text = doc.render();
        assert!(text.contains("## ORCID\n\n> Line one.\n>\n> Line two.\n\n![Reviews]("));
        assert_eq!(doc.badges(Section::Orcid).len(), 1);
        assert!(doc.badges(Section::PeerReviews).is_empty());
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "old content that is much longer than the new one ".repeat(50))
            .unwrap();

        let doc = ReadmeDocument::new("Metrics", timestamp());
        doc.write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.render());
    }
}
