//! Category archive pages: a flat, newest-first list of date sections.

use crate::domain::{build_link, ContentDate, ContentItem};

use super::{IndexDocument, IndexError, ARCHIVE_SECTIONS};

/// Where an entry ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Added to the end of an existing date section
    Appended,

    /// A new date section was created ahead of all others
    NewSection,
}

/// Archive index page for one category directory
#[derive(Debug, Clone)]
pub struct ArchiveIndex {
    doc: IndexDocument,
}

impl ArchiveIndex {
    pub fn parse(content: &str) -> Self {
        Self {
            doc: IndexDocument::parse(content, ARCHIVE_SECTIONS),
        }
    }

    pub fn document(&self) -> &IndexDocument {
        &self.doc
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Add a pre-rendered entry link under `date`
    pub fn add_entry(
        &mut self,
        date: &ContentDate,
        link: String,
    ) -> Result<Placement, IndexError> {
        if self.doc.has_section(date) {
            self.doc.append_entry(date, link)?;
            Ok(Placement::Appended)
        } else {
            self.doc.insert_first_section(date.clone(), vec![link])?;
            Ok(Placement::NewSection)
        }
    }

    /// Add the archive link for a deployed item
    pub fn add_item(&mut self, item: &ContentItem) -> Result<Placement, IndexError> {
        let link = build_link(
            &item.href(),
            item.content_type.archive_tag(),
            item.content_type.label(),
            &item.keywords,
        );
        self.add_entry(&item.date, link)
    }
}
