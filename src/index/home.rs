//! The site homepage: date sections plus the "Latest" briefing hero.
//!
//! The hero is tracked as [`HomeIndex::latest`]. Moving it rewrites the hero
//! label (`Latest &mdash; YYYY.MM.DD`) and the hero frame target, then
//! back-fills the previous date's section with a link to the briefing that
//! used to be featured.

use crate::domain::{build_link, deploy_path, ContentDate, ContentItem, ContentType};

use super::{IndexDocument, IndexError, HOME_SECTIONS};

/// Category directory holding briefings
pub const BRIEFING_DIRECTORY: &str = "newsletters";

const LATEST_MARKER: &str = "Latest &mdash; ";

/// Repository-relative path of the briefing for `date`
pub fn briefing_path(date: &ContentDate) -> String {
    deploy_path(BRIEFING_DIRECTORY, &date.year, &date.month_day, "")
}

fn latest_label(date: &ContentDate) -> String {
    format!("{}{}", LATEST_MARKER, date.formatted())
}

fn hero_frame_target(date: &ContentDate) -> String {
    format!(r#"/{}" title="순살브리핑 최신호""#, briefing_path(date))
}

/// What one date group did to the homepage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeUpdate {
    /// Hero date before the migration, if the hero moved
    pub previous_latest: Option<ContentDate>,

    /// Whether the previous briefing was linked into its own date section
    pub backfilled: bool,

    /// Whether a new date section was created
    pub new_section: bool,

    /// Mutations that could not be applied
    pub conditions: Vec<IndexError>,
}

/// Parsed homepage
#[derive(Debug, Clone)]
pub struct HomeIndex {
    doc: IndexDocument,
    latest: Option<ContentDate>,
}

impl HomeIndex {
    pub fn parse(content: &str) -> Self {
        let doc = IndexDocument::parse(content, HOME_SECTIONS);
        let latest = doc.raw_lines().find_map(|line| {
            let at = line.find(LATEST_MARKER)? + LATEST_MARKER.len();
            ContentDate::from_formatted(line.get(at..at + 10)?)
        });
        Self { doc, latest }
    }

    pub fn document(&self) -> &IndexDocument {
        &self.doc
    }

    /// Date of the briefing currently featured in the hero
    pub fn latest(&self) -> Option<&ContentDate> {
        self.latest.as_ref()
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Hero date whose briefing must be re-read for back-fill when `items`
    /// for `date` are applied. `None` when the hero will not move.
    pub fn backfill_candidate(&self, date: &ContentDate, items: &[ContentItem]) -> Option<&ContentDate> {
        if !has_latest_item(items) {
            return None;
        }
        self.latest.as_ref().filter(|latest| *latest != date)
    }

    /// Apply one date group. `previous_keywords` is the freshly extracted
    /// summary of the briefing being demoted from the hero; back-fill is
    /// skipped without it.
    pub fn apply(
        &mut self,
        date: &ContentDate,
        items: &[ContentItem],
        previous_keywords: Option<&str>,
    ) -> HomeUpdate {
        let mut update = HomeUpdate::default();

        if has_latest_item(items) {
            self.migrate_latest(date, previous_keywords, &mut update);
        }

        let mut listed: Vec<&ContentItem> = items
            .iter()
            .filter(|i| !i.content_type.is_latest_eligible())
            .collect();
        listed.sort_by_key(|i| i.content_type.display_order());
        let links: Vec<String> = listed
            .into_iter()
            .map(|item| {
                build_link(
                    &item.href(),
                    item.content_type.home_tag(),
                    item.content_type.label(),
                    &item.keywords,
                )
            })
            .collect();

        if self.doc.has_section(date) {
            for link in links {
                if let Err(e) = self.doc.append_entry(date, link) {
                    update.conditions.push(e);
                }
            }
        } else {
            self.doc.demote_first();
            if !links.is_empty() {
                match self.doc.insert_first_section(date.clone(), links) {
                    Ok(()) => update.new_section = true,
                    Err(e) => update.conditions.push(e),
                }
            }
        }

        update
    }

    fn migrate_latest(
        &mut self,
        date: &ContentDate,
        previous_keywords: Option<&str>,
        update: &mut HomeUpdate,
    ) {
        let old = match self.latest.clone() {
            Some(old) => old,
            None => {
                update.conditions.push(IndexError::LatestMarkerNotFound);
                return;
            }
        };
        if &old == date {
            return;
        }

        self.doc.replace_in_raw(&latest_label(&old), &latest_label(date));
        if self
            .doc
            .replace_in_raw(&hero_frame_target(&old), &hero_frame_target(date))
            == 0
        {
            update.conditions.push(IndexError::HeroFrameNotFound {
                date: old.formatted(),
            });
        }
        self.latest = Some(date.clone());

        if let Some(keywords) = previous_keywords {
            let briefing = ContentType::Briefing;
            let link = build_link(
                &format!("/{}", briefing_path(&old)),
                briefing.home_tag(),
                briefing.label(),
                keywords,
            );
            match self.doc.prepend_entry(&old, link) {
                Ok(()) => update.backfilled = true,
                Err(e) => update.conditions.push(e),
            }
        }

        update.previous_latest = Some(old);
    }
}

fn has_latest_item(items: &[ContentItem]) -> bool {
    items.iter().any(|i| i.content_type.is_latest_eligible())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_path() {
        let date = ContentDate::from_formatted("2026.03.02").unwrap();
        assert_eq!(briefing_path(&date), "newsletters/2026/0302.html");
    }

    #[test]
    fn test_latest_parsed_from_label() {
        let home = HomeIndex::parse("<p class=\"hero-label\">Latest &mdash; 2026.02.27</p>");
        assert_eq!(
            home.latest(),
            Some(&ContentDate::from_formatted("2026.02.27").unwrap())
        );
    }

    #[test]
    fn test_missing_latest_marker_reported() {
        let mut home = HomeIndex::parse("<main></main>");
        let date = ContentDate::from_formatted("2026.03.02").unwrap();
        let item = ContentItem::new(ContentType::Briefing, "newsletters", "", date.clone(), "K");
        let update = home.apply(&date, &[item], None);
        assert_eq!(update.conditions, vec![IndexError::LatestMarkerNotFound]);
        assert!(update.previous_latest.is_none());
    }
}
