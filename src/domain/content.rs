//! Content items: what a single deployed newsletter file becomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a deployed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Daily market briefing (shown in the homepage hero)
    Briefing,

    /// Crypto newsletter
    Crypto,

    /// Card news
    Card,

    /// Crypto card news
    CryptoCard,

    /// English edition
    English,
}

impl ContentType {
    /// Human-readable label used in link text and commit messages.
    ///
    /// The English edition has no label; its summary stands alone.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Briefing => "순살브리핑",
            ContentType::Crypto => "순살크립토",
            ContentType::Card => "순살카드뉴스",
            ContentType::CryptoCard => "순살크립토카드뉴스",
            ContentType::English => "",
        }
    }

    /// Tag span rendered in homepage entries
    pub fn home_tag(&self) -> &'static str {
        match self {
            ContentType::Briefing => {
                r#"<span class="tag" style="background:#F07040; color:#fff;">브리핑</span>"#
            }
            ContentType::Crypto => r#"<span class="tag tag-crypto">Crypto</span>"#,
            ContentType::Card | ContentType::CryptoCard => {
                r#"<span class="tag tag-card">Card</span>"#
            }
            ContentType::English => r#"<span class="tag tag-en">EN</span>"#,
        }
    }

    /// Tag span rendered in archive entries
    pub fn archive_tag(&self) -> &'static str {
        match self {
            ContentType::Briefing => r#"<span class="tag tag-briefing">브리핑</span>"#,
            ContentType::Crypto => r#"<span class="tag tag-crypto">Crypto</span>"#,
            ContentType::Card => r#"<span class="tag tag-card">Card</span>"#,
            ContentType::CryptoCard => {
                r#"<span class="tag tag-card tag-crypto">Card · Crypto</span>"#
            }
            ContentType::English => r#"<span class="tag tag-en">EN</span>"#,
        }
    }

    /// Position within a date section (lower sorts first)
    pub fn display_order(&self) -> u8 {
        match self {
            ContentType::Briefing => 0,
            ContentType::Crypto => 1,
            ContentType::Card => 2,
            ContentType::CryptoCard => 3,
            ContentType::English => 4,
        }
    }

    /// Whether this type drives the homepage "Latest" hero
    pub fn is_latest_eligible(&self) -> bool {
        matches!(self, ContentType::Briefing)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Briefing => write!(f, "briefing"),
            ContentType::Crypto => write!(f, "crypto"),
            ContentType::Card => write!(f, "card"),
            ContentType::CryptoCard => write!(f, "crypto-card"),
            ContentType::English => write!(f, "english"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "briefing" => Ok(ContentType::Briefing),
            "crypto" => Ok(ContentType::Crypto),
            "card" => Ok(ContentType::Card),
            "crypto-card" | "crypto_card" => Ok(ContentType::CryptoCard),
            "english" | "en" => Ok(ContentType::English),
            _ => anyhow::bail!("Unknown content type: {}", s),
        }
    }
}

/// Publication date taken from a filename
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDate {
    /// Four-digit year, e.g. "2026"
    pub year: String,

    /// Month and day without separator, e.g. "0302"
    pub month_day: String,
}

impl ContentDate {
    /// Locate the first run of 8 ASCII digits (YYYYMMDD) in `name`.
    ///
    /// Longer digit runs count too; their first 8 digits are used.
    pub fn from_filename(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        let mut run_start = 0;
        let mut run_len = 0;

        for (i, b) in bytes.iter().enumerate() {
            if b.is_ascii_digit() {
                if run_len == 0 {
                    run_start = i;
                }
                run_len += 1;
                if run_len == 8 {
                    let digits = &name[run_start..run_start + 8];
                    return Some(Self {
                        year: digits[..4].to_string(),
                        month_day: digits[4..].to_string(),
                    });
                }
            } else {
                run_len = 0;
            }
        }

        None
    }

    /// Parse the dotted form `YYYY.MM.DD`
    pub fn from_formatted(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'.' || bytes[7] != b'.' {
            return None;
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return None;
        }

        Some(Self {
            year: s[..4].to_string(),
            month_day: format!("{}{}", &s[5..7], &s[8..10]),
        })
    }

    /// Two-digit month
    pub fn month(&self) -> &str {
        &self.month_day[..2]
    }

    /// Two-digit day
    pub fn day(&self) -> &str {
        &self.month_day[2..]
    }

    /// Dotted form used as section keys: `YYYY.MM.DD`
    pub fn formatted(&self) -> String {
        format!("{}.{}.{}", self.year, self.month(), self.day())
    }
}

impl fmt::Display for ContentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Build the repository-relative destination of a deployed page:
/// `{directory}/{year}/{month_day}{suffix}.html`
pub fn deploy_path(directory: &str, year: &str, month_day: &str, suffix: &str) -> String {
    format!("{}/{}/{}{}.html", directory, year, month_day, suffix)
}

/// One classified, copied input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Content category
    pub content_type: ContentType,

    /// Destination category directory (e.g. "newsletters")
    pub directory: String,

    /// Publication date
    pub date: ContentDate,

    /// Summary text extracted from the page
    pub keywords: String,

    /// Repository-relative destination path
    pub deploy_path: String,
}

impl ContentItem {
    /// Create an item, deriving its destination path
    pub fn new(
        content_type: ContentType,
        directory: impl Into<String>,
        suffix: &str,
        date: ContentDate,
        keywords: impl Into<String>,
    ) -> Self {
        let directory = directory.into();
        let deploy_path = deploy_path(&directory, &date.year, &date.month_day, suffix);
        Self {
            content_type,
            directory,
            date,
            keywords: keywords.into(),
            deploy_path,
        }
    }

    /// Site-absolute link target
    pub fn href(&self) -> String {
        format!("/{}", self.deploy_path)
    }

    /// Name used in the commit message: the label, or the start of the summary
    pub fn commit_name(&self) -> String {
        let label = self.content_type.label();
        if label.is_empty() {
            self.keywords.chars().take(30).collect()
        } else {
            label.to_string()
        }
    }
}

/// Render an index entry link
pub fn build_link(href: &str, tag: &str, label: &str, keywords: &str) -> String {
    let text = if label.is_empty() {
        keywords.to_string()
    } else {
        format!("{} · {}", label, keywords)
    };
    format!(
        r#"<a href="{}" style="display:flex; align-items:center; gap:10px;">{}{}</a>"#,
        href, tag, text
    )
}
