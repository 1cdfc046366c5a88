// RemoteOK-style listing parsing
use crate::config::ClassificationPolicy;
use crate::model::{JobRecord, ParserError};
use crate::normalizer::{clean_text, has_money_marker};
use scraper::{ElementRef, Html, Selector};

pub const ROW_SELECTOR: &str = "tr.job";
pub const TITLE_SELECTOR: &str = "h2[itemprop='title']";
pub const COMPANY_SELECTOR: &str = "h3[itemprop='name']";
pub const LOCATION_SELECTOR: &str = "div.location";

pub trait Parser: Send + Sync {
    /// Returns one record per matched row, in document order.
    fn parse(&self, html: &str) -> Vec<JobRecord>;
}

pub struct RemoteOkParser {
    policy: ClassificationPolicy,
    row: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
}

fn compile(selector: &str) -> Result<Selector, ParserError> {
    Selector::parse(selector).map_err(|e| ParserError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

impl RemoteOkParser {
    pub fn new(policy: ClassificationPolicy) -> Result<Self, ParserError> {
        Ok(Self {
            policy,
            row: compile(ROW_SELECTOR)?,
            title: compile(TITLE_SELECTOR)?,
            company: compile(COMPANY_SELECTOR)?,
            location: compile(LOCATION_SELECTOR)?,
        })
    }

    fn first_text(&self, row: ElementRef<'_>, selector: &Selector) -> String {
        row.select(selector)
            .next()
            .map(|node| clean_text(&node.text().collect::<String>()))
            .unwrap_or_default()
    }

    fn parse_row(&self, row: ElementRef<'_>) -> JobRecord {
        let raw_locations: Vec<String> = row
            .select(&self.location)
            .map(|node| node.text().collect::<String>())
            .collect();

        let (locations, salary) = match self.policy {
            ClassificationPolicy::Content => classify_by_content(&raw_locations),
            ClassificationPolicy::Positional => classify_by_position(&raw_locations),
        };

        JobRecord {
            title: self.first_text(row, &self.title),
            company: self.first_text(row, &self.company),
            locations,
            salary,
        }
    }
}

impl Parser for RemoteOkParser {
    fn parse(&self, html: &str) -> Vec<JobRecord> {
        let document = Html::parse_document(html);
        document
            .select(&self.row)
            .map(|row| self.parse_row(row))
            .collect()
    }
}

/// Entries carrying a money marker make up the salary (joined with ", " when there
/// are several); every other non-empty entry is a location.
fn classify_by_content(raw: &[String]) -> (Vec<String>, String) {
    let mut locations = Vec::new();
    let mut salaries = Vec::new();
    for text in raw {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            continue;
        }
        if has_money_marker(text) {
            salaries.push(cleaned);
        } else {
            locations.push(cleaned);
        }
    }
    (locations, salaries.join(", "))
}

fn classify_by_position(raw: &[String]) -> (Vec<String>, String) {
    let locations = raw
        .first()
        .map(|text| clean_text(text))
        .filter(|text| !text.is_empty())
        .into_iter()
        .collect();
    let salary = raw.get(1).map(|text| clean_text(text)).unwrap_or_default();
    (locations, salary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!("<html><body><table id=\"jobsboard\"><tbody>{rows}</tbody></table></body></html>")
    }

    fn row(title: &str, company: &str, locations: &[&str]) -> String {
        let locations: String = locations
            .iter()
            .map(|l| format!("<div class=\"location\">{l}</div>"))
            .collect();
        format!(
            "<tr class=\"job\"><td class=\"company position company_and_position\">\
             <h2 itemprop=\"title\">{title}</h2><h3 itemprop=\"name\">{company}</h3>\
             {locations}</td></tr>"
        )
    }

    fn content_parser() -> RemoteOkParser {
        RemoteOkParser::new(ClassificationPolicy::Content).unwrap()
    }

    #[test]
    fn extracts_listing_row() {
        let html = page(&row("Backend Engineer", "Acme", &["Remote 🌍", "💰 $90k-$120k"]));
        let records = content_parser().parse(&html);
        assert_eq!(
            records,
            vec![JobRecord {
                title: "Backend Engineer".into(),
                company: "Acme".into(),
                locations: vec!["Remote".into()],
                salary: "$90k-$120k".into(),
            }]
        );
    }

    #[test]
    fn no_rows_no_records() {
        let html = page("<tr class=\"ad\"><td>sponsored</td></tr>");
        assert!(content_parser().parse(&html).is_empty());
        assert!(content_parser().parse("").is_empty());
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let html = page("<tr class=\"job\"><td>nothing here</td></tr>");
        let records = content_parser().parse(&html);
        assert_eq!(records, vec![JobRecord::default()]);
    }

    #[test]
    fn salary_found_regardless_of_position() {
        let html = page(&row(
            "  Go Dev \n",
            " Initech ",
            &["💰 $70k", "🇺🇸 US-only", "⏰ Full-time", "🌏"],
        ));
        let record = &content_parser().parse(&html)[0];
        assert_eq!(record.title, "Go Dev");
        assert_eq!(record.company, "Initech");
        assert_eq!(record.salary, "$70k");
        assert_eq!(record.locations, vec!["US-only", "Full-time"]);
    }

    #[test]
    fn salary_and_locations_partition_the_entries() {
        let entries = ["Remote", "$50k", "💵 60k", "Europe", "Asia 🌏"];
        let html = page(&row("t", "c", &entries));
        let record = &content_parser().parse(&html)[0];
        assert_eq!(record.salary, "$50k, 60k");
        assert!(!record.locations.iter().any(|l| l.contains('$')));
        assert_eq!(record.locations, vec!["Remote", "Europe", "Asia"]);
    }

    #[test]
    fn every_money_entry_is_kept() {
        let entries = ["💰 $90k", "Remote 🌍 Worldwide", "💵 equity $5k", "🌏"];
        let html = page(&row("t", "c", &entries));
        let record = &content_parser().parse(&html)[0];
        assert_eq!(record.salary, "$90k, equity $5k");
        assert_eq!(record.locations, vec!["Remote Worldwide"]);
    }

    #[test]
    fn rows_keep_document_order() {
        let html = page(&format!(
            "{}{}{}",
            row("one", "a", &[]),
            row("two", "b", &[]),
            row("three", "c", &[])
        ));
        let titles: Vec<_> = content_parser()
            .parse(&html)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn positional_policy_ignores_content() {
        let parser = RemoteOkParser::new(ClassificationPolicy::Positional).unwrap();
        let html = page(&row("t", "c", &["💰 $90k", "Remote 🌍", "Extra"]));
        let record = &parser.parse(&html)[0];
        assert_eq!(record.locations, vec!["$90k"]);
        assert_eq!(record.salary, "Remote");

        let html = page(&row("t", "c", &[]));
        let record = &parser.parse(&html)[0];
        assert!(record.locations.is_empty());
        assert_eq!(record.salary, "");
    }

    #[test]
    fn no_emoji_or_padding_survives() {
        let html = page(&row(" 🚀 Rust Dev ", "🦀 Crab Co", &[" 🌍 Worldwide ", " 💰 $1 "]));
        let record = &content_parser().parse(&html)[0];
        for field in [&record.title, &record.company, &record.salary]
            .into_iter()
            .chain(record.locations.iter())
        {
            assert_eq!(field, &clean_text(field));
        }
    }
}
