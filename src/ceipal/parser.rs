// src/ceipal/parser.rs
//! Turns a job postings payload (JSON or the HTML listing table) into raw records

use super::fetcher::ListingPayload;
use crate::types::RawJobRecord;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

const EXCERPT_CHARS: usize = 200;

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tbody tr").expect("static selector"));
static BADGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".badge, .count").expect("static selector"));
static JOB_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href*="job"]"#).expect("static selector"));

/// Result of reading a payload. `Unrecognized` keeps an excerpt of what came
/// back so it can be logged; callers treat it as an empty listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(Vec<RawJobRecord>),
    Unrecognized(String),
}

impl ParseOutcome {
    pub fn into_records(self) -> Vec<RawJobRecord> {
        match self {
            ParseOutcome::Parsed(records) => records,
            ParseOutcome::Unrecognized(excerpt) => {
                warn!("Unrecognized job postings payload, treating as empty: {}", excerpt);
                Vec::new()
            }
        }
    }
}

pub fn parse_listing(payload: &ListingPayload) -> ParseOutcome {
    if payload.is_json() {
        parse_json(&payload.body)
    } else {
        parse_html(&payload.body)
    }
}

/// Accepts a bare array of job objects or an object with a `data` array
pub fn parse_json(body: &str) -> ParseOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("Job postings body is not valid JSON: {}", e);
            return ParseOutcome::Unrecognized(excerpt(body));
        }
    };

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(items)) => items,
            _ => return ParseOutcome::Unrecognized(excerpt(body)),
        },
        _ => return ParseOutcome::Unrecognized(excerpt(body)),
    };

    let records = items
        .iter()
        .filter_map(Value::as_object)
        .map(raw_from_json)
        .collect();

    ParseOutcome::Parsed(records)
}

fn raw_from_json(object: &Map<String, Value>) -> RawJobRecord {
    RawJobRecord {
        id: text_field(object, &["id"]),
        job_code: text_field(object, &["jobCode", "code"]),
        title: text_field(object, &["title", "jobTitle"]),
        business_unit: text_field(object, &["businessUnit"]),
        client: text_field(object, &["client"]),
        client_job_id: text_field(object, &["clientJobId"]),
        location: text_field(object, &["location"]),
        state: text_field(object, &["state"]),
        status: text_field(object, &["status"]),
        description: text_field(object, &["description"]),
        salary: text_field(object, &["salary"]),
        posted_date: text_field(object, &["postedDate"]),
        applicants: object.get("applicants").and_then(count_value),
    }
}

/// First key holding a non-empty string or a number
fn text_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn count_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n.min(u32::MAX as u64) as u32),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

/// Reads the portal's job postings table.
///
/// Columns are positional and undocumented: 1 is a selection checkbox, then
/// job code, title, business unit, client, client job id, location, state, status.
pub fn parse_html(body: &str) -> ParseOutcome {
    let document = Html::parse_document(body);

    let mut dropped = 0usize;
    let records: Vec<RawJobRecord> = document
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let record = parse_row(row);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        debug!("Skipped {} table rows without job code or title", dropped);
    }

    ParseOutcome::Parsed(records)
}

fn parse_row(row: ElementRef<'_>) -> Option<RawJobRecord> {
    let cells: Vec<String> = row
        .children()
        .filter_map(ElementRef::wrap)
        .map(|cell| clean_text(&cell.text().collect::<Vec<_>>().join(" ")))
        .collect();

    let cell = |index: usize| cells.get(index).filter(|text| !text.is_empty()).cloned();

    let job_code = cell(1)?;
    let title = cell(2)?;

    Some(RawJobRecord {
        id: extract_job_id(row),
        job_code: Some(job_code),
        title: Some(title),
        business_unit: cell(3),
        client: cell(4),
        client_job_id: cell(5),
        location: cell(6),
        state: cell(7),
        status: cell(8),
        applicants: Some(extract_applicant_count(row)),
        ..RawJobRecord::default()
    })
}

fn extract_applicant_count(row: ElementRef<'_>) -> u32 {
    row.select(&BADGE_SELECTOR)
        .filter_map(|badge| leading_number(&badge.text().collect::<String>()))
        .fold(0u32, u32::saturating_add)
}

fn extract_job_id(row: ElementRef<'_>) -> Option<String> {
    let href = row.select(&JOB_LINK_SELECTOR).next()?.value().attr("href")?;
    numeric_path_segment(href)
}

/// Digits directly after the first `/` that is followed by a digit
fn numeric_path_segment(href: &str) -> Option<String> {
    href.match_indices('/').find_map(|(index, _)| {
        let digits: String = href[index + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        (!digits.is_empty()).then_some(digits)
    })
}

/// Leading count in a badge or string field. An optional `+` is accepted, a
/// negative count is ignored and an oversized one saturates at `u32::MAX`.
fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td>{}</td>", c)).collect();
        format!("<tr>{}</tr>", tds)
    }

    fn table(rows: &[String]) -> String {
        format!(
            "<html><body><table><thead><tr><th>#</th><th>Code</th></tr></thead><tbody>{}</tbody></table></body></html>",
            rows.concat()
        )
    }

    #[test]
    fn test_json_bare_array_preserves_order() {
        let body = r#"[
            {"id": 7, "jobCode": "JPC-7", "title": "Java Developer"},
            {"code": "JPC-8", "jobTitle": "QA Analyst", "applicants": 4},
            {"title": "Untitled code"}
        ]"#;

        let records = match parse_json(body) {
            ParseOutcome::Parsed(records) => records,
            other => panic!("expected parsed records, got {:?}", other),
        };

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id.as_deref(), Some("7"));
        assert_eq!(records[0].title.as_deref(), Some("Java Developer"));
        assert_eq!(records[1].job_code.as_deref(), Some("JPC-8"));
        assert_eq!(records[1].title.as_deref(), Some("QA Analyst"));
        assert_eq!(records[1].applicants, Some(4));
        assert_eq!(records[2].job_code, None);
    }

    #[test]
    fn test_json_data_wrapper() {
        let body = r#"{"data": [{"jobCode": "A"}, {"jobCode": "B"}], "total": 2}"#;
        let records = parse_json(body).into_records();
        let codes: Vec<_> = records.iter().filter_map(|r| r.job_code.clone()).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_json_non_object_items_skipped() {
        let records = parse_json(r#"[{"jobCode": "A"}, 3, "text", null]"#).into_records();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_json_unrecognized_shapes() {
        assert!(matches!(
            parse_json(r#"{"jobs": []}"#),
            ParseOutcome::Unrecognized(_)
        ));
        assert!(matches!(
            parse_json(r#"{"data": "none"}"#),
            ParseOutcome::Unrecognized(_)
        ));
        assert!(matches!(parse_json("42"), ParseOutcome::Unrecognized(_)));
        assert!(matches!(
            parse_json("<html>oops"),
            ParseOutcome::Unrecognized(_)
        ));
        assert!(parse_json(r#"{"jobs": []}"#).into_records().is_empty());
    }

    #[test]
    fn test_unrecognized_keeps_excerpt() {
        let body = "x".repeat(500);
        match parse_json(&body) {
            ParseOutcome::Unrecognized(excerpt) => assert_eq!(excerpt.len(), EXCERPT_CHARS),
            other => panic!("expected unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn test_html_positional_columns() {
        let html = table(&[row(&[
            "<input type=\"checkbox\">",
            " JPC-101 ",
            "<a href=\"/job/view/48213\">Senior   React Developer</a>",
            "Engineering",
            "Globex",
            "GX-9",
            "Remote - US",
            "TX",
            "Active <span class=\"badge\">3</span><span class=\"count\">12</span>",
        ])]);

        let records = parse_html(&html).into_records();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.job_code.as_deref(), Some("JPC-101"));
        assert_eq!(record.title.as_deref(), Some("Senior React Developer"));
        assert_eq!(record.business_unit.as_deref(), Some("Engineering"));
        assert_eq!(record.client.as_deref(), Some("Globex"));
        assert_eq!(record.client_job_id.as_deref(), Some("GX-9"));
        assert_eq!(record.location.as_deref(), Some("Remote - US"));
        assert_eq!(record.state.as_deref(), Some("TX"));
        assert_eq!(record.status.as_deref(), Some("Active 3 12"));
        assert_eq!(record.applicants, Some(15));
        assert_eq!(record.id.as_deref(), Some("48213"));
    }

    #[test]
    fn test_html_rows_without_code_or_title_dropped() {
        let html = table(&[
            row(&["", "JPC-1", "Data Engineer", "", "", "", "Austin", "TX", "Active"]),
            row(&["", "", "No Code Role", "", "", "", "", "", ""]),
            row(&["", "JPC-3", "", "", "", "", "", "", ""]),
            row(&["", "", "", "", "", "", "", "", ""]),
            row(&["", "JPC-5", "Cloud Architect", "", "", "", "", "", ""]),
        ]);

        let records = parse_html(&html).into_records();
        let codes: Vec<_> = records.iter().filter_map(|r| r.job_code.as_deref()).collect();
        assert_eq!(codes, vec!["JPC-1", "JPC-5"]);
    }

    #[test]
    fn test_html_without_table_is_empty() {
        assert_eq!(
            parse_html("<html><body><p>No postings</p></body></html>"),
            ParseOutcome::Parsed(Vec::new())
        );
    }

    #[test]
    fn test_html_missing_link_and_badges() {
        let html = table(&[row(&["", "JPC-2", "Analyst"])]);
        let records = parse_html(&html).into_records();
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].applicants, Some(0));
        assert_eq!(records[0].location, None);
    }

    #[test]
    fn test_numeric_path_segment() {
        assert_eq!(numeric_path_segment("/JobPosts/view/123?tab=1"), Some("123".to_string()));
        assert_eq!(numeric_path_segment("job/45/edit"), Some("45".to_string()));
        assert_eq!(numeric_path_segment("/jobs/view"), None);
        assert_eq!(numeric_path_segment("job-details"), None);
    }

    #[test]
    fn test_leading_number_signs_and_overflow() {
        assert_eq!(leading_number(" 12 applicants"), Some(12));
        assert_eq!(leading_number("+3"), Some(3));
        assert_eq!(leading_number("99999999999"), Some(u32::MAX));
        assert_eq!(leading_number("-2"), None);
        assert_eq!(leading_number("+"), None);
        assert_eq!(leading_number("new"), None);

        let html = table(&[row(&[
            "",
            "JPC-7",
            "Nurse",
            "",
            "",
            "",
            "",
            "",
            "Active <span class=\"badge\">+3</span><span class=\"count\">4</span>",
        ])]);
        let records = parse_html(&html).into_records();
        assert_eq!(records[0].applicants, Some(7));
    }

    #[test]
    fn test_dispatch_on_content_type() {
        let json = ListingPayload {
            body: r#"[{"jobCode": "A", "title": "T"}]"#.to_string(),
            content_type: Some("application/json".to_string()),
        };
        assert_eq!(parse_listing(&json).into_records().len(), 1);

        let html = ListingPayload {
            body: table(&[row(&["", "A", "T"])]),
            content_type: Some("text/html".to_string()),
        };
        assert_eq!(parse_listing(&html).into_records().len(), 1);
    }
}
