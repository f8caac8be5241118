//! Markdown document rendering
//!
//! Turns an event snapshot into the canonical Markdown document mirrored to
//! GitHub. Rendering is pure: same events and options, byte-identical output.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use crate::events::EventRecord;

use super::SECTION_MARKER;

/// Marker emitted when no trustworthy coordinate source exists.
const COORDINATE_UNSET: &str = "未設定";

/// Separator between the header block and sections, and between sections.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title (`# {title}`).
    pub title: String,
    /// When set, a generated-at line is added to the header block. The
    /// instant is injected by the caller so output stays deterministic.
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "イベント一覧".to_string(),
            generated_at: None,
        }
    }
}

/// Render the event list into the canonical document.
///
/// Archived events are dropped, the rest sorted by date descending (stable,
/// so equal dates keep snapshot order), and each becomes one `## ` section
/// separated by horizontal rules.
pub fn render_document(events: &[EventRecord], options: &RenderOptions) -> String {
    let mut active: Vec<&EventRecord> = events.iter().filter(|e| !e.archived).collect();
    active.sort_by(|a, b| b.date.cmp(&a.date));

    let mut blocks = vec![render_header(options)];
    for (index, event) in active.iter().enumerate() {
        blocks.push(render_section(event, index == 0));
    }

    let mut document = blocks.join(SECTION_SEPARATOR);
    document.push('\n');
    document
}

fn render_header(options: &RenderOptions) -> String {
    let mut lines = vec![format!("# {}", options.title)];
    if let Some(at) = options.generated_at {
        lines.push(String::new());
        lines.push(format!("{} 時点", format_jst_datetime(at)));
    }
    lines.join("\n")
}

fn render_section(event: &EventRecord, first: bool) -> String {
    let mut lines = vec![format!("{}{}", SECTION_MARKER, event.name), String::new()];

    lines.push(format!("開催地: {}", event.prefecture));

    match event.effective_coordinates() {
        Some((lat, lng)) => lines.push(format!("座標: [{}, {}]", lat, lng)),
        None => lines.push(format!("座標: {}", COORDINATE_UNSET)),
    }

    lines.push(format!("開催日: {}", format_jst_date(event.date)));

    if let Some(ref description) = event.description {
        if !description.trim().is_empty() {
            lines.push(String::new());
            lines.push(render_description(description, first));
        }
    }

    let website = event.website.as_deref().filter(|w| !w.is_empty());
    let video = event.video_url.as_deref().filter(|v| !v.trim().is_empty());
    if website.is_some() || video.is_some() {
        lines.push(String::new());
        if let Some(url) = website {
            lines.push(format!("Webサイト: {}", url));
        }
        if let Some(url) = video {
            lines.push(format!("動画リスト: {}", url));
        }
    }

    lines.join("\n")
}

/// Format the description block.
///
/// Paragraphs are separated by blank lines. Bulleted paragraphs keep their
/// newlines verbatim; plain paragraphs reflow to a single line. The first
/// paragraph of the document's first event instead joins its lines with a
/// Markdown hard break (two spaces + newline) - a long-standing output quirk
/// that downstream consumers of the mirrored file rely on.
fn render_description(text: &str, first_event: bool) -> String {
    let normalized = text.replace("\r\n", "\n");

    let mut rendered = Vec::new();
    let mut index = 0usize;
    for paragraph in normalized.split("\n\n") {
        let paragraph = paragraph.trim_matches('\n');
        if paragraph.trim().is_empty() {
            continue;
        }

        let block = if has_bullet_line(paragraph) {
            paragraph.to_string()
        } else if first_event && index == 0 {
            paragraph
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("  \n")
        } else {
            paragraph
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" ")
        };

        rendered.push(block);
        index += 1;
    }

    rendered.join("\n\n")
}

fn has_bullet_line(paragraph: &str) -> bool {
    paragraph.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("- ") || line.starts_with("* ") || line.starts_with('・')
    })
}

fn jst() -> FixedOffset {
    // JST is a fixed +09:00 year-round.
    FixedOffset::east_opt(9 * 3600).expect("valid JST offset")
}

fn format_jst_date(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&jst());
    format!("{}年{}月{}日", local.year(), local.month(), local.day())
}

fn format_jst_datetime(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&jst());
    format!(
        "{}年{}月{}日 {:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(name: &str, date: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: format!("evt-{}", name),
            name: name.to_string(),
            prefecture: "東京都".to_string(),
            date,
            website: None,
            description: None,
            video_url: None,
            latitude: None,
            longitude: None,
            archived: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_archived_events_are_excluded() {
        let fest_a = event("Fest A", date(2024, 3, 1));
        let mut fest_b = event("Fest B", date(2023, 1, 1));
        fest_b.prefecture = "大阪府".to_string();
        fest_b.archived = true;

        let document = render_document(&[fest_a, fest_b], &RenderOptions::default());

        assert!(document.contains("## Fest A"));
        assert!(!document.contains("Fest B"));
        assert_eq!(document.matches(SECTION_MARKER).count(), 1);
    }

    #[test]
    fn test_all_archived_renders_no_sections() {
        let mut a = event("A", date(2024, 1, 1));
        let mut b = event("B", date(2024, 2, 1));
        a.archived = true;
        b.archived = true;

        let document = render_document(&[a, b], &RenderOptions::default());

        assert_eq!(document.matches(SECTION_MARKER).count(), 0);
        assert!(document.starts_with("# イベント一覧"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let events = vec![
            event("Fest A", date(2024, 3, 1)),
            event("Fest B", date(2024, 5, 1)),
        ];
        let options = RenderOptions {
            title: "イベント一覧".to_string(),
            generated_at: Some(date(2024, 6, 1)),
        };

        assert_eq!(
            render_document(&events, &options),
            render_document(&events, &options)
        );
    }

    #[test]
    fn test_sections_sorted_by_date_descending() {
        let events = vec![
            event("Oldest", date(2022, 1, 1)),
            event("Newest", date(2024, 1, 1)),
            event("Middle", date(2023, 1, 1)),
        ];

        let document = render_document(&events, &RenderOptions::default());

        let newest = document.find("## Newest").unwrap();
        let middle = document.find("## Middle").unwrap();
        let oldest = document.find("## Oldest").unwrap();
        assert!(newest < middle);
        assert!(middle < oldest);
    }

    #[test]
    fn test_equal_dates_keep_snapshot_order() {
        let events = vec![
            event("First", date(2024, 1, 1)),
            event("Second", date(2024, 1, 1)),
            event("Third", date(2024, 1, 1)),
        ];

        let document = render_document(&events, &RenderOptions::default());

        let first = document.find("## First").unwrap();
        let second = document.find("## Second").unwrap();
        let third = document.find("## Third").unwrap();
        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn test_explicit_coordinates_rendered() {
        let mut e = event("Fest", date(2024, 1, 1));
        e.latitude = Some(34.5);
        e.longitude = Some(135.25);

        let document = render_document(&[e], &RenderOptions::default());

        assert!(document.contains("座標: [34.5, 135.25]"));
    }

    #[test]
    fn test_prefecture_coordinate_fallback() {
        let e = event("Fest", date(2024, 1, 1));

        let document = render_document(&[e], &RenderOptions::default());

        assert!(document.contains("座標: [35.6894, 139.6917]"));
    }

    #[test]
    fn test_unknown_prefecture_renders_unset_marker() {
        let mut e = event("Fest", date(2024, 1, 1));
        e.prefecture = "オンライン".to_string();

        let document = render_document(&[e], &RenderOptions::default());

        assert!(document.contains("座標: 未設定"));
        assert!(!document.contains("[0, 0]"));
    }

    #[test]
    fn test_date_rendered_as_jst_calendar_date() {
        // 2024-02-29 23:00 UTC is 2024-03-01 08:00 in JST.
        let e = event("Fest", Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap());

        let document = render_document(&[e], &RenderOptions::default());

        assert!(document.contains("開催日: 2024年3月1日"));
    }

    #[test]
    fn test_optional_link_lines() {
        let mut with_links = event("Fest A", date(2024, 2, 1));
        with_links.website = Some("https://example.com/fest".to_string());
        with_links.video_url = Some("https://example.com/videos".to_string());

        let mut blank_video = event("Fest B", date(2024, 1, 1));
        blank_video.website = Some(String::new());
        blank_video.video_url = Some("   ".to_string());

        let document = render_document(&[with_links, blank_video], &RenderOptions::default());

        assert!(document.contains("Webサイト: https://example.com/fest"));
        assert!(document.contains("動画リスト: https://example.com/videos"));
        // Empty and all-whitespace links produce no lines at all.
        assert_eq!(document.matches("Webサイト:").count(), 1);
        assert_eq!(document.matches("動画リスト:").count(), 1);
    }

    #[test]
    fn test_first_event_first_paragraph_keeps_line_breaks() {
        let mut first = event("Fest A", date(2024, 2, 1));
        first.description = Some("line one\nline two\n\nsecond para\ncontinues".to_string());
        let mut second = event("Fest B", date(2024, 1, 1));
        second.description = Some("other one\nother two".to_string());

        let document = render_document(&[first, second], &RenderOptions::default());

        // First paragraph of the first event: hard line breaks.
        assert!(document.contains("line one  \nline two"));
        // Its second paragraph reflows.
        assert!(document.contains("second para continues"));
        // Other events reflow from their first paragraph.
        assert!(document.contains("other one other two"));
    }

    #[test]
    fn test_bulleted_paragraphs_stay_verbatim() {
        let mut e = event("Fest", date(2024, 1, 1));
        e.description = Some("intro text\n\n- first item\n- second item\n- third item".to_string());

        let document = render_document(&[e], &RenderOptions::default());

        assert!(document.contains("- first item\n- second item\n- third item"));
    }

    #[test]
    fn test_header_metadata_line() {
        let options = RenderOptions {
            title: "イベント一覧".to_string(),
            generated_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap()),
        };

        let document = render_document(&[], &options);

        // 03:00 UTC is 12:00 JST.
        assert!(document.contains("2024年3月1日 12:00 時点"));
    }

    #[test]
    fn test_sections_separated_by_horizontal_rule() {
        let events = vec![
            event("Fest A", date(2024, 2, 1)),
            event("Fest B", date(2024, 1, 1)),
        ];

        let document = render_document(&events, &RenderOptions::default());

        assert_eq!(document.matches("\n\n---\n\n").count(), 2);
        assert!(document.ends_with('\n'));
    }
}
