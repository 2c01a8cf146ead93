//! Export of the finished document for Word and for rich-text paste

use crate::lesson::LessonPlanRequest;
use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type Word opens an HTML document with
pub const WORD_MIME_TYPE: &str = "application/msword";

const PRINT_STYLE: &str = "body { font-family: 'Times New Roman', Times, serif; font-size: 12pt; color: #000 !important; }
table { border-collapse: collapse; width: 100%; }
td, th { vertical-align: top; padding: 8px; }
.page-break { page-break-before: always; }";

#[allow(clippy::expect_used)]
fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal regex pattern")
}

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| literal_regex(r"(?is)<(style|script)[^>]*>.*?</(style|script)>"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| literal_regex(r"(?i)<br\s*/?>"));
static BLOCK_END: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?i)</(p|div|tr|h[1-6]|li|table|thead|tbody|figure)\s*>"));
static CELL_END: Lazy<Regex> = Lazy::new(|| literal_regex(r"(?i)</t[dh]\s*>"));
static TAG: Lazy<Regex> = Lazy::new(|| literal_regex(r"<[^>]*>"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| literal_regex(r"\n{3,}"));

/// Darken light table borders and section shading for print contrast
fn darken_for_print(html: &str) -> String {
    html.replace("border: 1px solid #ddd", "border: 1px solid #000")
        .replace("background-color: #f2f2f2", "background-color: #e0e0e0")
}

/// Standalone HTML document that Word opens as a `.doc`
pub fn word_document(html: &str) -> String {
    let body = darken_for_print(html);
    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40">
<head>
<meta charset="UTF-8">
<title>Rencana Pembelajaran Mendalam</title>
<!--[if gte mso 9]><xml><w:WordDocument><w:View>Print</w:View><w:Zoom>100</w:Zoom></w:WordDocument></xml><![endif]-->
<style>
@page {{ size: 21cm 29.7cm; margin: 2cm; }}
{PRINT_STYLE}
</style>
</head>
<body>{body}</body>
</html>"#
    )
}

/// Rich-text clipboard payload with darkened borders
pub fn clipboard_html(html: &str) -> String {
    let body = darken_for_print(html);
    format!(
        r#"<html>
<head>
<meta charset="UTF-8">
<style>
{PRINT_STYLE}
</style>
</head>
<body>{body}</body>
</html>"#
    )
}

/// Tag-free text used when rich-text clipboard writes are refused
pub fn plain_text(html: &str) -> String {
    let text = STYLE_BLOCK.replace_all(html, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = CELL_END.replace_all(&text, "\t");
    let text = BLOCK_END.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    BLANK_RUN
        .replace_all(&lines.join("\n"), "\n\n")
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// `RPM_<subject>_<class>.doc`, restricted to ASCII letters, digits and `_`
pub fn download_filename(request: &LessonPlanRequest) -> String {
    format!(
        "RPM_{}_{}.doc",
        filename_segment(&request.subject),
        filename_segment(request.class_name.label())
    )
}

fn filename_segment(raw: &str) -> String {
    let mut segment = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            segment.push(ch);
        } else if !segment.ends_with('_') && !segment.is_empty() {
            segment.push('_');
        }
    }
    let trimmed = segment.trim_end_matches('_');
    if trimmed.is_empty() {
        "Dokumen".to_string()
    } else {
        trimmed.to_string()
    }
}
