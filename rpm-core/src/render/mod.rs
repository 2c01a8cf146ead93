//! Cleanup of raw generator output into displayable HTML.
//!
//! No validation or sanitisation happens here; the generator is trusted.

use crate::config::constants::urls;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Url;

#[allow(clippy::expect_used)]
fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal regex pattern")
}

static FENCE_START: Lazy<Regex> = Lazy::new(|| literal_regex(r"^\s*```(?:html|HTML)?[ \t]*\r?\n?"));
static FENCE_END: Lazy<Regex> = Lazy::new(|| literal_regex(r"\r?\n?[ \t]*```\s*$"));
static BOLD: Lazy<Regex> = Lazy::new(|| literal_regex(r"\*\*(.*?)\*\*"));
static VISUAL: Lazy<Regex> = Lazy::new(|| literal_regex(r"\[Visual:\s*([^\]\s]+)\s*\]"));
static QR_CODE: Lazy<Regex> = Lazy::new(|| literal_regex(r"\[QR Code:\s*([^\]\s]+)\s*\]"));

/// Normalise raw generator text.
///
/// Steps run in order: strip the surrounding code fence, turn `**bold**` into
/// `<b>`, expand `[Visual: url]` into a link and `[QR Code: url]` into a QR
/// image with caption. Already-clean input comes back unchanged.
pub fn clean_generated_html(raw: &str) -> String {
    let text = strip_code_fence(raw);
    let text = BOLD.replace_all(&text, "<b>$1</b>");
    let text = VISUAL.replace_all(&text, |caps: &Captures<'_>| visual_link(&caps[1]));
    let text = QR_CODE.replace_all(&text, |caps: &Captures<'_>| {
        qr_code_figure(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    text.into_owned()
}

pub fn strip_code_fence(raw: &str) -> String {
    let text = FENCE_START.replace(raw, "");
    FENCE_END.replace(&text, "").into_owned()
}

fn visual_link(url: &str) -> String {
    format!(
        r#"<a href="{url}" target="_blank" rel="noopener noreferrer" style="color: #1a56db; text-decoration: underline;">Lihat Media Visual</a>"#
    )
}

/// Image URL of the QR code pointing at `target`
pub fn qr_code_image_url(target: &str) -> Option<String> {
    Url::parse_with_params(
        urls::QR_CODE_ENDPOINT,
        &[("size", urls::QR_CODE_SIZE), ("data", target)],
    )
    .ok()
    .map(String::from)
}

fn qr_code_figure(target: &str) -> Option<String> {
    let src = qr_code_image_url(target)?;
    Some(format!(
        r#"<figure style="display: inline-block; text-align: center; margin: 8px;"><img src="{src}" alt="QR Code" width="150" height="150"/><figcaption style="font-size: 10pt;">Pindai QR Code untuk membuka:<br/>{target}</figcaption></figure>"#
    ))
}
