use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use lis_core::{PostRecord, PostType};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::time;

/// Feed markup separates the timestamp from edit markers with a bullet.
const DATE_SEPARATOR: char = '\u{2022}';

lazy_static! {
    static ref TEXT_SPAN: Selector =
        Selector::parse("div.feed-shared-update-v2__description-wrapper span.break-words").unwrap();
    static ref IMAGE: Selector = Selector::parse("div.update-components-image").unwrap();
    static ref VIDEO: Selector = Selector::parse("div.update-components-video").unwrap();
    static ref LINKEDIN_VIDEO: Selector =
        Selector::parse("div.update-components-linkedin-video").unwrap();
    static ref EXTERNAL_VIDEO: Selector =
        Selector::parse("div.feed-shared-external-video__meta").unwrap();
    static ref ARTICLE: Selector = Selector::parse("article.update-components-article").unwrap();
    static ref SHARED_POST: Selector = Selector::parse(
        "div.feed-shared-mini-update-v2.feed-shared-update-v2__update-content-wrapper.artdeco-card"
    )
    .unwrap();
    static ref ACTOR_SUB_DESCRIPTION: Selector = Selector::parse(
        "div[class*='update-components-actor__container'] span[class*='update-components-actor__sub-description']"
    )
    .unwrap();
    static ref HEADER_TEXT: Selector = Selector::parse(
        "div[class*='update-components-header'] span[class*='update-components-header__text-view']"
    )
    .unwrap();
    static ref SOCIAL_COUNTS: Selector =
        Selector::parse("div.social-details-social-counts").unwrap();
}

/// Parse one feed-item fragment into a [`PostRecord`].
///
/// Body text is mandatory: a fragment without the description span yields
/// `None` and the caller drops it. Every other field degrades to its default
/// when the markup is missing or malformed, so a single broken section never
/// discards an otherwise valid post.
pub fn extract_post(fragment: &str, scrape_time: DateTime<Utc>) -> Option<PostRecord> {
    let document = Html::parse_fragment(fragment);

    let text = extract_text(&document)?;
    let (likes, comments, shares) = extract_engagement(&document);

    Some(PostRecord {
        text,
        post_type: detect_post_type(&document),
        likes,
        comments,
        shares,
        date: extract_date(&document, scrape_time),
        is_repost: detect_repost(&document),
    })
}

fn extract_text(document: &Html) -> Option<String> {
    let span = document.select(&TEXT_SPAN).next()?;
    Some(text_with_breaks(span).trim().to_string())
}

/// Like `ElementRef::text`, but `<br>` elements become newlines.
fn text_with_breaks(element: ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// First matching structural signature wins; no combination logic.
fn detect_post_type(document: &Html) -> PostType {
    if document.select(&IMAGE).next().is_some() {
        PostType::Image
    } else if document.select(&VIDEO).next().is_some()
        || document.select(&LINKEDIN_VIDEO).next().is_some()
    {
        PostType::Video
    } else if document.select(&EXTERNAL_VIDEO).next().is_some() {
        PostType::ExternalVideo
    } else if document.select(&ARTICLE).next().is_some() {
        PostType::Article
    } else if document.select(&SHARED_POST).next().is_some() {
        PostType::SharedPost
    } else {
        PostType::Text
    }
}

fn extract_date(document: &Html, scrape_time: DateTime<Utc>) -> Option<String> {
    let element = document.select(&ACTOR_SUB_DESCRIPTION).next()?;
    let raw = element.text().collect::<String>();
    let token = raw.split(DATE_SEPARATOR).next().unwrap_or("").trim().to_string();
    let posted = time::normalize(&token, scrape_time);
    Some(posted.format("%d-%m-%Y %H:%M").to_string())
}

fn detect_repost(document: &Html) -> bool {
    document
        .select(&HEADER_TEXT)
        .next()
        .map(|el| {
            el.text()
                .collect::<String>()
                .trim()
                .to_lowercase()
                .contains("reposted this")
        })
        .unwrap_or(false)
}

/// Classify each token of the social-counts block: "comment" tokens carry the
/// comment count, "repost"/"share" tokens the share count, anything else is
/// the like count (last one wins). Counts stay raw leading words; abbreviated
/// values like "2K" are not parsed.
fn extract_engagement(document: &Html) -> (String, String, String) {
    let mut likes = "0".to_string();
    let mut comments = "0".to_string();
    let mut shares = "0".to_string();

    if let Some(block) = document.select(&SOCIAL_COUNTS).next() {
        for piece in block.text() {
            let token = piece.trim();
            if token.is_empty() {
                continue;
            }
            let count = token.split_whitespace().next().unwrap_or(token).to_string();
            if token.contains("comment") {
                comments = count;
            } else if token.contains("repost") || token.contains("share") {
                shares = count;
            } else {
                likes = count;
            }
        }
    } else {
        debug!("No social counts block in fragment");
    }

    (likes, comments, shares)
}
