use lazy_static::lazy_static;
use lis_core::{Error, PostRecord, Result};
use regex::Regex;

pub const CSV_HEADER: [&str; 9] = [
    "profile_url",
    "author_name",
    "post_content",
    "likes",
    "comments",
    "shares",
    "type_of_post",
    "is_repost",
    "time_of_posting",
];

lazy_static! {
    static ref AUTHOR_RE: Regex = Regex::new(r"linkedin\.com/in/([^/]+)").unwrap();
}

/// Serialize the scraped records as CSV rows. The header is always written,
/// even for an empty run; a record without a resolved posting time gets an
/// empty `time_of_posting` cell.
pub fn build_csv(profile_url: &str, author_name: &str, posts: &[PostRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(csv_err)?;

    for post in posts {
        let type_of_post = post.post_type.to_string();
        let is_repost = post.is_repost.to_string();
        writer
            .write_record([
                profile_url,
                author_name,
                post.text.as_str(),
                post.likes.as_str(),
                post.comments.as_str(),
                post.shares.as_str(),
                type_of_post.as_str(),
                is_repost.as_str(),
                post.date.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }

    writer.into_inner().map_err(csv_err)
}

/// The `linkedin.com/in/<slug>` segment of the profile URL, or "unknown".
pub fn author_slug(profile_url: &str) -> String {
    AUTHOR_RE
        .captures(profile_url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn object_name(author: &str, count: usize) -> String {
    format!("{}_{}.csv", author, count)
}

fn csv_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Csv(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lis_core::PostType;

    fn sample_post() -> PostRecord {
        PostRecord {
            text: "Hello World".to_string(),
            post_type: PostType::SharedPost,
            likes: "120".to_string(),
            comments: "3".to_string(),
            shares: "2".to_string(),
            date: Some("10-01-2024 07:00".to_string()),
            is_repost: true,
        }
    }

    #[test]
    fn test_csv_header_and_row() {
        let bytes = build_csv(
            "https://www.linkedin.com/in/alice/",
            "alice",
            &[sample_post()],
        )
        .unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "profile_url,author_name,post_content,likes,comments,shares,type_of_post,is_repost,time_of_posting"
        );
        assert_eq!(
            lines.next().unwrap(),
            "https://www.linkedin.com/in/alice/,alice,Hello World,120,3,2,Shared Post,true,10-01-2024 07:00"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_quotes_multiline_content() {
        let mut post = sample_post();
        post.text = "Hello\nWorld".to_string();
        let bytes = build_csv("https://www.linkedin.com/in/alice/", "alice", &[post]).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        assert!(csv.contains("\"Hello\nWorld\""));
    }

    #[test]
    fn test_csv_empty_date() {
        let mut post = sample_post();
        post.date = None;
        let bytes = build_csv("https://www.linkedin.com/in/alice/", "alice", &[post]).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("true,"));
    }

    #[test]
    fn test_csv_empty_run_keeps_header() {
        let bytes = build_csv("https://www.linkedin.com/in/alice/", "alice", &[]).unwrap();
        let csv = String::from_utf8(bytes).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("profile_url,"));
    }

    #[test]
    fn test_author_slug() {
        assert_eq!(
            author_slug("https://www.linkedin.com/in/krishant-sethia-976a50174/"),
            "krishant-sethia-976a50174"
        );
        assert_eq!(author_slug("https://www.linkedin.com/in/alice"), "alice");
        assert_eq!(author_slug("https://example.com/profile"), "unknown");
    }

    #[test]
    fn test_object_name() {
        assert_eq!(object_name("alice", 12), "alice_12.csv");
    }
}
