//! Post domain model.
//!
//! A [`Post`] is one memory photo as the backend stores it. The wire format
//! follows the backend's JSON (`_id`, `likeCount`, `createdAt`,
//! `selectedFile`); the Rust side uses snake case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// A memory photo post, as returned by the backend.
///
/// # Fields
///
/// - `id`: backend identifier, unique within the store
/// - `tags`: always a sequence once decoded, even if the backend sent a
///   comma-separated string
/// - `selected_file`: inline `data:` URL of the image, if any
/// - `like_count`, `created_at`: server-owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "tags_from_wire")]
    pub tags: Vec<String>,
    #[serde(
        rename = "selectedFile",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "file_from_wire"
    )]
    pub selected_file: Option<String>,
    #[serde(rename = "likeCount", default)]
    pub like_count: u64,
    #[serde(rename = "createdAt", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Returns a "from now" description of `created_at`.
    #[must_use]
    pub fn time_ago(&self) -> String {
        self.time_ago_at(Utc::now())
    }

    /// Describes how long before `now` the post was created.
    ///
    /// Thresholds follow the usual relative-time buckets:
    ///
    /// | elapsed        | output            |
    /// |----------------|-------------------|
    /// | < 45 s         | a few seconds ago |
    /// | < 90 s         | a minute ago      |
    /// | < 45 min       | N minutes ago     |
    /// | < 90 min       | an hour ago       |
    /// | < 22 h         | N hours ago       |
    /// | < 36 h         | a day ago         |
    /// | < 26 d         | N days ago        |
    /// | < 45 d         | a month ago       |
    /// | < 320 d        | N months ago      |
    /// | < 548 d        | a year ago        |
    /// | otherwise      | N years ago       |
    ///
    /// Timestamps in the future are treated as "a few seconds ago".
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use memories::domain::Post;
    ///
    /// let now = Utc::now();
    /// let post = Post {
    ///     id: "1".into(),
    ///     creator: "Ana".into(),
    ///     title: "Beach".into(),
    ///     message: String::new(),
    ///     tags: vec![],
    ///     selected_file: None,
    ///     like_count: 0,
    ///     created_at: now - Duration::hours(3),
    /// };
    /// assert_eq!(post.time_ago_at(now), "3 hours ago");
    /// ```
    #[must_use]
    pub fn time_ago_at(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.created_at).num_seconds().max(0);

        let rounded = |unit: i64| (diff + unit / 2) / unit;

        if diff < 45 {
            "a few seconds ago".to_string()
        } else if diff < 90 {
            "a minute ago".to_string()
        } else if diff < 45 * SECONDS_PER_MINUTE {
            format!("{} minutes ago", rounded(SECONDS_PER_MINUTE))
        } else if diff < 90 * SECONDS_PER_MINUTE {
            "an hour ago".to_string()
        } else if diff < 22 * SECONDS_PER_HOUR {
            format!("{} hours ago", rounded(SECONDS_PER_HOUR))
        } else if diff < 36 * SECONDS_PER_HOUR {
            "a day ago".to_string()
        } else if diff < 26 * SECONDS_PER_DAY {
            format!("{} days ago", rounded(SECONDS_PER_DAY))
        } else if diff < 45 * SECONDS_PER_DAY {
            "a month ago".to_string()
        } else if diff < 320 * SECONDS_PER_DAY {
            format!("{} months ago", rounded(SECONDS_PER_DAY * 30).max(2))
        } else if diff < 548 * SECONDS_PER_DAY {
            "a year ago".to_string()
        } else {
            format!("{} years ago", rounded(SECONDS_PER_DAY * 365).max(2))
        }
    }

    /// Tags as display badges: trimmed and prefixed with `#`.
    #[must_use]
    pub fn tag_badges(&self) -> Vec<String> {
        self.tags.iter().map(|tag| format!("#{}", tag.trim())).collect()
    }
}

/// Accepts either a JSON array of strings or a single comma-separated string.
fn tags_from_wire<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireTags {
        List(Vec<String>),
        Joined(String),
        Missing(()),
    }

    Ok(match WireTags::deserialize(deserializer)? {
        WireTags::List(tags) => tags,
        WireTags::Joined(joined) => super::draft::split_tags(&joined),
        WireTags::Missing(()) => Vec::new(),
    })
}

/// Treats `null` and `""` as "no image".
fn file_from_wire<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let file = Option::<String>::deserialize(deserializer)?;
    Ok(file.filter(|data| !data.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn post_created(created_at: DateTime<Utc>) -> Post {
        Post {
            id: "p1".to_string(),
            creator: "A".to_string(),
            title: "T".to_string(),
            message: "M".to_string(),
            tags: vec![],
            selected_file: None,
            like_count: 0,
            created_at,
        }
    }

    #[test]
    fn decodes_backend_record() {
        let json = r#"{
            "_id": "65a1",
            "creator": "Ana",
            "title": "Lisbon",
            "message": "Tram 28\nat dusk",
            "tags": ["travel", " city"],
            "selectedFile": "data:image/png;base64,AAAA",
            "likeCount": 7,
            "createdAt": "2024-01-12T10:00:00.000Z",
            "__v": 0
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.id, "65a1");
        assert_eq!(post.message, "Tram 28\nat dusk");
        assert_eq!(post.tags, vec!["travel", " city"]);
        assert_eq!(post.selected_file.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(post.like_count, 7);
        assert_eq!(post.created_at, Utc.with_ymd_and_hms(2024, 1, 12, 10, 0, 0).unwrap());
    }

    #[test]
    fn comma_string_tags_become_a_sequence() {
        let json = r#"{"_id": "1", "tags": "a,b,c", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = r#"{"_id": "1", "tags": null, "selectedFile": "", "createdAt": "2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.tags.is_empty());
        assert!(post.selected_file.is_none());
        assert_eq!(post.like_count, 0);
        assert_eq!(post.creator, "");
    }

    #[test]
    fn serializes_with_backend_field_names() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let value = serde_json::to_value(post_created(created)).unwrap();
        assert_eq!(value["_id"], "p1");
        assert_eq!(value["likeCount"], 0);
        assert!(value.get("selectedFile").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let cases = [
            (Duration::seconds(10), "a few seconds ago"),
            (Duration::seconds(60), "a minute ago"),
            (Duration::minutes(5), "5 minutes ago"),
            (Duration::minutes(60), "an hour ago"),
            (Duration::hours(3), "3 hours ago"),
            (Duration::hours(30), "a day ago"),
            (Duration::days(4), "4 days ago"),
            (Duration::days(30), "a month ago"),
            (Duration::days(100), "3 months ago"),
            (Duration::days(400), "a year ago"),
            (Duration::days(365 * 3), "3 years ago"),
        ];

        for (age, expected) in cases {
            let post = post_created(now - age);
            assert_eq!(post.time_ago_at(now), expected, "age {age:?}");
        }
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let post = post_created(now + Duration::minutes(10));
        assert_eq!(post.time_ago_at(now), "a few seconds ago");
    }

    #[test]
    fn tag_badges_are_trimmed() {
        let mut post = post_created(Utc::now());
        post.tags = vec!["a".into(), " b".into(), "c ".into()];
        assert_eq!(post.tag_badges(), vec!["#a", "#b", "#c"]);
    }
}
