//! Headline numbers shown next to the views chart

use serde::{Deserialize, Deserializer, Serialize};

/// How many posts the dashboard lists and slices
pub const RECENT_LIMIT: usize = 5;

/// Longest slice name, in characters
pub const SLICE_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_blogs: usize,
    pub total_employees: usize,
    pub total_views: u64,
    /// First posts in backend order (the backend lists newest first)
    pub recent_blogs: Vec<BlogPost>,
}

/// One wedge of the top-posts pie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSlice {
    pub name: String,
    pub views: u64,
}

impl DashboardStats {
    pub fn from_records(blogs: &[BlogPost], employees: &[Employee]) -> Self {
        let total_views = blogs
            .iter()
            .fold(0u64, |acc, b| acc.saturating_add(b.views));

        Self {
            total_blogs: blogs.len(),
            total_employees: employees.len(),
            total_views,
            recent_blogs: blogs.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    pub fn top_slices(&self) -> Vec<ViewSlice> {
        self.recent_blogs
            .iter()
            .map(|b| ViewSlice {
                name: truncate_chars(&b.title, SLICE_NAME_LEN),
                views: b.views,
            })
            .collect()
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

// Backends disagree on whether ids are strings or integers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(id: &str, title: &str, views: u64) -> BlogPost {
        BlogPost {
            id: id.to_string(),
            title: title.to_string(),
            views,
            created_at: None,
        }
    }

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            full_name: format!("Employee {}", id),
            position: None,
        }
    }

    #[test]
    fn test_from_records_empty() {
        let stats = DashboardStats::from_records(&[], &[]);
        assert_eq!(stats.total_blogs, 0);
        assert_eq!(stats.total_employees, 0);
        assert_eq!(stats.total_views, 0);
        assert!(stats.recent_blogs.is_empty());
        assert!(stats.top_slices().is_empty());
    }

    #[test]
    fn test_from_records_counts_and_recent() {
        let blogs: Vec<BlogPost> = (1..=7)
            .map(|i| blog(&i.to_string(), &format!("Post {}", i), i * 10))
            .collect();
        let employees = vec![employee("a"), employee("b")];

        let stats = DashboardStats::from_records(&blogs, &employees);
        assert_eq!(stats.total_blogs, 7);
        assert_eq!(stats.total_employees, 2);
        assert_eq!(stats.total_views, 280);
        assert_eq!(stats.recent_blogs.len(), RECENT_LIMIT);
        assert_eq!(stats.recent_blogs[0].id, "1");
        assert_eq!(stats.recent_blogs[4].id, "5");
    }

    #[test]
    fn test_top_slices_truncate_titles() {
        let blogs = vec![
            blog("1", "Short", 3),
            blog("2", "A considerably longer title", 9),
            blog("3", "O'zbekiston bo'ylab sayohat", 4),
        ];
        let slices = DashboardStats::from_records(&blogs, &[]).top_slices();

        assert_eq!(slices[0].name, "Short");
        assert_eq!(slices[1].name, "A considerably ");
        assert_eq!(slices[1].views, 9);
        assert_eq!(slices[2].name.chars().count(), SLICE_NAME_LEN);
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("ñññññ", 3), "ñññ");
        assert_eq!(truncate_chars("日本語のブログ記事タイトルです長い", 15).chars().count(), 15);
    }

    #[test]
    fn test_blog_deserializes_backend_shape() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id":"b1","title":"Hello","views":12,"createdAt":"2024-05-01T10:00:00Z","content":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(post.views, 12);
        assert_eq!(post.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn test_numeric_ids_accepted() {
        let emp: Employee =
            serde_json::from_str(r#"{"id":17,"fullName":"Aziza Karimova","position":"Editor"}"#)
                .unwrap();
        assert_eq!(emp.id, "17");

        let bad = serde_json::from_str::<Employee>(r#"{"id":[1],"fullName":"x"}"#);
        assert!(bad.is_err());
    }
}
