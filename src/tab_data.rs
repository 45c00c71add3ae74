/// Data structures for Sort Tabs
use serde::{Deserialize, Serialize};

/// Filter value meaning "match every tab"
pub const MATCH_ALL_FILTER: &str = " ";

/// Empty filters match every tab, like the `" "` default
pub fn is_match_all_filter(filter: &str) -> bool {
    filter.is_empty() || filter == MATCH_ALL_FILTER
}

/// Information about a browser tab, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDescriptor {
    pub id: i32,
    #[serde(alias = "index")]
    pub position: usize,
    pub url: String,
    pub pinned: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl TabDescriptor {
    pub fn new(id: i32, position: usize, url: String, pinned: bool) -> TabDescriptor {
        TabDescriptor {
            id,
            position,
            url,
            pinned,
            hidden: false,
        }
    }

    /// Pinned and hidden tabs never take part in a sort
    pub fn is_movable(&self) -> bool {
        !self.pinned && !self.hidden
    }
}

/// Parameters of one `sorttabs` invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortRequest {
    pub url_filter: String,
    pub reverse: bool,
}

impl SortRequest {
    pub fn new(url_filter: impl Into<String>, reverse: bool) -> SortRequest {
        SortRequest {
            url_filter: url_filter.into(),
            reverse,
        }
    }
}

impl Default for SortRequest {
    fn default() -> Self {
        SortRequest::new(MATCH_ALL_FILTER, false)
    }
}

/// A tab and the slot it should end up in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub tab: TabDescriptor,
    pub target_position: usize,
}

/// Ordered assignments produced by one sort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPlan {
    pub entries: Vec<PlanEntry>,
}

impl SortPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    /// True when every tab is already in its target slot
    pub fn is_identity(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.tab.position == entry.target_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_descriptor_creation() {
        let tab = TabDescriptor::new(7, 2, "https://google.com".to_string(), false);

        assert_eq!(tab.id, 7);
        assert_eq!(tab.position, 2);
        assert_eq!(tab.url, "https://google.com");
        assert!(!tab.pinned);
        assert!(!tab.hidden);
        assert!(tab.is_movable());
    }

    #[test]
    fn test_pinned_and_hidden_are_not_movable() {
        let mut pinned = TabDescriptor::new(1, 0, "https://a.com".to_string(), true);
        assert!(!pinned.is_movable());

        pinned.pinned = false;
        pinned.hidden = true;
        assert!(!pinned.is_movable());
    }

    #[test]
    fn test_deserialize_browser_tab() {
        // Shape of a WebExtensions tabs.Tab, extra fields ignored
        let json = r#"{
            "id": 42,
            "index": 3,
            "url": "https://www.rust-lang.org/",
            "title": "Rust",
            "pinned": false,
            "active": true
        }"#;

        let tab: TabDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(tab.id, 42);
        assert_eq!(tab.position, 3);
        assert_eq!(tab.url, "https://www.rust-lang.org/");
        assert!(!tab.hidden);
    }

    #[test]
    fn test_sort_request_defaults() {
        let request = SortRequest::default();
        assert_eq!(request.url_filter, " ");
        assert!(!request.reverse);
        assert!(is_match_all_filter(&request.url_filter));

        let request: SortRequest = serde_json::from_str(r#"{"reverse": true}"#).unwrap();
        assert_eq!(request.url_filter, MATCH_ALL_FILTER);
        assert!(request.reverse);

        assert!(is_match_all_filter(""));
        assert!(!is_match_all_filter("github"));
    }

    #[test]
    fn test_plan_serialization() {
        let plan = SortPlan {
            entries: vec![PlanEntry {
                tab: TabDescriptor::new(1, 0, "https://a.com".to_string(), false),
                target_position: 0,
            }],
        };

        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"targetPosition\":0"));

        let deserialized: SortPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, plan);
        assert!(deserialized.is_identity());
    }
}
