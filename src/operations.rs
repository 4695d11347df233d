/// Topic and link operations: add, delete, select

use crate::domain::is_valid_url;
use crate::snapshot::Snapshot;
use thiserror::Error;

/// Rejected user input. The message is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a topic name.")]
    EmptyTopic,
    #[error("Topic already exists.")]
    DuplicateTopic,
    #[error("Please enter a link.")]
    EmptyLink,
    #[error("Please select a topic first.")]
    NoTopicSelected,
    #[error("Please enter a valid URL (starting with http:// or https://)")]
    InvalidUrl,
    #[error("Link already exists in this topic.")]
    DuplicateLink,
}

/// Add a topic after trimming; returns the stored name
pub fn add_topic(snapshot: &mut Snapshot, name: &str) -> Result<String, ValidationError> {
    let topic = name.trim();
    if topic.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    if snapshot.has_topic(topic) {
        return Err(ValidationError::DuplicateTopic);
    }

    snapshot.topics.push(topic.to_string());
    snapshot.links.insert(topic.to_string(), Vec::new());
    Ok(topic.to_string())
}

/// Remove a topic and every link filed under it
pub fn delete_topic(snapshot: &mut Snapshot, topic: &str) -> bool {
    let original_len = snapshot.topics.len();
    snapshot.topics.retain(|t| t != topic);
    snapshot.links.remove(topic);
    snapshot.topics.len() < original_len
}

/// Select a topic for viewing, creating its empty link list on first view
pub fn open_topic<'a>(snapshot: &'a mut Snapshot, topic: &str) -> &'a [String] {
    snapshot.links.entry(topic.to_string()).or_default()
}

/// Append a link to the selected topic; returns the stored URL
pub fn add_link(
    snapshot: &mut Snapshot,
    selected_topic: Option<&str>,
    url: &str,
) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyLink);
    }
    let topic = selected_topic
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::NoTopicSelected)?;
    if !is_valid_url(url) {
        return Err(ValidationError::InvalidUrl);
    }

    let links = snapshot.links.entry(topic.to_string()).or_default();
    // Exact string match: no trailing-slash, case or query normalization
    if links.iter().any(|existing| existing == url) {
        return Err(ValidationError::DuplicateLink);
    }

    links.push(url.to_string());
    Ok(url.to_string())
}

/// Remove the link at `index` under `topic`.
///
/// Deletion is positional and assumes this popup is the only writer between
/// loading the snapshot and deleting from it.
pub fn delete_link(snapshot: &mut Snapshot, topic: &str, index: usize) -> Option<String> {
    let links = snapshot.links.get_mut(topic)?;
    (index < links.len()).then(|| links.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_games_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        add_topic(&mut snapshot, "Games").unwrap();
        add_link(&mut snapshot, Some("Games"), "https://store.steampowered.com").unwrap();
        snapshot
    }

    #[test]
    fn test_add_topic() {
        let mut snapshot = Snapshot::new();

        let added = add_topic(&mut snapshot, "  Reading  ").unwrap();

        assert_eq!(added, "Reading");
        assert_eq!(snapshot.topics, vec!["Reading".to_string()]);
        assert_eq!(snapshot.links.get("Reading"), Some(&Vec::new()));
    }

    #[test]
    fn test_add_topic_empty() {
        let mut snapshot = Snapshot::new();

        assert_eq!(add_topic(&mut snapshot, "   "), Err(ValidationError::EmptyTopic));
        assert!(snapshot.topics.is_empty());
    }

    #[test]
    fn test_add_duplicate_topic_leaves_state_unchanged() {
        let mut snapshot = create_games_snapshot();
        let before = snapshot.clone();

        assert_eq!(add_topic(&mut snapshot, "Games"), Err(ValidationError::DuplicateTopic));
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_topic_uniqueness_is_case_sensitive() {
        let mut snapshot = create_games_snapshot();

        assert!(add_topic(&mut snapshot, "games").is_ok());
        assert_eq!(snapshot.topics.len(), 2);
    }

    #[test]
    fn test_delete_topic_cascades_links() {
        let mut snapshot = create_games_snapshot();

        assert!(delete_topic(&mut snapshot, "Games"));
        assert!(snapshot.topics.is_empty());
        assert!(snapshot.links.is_empty());
    }

    #[test]
    fn test_delete_nonexistent_topic() {
        let mut snapshot = create_games_snapshot();

        assert!(!delete_topic(&mut snapshot, "Music"));
        assert_eq!(snapshot.topics.len(), 1);
    }

    #[test]
    fn test_open_topic_creates_empty_links() {
        let mut snapshot = Snapshot::new();
        snapshot.topics.push("Imported".to_string());

        assert!(open_topic(&mut snapshot, "Imported").is_empty());
        assert!(snapshot.links.contains_key("Imported"));
    }

    #[test]
    fn test_add_link_checks_in_order() {
        let mut snapshot = create_games_snapshot();

        assert_eq!(add_link(&mut snapshot, None, ""), Err(ValidationError::EmptyLink));
        assert_eq!(
            add_link(&mut snapshot, None, "https://x.com"),
            Err(ValidationError::NoTopicSelected)
        );
        assert_eq!(
            add_link(&mut snapshot, Some(""), "https://x.com"),
            Err(ValidationError::NoTopicSelected)
        );
        assert_eq!(
            add_link(&mut snapshot, Some("Games"), "ftp://x.com"),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(
            add_link(&mut snapshot, Some("Games"), "https://store.steampowered.com"),
            Err(ValidationError::DuplicateLink)
        );
        assert_eq!(snapshot.links_for("Games").len(), 1);
    }

    #[test]
    fn test_add_link_does_not_normalize() {
        let mut snapshot = create_games_snapshot();

        let added = add_link(&mut snapshot, Some("Games"), " https://store.steampowered.com/ ");

        assert_eq!(added, Ok("https://store.steampowered.com/".to_string()));
        assert_eq!(
            snapshot.links_for("Games"),
            ["https://store.steampowered.com", "https://store.steampowered.com/"]
        );
    }

    #[test]
    fn test_same_link_allowed_in_different_topics() {
        let mut snapshot = create_games_snapshot();
        add_topic(&mut snapshot, "Shops").unwrap();

        assert!(add_link(&mut snapshot, Some("Shops"), "https://store.steampowered.com").is_ok());
    }

    #[test]
    fn test_delete_link_by_index() {
        let mut snapshot = create_games_snapshot();
        add_link(&mut snapshot, Some("Games"), "https://www.gog.com").unwrap();

        let removed = delete_link(&mut snapshot, "Games", 0);

        assert_eq!(removed, Some("https://store.steampowered.com".to_string()));
        assert_eq!(snapshot.links_for("Games"), ["https://www.gog.com"]);
    }

    #[test]
    fn test_delete_link_out_of_range() {
        let mut snapshot = create_games_snapshot();

        assert_eq!(delete_link(&mut snapshot, "Games", 5), None);
        assert_eq!(delete_link(&mut snapshot, "Music", 0), None);
        assert_eq!(snapshot.links_for("Games").len(), 1);
    }
}
