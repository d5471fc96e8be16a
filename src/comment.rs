//! Normalized comment and community history entries.

use serde::Serialize;
use serde_json::Value;

use crate::{path, text};

/// One row of the account's comment or community history. The delete action
/// is the raw endpoint value the perform-comment-action API accepts; where
/// it lives differs between the two history feeds, so the call site passes
/// the path in.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentHistoryEntry {
    pub content: Option<String>,
    pub video_title: Option<String>,
    pub timestamp: Option<String>,
    pub delete_action: Option<String>,
}

pub fn make_comment_history_entry(
    renderer: &Value,
    delete_action_path: &str,
) -> CommentHistoryEntry {
    CommentHistoryEntry {
        content: text::text_at(renderer, "content"),
        video_title: text::text_at(renderer, "videoTitle"),
        timestamp: text::text_at(renderer, "timestamp"),
        delete_action: path::resolve_str(renderer, delete_action_path)
            .ok()
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::constants::{COMMUNITY_DELETE_ACTION_PATH, DEFAULT_DELETE_ACTION_PATH};

    use super::*;

    #[test]
    fn maps_a_comment_entry() {
        let renderer = json!({
            "content": {"runs": [{"text": "nice video"}]},
            "videoTitle": {"simpleText": "A video"},
            "timestamp": {"simpleText": "1 year ago"},
            "actionMenu": {"menuRenderer": {"items": [{
                "menuServiceItemRenderer": {"serviceEndpoint": {
                    "performCommentActionEndpoint": {"action": "ACT1"}
                }}
            }]}}
        });
        let entry = make_comment_history_entry(&renderer, DEFAULT_DELETE_ACTION_PATH);
        assert_eq!(entry.content.as_deref(), Some("nice video"));
        assert_eq!(entry.video_title.as_deref(), Some("A video"));
        assert_eq!(entry.timestamp.as_deref(), Some("1 year ago"));
        assert_eq!(entry.delete_action.as_deref(), Some("ACT1"));
    }

    #[test]
    fn community_entries_use_the_confirm_dialog_path() {
        let renderer = json!({
            "content": {"simpleText": "poll answer"},
            "actionMenu": {"menuRenderer": {"items": [{
                "menuNavigationItemRenderer": {"navigationEndpoint": {
                    "confirmDialogEndpoint": {"content": {"confirmDialogRenderer": {
                        "confirmButton": {"buttonRenderer": {"serviceEndpoint": {
                            "performCommentActionEndpoint": {"action": "ACT2"}
                        }}}
                    }}}
                }}
            }]}}
        });
        let entry = make_comment_history_entry(&renderer, COMMUNITY_DELETE_ACTION_PATH);
        assert_eq!(entry.delete_action.as_deref(), Some("ACT2"));
    }

    #[test]
    fn missing_fields_become_none() {
        let entry = make_comment_history_entry(&json!({}), DEFAULT_DELETE_ACTION_PATH);
        assert!(entry.content.is_none());
        assert!(entry.delete_action.is_none());
    }
}
