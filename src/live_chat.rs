//! Normalized live chat history entries.

use serde::Serialize;
use serde_json::Value;

use crate::{path, text};

/// Where the delete-message params live inside a chat entry renderer.
const DELETE_PARAMS_PATH: &str =
    "menu.menuRenderer.items.0.menuServiceItemRenderer.serviceEndpoint.\
     liveChatActionEndpoint.params";

/// One row of the account's live chat history. Fields the renderer does not
/// carry stay `None`; mapping never fails.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LiveChatHistoryEntry {
    pub message: Option<String>,
    pub video_title: Option<String>,
    pub sent_at: Option<String>,
    /// Opaque value accepted by `delete_live_chat_message`.
    pub delete_params: Option<String>,
}

pub fn make_live_chat_history_entry(renderer: &Value) -> LiveChatHistoryEntry {
    LiveChatHistoryEntry {
        message: text::text_at(renderer, "message"),
        video_title: text::text_at(renderer, "videoTitle"),
        sent_at: text::text_at(renderer, "sentTimestamp"),
        delete_params: path::resolve_str(renderer, DELETE_PARAMS_PATH)
            .ok()
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn maps_a_full_renderer() {
        let renderer = json!({
            "message": {"runs": [{"text": "hi "}, {"text": "there"}]},
            "videoTitle": {"simpleText": "Some stream"},
            "sentTimestamp": {"simpleText": "3 months ago"},
            "menu": {"menuRenderer": {"items": [{
                "menuServiceItemRenderer": {"serviceEndpoint": {
                    "liveChatActionEndpoint": {"params": "DEL123"}
                }}
            }]}}
        });
        let entry = make_live_chat_history_entry(&renderer);
        assert_eq!(entry.message.as_deref(), Some("hi there"));
        assert_eq!(entry.video_title.as_deref(), Some("Some stream"));
        assert_eq!(entry.sent_at.as_deref(), Some("3 months ago"));
        assert_eq!(entry.delete_params.as_deref(), Some("DEL123"));
    }

    #[test]
    fn missing_fields_become_none() {
        let entry = make_live_chat_history_entry(&json!({}));
        assert_eq!(
            entry,
            LiveChatHistoryEntry {
                message: None,
                video_title: None,
                sent_at: None,
                delete_params: None,
            }
        );
    }
}
