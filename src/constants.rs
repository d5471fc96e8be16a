//! Endpoint URLs and fixed request values.

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/74.0.3729.108 Safari/537.36";

pub const HOMEPAGE_URL: &str = "https://www.youtube.com";
pub const BROWSE_AJAX_URL: &str = "https://www.youtube.com/browse_ajax";
pub const SERVICE_AJAX_URL: &str = "https://www.youtube.com/service_ajax";

pub const HISTORY_URL: &str = "https://www.youtube.com/feed/history";
pub const WATCH_HISTORY_URL: &str = "https://www.youtube.com/feed/history";
pub const SEARCH_HISTORY_URL: &str = "https://www.youtube.com/feed/history/search_history";
pub const COMMENT_HISTORY_URL: &str = "https://www.youtube.com/feed/history/comment_history";
pub const COMMUNITY_HISTORY_URL: &str = "https://www.youtube.com/feed/history/community_history";
pub const LIVE_CHAT_HISTORY_URL: &str = "https://www.youtube.com/feed/history/live_chat_history";
pub const WATCH_LATER_URL: &str = "https://www.youtube.com/playlist?list=WL";

pub const WATCH_LATER_PLAYLIST_ID: &str = "WL";

pub const FEEDBACK_API_PATH: &str = "/youtubei/v1/feedback";
pub const DELETE_CHAT_MESSAGE_API_PATH: &str = "/youtubei/v1/live_chat/delete_message";
pub const PERFORM_COMMENT_ACTION_API_PATH: &str = "/youtubei/v1/comment/perform_comment_action";
pub const UPDATE_COMMENT_API_PATH: &str = "/youtubei/v1/comment/update_comment";

/// Where the delete action lives inside a comment history entry renderer.
pub const DEFAULT_DELETE_ACTION_PATH: &str =
    "actionMenu.menuRenderer.items.0.menuServiceItemRenderer.serviceEndpoint.\
     performCommentActionEndpoint.action";

/// Community entries bury the delete action behind a confirm dialog.
pub const COMMUNITY_DELETE_ACTION_PATH: &str =
    "actionMenu.menuRenderer.items.0.menuNavigationItemRenderer.navigationEndpoint.\
     confirmDialogEndpoint.content.confirmDialogRenderer.confirmButton.buttonRenderer.\
     serviceEndpoint.performCommentActionEndpoint.action";
