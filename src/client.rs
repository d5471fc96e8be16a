//! The account client: every operation against the logged-in YouTube pages.
//!
//! Each operation follows the same shape: download a server-rendered page,
//! pull the `ytcfg` and initial-state blobs out of it, dig the fields it
//! needs with the path resolver, and either issue a single follow-up API
//! call or hand a first page to the continuation cursor.

use std::sync::Mutex;

use futures::{future::BoxFuture, FutureExt, Stream, StreamExt, TryStreamExt};
use serde_json::{json, Value};

use crate::{
    auth::{self, AuthError},
    comment::{make_comment_history_entry, CommentHistoryEntry},
    constants::{
        BROWSE_AJAX_URL, COMMENT_HISTORY_URL, COMMUNITY_DELETE_ACTION_PATH,
        COMMUNITY_HISTORY_URL, DEFAULT_DELETE_ACTION_PATH, DELETE_CHAT_MESSAGE_API_PATH,
        FEEDBACK_API_PATH, HISTORY_URL, HOMEPAGE_URL, LIVE_CHAT_HISTORY_URL,
        PERFORM_COMMENT_ACTION_API_PATH, SEARCH_HISTORY_URL, SERVICE_AJAX_URL,
        UPDATE_COMMENT_API_PATH, WATCH_HISTORY_URL, WATCH_LATER_PLAYLIST_ID, WATCH_LATER_URL,
    },
    continuation::{paginate, ContinuationDescriptor, CursorError, Page},
    initial::{initial_data, initial_guide_data, InitialDataError},
    live_chat::{make_live_chat_history_entry, LiveChatHistoryEntry},
    path::{self, PathError},
    util::{FetchError, HttpClient},
    ytcfg::{find_ytcfg, ytcfg_headers, Ytcfg, YtcfgError},
};

const SECTION_LIST_PATH: &str = "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.\
     content.sectionListRenderer";
const ITEM_SECTION_PATH: &str = "contents.twoColumnBrowseResultsRenderer.tabs.0.tabRenderer.\
     content.sectionListRenderer.contents.0.itemSectionRenderer";
const PLAYLIST_VIDEO_LIST_PATH: &str = "contents.twoColumnBrowseResultsRenderer.tabs.0.\
     tabRenderer.content.sectionListRenderer.contents.0.itemSectionRenderer.contents.0.\
     playlistVideoListRenderer";
const FEED_ACTIONS_PATH: &str =
    "contents.twoColumnBrowseResultsRenderer.secondaryContents.browseFeedActionsRenderer.contents";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Ytcfg(#[from] YtcfgError),
    #[error(transparent)]
    InitialData(#[from] InitialDataError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("internal lock poisoned")]
    LockPoisoned,
    #[error("unexpected server response: {0}")]
    Unexpected(String),
}

/// Page-scoped request context: the config blob plus the header set derived
/// from it. One page download covers several follow-up calls.
struct PageContext {
    ytcfg: Ytcfg,
    headers: Vec<(&'static str, String)>,
}

pub struct YouTube {
    http: HttpClient,
    favorites_playlist_id: Mutex<Option<String>>,
}

impl YouTube {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            favorites_playlist_id: Mutex::new(None),
        }
    }

    /// Download a page and extract its request context.
    async fn page_context(&self, url: &str) -> Result<(PageContext, String), ClientError> {
        let html = self.http.fetch_text(url).await?;
        let ytcfg = find_ytcfg(&html)?;
        let headers = ytcfg_headers(&ytcfg)?;
        Ok((PageContext { ytcfg, headers }, html))
    }

    fn authorization(&self) -> Result<String, ClientError> {
        let store = self
            .http
            .cookies
            .lock()
            .map_err(|_| ClientError::LockPoisoned)?;
        Ok(auth::authorization_header(&store)?)
    }

    /// Header set for the innertube API endpoints, signed fresh per call.
    fn api_headers(&self) -> Result<Vec<(&'static str, String)>, ClientError> {
        Ok(vec![
            ("authority", "www.youtube.com".to_string()),
            ("authorization", self.authorization()?),
            ("x-goog-authuser", "0".to_string()),
            ("x-origin", HOMEPAGE_URL.to_string()),
        ])
    }

    /// Form-POST continuation fetcher for the browse_ajax endpoint. The
    /// anti-forgery token rides in the form body; the cursor supplies the
    /// latest value on every call.
    fn browse_fetcher(
        &self,
        headers: Vec<(&'static str, String)>,
    ) -> impl FnMut(ContinuationDescriptor, String) -> BoxFuture<'static, Result<Value, FetchError>>
    {
        let http = self.http.clone();
        move |descriptor, xsrf_token| {
            let http = http.clone();
            let headers = headers.clone();
            async move {
                http.post_form_json(
                    BROWSE_AJAX_URL,
                    &[
                        ("ctoken", descriptor.continuation.as_str()),
                        ("continuation", descriptor.continuation.as_str()),
                        ("itct", descriptor.click_tracking_params.as_str()),
                    ],
                    &[("session_token", xsrf_token.as_str())],
                    &headers,
                )
                .await
            }
            .boxed()
        }
    }

    /// GET continuation fetcher; playlist pagination carries no form body.
    fn browse_get_fetcher(
        &self,
        headers: Vec<(&'static str, String)>,
    ) -> impl FnMut(ContinuationDescriptor, String) -> BoxFuture<'static, Result<Value, FetchError>>
    {
        let http = self.http.clone();
        move |descriptor, _xsrf_token| {
            let http = http.clone();
            let headers = headers.clone();
            async move {
                http.get_json(
                    BROWSE_AJAX_URL,
                    &[
                        ("ctoken", descriptor.continuation.as_str()),
                        ("continuation", descriptor.continuation.as_str()),
                        ("itct", descriptor.click_tracking_params.as_str()),
                    ],
                    &headers,
                )
                .await
            }
            .boxed()
        }
    }

    /// Enumerate a playlist's rows. An absent or empty video list yields an
    /// empty stream (the playlist has no entries).
    pub async fn playlist_info(
        &self,
        playlist_id: &str,
    ) -> Result<impl Stream<Item = Result<Value, ClientError>>, ClientError> {
        let url = playlist_url(playlist_id);
        let (context, html) = self.page_context(&url).await?;
        let data = initial_data(&html)?;
        let renderer = path::resolve(&data, PLAYLIST_VIDEO_LIST_PATH)?;
        let first = renderer_page(renderer, None);
        let xsrf = context.ytcfg.string("XSRF_TOKEN").unwrap_or("").to_string();
        let fetch = self.browse_get_fetcher(context.headers);
        Ok(
            paginate(first, xsrf, fetch, playlist_continuation_page, false)
                .map_err(ClientError::from),
        )
    }

    /// Remove one entry from a playlist. The set-video id is the playlist
    /// row's own id, not the video id.
    pub async fn remove_set_video_id_from_playlist(
        &self,
        playlist_id: &str,
        set_video_id: &str,
    ) -> Result<(), ClientError> {
        let (context, _) = self.page_context(WATCH_LATER_URL).await?;
        self.remove_from_playlist(&context, playlist_id, set_video_id)
            .await
    }

    async fn remove_from_playlist(
        &self,
        context: &PageContext,
        playlist_id: &str,
        set_video_id: &str,
    ) -> Result<(), ClientError> {
        let sej = json!({
            "clickTrackingParams": "",
            "commandMetadata": {
                "webCommandMetadata": {"url": "/service_ajax", "sendPost": true}
            },
            "playlistEditEndpoint": {
                "playlistId": playlist_id,
                "actions": [
                    {"setVideoId": set_video_id, "action": "ACTION_REMOVE_VIDEO"}
                ],
                "params": "CAE%3D",
                "clientActions": [
                    {"playlistRemoveVideosAction": {"setVideoIds": [set_video_id]}}
                ]
            }
        })
        .to_string();
        let data = self
            .http
            .post_form_json(
                SERVICE_AJAX_URL,
                &[("name", "playlistEditEndpoint")],
                &[
                    ("sej", sej.as_str()),
                    ("csn", context.ytcfg.string("EVENT_ID")?),
                    ("session_token", context.ytcfg.string("XSRF_TOKEN")?),
                ],
                &context.headers,
            )
            .await?;
        if data.get("code").and_then(Value::as_str) != Some("SUCCESS") {
            return Err(ClientError::Unexpected(
                "failed to delete video from playlist".to_string(),
            ));
        }
        Ok(())
    }

    /// Remove every entry from a playlist. Use `WL` for Watch Later.
    pub async fn clear_playlist(&self, playlist_id: &str) -> Result<(), ClientError> {
        let rows: Vec<Value> = self.playlist_info(playlist_id).await?.try_collect().await?;
        let (context, _) = self.page_context(&playlist_url(playlist_id)).await?;

        let mut set_video_ids = Vec::with_capacity(rows.len());
        for row in &rows {
            match path::resolve_str(row, "playlistVideoRenderer.setVideoId") {
                Ok(id) => set_video_ids.push(id.to_string()),
                Err(_) => {
                    info!("row without a set-video id; the playlist is probably empty");
                    return Ok(());
                }
            }
        }
        for set_video_id in set_video_ids {
            debug!("deleting from playlist: set_video_id = {set_video_id}");
            self.remove_from_playlist(&context, playlist_id, &set_video_id)
                .await?;
        }
        Ok(())
    }

    pub async fn clear_watch_later(&self) -> Result<(), ClientError> {
        self.clear_playlist(WATCH_LATER_PLAYLIST_ID).await
    }

    /// The id of the Favourites ("liked videos") playlist, found by scanning
    /// the guide blob for the LIKES_PLAYLIST icon. Cached after first
    /// lookup.
    pub async fn favorites_playlist_id(&self) -> Result<String, ClientError> {
        if let Some(id) = self
            .favorites_playlist_id
            .lock()
            .map_err(|_| ClientError::LockPoisoned)?
            .clone()
        {
            return Ok(id);
        }
        let html = self.http.fetch_text(HOMEPAGE_URL).await?;
        let guide = initial_guide_data(&html)?;
        let section_items = path::resolve(
            &guide,
            "items.0.guideSectionRenderer.items.4.guideCollapsibleSectionEntryRenderer.sectionItems",
        )?;

        let found = likes_entry_id(section_items).or_else(|| {
            // The entry may sit behind the collapsed tail of the section.
            section_items
                .as_array()
                .and_then(|items| items.last())
                .and_then(|last| {
                    path::resolve(last, "guideCollapsibleEntryRenderer.expandableItems").ok()
                })
                .and_then(likes_entry_id)
        });
        let id = found.ok_or_else(|| {
            ClientError::Unexpected("could not determine favourites playlist id".to_string())
        })?;
        debug!("got favourites playlist id: {id}");
        *self
            .favorites_playlist_id
            .lock()
            .map_err(|_| ClientError::LockPoisoned)? = Some(id.clone());
        Ok(id)
    }

    pub async fn clear_favorites(&self) -> Result<(), ClientError> {
        let id = self.favorites_playlist_id().await?;
        self.clear_playlist(&id).await
    }

    /// Remove a video from Favourites by its video id. A video that is not
    /// in the playlist is not an error.
    pub async fn remove_video_id_from_favorites(
        &self,
        video_id: &str,
    ) -> Result<(), ClientError> {
        let playlist_id = self.favorites_playlist_id().await?;
        let entry = first_matching(self.playlist_info(&playlist_id).await?, |row| {
            path::resolve_str(row, "playlistVideoRenderer.navigationEndpoint.watchEndpoint.videoId")
                .ok()
                == Some(video_id)
        })
        .await?;
        let Some(entry) = entry else {
            return Ok(());
        };
        let set_video_id =
            path::resolve_str(&entry, "playlistVideoRenderer.setVideoId")?.to_string();
        let (context, _) = self.page_context(&playlist_url(&playlist_id)).await?;
        self.remove_from_playlist(&context, &playlist_id, &set_video_id)
            .await
    }

    /// Enumerate the watch history. The server rotates the anti-forgery
    /// token mid-pagination; the cursor always sends the newest one.
    pub async fn history_info(
        &self,
    ) -> Result<impl Stream<Item = Result<Value, ClientError>>, ClientError> {
        let (mut context, html) = self.page_context(HISTORY_URL).await?;
        set_spf_headers(&mut context.headers, HISTORY_URL);
        let data = initial_data(&html)?;
        let renderer = path::resolve(&data, SECTION_LIST_PATH)?;
        let first = Page {
            entries: section_list_entries(renderer),
            continuation: ContinuationDescriptor::from_continuations(renderer),
            xsrf_token: None,
        };
        let xsrf = context.ytcfg.string("XSRF_TOKEN")?.to_string();
        let fetch = self.browse_fetcher(context.headers);
        Ok(
            paginate(first, xsrf, fetch, history_continuation_page, false)
                .map_err(ClientError::from),
        )
    }

    /// Delete a watch history entry by video id. `Ok(false)` means the video
    /// was not in the history.
    pub async fn remove_video_id_from_history(
        &self,
        video_id: &str,
    ) -> Result<bool, ClientError> {
        let entry = first_matching(self.history_info().await?, |entry| {
            path::resolve_str(entry, "videoRenderer.videoId").ok() == Some(video_id)
        })
        .await?;
        let Some(entry) = entry else {
            return Ok(false);
        };
        let endpoint = path::resolve(
            &entry,
            "videoRenderer.menu.menuRenderer.topLevelButtons.0.buttonRenderer.serviceEndpoint",
        )?;
        let (context, _) = self.page_context(HISTORY_URL).await?;
        let sej = endpoint.to_string();
        let data = self
            .http
            .post_form_json(
                SERVICE_AJAX_URL,
                &[("name", "feedbackEndpoint")],
                &[
                    ("sej", sej.as_str()),
                    ("csn", context.ytcfg.string("EVENT_ID")?),
                    ("session_token", context.ytcfg.string("XSRF_TOKEN")?),
                ],
                &context.headers,
            )
            .await?;
        Ok(data.get("code").and_then(Value::as_str) == Some("SUCCESS"))
    }

    /// Clear the whole watch history. A missing confirm button means the
    /// history is already empty, which is not an error.
    pub async fn clear_watch_history(&self) -> Result<(), ClientError> {
        let (mut context, html) = self.page_context(HISTORY_URL).await?;
        set_spf_headers(&mut context.headers, HISTORY_URL);
        let data = initial_data(&html)?;
        let endpoint = match path::resolve(
            &data,
            &format!(
                "{FEED_ACTIONS_PATH}.2.buttonRenderer.navigationEndpoint.confirmDialogEndpoint.\
                 content.confirmDialogRenderer.confirmButton.buttonRenderer.serviceEndpoint"
            ),
        ) {
            Ok(endpoint) => endpoint,
            Err(_) => {
                debug!("clear button is likely disabled; history is likely empty");
                return Ok(());
            }
        };
        let sej = endpoint.to_string();
        self.http
            .post_form_json(
                SERVICE_AJAX_URL,
                &[("name", "feedbackEndpoint")],
                &[
                    ("sej", sej.as_str()),
                    ("csn", context.ytcfg.string("EVENT_ID")?),
                    ("session_token", context.ytcfg.string("XSRF_TOKEN")?),
                ],
                &context.headers,
            )
            .await?;
        info!("successfully cleared history");
        Ok(())
    }

    async fn single_feedback_api_call(
        &self,
        ytcfg: &Ytcfg,
        feedback_token: &str,
        click_tracking_params: &str,
        api_url: &str,
    ) -> Result<bool, ClientError> {
        let body = json!({
            "context": context_body(ytcfg, click_tracking_params),
            "feedbackTokens": [feedback_token],
            "isFeedbackTokenUnencrypted": false,
            "shouldMerge": false
        });
        let data = self
            .http
            .post_api_json(
                &format!("{HOMEPAGE_URL}{api_url}"),
                &[("key", ytcfg.string("INNERTUBE_API_KEY")?)],
                &self.api_headers()?,
                &body,
            )
            .await?;
        Ok(path::resolve(&data, "feedbackResponses.0.isProcessed")?
            .as_bool()
            .unwrap_or(false))
    }

    async fn toggle_history(
        &self,
        page_url: &str,
        contents_index: usize,
    ) -> Result<bool, ClientError> {
        let (context, html) = self.page_context(page_url).await?;
        let data = initial_data(&html)?;
        let info = path::resolve(
            &data,
            &format!(
                "{FEED_ACTIONS_PATH}.{contents_index}.buttonRenderer.navigationEndpoint.\
                 confirmDialogEndpoint.content.confirmDialogRenderer.confirmEndpoint"
            ),
        )?;
        self.single_feedback_api_call(
            &context.ytcfg,
            path::resolve_str(info, "feedbackEndpoint.feedbackToken")?,
            path::resolve_str(info, "clickTrackingParams")?,
            path::resolve_str(info, "commandMetadata.webCommandMetadata.apiUrl")?,
        )
        .await
    }

    /// Pause or resume search history, depending on the current state.
    pub async fn toggle_search_history(&self) -> Result<bool, ClientError> {
        self.toggle_history(SEARCH_HISTORY_URL, 2).await
    }

    /// Pause or resume watch history, depending on the current state.
    pub async fn toggle_watch_history(&self) -> Result<bool, ClientError> {
        self.toggle_history(WATCH_HISTORY_URL, 3).await
    }

    pub async fn clear_search_history(&self) -> Result<bool, ClientError> {
        let (context, html) = self.page_context(SEARCH_HISTORY_URL).await?;
        let data = initial_data(&html)?;
        let token = path::resolve_str(
            &data,
            &format!(
                "{FEED_ACTIONS_PATH}.1.buttonRenderer.navigationEndpoint.confirmDialogEndpoint.\
                 content.confirmDialogRenderer.confirmEndpoint.feedbackEndpoint.feedbackToken"
            ),
        )?;
        self.single_feedback_api_call(&context.ytcfg, token, "", FEEDBACK_API_PATH)
            .await
    }

    /// Enumerate the live chat history. With `only_first_page`, no
    /// continuation fetch is ever issued.
    pub async fn live_chat_history(
        &self,
        only_first_page: bool,
    ) -> Result<impl Stream<Item = Result<LiveChatHistoryEntry, ClientError>>, ClientError> {
        let stream = self
            .item_section_history(LIVE_CHAT_HISTORY_URL, only_first_page)
            .await?;
        Ok(stream.map(|item| {
            item.map(|entry| {
                let renderer = entry.get("liveChatHistoryEntryRenderer").unwrap_or(&entry);
                make_live_chat_history_entry(renderer)
            })
        }))
    }

    /// Delete a live chat message by the params value from
    /// [`Self::live_chat_history`].
    pub async fn delete_live_chat_message(&self, params: &str) -> Result<Value, ClientError> {
        let (context, _) = self.page_context(LIVE_CHAT_HISTORY_URL).await?;
        let body = json!({
            "context": context_body(&context.ytcfg, ""),
            "params": params,
        });
        Ok(self
            .http
            .post_api_json(
                &format!("{HOMEPAGE_URL}{DELETE_CHAT_MESSAGE_API_PATH}"),
                &[("key", context.ytcfg.string("INNERTUBE_API_KEY")?)],
                &self.api_headers()?,
                &body,
            )
            .await?)
    }

    pub async fn comment_history(
        &self,
        only_first_page: bool,
    ) -> Result<impl Stream<Item = Result<CommentHistoryEntry, ClientError>>, ClientError> {
        self.comment_community_history(COMMENT_HISTORY_URL, DEFAULT_DELETE_ACTION_PATH, only_first_page)
            .await
    }

    pub async fn community_history(
        &self,
        only_first_page: bool,
    ) -> Result<impl Stream<Item = Result<CommentHistoryEntry, ClientError>>, ClientError> {
        self.comment_community_history(
            COMMUNITY_HISTORY_URL,
            COMMUNITY_DELETE_ACTION_PATH,
            only_first_page,
        )
        .await
    }

    async fn comment_community_history(
        &self,
        url: &str,
        delete_action_path: &'static str,
        only_first_page: bool,
    ) -> Result<impl Stream<Item = Result<CommentHistoryEntry, ClientError>>, ClientError> {
        let stream = self.item_section_history(url, only_first_page).await?;
        Ok(stream.map(move |item| {
            item.map(|entry| {
                let renderer = entry.get("commentHistoryEntryRenderer").unwrap_or(&entry);
                make_comment_history_entry(renderer, delete_action_path)
            })
        }))
    }

    /// Common pagination over the item-section history feeds (live chat,
    /// comments, community). An absent contents container yields zero
    /// entries.
    async fn item_section_history(
        &self,
        url: &str,
        only_first_page: bool,
    ) -> Result<impl Stream<Item = Result<Value, ClientError>>, ClientError> {
        let (mut context, html) = self.page_context(url).await?;
        set_spf_headers(&mut context.headers, url);
        let data = initial_data(&html)?;
        let item_section = path::resolve(&data, ITEM_SECTION_PATH)?;
        let first = renderer_page(item_section, None);
        let xsrf = context.ytcfg.string("XSRF_TOKEN")?.to_string();
        let fetch = self.browse_fetcher(context.headers);
        Ok(paginate(
            first,
            xsrf,
            fetch,
            item_section_continuation_page,
            only_first_page,
        )
        .map_err(ClientError::from))
    }

    /// Delete a comment by the action value from [`Self::comment_history`].
    pub async fn delete_comment(&self, action: &str) -> Result<bool, ClientError> {
        let data = self
            .perform_comment_action(action, COMMENT_HISTORY_URL)
            .await?;
        Ok(
            path::resolve_str(&data, "actions.0.removeCommentAction.actionResult.status")?
                == "STATUS_SUCCEEDED",
        )
    }

    /// Delete a community entry by the action value from
    /// [`Self::community_history`].
    pub async fn delete_community_entry(&self, action: &str) -> Result<bool, ClientError> {
        let data = self
            .perform_comment_action(action, COMMENT_HISTORY_URL)
            .await?;
        Ok(path::resolve_str(&data, "actionResults.0.status")? == "STATUS_SUCCEEDED")
    }

    async fn perform_comment_action(
        &self,
        action: &str,
        context_url: &str,
    ) -> Result<Value, ClientError> {
        let (context, _) = self.page_context(context_url).await?;
        let body = json!({
            "actions": [action],
            "context": context_body(&context.ytcfg, ""),
        });
        Ok(self
            .http
            .post_api_json(
                &format!("{HOMEPAGE_URL}{PERFORM_COMMENT_ACTION_API_PATH}"),
                &[("key", context.ytcfg.string("INNERTUBE_API_KEY")?)],
                &self.api_headers()?,
                &body,
            )
            .await?)
    }

    /// Update a comment. `params` comes from the video page's initial data
    /// and must not be URL-encoded.
    pub async fn update_comment(&self, text: &str, params: &str) -> Result<bool, ClientError> {
        let (context, _) = self.page_context(COMMENT_HISTORY_URL).await?;
        let body = json!({
            "commentText": text,
            "context": context_body(&context.ytcfg, ""),
            "updateCommentParams": params,
        });
        let data = self
            .http
            .post_api_json(
                &format!("{HOMEPAGE_URL}{UPDATE_COMMENT_API_PATH}"),
                &[("key", context.ytcfg.string("INNERTUBE_API_KEY")?)],
                &self.api_headers()?,
                &body,
            )
            .await?;
        Ok(
            path::resolve_str(&data, "actions.0.updateCommentAction.actionResult.status")?
                == "STATUS_SUCCEEDED",
        )
    }
}

fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={playlist_id}")
}

/// Point the spf headers at `url`, replacing the Watch Later default that
/// [`ytcfg_headers`] fills in.
fn set_spf_headers(headers: &mut Vec<(&'static str, String)>, url: &str) {
    for (name, value) in headers.iter_mut() {
        if *name == "x-spf-previous" || *name == "x-spf-referer" {
            *value = url.to_string();
        }
    }
}

/// Drive a stream of entries until the first one `matches`, then stop.
/// Pagination is lazy, so pages past the match are never fetched.
async fn first_matching<S, P>(stream: S, mut matches: P) -> Result<Option<Value>, ClientError>
where
    S: Stream<Item = Result<Value, ClientError>>,
    P: FnMut(&Value) -> bool,
{
    let mut stream = Box::pin(stream);
    while let Some(entry) = stream.try_next().await? {
        if matches(&entry) {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// Innertube request context shared by the JSON API endpoints.
fn context_body(ytcfg: &Ytcfg, click_tracking_params: &str) -> Value {
    json!({
        "clickTracking": {"clickTrackingParams": click_tracking_params},
        "client": ytcfg.context_client(),
        "request": {"consistencyTokenJars": [], "internalExperimentFlags": []},
        "user": {
            "onBehalfOfUser": ytcfg.get("DELEGATED_SESSION_ID").cloned().unwrap_or(Value::Null)
        }
    })
}

/// Page from a renderer with flat `contents`. Missing contents means the
/// collection is empty, not that the page is malformed.
fn renderer_page(renderer: &Value, xsrf_token: Option<String>) -> Page {
    Page {
        entries: renderer
            .get("contents")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        continuation: ContinuationDescriptor::from_continuations(renderer),
        xsrf_token,
    }
}

/// Entries of a section list renderer: every item section's contents,
/// flattened in order.
fn section_list_entries(renderer: &Value) -> Vec<Value> {
    renderer
        .get("contents")
        .and_then(Value::as_array)
        .map(|sections| {
            sections
                .iter()
                .filter_map(|section| {
                    path::resolve(section, "itemSectionRenderer.contents")
                        .ok()
                        .and_then(Value::as_array)
                })
                .flat_map(|items| items.iter().cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Scan guide section items for the LIKES_PLAYLIST entry, descending into
/// collapsible entries.
fn likes_entry_id(items: &Value) -> Option<String> {
    let items = items.as_array()?;
    for item in items {
        if let Ok(renderer) = path::resolve(item, "guideEntryRenderer") {
            if let Some(found) = guide_entry_likes_id(renderer) {
                return Some(found);
            }
        } else if let Ok(expandable) =
            path::resolve(item, "guideCollapsibleEntryRenderer.expandableItems")
        {
            if let Some(found) = expandable
                .as_array()?
                .iter()
                .filter_map(|e| path::resolve(e, "guideEntryRenderer").ok())
                .find_map(guide_entry_likes_id)
            {
                return Some(found);
            }
        }
    }
    None
}

fn guide_entry_likes_id(renderer: &Value) -> Option<String> {
    if path::resolve_str(renderer, "icon.iconType").ok()? != "LIKES_PLAYLIST" {
        return None;
    }
    path::resolve_str(renderer, "entryData.guideEntryData.guideEntryId")
        .ok()
        .map(str::to_string)
}

fn browse_xsrf(raw: &Value) -> Option<String> {
    path::resolve_str(raw, "1.xsrf_token")
        .ok()
        .map(str::to_string)
}

fn playlist_continuation_page(raw: Value) -> Result<Page, PathError> {
    let renderer = path::resolve(
        &raw,
        "1.response.continuationContents.playlistVideoListContinuation",
    )?;
    let xsrf = browse_xsrf(&raw);
    Ok(renderer_page(renderer, xsrf))
}

fn history_continuation_page(raw: Value) -> Result<Page, PathError> {
    let renderer = path::resolve(&raw, "1.response.continuationContents.sectionListContinuation")?;
    Ok(Page {
        entries: section_list_entries(renderer),
        continuation: ContinuationDescriptor::from_continuations(renderer),
        xsrf_token: browse_xsrf(&raw),
    })
}

fn item_section_continuation_page(raw: Value) -> Result<Page, PathError> {
    let renderer = path::resolve(&raw, "1.response.continuationContents.itemSectionContinuation")?;
    let xsrf = browse_xsrf(&raw);
    Ok(renderer_page(renderer, xsrf))
}
