//! # ytu-rs
//!
//! This crate is a client for the logged-in YouTube account pages. YouTube
//! has no documented API for watch history, playlists, comment history or
//! live chat history, so the crate works the way the web client does: it
//! downloads the server-rendered pages, pulls the embedded `ytcfg` and
//! `ytInitialData` JSON blobs out of the HTML, and pages through the
//! collections with the continuation tokens the server hands back.
//!
//! ## Usage
//!
//! Authentication is cookie-based. Log in with a browser, export the
//! cookies, and hand the jar to [`util::HttpClient`]; this crate never
//! performs a login itself.
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use ytu_rs::{client::YouTube, util::HttpClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Load a cookie jar exported from a logged-in browser session
//!     let file = std::fs::File::open("cookies.json").unwrap();
//!     let store = cookie_store::CookieStore::load_json(std::io::BufReader::new(file)).unwrap();
//!
//!     let client = HttpClient::with_cookie_store(store).unwrap();
//!     let yt = YouTube::new(client);
//!
//!     // Stream the whole watch history, one page fetch at a time
//!     let mut history = Box::pin(yt.history_info().await.unwrap());
//!     while let Some(entry) = history.try_next().await.unwrap() {
//!         println!("{entry}");
//!     }
//! }
//! ```
//!
//! The pagination methods return lazy streams: fetches are interleaved with
//! consumption, at most one page ahead, and dropping a stream stops all
//! network activity for it.

#[forbid(unsafe_code)]
#[macro_use]
extern crate log;

pub mod auth;
pub mod client;
pub mod comment;
pub mod constants;
pub mod continuation;
pub mod initial;
pub mod live_chat;
pub mod path;
mod scrape;
mod text;
pub mod util;
pub mod ytcfg;
