use futures::TryStreamExt;
use ytu_rs::{client::YouTube, util::HttpClient};

fn usage() -> ! {
    eprintln!(
        "usage: ytu-rs <cookies.json> <command> [arg]\n\
         commands: history | playlist <id> | live-chat | comments | community | clear-watch-later"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(cookies_path) = args.next() else { usage() };
    let Some(command) = args.next() else { usage() };

    // Read the cookie jar exported from a logged-in browser session
    let file = std::fs::File::open(&cookies_path).expect("Could not open cookie file");
    let store = cookie_store::CookieStore::load_json(std::io::BufReader::new(file))
        .expect("Could not parse cookie file");

    let client = HttpClient::with_cookie_store(store).expect("Could not create HttpClient");
    let yt = YouTube::new(client);

    match command.as_str() {
        "history" => {
            let stream = yt.history_info().await.expect("Could not fetch history");
            print_stream(stream).await;
        }
        "playlist" => {
            let id = args.next().unwrap_or_else(|| usage());
            let stream = yt.playlist_info(&id).await.expect("Could not fetch playlist");
            print_stream(stream).await;
        }
        "live-chat" => {
            let stream = yt
                .live_chat_history(false)
                .await
                .expect("Could not fetch live chat history");
            print_serializable_stream(stream).await;
        }
        "comments" => {
            let stream = yt
                .comment_history(false)
                .await
                .expect("Could not fetch comment history");
            print_serializable_stream(stream).await;
        }
        "community" => {
            let stream = yt
                .community_history(false)
                .await
                .expect("Could not fetch community history");
            print_serializable_stream(stream).await;
        }
        "clear-watch-later" => {
            yt.clear_watch_later()
                .await
                .expect("Could not clear Watch Later");
            println!("Cleared Watch Later");
        }
        _ => usage(),
    }
}

async fn print_stream<S>(stream: S)
where
    S: futures::Stream<Item = Result<serde_json::Value, ytu_rs::client::ClientError>>,
{
    let mut stream = Box::pin(stream);
    while let Some(entry) = stream.try_next().await.expect("Pagination failed") {
        println!("{entry}");
    }
}

async fn print_serializable_stream<S, T>(stream: S)
where
    T: serde::Serialize,
    S: futures::Stream<Item = Result<T, ytu_rs::client::ClientError>>,
{
    let mut stream = Box::pin(stream);
    while let Some(entry) = stream.try_next().await.expect("Pagination failed") {
        println!(
            "{}",
            serde_json::to_string(&entry).expect("Could not serialize entry")
        );
    }
}
