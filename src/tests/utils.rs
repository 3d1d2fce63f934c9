use crate::config::AppConfig;
use crate::scraper::RawListing;
use crate::store::DataDir;
use chrono::NaiveDate;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use url::Url;

pub const LEDGER_FILE: &str = "listing_first_seen.csv";

/// A fresh data folder that disappears with the returned guard.
pub fn temp_data_dir() -> (TempDir, DataDir) {
    let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir failed: {e}"));
    let dir = DataDir::open(tmp.path()).unwrap_or_else(|e| panic!("open data dir failed: {e}"));
    (tmp, dir)
}

pub fn listing(uli_key: &str, sale_type: &str, status: &str) -> RawListing {
    serde_json::from_value(json!({
        "ULIKey": uli_key,
        "Address": format!("{uli_key} Mulberry Ln"),
        "Village": "Fenney",
        "County": "Sumter",
        "Model": "Gardenia",
        "Price": "$315,000",
        "Bedrooms": 3,
        "Baths": 2,
        "SquareFeet": 1650,
        "Garage": "2 Car",
        "Pool": false,
        "GISLat": 28.8,
        "GISLong": -81.99,
        "ListingStatus": status,
        "SaleType": sale_type,
        "YouTubeVideoId": null,
        "VLSNumber": format!("VLS{uli_key}"),
    }))
    .unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("bad date {y}-{m}-{d}"))
}

/// Config pointing at `feed_url`, with no back-off, a short timeout and mail off.
pub fn test_config(feed_url: &str) -> AppConfig {
    AppConfig {
        feed_url: Url::parse(feed_url).unwrap_or_else(|e| panic!("bad url {feed_url}: {e}")),
        data_dir: PathBuf::from("data"),
        ledger_file: LEDGER_FILE.to_string(),
        request_timeout_secs: 5,
        max_retries: 0,
        retry_backoff_secs: 0,
        log_level: "debug".to_string(),
        mail: None,
    }
}

/// Minimal HTTP/1.1 server on a loopback port. `respond` maps the request path
/// to a status and body. Returns the base URL and a count of requests served.
pub fn serve_http<F>(respond: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&str) -> (u16, Vec<u8>) + Send + 'static,
{
    let listener =
        TcpListener::bind("127.0.0.1:0").unwrap_or_else(|e| panic!("bind failed: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("local_addr failed: {e}"));
    let hits = Arc::new(AtomicUsize::new(0));
    let served = Arc::clone(&hits);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let Ok(read_half) = stream.try_clone() else { continue };
            let mut reader = BufReader::new(read_half);

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            let mut header = String::new();
            while matches!(reader.read_line(&mut header), Ok(n) if n > 2) {
                header.clear();
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            served.fetch_add(1, Ordering::SeqCst);
            let (status, body) = respond(&path);

            let head = format!(
                "HTTP/1.1 {status} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                if status < 400 { "OK" } else { "Error" },
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        }
    });

    (format!("http://{addr}"), hits)
}
