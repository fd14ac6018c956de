//! Provider responses and payload fixtures

use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bytes served as an mp3 payload
pub const MP3_PAYLOAD: &[u8] = b"ID3\x04\x00\x00fake mp3 frames";

/// Bytes served as an m4a payload
pub const M4A_PAYLOAD: &[u8] = b"\x00\x00\x00\x1cftypM4A fake aac frames";

/// Search page listing `rows` as `(id, title)` with the given counters
pub fn search_page(rows: &[(&str, &str)], pages: u32, tracks: u32) -> String {
    let items: String = rows
        .iter()
        .map(|(id, title)| {
            format!(
                r#"<li><div class="name"><a class="url" href="/mp3/{id}.html">{title}</a></div></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <div class="play_list"><ul>{items}</ul></div>
        <div class="page"><a class="btn">首页</a><a class="btn">共{pages}页</a><a class="btn">共{tracks}首</a></div>
        </body></html>"#
    )
}

/// Successful detail response
pub fn detail_json(title: &str, payload_url: &str, lyric: Option<&str>) -> String {
    serde_json::json!({
        "msg": 1,
        "title": title,
        "url": payload_url,
        "lrc": lyric,
    })
    .to_string()
}

/// Mount a search page for `query`
pub async fn mount_search(server: &MockServer, query: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/so.php"))
        .and(query_param("wd", query))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount a detail response for track `id`
pub async fn mount_detail(server: &MockServer, id: &str, body: String) {
    Mock::given(method("POST"))
        .and(path("/style/js/play.php"))
        .and(body_string_contains(format!("id={id}&").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mount a payload at `route`, expecting exactly `hits` downloads
pub async fn mount_payload(server: &MockServer, route: &str, bytes: &[u8], hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .expect(hits)
        .mount(server)
        .await;
}
