//! Server-rendered HTML for the login and wishlist pages.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use wishlist_core::Item;

/// Everything the list page shows
pub struct ListView {
    pub wanted: Vec<Item>,
    pub owned: Vec<Item>,
    pub suggestion: Option<Item>,
    pub notice: Option<String>,
    pub session_expires_at: DateTime<Utc>,
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = encode_text(title),
        body = body,
    )
}

fn notice(message: Option<&str>) -> String {
    message
        .map(|message| format!(r#"<p class="notice">{}</p>"#, encode_text(message)))
        .unwrap_or_default()
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Wishlist</h1>
{notice}
<form method="post" action="/login">
  <label>Password <input type="password" name="password" autofocus></label>
  <button type="submit">Sign in</button>
</form>"#,
        notice = notice(error),
    );
    layout("Wishlist - Sign in", &body)
}

fn link_cell(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        format!(
            r#"<a href="{}" rel="noopener noreferrer">link</a>"#,
            encode_double_quoted_attribute(url)
        )
    } else {
        encode_text(url).to_string()
    }
}

fn picture_cell(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    format!(
        r#"<img src="{}" alt="" height="64">"#,
        encode_double_quoted_attribute(url)
    )
}

fn item_table(title: &str, items: &[Item]) -> String {
    if items.is_empty() {
        return format!("<h2>{}</h2>\n<p>Nothing here.</p>", encode_text(title));
    }

    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                encode_text(&item.key),
                encode_text(&item.description),
                link_cell(&item.link),
                picture_cell(&item.picture_url),
            )
        })
        .collect();

    format!(
        "<h2>{} ({})</h2>\n<table>\n<tr><th>Item</th><th>Description</th><th>Link</th><th>Picture</th></tr>\n{}</table>",
        encode_text(title),
        items.len(),
        rows
    )
}

const ITEM_FORM: &str = r#"<h2>Manage</h2>
<form method="post" action="/list">
  <label>Item <input name="key" required></label>
  <label>Description <input name="description"></label>
  <label>Link <input name="link"></label>
  <label>Picture URL <input name="picture_url"></label>
  <select name="action">
    <option value="">Add</option>
    <option value="edit">Edit</option>
    <option value="status">Toggle owned</option>
    <option value="delete">Delete</option>
  </select>
  <button type="submit">Submit</button>
</form>"#;

pub fn list_page(view: &ListView) -> String {
    let suggestion = view
        .suggestion
        .as_ref()
        .map(|item| {
            format!(
                r#"<p class="suggestion">Next up: <strong>{}</strong></p>"#,
                encode_text(&item.key)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Wishlist</h1>
<p><a href="/logout">Sign out</a> <small>(session valid until {expires})</small></p>
{notice}
{suggestion}
{wanted}
{owned}
{form}"#,
        expires = view.session_expires_at.format("%Y-%m-%d %H:%M UTC"),
        notice = notice(view.notice.as_deref()),
        suggestion = suggestion,
        wanted = item_table("Wanted", &view.wanted),
        owned = item_table("Owned", &view.owned),
        form = ITEM_FORM,
    );
    layout("Wishlist", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_core::ItemSpec;

    fn item(key: &str, link: &str) -> Item {
        let mut item = Item::new(key, ItemSpec::default());
        item.link = link.to_string();
        item
    }

    #[test]
    fn test_list_page_escapes_item_fields() {
        let view = ListView {
            wanted: vec![item("<script>alert(1)</script>", "javascript:alert(1)")],
            owned: Vec::new(),
            suggestion: None,
            notice: Some("Item 'a&b' already exists".to_string()),
            session_expires_at: Utc::now(),
        };
        let html = list_page(&view);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(r#"href="javascript"#));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn test_list_page_shows_both_partitions() {
        let view = ListView {
            wanted: vec![item("kettle", "https://shop.example/kettle")],
            owned: vec![item("toaster", "")],
            suggestion: Some(item("kettle", "")),
            notice: None,
            session_expires_at: Utc::now(),
        };
        let html = list_page(&view);

        assert!(html.contains("Wanted (1)"));
        assert!(html.contains("Owned (1)"));
        assert!(html.contains(r#"href="https://shop.example/kettle""#));
        assert!(html.contains("Next up: <strong>kettle</strong>"));
    }

    #[test]
    fn test_login_page_error() {
        assert!(login_page(Some("Wrong password")).contains("Wrong password"));
        assert!(!login_page(None).contains("notice"));
    }
}
