use std::fs;

use gigscout_core::{Listing, ResultSet, Site};
use gigscout_engine::{CookieRecord, CredentialSnapshot, CredentialStore, ResultSink};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn auth_cookie() -> CookieRecord {
    CookieRecord {
        name: "auth".to_string(),
        value: "secret".to_string(),
        domain: ".guru.com".to_string(),
        path: "/".to_string(),
        expires: 1_900_000_000.0,
        http_only: true,
        secure: true,
        session: false,
        same_site: Some("Lax".to_string()),
    }
}

#[test]
fn missing_cookie_file_means_no_snapshot() {
    let temp = TempDir::new().unwrap();
    let store = CredentialStore::new(temp.path().join("cookies"));
    assert_eq!(store.load(Site::Guru), None);
}

#[test]
fn corrupt_cookie_file_is_treated_as_missing() {
    let temp = TempDir::new().unwrap();
    let store = CredentialStore::new(temp.path());
    fs::write(store.path_for(Site::Guru), "{ not json").unwrap();
    assert_eq!(store.load(Site::Guru), None);
}

#[test]
fn empty_cookie_file_is_treated_as_missing() {
    let temp = TempDir::new().unwrap();
    let store = CredentialStore::new(temp.path());
    fs::write(store.path_for(Site::Guru), "[]").unwrap();
    assert_eq!(store.load(Site::Guru), None);
}

#[test]
fn saved_cookies_load_back_per_site() {
    let temp = TempDir::new().unwrap();
    let store = CredentialStore::new(temp.path().join("cookies"));
    let snapshot = CredentialSnapshot {
        site: Site::Guru,
        cookies: vec![auth_cookie()],
    };

    let path = store.save(&snapshot).unwrap();
    assert_eq!(path, temp.path().join("cookies").join("guru_cookies.json"));
    assert_eq!(store.load(Site::Guru), Some(snapshot));
    assert_eq!(store.load(Site::Upwork), None);
}

#[test]
fn browser_exported_cookie_files_are_accepted() {
    let temp = TempDir::new().unwrap();
    let store = CredentialStore::new(temp.path());
    fs::write(
        store.path_for(Site::Upwork),
        r#"[{"name":"sid","value":"1","domain":"www.upwork.com","httpOnly":true,"sameSite":"None"}]"#,
    )
    .unwrap();

    let snapshot = store.load(Site::Upwork).expect("parsed");
    let cookie = &snapshot.cookies[0];
    assert_eq!(cookie.path, "/");
    assert_eq!(cookie.expires, -1.0);
    assert!(cookie.http_only);
    assert!(cookie.applies_to_host("www.upwork.com"));
    assert!(!cookie.applies_to_host("upwork.com.evil.test"));
}

#[test]
fn sink_overwrites_artifact_and_echoes_one_line_per_flush() {
    let temp = TempDir::new().unwrap();
    let mut sink = ResultSink::with_output(temp.path().join("results"), Vec::new());

    let mut first = ResultSet::new();
    first.push(Listing::new(Site::Upwork, "One", "$10", "https://u/1"));
    first.push(Listing::new(Site::Upwork, "Two", "$20", "https://u/2"));
    sink.flush(&first, Site::Upwork).unwrap();

    let mut second = ResultSet::new();
    second.push(Listing::new(Site::Upwork, "Three", "$30", "https://u/3"));
    let path = sink.flush(&second, Site::Upwork).unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["title"], "Upwork: Three");

    let output = String::from_utf8(sink.into_output()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| serde_json::from_str::<Value>(line).is_ok()));
}
