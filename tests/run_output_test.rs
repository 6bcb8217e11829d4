//! End-of-run output properties: record count, id numbering, output file
//! shape, and re-run stability.

use std::time::Duration;

use fufufafa_archiver::results::{
    to_records, write_results, ExtractedData, ScrapeFailure, ScrapeOutcome,
};
use tempfile::TempDir;

fn simulated_outcomes(urls: &[&str]) -> Vec<ScrapeOutcome> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| match i % 4 {
            // Every fourth URL fails navigation, one times out, one has no
            // anchors; the rest succeed.
            1 => Err(ScrapeFailure::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string())),
            2 => Err(ScrapeFailure::ContentTimeout(Duration::from_secs(10))),
            3 => Err(ScrapeFailure::NoAnchors),
            _ => Ok(ExtractedData {
                content: format!("komentar {i}"),
                datetime: Some("2024-09-18T09:41:00.000Z".to_string()),
                source_url: (*url).to_string(),
            }),
        })
        .collect()
}

const URLS: [&str; 7] = [
    "https://www.kaskus.co.id/post/a1",
    "https://www.kaskus.co.id/post/a2",
    "https://www.kaskus.co.id/post/a3",
    "https://www.kaskus.co.id/post/a4",
    "https://www.kaskus.co.id/post/a5",
    "https://www.kaskus.co.id/post/a6",
    "https://www.kaskus.co.id/post/a7",
];

#[test]
fn one_record_per_url_with_contiguous_ids() {
    let records = to_records(simulated_outcomes(&URLS), 699);

    assert_eq!(records.len(), URLS.len());
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.id, 700 + i as u32);
    }
}

#[test]
fn failed_urls_yield_null_data_not_missing_entries() {
    let records = to_records(simulated_outcomes(&URLS), 699);

    // Indexes 1, 2, 3, 5, 6 fail under the i % 4 pattern above.
    assert!(records[1].data.is_none());
    assert!(records[2].data.is_none());
    assert!(records[3].data.is_none());
    assert!(records[0].data.is_some());
    assert!(records[4].data.is_some());
}

#[tokio::test]
async fn rerun_produces_identical_ids_and_source_urls() {
    let dir = TempDir::new().unwrap();
    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    write_results(&first_path, &to_records(simulated_outcomes(&URLS), 699))
        .await
        .unwrap();
    write_results(&second_path, &to_records(simulated_outcomes(&URLS), 699))
        .await
        .unwrap();

    let first: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&first_path).unwrap()).unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&second_path).unwrap()).unwrap();

    let pick = |v: &serde_json::Value| -> Vec<(u64, Option<String>)> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|r| {
                (
                    r["id"].as_u64().unwrap(),
                    r["data"]["source_url"].as_str().map(String::from),
                )
            })
            .collect()
    };

    assert_eq!(pick(&first), pick(&second));
}

#[tokio::test]
async fn output_file_is_a_pretty_printed_id_data_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fufufafa.json");

    write_results(&path, &to_records(simulated_outcomes(&URLS), 699))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for record in parsed.as_array().unwrap() {
        assert!(record["id"].is_u64());
        assert!(record.get("data").is_some());
    }
}

#[tokio::test]
async fn image_directory_creation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let img_dir = dir.path().join("public").join("img");

    tokio::fs::create_dir_all(&img_dir).await.unwrap();
    tokio::fs::create_dir_all(&img_dir).await.unwrap();

    assert!(img_dir.is_dir());
}
