//! Behaviour every [`Repository`] backend has to share.
//!
//! Each check uses its own codes so the whole suite can run against a single
//! database without cleanup between checks.

#![allow(dead_code)]

use shortlink_core::{ShortCode, StorageError};
use shortlink_storage::Repository;

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

pub async fn create_then_fetch_round_trips<R: Repository>(repo: &R) {
    let short_code = code("rt-abc123");

    repo.create(&short_code, "https://example.com/a")
        .await
        .unwrap();

    assert_eq!(
        repo.fetch(&short_code).await.unwrap(),
        "https://example.com/a"
    );
}

pub async fn fetch_unknown_code_is_not_found<R: Repository>(repo: &R) {
    let err = repo.fetch(&code("doesnotexist")).await.unwrap_err();
    assert_eq!(err, StorageError::NotFound("doesnotexist".to_string()));
}

pub async fn duplicate_create_keeps_first_target<R: Repository>(repo: &R) {
    let short_code = code("dup-abc123");

    repo.create(&short_code, "https://one.example")
        .await
        .unwrap();

    let err = repo
        .create(&short_code, "https://two.example")
        .await
        .unwrap_err();

    assert_eq!(err, StorageError::AlreadyExists("dup-abc123".to_string()));
    assert_eq!(repo.fetch(&short_code).await.unwrap(), "https://one.example");
}

pub async fn same_target_under_two_codes<R: Repository>(repo: &R) {
    repo.create(&code("twin-one"), "https://example.com/twin")
        .await
        .unwrap();
    repo.create(&code("twin-two"), "https://example.com/twin")
        .await
        .unwrap();

    assert_eq!(
        repo.fetch(&code("twin-one")).await.unwrap(),
        repo.fetch(&code("twin-two")).await.unwrap()
    );
}

pub async fn codes_are_case_sensitive<R: Repository>(repo: &R) {
    repo.create(&code("CaseCode"), "https://upper.example")
        .await
        .unwrap();
    repo.create(&code("casecode"), "https://lower.example")
        .await
        .unwrap();

    assert_eq!(
        repo.fetch(&code("CaseCode")).await.unwrap(),
        "https://upper.example"
    );
    assert_eq!(
        repo.fetch(&code("casecode")).await.unwrap(),
        "https://lower.example"
    );
}

pub async fn run_all<R: Repository>(repo: &R) {
    create_then_fetch_round_trips(repo).await;
    fetch_unknown_code_is_not_found(repo).await;
    duplicate_create_keeps_first_target(repo).await;
    same_target_under_two_codes(repo).await;
    codes_are_case_sensitive(repo).await;
}
