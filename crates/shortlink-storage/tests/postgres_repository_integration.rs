//! These tests start a PostgreSQL container and need a running Docker daemon.
//! Run them with `cargo test -p shortlink-storage -- --ignored`.

mod common;

use std::time::Duration;

use shortlink_core::{ShortCode, StorageError};
use shortlink_storage::{PostgresRepository, PostgresSettings, Repository};
use shortlink_test_infra::postgres::{PostgresConfig, PostgresServer};

struct Fixture {
    _postgres: PostgresServer,
    repo: PostgresRepository,
}

impl Fixture {
    async fn start() -> Self {
        let postgres = PostgresServer::new(PostgresConfig::builder().build())
            .await
            .expect("start postgres");

        let settings = PostgresSettings::builder()
            .host(postgres.host().await.expect("postgres host"))
            .port(postgres.port().await.expect("postgres port"))
            .user(postgres.username())
            .password(postgres.password())
            .database(postgres.database())
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(2))
            .build();

        let repo = connect_with_retry(&settings).await;
        repo.migrate().await.expect("apply migrations");

        Self {
            _postgres: postgres,
            repo,
        }
    }
}

async fn connect_with_retry(settings: &PostgresSettings) -> PostgresRepository {
    let mut last_error = None;

    for _ in 0..20 {
        match PostgresRepository::connect(settings).await {
            Ok(repo) => return repo,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect postgres: {last_error:?}");
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

#[tokio::test]
#[ignore = "requires docker"]
async fn conformance_suite() {
    let fixture = Fixture::start().await;
    common::run_all(&fixture.repo).await;
}

#[tokio::test]
#[ignore = "requires docker"]
async fn migrations_are_idempotent() {
    let fixture = Fixture::start().await;

    fixture.repo.migrate().await.unwrap();
    fixture
        .repo
        .create(&code("after-migrate"), "https://example.com")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires docker"]
async fn concurrent_inserts_of_same_code_have_one_winner() {
    let fixture = Fixture::start().await;
    let mut handles = vec![];

    for i in 0..16 {
        let repo = fixture.repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create(&code("contested"), &format!("https://example{i}.com"))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(err) => assert!(matches!(err, StorageError::AlreadyExists(_))),
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn closed_pool_reports_unavailable() {
    let fixture = Fixture::start().await;
    fixture.repo.pool().close().await;

    let err = fixture.repo.fetch(&code("abc123")).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));

    let err = fixture
        .repo
        .create(&code("abc123"), "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
}
