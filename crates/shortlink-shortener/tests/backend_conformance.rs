//! Drives the same request script through `LinkService` on both storage
//! backends and compares what callers observe.

use std::time::Duration;

use shortlink_generator::SeqGenerator;
use shortlink_shortener::{LinkService, Shortener, ShortenerError};
use shortlink_storage::{InMemoryRepository, PostgresRepository, PostgresSettings, Repository};
use shortlink_test_infra::postgres::{PostgresConfig, PostgresServer};

#[derive(Debug, PartialEq)]
enum Step {
    Created(String),
    Resolved(String),
    Failed(ShortenerError),
}

fn record<T: ToString>(result: Result<T, ShortenerError>, ok: fn(String) -> Step) -> Step {
    match result {
        Ok(value) => ok(value.to_string()),
        Err(err) => Step::Failed(err),
    }
}

async fn run_script<R: Repository>(repo: R) -> Vec<Step> {
    let service = LinkService::new(repo, SeqGenerator::with_prefix("cf")).with_max_attempts(3);
    let mut steps = Vec::new();

    steps.push(record(service.create_link("https://example.com/a").await, Step::Created));
    steps.push(record(service.get_link("cf000000").await, Step::Resolved));
    steps.push(record(service.create_link("").await, Step::Created));
    steps.push(record(service.create_link("mailto:x@example.com").await, Step::Created));
    steps.push(record(service.get_link("doesnotexist").await, Step::Resolved));
    steps.push(record(service.get_link("no").await, Step::Resolved));
    steps.push(record(service.create_link("https://example.com/a").await, Step::Created));
    steps.push(record(service.get_link("cf000001").await, Step::Resolved));

    steps
}

fn expected() -> Vec<Step> {
    vec![
        Step::Created("cf000000".to_string()),
        Step::Resolved("https://example.com/a".to_string()),
        Step::Failed(ShortenerError::InvalidInput("URL cannot be empty".to_string())),
        Step::Failed(ShortenerError::InvalidInput(
            "URL scheme must be http or https: mailto".to_string(),
        )),
        Step::Failed(ShortenerError::NotFound("doesnotexist".to_string())),
        Step::Failed(ShortenerError::InvalidInput(
            "length must be between 3 and 32, got 2".to_string(),
        )),
        Step::Created("cf000001".to_string()),
        Step::Resolved("https://example.com/a".to_string()),
    ]
}

#[tokio::test]
async fn in_memory_backend_follows_script() {
    assert_eq!(run_script(InMemoryRepository::new()).await, expected());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn postgres_backend_matches_in_memory() {
    let postgres = PostgresServer::new(PostgresConfig::builder().build())
        .await
        .expect("start postgres");

    let settings = PostgresSettings::builder()
        .host(postgres.host().await.expect("postgres host"))
        .port(postgres.port().await.expect("postgres port"))
        .user(postgres.username())
        .password(postgres.password())
        .database(postgres.database())
        .max_connections(2)
        .build();

    let mut repo = None;
    for _ in 0..20 {
        match PostgresRepository::connect(&settings).await {
            Ok(connected) => {
                repo = Some(connected);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(500)).await,
        }
    }
    let repo = repo.expect("connect postgres");
    repo.migrate().await.expect("apply migrations");

    let in_memory = run_script(InMemoryRepository::new()).await;
    let postgres_steps = run_script(repo).await;

    assert_eq!(postgres_steps, in_memory);
}
