use std::time::Duration;

use reel_core::{NewVideo, Username, VideoId};
use reel_storage::{MySqlRepository, ReadRepository, Repository, StorageError};
use reel_test_infra::mysql::{MySqlServer, MysqlConfig};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    _mysql: MySqlServer,
    repo: MySqlRepository,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        for ddl in [
            include_str!("../ddl/mysql/videos.sql"),
            include_str!("../ddl/mysql/video_likes.sql"),
        ] {
            sqlx::query(ddl).execute(&pool).await.expect("create schema");
        }

        Self {
            _mysql: mysql,
            repo: MySqlRepository::new(pool),
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn video(title: &str) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        url: format!("https://videos.example.com/{title}.mp4"),
        duration_secs: 300,
        content_type: "video/mp4".to_string(),
    }
}

fn user(name: &str) -> Username {
    Username::new_unchecked(name)
}

#[tokio::test]
async fn create_and_find_round_trip() {
    let fixture = Fixture::start().await;

    let created = fixture.repo.create(video("trailer")).await.unwrap();
    assert!(created.id.as_u64() > 0);
    assert_eq!(created.likes(), 0);

    let found = fixture
        .repo
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("record should exist");

    assert_eq!(found.title, "trailer");
    assert_eq!(found.created_at.as_second(), created.created_at.as_second());
}

#[tokio::test]
async fn save_persists_the_liker_set() {
    let fixture = Fixture::start().await;

    let mut record = fixture.repo.create(video("clip")).await.unwrap();
    record.add_liker(user("alice"));
    record.add_liker(user("bob"));
    fixture.repo.save(&record).await.unwrap();

    let found = fixture
        .repo
        .find_by_id(record.id)
        .await
        .unwrap()
        .expect("record should exist");

    assert_eq!(found.likes(), 2);
    assert!(found.has_liked(&user("alice")));
    assert!(found.has_liked(&user("bob")));

    // Removing a liker and saving again replaces the set.
    record.remove_liker(&user("alice"));
    fixture.repo.save(&record).await.unwrap();

    let found = fixture.repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(found.likes(), 1);
    assert!(!found.has_liked(&user("alice")));
}

#[tokio::test]
async fn save_unknown_video_fails() {
    let fixture = Fixture::start().await;

    let record = reel_core::VideoRecord::new(
        VideoId::new(999_999),
        video("ghost"),
        jiff::Timestamp::now(),
    );

    let err = fixture.repo.save(&record).await.unwrap_err();
    assert!(matches!(err, StorageError::UnknownVideo(_)));
}

#[tokio::test]
async fn exists_and_find_all() {
    let fixture = Fixture::start().await;

    assert!(!fixture.repo.exists(VideoId::new(1)).await.unwrap());

    let first = fixture.repo.create(video("first")).await.unwrap();
    let second = fixture.repo.create(video("second")).await.unwrap();

    assert!(fixture.repo.exists(first.id).await.unwrap());

    let mut with_likes = second.clone();
    with_likes.add_liker(user("carol"));
    fixture.repo.save(&with_likes).await.unwrap();

    let records = fixture.repo.find_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].id < records[1].id);
    assert_eq!(records[1].likes(), 1);
}
