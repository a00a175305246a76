use mdnote_core::db::{open_db, open_db_in_memory};
use mdnote_core::{
    ArticleGateway, ArticleRepository, ArticleService, GatewayError, SqliteArticleRepository,
};
use rusqlite::params;

#[test]
fn create_then_list_returns_new_article() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    let created = service.create_article("T", "C").unwrap();
    let listed = service.get_articles().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "T");
    assert_eq!(listed[0].content, "C");
    assert_eq!(listed[0].created_at, listed[0].updated_at);
}

#[test]
fn create_assigns_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    let first = service.create_article("a", "").unwrap();
    let second = service.create_article("b", "").unwrap();

    assert_ne!(first.id, second.id);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    let first = service.create_article("a", "").unwrap();
    service.delete_article(first.id).unwrap();
    let second = service.create_article("b", "").unwrap();

    assert!(second.id > first.id);
}

#[test]
fn round_trip_preserves_text_exactly() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let title = "  <Title> & \"quotes\"  ";
    let content = "# 見出し\n\n```\n<tag>\n```\n\ttrailing space \n";

    service.create_article(title, content).unwrap();
    let listed = service.get_articles().unwrap();

    assert_eq!(listed[0].title, title);
    assert_eq!(listed[0].content, content);
}

#[test]
fn empty_title_and_content_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    let created = service.create_article("", "").unwrap();

    assert_eq!(created.title, "");
    assert_eq!(created.content, "");
}

#[test]
fn update_reflects_new_content_and_moves_article_to_front() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let older = service.create_article("older", "v1").unwrap();
    let newer = service.create_article("newer", "v1").unwrap();

    let before = service.get_articles().unwrap();
    assert_eq!(before[0].id, newer.id);

    let updated = service.update_article(older.id, "older", "v2").unwrap();
    assert_eq!(updated.content, "v2");
    assert!(updated.updated_at > older.updated_at);
    assert_eq!(updated.created_at, older.created_at);

    let after = service.get_articles().unwrap();
    assert_eq!(after[0].id, older.id);
    assert_eq!(after[0].content, "v2");
    assert_eq!(after[1].id, newer.id);
}

#[test]
fn update_missing_article_fails_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    let err = service.update_article(42, "t", "c").unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(42)));
}

#[test]
fn delete_removes_article_from_list() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let kept = service.create_article("kept", "").unwrap();
    let removed = service.create_article("removed", "").unwrap();

    service.delete_article(removed.id).unwrap();

    let listed = service.get_articles().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
    assert!(service.get_article(removed.id).unwrap().is_none());
}

#[test]
fn delete_missing_article_fails_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let created = service.create_article("once", "").unwrap();
    service.delete_article(created.id).unwrap();

    let err = service.delete_article(created.id).unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(id) if id == created.id));
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn list_orders_by_updated_at_then_id_descending() {
    let conn = open_db_in_memory().unwrap();
    let (a, b, c) = {
        let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
        (
            service.create_article("a", "").unwrap(),
            service.create_article("b", "").unwrap(),
            service.create_article("c", "").unwrap(),
        )
    };

    conn.execute(
        "UPDATE articles SET created_at = 1000, updated_at = 5000 WHERE id = ?1;",
        params![a.id],
    )
    .unwrap();
    conn.execute(
        "UPDATE articles SET created_at = 1000, updated_at = 3000 WHERE id IN (?1, ?2);",
        params![b.id, c.id],
    )
    .unwrap();

    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let ids: Vec<_> = service
        .get_articles()
        .unwrap()
        .into_iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(ids, vec![a.id, c.id, b.id]);
}

#[test]
fn write_stamps_stay_monotonic_after_clock_skew() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::try_new(&conn).unwrap();
    let future_id = repo.insert_article("future", "").unwrap();
    let far_future = 4_000_000_000_000_i64;
    conn.execute(
        "UPDATE articles SET created_at = ?2, updated_at = ?2 WHERE id = ?1;",
        params![future_id, far_future],
    )
    .unwrap();

    let next_id = repo.insert_article("next", "").unwrap();
    let next = repo.get_article(next_id).unwrap().unwrap();

    assert_eq!(next.updated_at, far_future + 1);
    assert_eq!(repo.list_articles().unwrap()[0].id, next_id);
}

#[test]
fn corrupt_timestamps_are_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::try_new(&conn).unwrap();
    let id = repo.insert_article("bad", "").unwrap();
    conn.execute(
        "UPDATE articles SET created_at = 10, updated_at = 5 WHERE id = ?1;",
        params![id],
    )
    .unwrap();

    let service = ArticleService::new(repo);
    let err = service.get_articles().unwrap_err();
    assert!(matches!(err, GatewayError::Storage(_)));
}

#[test]
fn articles_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.db");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
        service.create_article("kept", "body").unwrap().id
    };

    let conn = open_db(&path).unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());
    let loaded = service.get_article(created_id).unwrap().unwrap();
    assert_eq!(loaded.title, "kept");
    assert_eq!(loaded.content, "body");
}

#[test]
fn gateway_is_usable_through_a_reference() {
    let conn = open_db_in_memory().unwrap();
    let service = ArticleService::new(SqliteArticleRepository::try_new(&conn).unwrap());

    fn count(gateway: impl ArticleGateway) -> usize {
        gateway.get_articles().unwrap().len()
    }

    service.create_article("x", "").unwrap();
    assert_eq!(count(&service), 1);
}
