//! Integration tests for the recent-changes feed lookups.
//!
//! Exercises the repository layer against a real server given by
//! `DATABASE_URL`. The hashtag patterns use `[[:>:]]` and the DISTINCT
//! lookups order by a column they do not select, so the server must be
//! MariaDB, as on the replicas.
//!
//! Every lookup must return rows newest first (descending change id) and at
//! most `limit` of them.

use std::collections::HashMap;

use sqlx::MySqlPool;
use wikifeed_db::repositories::RecentChangeRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Change<'a> {
    title: &'a str,
    comment: &'a str,
    cur_id: u32,
    namespace: i32,
    rc_type: u8,
    minutes_ago: u32,
}

impl<'a> Change<'a> {
    fn edit(title: &'a str, comment: &'a str, minutes_ago: u32) -> Self {
        Self {
            title,
            comment,
            cur_id: 1,
            namespace: 0,
            rc_type: 0,
            minutes_ago,
        }
    }

    fn page(mut self, cur_id: u32) -> Self {
        self.cur_id = cur_id;
        self
    }

    fn namespace(mut self, namespace: i32) -> Self {
        self.namespace = namespace;
        self
    }

    fn rc_type(mut self, rc_type: u8) -> Self {
        self.rc_type = rc_type;
        self
    }
}

async fn insert(pool: &MySqlPool, change: Change<'_>) -> u64 {
    sqlx::query(
        "INSERT INTO recentchanges
            (rc_timestamp, rc_cur_id, rc_namespace, rc_title, rc_comment, rc_user_text,
             rc_type, rc_this_oldid, rc_last_oldid, rc_old_len, rc_new_len)
         VALUES
            (DATE_FORMAT(NOW() - INTERVAL ? MINUTE, '%Y%m%d%H%i%s'), ?, ?, ?, ?, 'Tester',
             ?, 200, 100, 10, 20)",
    )
    .bind(change.minutes_ago)
    .bind(change.cur_id)
    .bind(change.namespace)
    .bind(change.title)
    .bind(change.comment)
    .bind(change.rc_type)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_id()
}

async fn link(pool: &MySqlPool, page_id: u32, category: &str, minutes_ago: u32) {
    sqlx::query(
        "INSERT INTO categorylinks (cl_from, cl_to, cl_timestamp)
         VALUES (?, ?, NOW() - INTERVAL ? MINUTE)",
    )
    .bind(page_id)
    .bind(category)
    .bind(minutes_ago)
    .execute(pool)
    .await
    .unwrap();
}

/// Change ids must be strictly descending and no more than `limit` of them.
fn assert_newest_first(change_ids: &[u64], limit: u32) {
    assert!(
        change_ids.len() <= limit as usize,
        "{} rows returned with limit {limit}",
        change_ids.len()
    );
    assert!(
        change_ids.windows(2).all(|pair| pair[0] > pair[1]),
        "change ids not descending: {change_ids:?}"
    );
}

// ---------------------------------------------------------------------------
// Test: hashtag lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/migrations")]
async fn test_hashtag_edits_match_whole_tag(pool: MySqlPool) {
    insert(&pool, Change::edit("A", "#foo at start", 5)).await;
    insert(&pool, Change::edit("B", "added #foo here", 4)).await;
    insert(&pool, Change::edit("C", "added #foobar", 3)).await;
    insert(&pool, Change::edit("D", "glued x#foo", 2)).await;
    insert(&pool, Change::edit("E", "too old #foo", 180)).await;
    insert(&pool, Change::edit("F", "talk page #foo", 1).namespace(1).rc_type(1)).await;

    let rows = RecentChangeRepo::hashtag_edits(&pool, "#foo", 1, 50)
        .await
        .unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.rc_title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);

    let unprefixed = RecentChangeRepo::hashtag_edits(&pool, "foo", 1, 50)
        .await
        .unwrap();
    assert_eq!(rows, unprefixed);
    assert_eq!(rows[0].rc_this_oldid, 200);
    assert_eq!(rows[0].rc_new_len, Some(20));
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_hashtag_edits_newest_first_within_limit(pool: MySqlPool) {
    for (title, minutes_ago) in [("One", 40), ("Two", 30), ("Three", 20), ("Four", 10)] {
        insert(&pool, Change::edit(title, "work #foo", minutes_ago)).await;
    }

    let rows = RecentChangeRepo::hashtag_edits(&pool, "foo", 1, 3)
        .await
        .unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.rc_title.as_str()).collect();
    assert_eq!(titles, vec!["Four", "Three", "Two"]);
    assert!(rows.windows(2).all(|pair| pair[0].rc_timestamp >= pair[1].rc_timestamp));

    let unlimited = RecentChangeRepo::hashtag_edits(&pool, "foo", 1, 50)
        .await
        .unwrap();
    assert_eq!(unlimited.len(), 4);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_hashtag_test_tag_looks_back_fourteen_days(pool: MySqlPool) {
    insert(&pool, Change::edit("Old", "#test run", 3 * 24 * 60)).await;
    insert(&pool, Change::edit("Ancient", "#test run", 20 * 24 * 60)).await;

    let rows = RecentChangeRepo::hashtag_edits(&pool, "test", 1, 50)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rc_title, "Old");
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_any_hashtag_edits_respects_limit(pool: MySqlPool) {
    insert(&pool, Change::edit("A", "#ab1 first", 6)).await;
    insert(&pool, Change::edit("B", "then #xyz", 5)).await;
    insert(&pool, Change::edit("C", "#1a digits first", 4)).await;
    insert(&pool, Change::edit("D", "single #a", 3)).await;
    insert(&pool, Change::edit("E", "#editathon2024", 2)).await;

    let rows = RecentChangeRepo::any_hashtag_edits(&pool, 1, 2)
        .await
        .unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.rc_title.as_str()).collect();
    assert_eq!(titles, vec!["E", "B"]);

    let all = RecentChangeRepo::any_hashtag_edits(&pool, 1, 50)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: category lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/migrations")]
async fn test_category_members_filter_on_link_time(pool: MySqlPool) {
    insert(&pool, Change::edit("Recent_link", "edit", 500).page(10)).await;
    insert(&pool, Change::edit("Old_link", "edit", 5).page(11)).await;
    link(&pool, 10, "My_Category", 10).await;
    link(&pool, 11, "My_Category", 600).await;

    let rows = RecentChangeRepo::category_members(&pool, "My Category", 1, 50)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rc_title, "Recent_link");
    assert_eq!(rows[0].rc_cur_id, 10);
    assert_eq!(rows[0].rc_namespace, 0);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_category_members_newest_first_within_limit(pool: MySqlPool) {
    let mut change_by_page = HashMap::new();
    for (page_id, title) in [(20, "First"), (21, "Second"), (22, "Third"), (23, "Fourth")] {
        let rc_id = insert(&pool, Change::edit(title, "edit", 30).page(page_id)).await;
        change_by_page.insert(u64::from(page_id), rc_id);
        link(&pool, page_id, "Chemistry", 15).await;
    }

    let rows = RecentChangeRepo::category_members(&pool, "Chemistry", 1, 3)
        .await
        .unwrap();
    let change_ids: Vec<u64> = rows.iter().map(|r| change_by_page[&r.rc_cur_id]).collect();
    assert_newest_first(&change_ids, 3);
    let titles: Vec<&str> = rows.iter().map(|r| r.rc_title.as_str()).collect();
    assert_eq!(titles, vec!["Fourth", "Third", "Second"]);
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_category_member_revisions_filter_on_edit_time(pool: MySqlPool) {
    let first = insert(&pool, Change::edit("Member", "first", 20).page(10)).await;
    let second = insert(&pool, Change::edit("Member", "second", 10).page(10)).await;
    insert(&pool, Change::edit("Member", "stale", 600).page(10)).await;
    insert(&pool, Change::edit("Outsider", "edit", 5).page(12)).await;
    link(&pool, 10, "Physics", 60 * 24 * 30).await;

    let rows = RecentChangeRepo::category_member_revisions(&pool, "Physics", 1, 50)
        .await
        .unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.rc_id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(rows.iter().all(|r| r.rc_title == "Member"));
}

#[sqlx::test(migrations = "tests/migrations")]
async fn test_category_member_revisions_newest_first_within_limit(pool: MySqlPool) {
    let mut inserted = Vec::new();
    for minutes_ago in [25, 20, 15, 10] {
        inserted.push(insert(&pool, Change::edit("Member", "edit", minutes_ago).page(30)).await);
    }
    link(&pool, 30, "Biology", 60).await;

    let rows = RecentChangeRepo::category_member_revisions(&pool, "Biology", 1, 2)
        .await
        .unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.rc_id).collect();
    assert_newest_first(&ids, 2);
    assert_eq!(ids, vec![inserted[3], inserted[2]]);
}

// ---------------------------------------------------------------------------
// Test: article list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "tests/migrations")]
async fn test_article_revisions_newest_first(pool: MySqlPool) {
    let a = insert(&pool, Change::edit("Page_One", "a", 30)).await;
    let b = insert(&pool, Change::edit("Page_Two", "b", 20)).await;
    let c = insert(&pool, Change::edit("Page_One", "c", 10)).await;
    insert(&pool, Change::edit("Page_Three", "d", 5)).await;

    let rows = RecentChangeRepo::article_revisions(&pool, &["Page One", "Page Two"], 1, 50)
        .await
        .unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.rc_id).collect();
    assert_newest_first(&ids, 50);
    assert_eq!(ids, vec![c, b, a]);

    let capped = RecentChangeRepo::article_revisions(&pool, &["Page One", "Page Two"], 1, 2)
        .await
        .unwrap();
    let capped_ids: Vec<u64> = capped.iter().map(|r| r.rc_id).collect();
    assert_newest_first(&capped_ids, 2);
    assert_eq!(capped_ids, vec![c, b]);
}
