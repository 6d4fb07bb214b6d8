use principia_core::db::open_db_in_memory;
use principia_core::{
    NewPrinciple, NewTactic, PrincipleColor, PrincipleRepository, RepoError,
    SqlitePrincipleRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn tactic_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM tactics;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn created_principle_is_readable_with_empty_tactics() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);

    let created = repo
        .create_principle(&NewPrinciple::new("Stories persuade", "Narrative beats facts"))
        .unwrap();
    assert_eq!(created.category, "general");
    assert_eq!(created.color, PrincipleColor::Blue);
    assert_eq!(created.order, 0);

    let loaded = repo
        .get_principle_with_tactics(created.id)
        .unwrap()
        .expect("principle should exist");
    assert_eq!(loaded.principle, created);
    assert!(loaded.tactics.is_empty());

    let listed = repo.list_principles_with_tactics().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].tactics.is_empty());
}

#[test]
fn get_unknown_principle_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    assert!(repo
        .get_principle_with_tactics(Uuid::new_v4())
        .unwrap()
        .is_none());
}

#[test]
fn tactics_are_nested_under_owner_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let first = repo
        .create_principle(&NewPrinciple::new("First", "one"))
        .unwrap();
    let second = repo
        .create_principle(&NewPrinciple::new("Second", "two"))
        .unwrap();

    let late = repo
        .create_tactic(&NewTactic::new(first.id, "late").order(5))
        .unwrap();
    let early = repo
        .create_tactic(&NewTactic::new(first.id, "early").order(1))
        .unwrap();
    let other = repo
        .create_tactic(&NewTactic::new(second.id, "other").description("note"))
        .unwrap();
    assert!(other.is_effective);
    assert_eq!(other.description.as_deref(), Some("note"));

    let loaded = repo
        .get_principle_with_tactics(first.id)
        .unwrap()
        .unwrap();
    let ids: Vec<_> = loaded.tactics.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    let listed = repo.list_principles_with_tactics().unwrap();
    assert_eq!(listed[0].tactics.len(), 2);
    assert_eq!(listed[1].tactics, vec![other]);
}

#[test]
fn listing_orders_by_order_then_insertion() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let c = repo
        .create_principle(&NewPrinciple::new("c", "c").order(2))
        .unwrap();
    let a = repo
        .create_principle(&NewPrinciple::new("a", "a").order(1))
        .unwrap();
    let b = repo
        .create_principle(&NewPrinciple::new("b", "b").order(1))
        .unwrap();

    let first_pass: Vec<_> = repo
        .list_principles_with_tactics()
        .unwrap()
        .into_iter()
        .map(|p| p.principle.id)
        .collect();
    assert_eq!(first_pass, vec![a.id, b.id, c.id]);

    let second_pass: Vec<_> = repo
        .list_principles_with_tactics()
        .unwrap()
        .into_iter()
        .map(|p| p.principle.id)
        .collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn deleting_principle_removes_its_tactics_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let doomed = repo
        .create_principle(&NewPrinciple::new("doomed", "d"))
        .unwrap();
    let kept = repo
        .create_principle(&NewPrinciple::new("kept", "k"))
        .unwrap();
    repo.create_tactic(&NewTactic::new(doomed.id, "x")).unwrap();
    repo.create_tactic(&NewTactic::new(doomed.id, "y")).unwrap();
    repo.create_tactic(&NewTactic::new(kept.id, "z")).unwrap();

    repo.delete_principle(doomed.id).unwrap();

    assert!(repo
        .get_principle_with_tactics(doomed.id)
        .unwrap()
        .is_none());
    assert_eq!(tactic_count(&conn), 1);
    let listed = repo.list_principles_with_tactics().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed
        .iter()
        .flat_map(|p| &p.tactics)
        .all(|t| t.principle_id != doomed.id));
}

#[test]
fn deleting_absent_ids_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    repo.delete_principle(Uuid::new_v4()).unwrap();
    repo.delete_tactic(Uuid::new_v4()).unwrap();
}

#[test]
fn deleting_tactic_leaves_principle_and_siblings() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let principle = repo
        .create_principle(&NewPrinciple::new("p", "p"))
        .unwrap();
    let gone = repo
        .create_tactic(&NewTactic::new(principle.id, "gone"))
        .unwrap();
    let stays = repo
        .create_tactic(&NewTactic::new(principle.id, "stays"))
        .unwrap();

    repo.delete_tactic(gone.id).unwrap();

    let loaded = repo
        .get_principle_with_tactics(principle.id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.tactics, vec![stays]);
}

#[test]
fn create_tactic_for_missing_principle_fails_without_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let missing = Uuid::new_v4();

    let err = repo
        .create_tactic(&NewTactic::new(missing, "orphan"))
        .unwrap_err();
    assert!(matches!(err, RepoError::PrincipleNotFound(id) if id == missing));
    assert!(err.is_validation());
    assert_eq!(tactic_count(&conn), 0);
}

#[test]
fn invalid_persisted_color_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO principles (id, title, description, color)
         VALUES (?1, 't', 'd', 'magenta');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let repo = SqlitePrincipleRepository::new(&conn);
    let err = repo.list_principles_with_tactics().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("magenta")));
}

#[test]
fn failed_principle_delete_keeps_its_tactics() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePrincipleRepository::new(&conn);
    let principle = repo
        .create_principle(&NewPrinciple::new("sticky", "s"))
        .unwrap();
    repo.create_tactic(&NewTactic::new(principle.id, "x")).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER block_principle_delete BEFORE DELETE ON principles
         BEGIN SELECT RAISE(ABORT, 'principle delete blocked'); END;",
    )
    .unwrap();

    let result = repo.delete_principle(principle.id);

    assert!(result.is_err());
    assert_eq!(tactic_count(&conn), 1);
    let still_there = repo
        .get_principle_with_tactics(principle.id)
        .unwrap()
        .expect("principle should survive the aborted delete");
    assert_eq!(still_there.tactics.len(), 1);
}
