use minote_core::db::open_db_in_memory;
use minote_core::{Note, NoteRepository, RepoError, SqliteNoteRepository, UNSAVED_NOTE_ID};
use rusqlite::params;

#[test]
fn insert_assigns_first_id_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert(&Note::draft("A", "B")).unwrap();
    assert_eq!(id, 1);

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, 1);
    assert_eq!(loaded.title, "A");
    assert_eq!(loaded.content, "B");
    assert!(loaded.is_persisted());

    repo.delete(&loaded).unwrap();
    assert!(repo.get_by_id(id).unwrap().is_none());
}

#[test]
fn inserted_note_appears_in_list_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert(&Note::draft("groceries", "milk, eggs")).unwrap();

    let listed = repo.list().unwrap();
    let matches = listed.iter().filter(|note| note.id == id).count();
    assert_eq!(matches, 1);
}

#[test]
fn get_by_unsaved_identity_is_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    repo.insert(&Note::draft("saved", "body")).unwrap();

    assert!(repo.get_by_id(UNSAVED_NOTE_ID).unwrap().is_none());
}

#[test]
fn update_replaces_fields_without_duplicating_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert(&Note::draft_at("before", "old body", 1_000)).unwrap();
    let mut note = repo.get_by_id(id).unwrap().unwrap();

    note.title = "after".to_string();
    note.content = "new body".to_string();
    note.timestamp = 2_000;
    repo.update(&note).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].title, "after");
    assert_eq!(listed[0].content, "new body");
    assert_eq!(listed[0].timestamp, 2_000);
}

#[test]
fn update_of_missing_note_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut ghost = Note::draft("ghost", "never saved");
    ghost.id = 42;

    let err = repo.update(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn delete_of_missing_note_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut ghost = Note::draft("ghost", "never saved");
    ghost.id = 7;

    let err = repo.delete(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(7)));
}

#[test]
fn deleted_note_disappears_from_list_results() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let keep_id = repo.insert(&Note::draft("keep", "")).unwrap();
    let drop_id = repo.insert(&Note::draft("drop", "")).unwrap();

    let doomed = repo.get_by_id(drop_id).unwrap().unwrap();
    repo.delete(&doomed).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep_id);
}

#[test]
fn list_orders_by_timestamp_descending_with_id_tiebreak() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let oldest = repo.insert(&Note::draft_at("oldest", "", 1_000)).unwrap();
    let newest = repo.insert(&Note::draft_at("newest", "", 3_000)).unwrap();
    let tied_a = repo.insert(&Note::draft_at("tied a", "", 2_000)).unwrap();
    let tied_b = repo.insert(&Note::draft_at("tied b", "", 2_000)).unwrap();

    let listed = repo.list().unwrap();
    let ids = listed.iter().map(|note| note.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![newest, tied_b, tied_a, oldest]);
}

#[test]
fn insert_ignores_caller_provided_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut note = Note::draft("opinionated", "");
    note.id = 999;
    let id = repo.insert(&note).unwrap();

    assert_eq!(id, 1);
    assert!(repo.get_by_id(999).unwrap().is_none());
}

#[test]
fn non_integer_timestamp_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (title, content, timestamp) VALUES (?1, ?2, ?3);",
        params!["bad row", "body", "not-a-time"],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.list().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn reserved_identity_zero_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (id, title, content, timestamp) VALUES (0, ?1, ?2, ?3);",
        params!["reserved", "body", 1_000],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.list().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
