use notepress_core::db::open_db_in_memory;
use notepress_core::routes::{note_delete_path, note_detail_path, note_edit_path};
use notepress_core::{
    slugify, CoreConfig, Identity, Note, NoteDraft, NoteRepository, NoteService, RepoError,
    ServiceError, SlugError, SqliteNoteRepository, SqliteUserRepository, User, UserRepository,
};
use rusqlite::Connection;

const NOTE_TITLE: &str = "Заголовок заметки";
const NOTE_TEXT: &str = "Текст заметки";

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn register(conn: &Connection, username: &str) -> Identity {
    let user = User::new(username);
    SqliteUserRepository::try_new(conn)
        .unwrap()
        .create_user(&user)
        .unwrap();
    Identity::from(user)
}

fn service(conn: &Connection) -> NoteService<SqliteNoteRepository<'_>> {
    NoteService::new(
        SqliteNoteRepository::try_new(conn).unwrap(),
        &CoreConfig::default(),
    )
}

fn note_count(conn: &Connection) -> u64 {
    SqliteNoteRepository::try_new(conn)
        .unwrap()
        .count_notes()
        .unwrap()
}

fn seed_note(conn: &Connection, author: &Identity, slug: &str) -> Note {
    service(conn)
        .create_note(
            author,
            NoteDraft::new("Заголовок готовой заметки.", "Текст готовой заметки.", slug),
        )
        .unwrap()
}

#[test]
fn authorized_user_can_add_note_with_derived_slug() {
    let conn = setup();
    let author = register(&conn, "Автор");

    let created = service(&conn)
        .create_note(&author, NoteDraft::new(NOTE_TITLE, NOTE_TEXT, ""))
        .unwrap();

    assert_eq!(note_count(&conn), 1);
    assert_eq!(created.title, NOTE_TITLE);
    assert_eq!(created.text, NOTE_TEXT);
    assert_eq!(created.slug, "zagolovok-zametki");
    assert_eq!(created.slug, slugify(NOTE_TITLE));
    assert_eq!(Some(created.author), author.user_id());

    let stored = SqliteNoteRepository::try_new(&conn)
        .unwrap()
        .find_note_by_slug("zagolovok-zametki")
        .unwrap()
        .unwrap();
    assert_eq!(stored, created);
}

#[test]
fn derived_slug_for_long_non_latin_title_is_capped_and_ascii() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let title = "Очень длинный заголовок заметки про ёжиков и щук. ".repeat(5);

    let created = service(&conn)
        .create_note(&author, NoteDraft::new(title, NOTE_TEXT, ""))
        .unwrap();

    assert!(created.slug.chars().count() <= 100);
    assert!(created
        .slug
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-'));
}

#[test]
fn duplicate_explicit_slug_is_rejected_and_count_unchanged() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "test-note-1");

    let err = service(&conn)
        .create_note(&author, NoteDraft::new(NOTE_TITLE, NOTE_TEXT, "test-note-1"))
        .unwrap_err();

    match &err {
        ServiceError::DuplicateSlug(slug) => assert_eq!(slug, "test-note-1"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("test-note-1"));
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn colliding_derived_slug_is_rejected_by_the_store() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "zagolovok-zametki");

    let err = service(&conn)
        .create_note(&author, NoteDraft::new(NOTE_TITLE, NOTE_TEXT, ""))
        .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateSlug(ref slug) if slug == "zagolovok-zametki"));
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn anonymous_user_cant_add_note() {
    let conn = setup();

    let err = service(&conn)
        .create_note(&Identity::Anonymous, NoteDraft::new(NOTE_TITLE, NOTE_TEXT, ""))
        .unwrap_err();

    match err {
        ServiceError::AuthenticationRequired(redirect) => {
            assert_eq!(redirect.location(), "/auth/login/?next=/add/");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(note_count(&conn), 0);
}

#[test]
fn blank_title_is_invalid_input() {
    let conn = setup();
    let author = register(&conn, "Автор");

    let err = service(&conn)
        .create_note(&author, NoteDraft::new("   ", NOTE_TEXT, "slug"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput { field: "title" }));
}

#[test]
fn title_without_slug_characters_needs_explicit_slug() {
    let conn = setup();
    let author = register(&conn, "Автор");

    let err = service(&conn)
        .create_note(&author, NoteDraft::new("!!!", NOTE_TEXT, ""))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Slug(SlugError::Empty)));
    assert_eq!(note_count(&conn), 0);
}

#[test]
fn author_can_edit_note() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let note = seed_note(&conn, &author, "test-note-1");

    let updated = service(&conn)
        .update_note(
            &author,
            "test-note-1",
            NoteDraft::new(
                "Новый текст заметки",
                "Новый текст заметки",
                "new-slug-for-second-note",
            ),
        )
        .unwrap();

    assert_eq!(updated.id, note.id);
    assert_eq!(updated.author, note.author);
    assert_eq!(updated.slug, "new-slug-for-second-note");
    let reloaded = service(&conn)
        .get_note(&author, "new-slug-for-second-note")
        .unwrap();
    assert_eq!(reloaded.title, "Новый текст заметки");
    assert_eq!(reloaded.text, "Новый текст заметки");
}

#[test]
fn author_can_keep_current_slug_on_edit() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "test-note-1");

    let updated = service(&conn)
        .update_note(
            &author,
            "test-note-1",
            NoteDraft::new("Другой заголовок", "Другой текст", "test-note-1"),
        )
        .unwrap();

    assert_eq!(updated.slug, "test-note-1");
}

#[test]
fn edit_to_another_notes_slug_is_rejected() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "first");
    seed_note(&conn, &author, "second");

    let err = service(&conn)
        .update_note(&author, "second", NoteDraft::new("T", "X", "first"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateSlug(ref slug) if slug == "first"));
    assert!(service(&conn).get_note(&author, "second").is_ok());
}

#[test]
fn user_cant_edit_note_of_another_user() {
    let conn = setup();
    let author = register(&conn, "Автор заметки");
    let other = register(&conn, "Тестовый пользователь");
    let note = seed_note(&conn, &author, "test-note-1");

    let err = service(&conn)
        .update_note(
            &other,
            "test-note-1",
            NoteDraft::new("Новый", "Новый", "new-slug-for-second-note"),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound));
    let unchanged = service(&conn).get_note(&author, "test-note-1").unwrap();
    assert_eq!(unchanged, note);
}

#[test]
fn author_can_delete_note() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "test-note-1");

    service(&conn).delete_note(&author, "test-note-1").unwrap();

    assert_eq!(note_count(&conn), 0);
}

#[test]
fn user_cant_delete_note_of_another_user() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let other = register(&conn, "Читатель");
    seed_note(&conn, &author, "test-note-1");

    let err = service(&conn).delete_note(&other, "test-note-1").unwrap_err();

    assert!(matches!(err, ServiceError::NotFound));
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn foreign_and_missing_notes_are_indistinguishable() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let reader = register(&conn, "Читатель");
    seed_note(&conn, &author, "new-note");

    let foreign = service(&conn).get_note(&reader, "new-note").unwrap_err();
    let missing = service(&conn).get_note(&reader, "no-such-note").unwrap_err();

    assert_eq!(foreign.to_string(), missing.to_string());
    assert!(matches!(foreign, ServiceError::NotFound));
    assert!(matches!(missing, ServiceError::NotFound));
}

#[test]
fn note_list_contains_only_own_notes() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let not_author = register(&conn, "Не автор");
    let note = seed_note(&conn, &author, "new-note");

    let own = service(&conn).list_notes(&author).unwrap();
    assert_eq!(own, vec![note]);

    let foreign = service(&conn).list_notes(&not_author).unwrap();
    assert!(foreign.is_empty());
}

#[test]
fn author_only_pages_availability() {
    let conn = setup();
    let author = register(&conn, "Автор заметки");
    let reader = register(&conn, "Читатель простой");
    seed_note(&conn, &author, "new-note");
    let notes = service(&conn);

    assert!(notes.get_note(&author, "new-note").is_ok());
    assert!(matches!(
        notes.get_note(&reader, "new-note"),
        Err(ServiceError::NotFound)
    ));
    assert!(notes.open_add_form(&reader).is_ok());
    assert!(notes.open_success_page(&reader).is_ok());
    assert!(notes.list_notes(&reader).is_ok());
}

#[test]
fn anonymous_client_is_redirected_with_next_path() {
    let conn = setup();
    let author = register(&conn, "Автор");
    seed_note(&conn, &author, "new-note");
    let notes = service(&conn);
    let anonymous = Identity::Anonymous;

    let cases: Vec<(Result<(), ServiceError>, String)> = vec![
        (notes.open_add_form(&anonymous), "/add/".to_string()),
        (notes.list_notes(&anonymous).map(|_| ()), "/notes/".to_string()),
        (notes.open_success_page(&anonymous), "/done/".to_string()),
        (
            notes.get_note(&anonymous, "new-note").map(|_| ()),
            note_detail_path("new-note"),
        ),
        (
            notes
                .update_note(&anonymous, "new-note", NoteDraft::new("a", "b", ""))
                .map(|_| ()),
            note_edit_path("new-note"),
        ),
        (
            notes.delete_note(&anonymous, "new-note"),
            note_delete_path("new-note"),
        ),
    ];

    for (result, next) in cases {
        match result {
            Err(ServiceError::AuthenticationRequired(redirect)) => {
                assert_eq!(redirect.location(), format!("/auth/login/?next={next}"));
            }
            other => panic!("expected login redirect for {next}, got {other:?}"),
        }
    }
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn anonymous_probe_of_unknown_slug_still_redirects() {
    let conn = setup();

    let err = service(&conn)
        .get_note(&Identity::Anonymous, "no-such-note")
        .unwrap_err();

    assert!(matches!(err, ServiceError::AuthenticationRequired(_)));
}

#[test]
fn store_failure_during_slug_check_is_reported() {
    let conn = setup();
    let author = register(&conn, "Автор");
    let notes = service(&conn);
    conn.execute_batch("DROP TABLE notes;").unwrap();

    let err = notes
        .create_note(&author, NoteDraft::new(NOTE_TITLE, NOTE_TEXT, "test-note-1"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Repo(RepoError::Db(_))));
}
