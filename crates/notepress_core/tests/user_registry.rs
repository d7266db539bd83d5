use notepress_core::db::open_db_in_memory;
use notepress_core::{RepoError, SqliteUserRepository, User, UserRepository};

#[test]
fn created_user_is_found_by_id_and_username() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let user = User::new("Автор");

    repo.create_user(&user).unwrap();

    assert_eq!(repo.get_user(user.id).unwrap(), Some(user.clone()));
    assert_eq!(repo.find_by_username("Автор").unwrap(), Some(user));
    assert_eq!(repo.find_by_username("Читатель").unwrap(), None);
}

#[test]
fn duplicate_username_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    repo.create_user(&User::new("Автор")).unwrap();

    let err = repo.create_user(&User::new("Автор")).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateUsername(ref name) if name == "Автор"));
}
