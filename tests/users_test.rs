mod common;

use stockbook_core::users::{NewUser, UserError, UserService, UserUpdate};

#[test]
fn register_then_authenticate() {
    let db = common::setup();
    let users = UserService::new(db.pool.clone());

    let created = users
        .register(NewUser {
            name: "Ada".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "s3cret".to_string(),
        })
        .unwrap();

    // stored lowercased, hash never leaves the service
    assert_eq!(created.email, "ada@example.com");

    let authed = users.authenticate("ADA@example.COM", "s3cret").unwrap();
    assert_eq!(authed.id, created.id);
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let db = common::setup();
    let users = UserService::new(db.pool.clone());

    users
        .register(NewUser {
            name: "First".to_string(),
            email: "Seller@Example.com".to_string(),
            password: "pw-one".to_string(),
        })
        .unwrap();

    let second = users.register(NewUser {
        name: "Second".to_string(),
        email: "seller@example.com".to_string(),
        password: "pw-two".to_string(),
    });

    assert!(matches!(second, Err(UserError::DuplicateEmail)));
}

#[test]
fn wrong_password_and_unknown_email_look_the_same() {
    let db = common::setup();
    let users = UserService::new(db.pool.clone());
    common::register_user(&db.pool, "ada@example.com");

    let wrong_pw = users.authenticate("ada@example.com", "nope");
    let unknown = users.authenticate("ghost@example.com", "password123");

    assert!(matches!(wrong_pw, Err(UserError::InvalidCredentials)));
    assert!(matches!(unknown, Err(UserError::InvalidCredentials)));
}

#[test]
fn change_password_requires_the_old_one() {
    let db = common::setup();
    let users = UserService::new(db.pool.clone());
    let user_id = common::register_user(&db.pool, "ada@example.com");

    let denied = users.change_password(user_id, "wrong-old", "new-pw");
    assert!(matches!(denied, Err(UserError::InvalidCredentials)));

    users
        .change_password(user_id, "password123", "new-pw")
        .unwrap();
    users.authenticate("ada@example.com", "new-pw").unwrap();
    assert!(users.authenticate("ada@example.com", "password123").is_err());
}

#[test]
fn update_profile_rejects_an_empty_changeset() {
    let db = common::setup();
    let users = UserService::new(db.pool.clone());
    let user_id = common::register_user(&db.pool, "ada@example.com");

    let result = users.update_profile(user_id, UserUpdate::default());
    assert!(matches!(result, Err(UserError::InvalidData(_))));

    let updated = users
        .update_profile(
            user_id,
            UserUpdate {
                name: Some("Ada Lovelace".to_string()),
                email: None,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "ada@example.com");
}
