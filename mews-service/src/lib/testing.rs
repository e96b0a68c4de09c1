use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyMaterial;
use auth::PasswordHasher;
use auth::StaticCredential;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

const PRIVATE_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/testdata/rsa_private.pem"
));
const PUBLIC_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/testdata/rsa_public.pem"
));

pub fn authenticator() -> Arc<Authenticator> {
    let keys = KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to load test keys");

    Arc::new(
        Authenticator::new(
            JwtHandler::new(keys, "DEVORIA"),
            StaticCredential::new("user", "password"),
        )
        .with_password_hasher(PasswordHasher::with_cost(4)),
    )
}

pub fn user(id: i64, role: Role) -> User {
    let now = Utc::now();
    User {
        id: UserId(id),
        email: EmailAddress::new(format!("user{id}@example.com")).unwrap(),
        password_hash: "$2a$04$test_hash".to_string(),
        first_name: PersonName::new(format!("User{id}")).unwrap(),
        last_name: PersonName::new("Test".to_string()).unwrap(),
        role,
        created_at: now,
        updated_at: now,
    }
}
