//! Behaviour tests for user registration and updates.
//!
//! These scenarios check that email format and username uniqueness are
//! enforced, and that optimistic concurrency rejects a stale writer.
use std::sync::Mutex;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sitecraft::domain::{Error, User, UserCreate, UserUpdate};

mod support;

use support::{SiteWorld, assert_error, unquote};

#[derive(Debug, Default)]
struct AccountsWorld {
    site: SiteWorld,
    user: Option<User>,
    original_revision: Option<u32>,
    registration: Option<Result<User, Error>>,
    update: Option<Result<User, Error>>,
}

#[fixture]
fn world() -> Mutex<AccountsWorld> {
    Mutex::new(AccountsWorld::default())
}

fn rename(world: &AccountsWorld, full_name: &str, revision: Option<u32>) -> Result<User, Error> {
    let user = world.user.as_ref().expect("user registered");
    let update = UserUpdate {
        full_name: Some(full_name.to_owned()),
        ..UserUpdate::default()
    };
    world
        .site
        .block_on(world.site.users().update(user.id, &update, revision))
}

#[given("a registered user {username}")]
fn a_registered_user(world: &Mutex<AccountsWorld>, username: String) {
    let mut world = world.lock().expect("world lock");
    let user = world.site.register(unquote(&username));
    world.original_revision = Some(user.revision);
    world.user = Some(user);
}

#[given("the user's full name is changed to {full_name}")]
fn full_name_is_changed(world: &Mutex<AccountsWorld>, full_name: String) {
    let mut world = world.lock().expect("world lock");
    let user = rename(&world, unquote(&full_name), world.original_revision)
        .expect("first update succeeds");
    world.user = Some(user);
}

#[when("a user registers with email {email}")]
fn a_user_registers_with_email(world: &Mutex<AccountsWorld>, email: String) {
    let mut world = world.lock().expect("world lock");
    let draft = UserCreate {
        email: unquote(&email).to_owned(),
        username: "ada".to_owned(),
        full_name: "Ada Lovelace".to_owned(),
    };
    let outcome = world.site.block_on(world.site.users().register(draft));
    world.registration = Some(outcome);
}

#[when("another user registers as {username}")]
fn another_user_registers_as(world: &Mutex<AccountsWorld>, username: String) {
    let mut world = world.lock().expect("world lock");
    let draft = UserCreate {
        email: "someone.else@example.com".to_owned(),
        username: unquote(&username).to_owned(),
        full_name: "Someone Else".to_owned(),
    };
    let outcome = world.site.block_on(world.site.users().register(draft));
    world.registration = Some(outcome);
}

#[when("the full name is changed to {full_name} at the original revision")]
fn full_name_changed_at_original_revision(world: &Mutex<AccountsWorld>, full_name: String) {
    let mut world = world.lock().expect("world lock");
    let outcome = rename(&world, unquote(&full_name), world.original_revision);
    world.update = Some(outcome);
}

#[then("the registration fails with {code}")]
fn the_registration_fails_with(world: &Mutex<AccountsWorld>, code: String) {
    let world = world.lock().expect("world lock");
    assert_error(world.registration.as_ref(), &code);
}

#[then("the update fails with {code}")]
fn the_update_fails_with(world: &Mutex<AccountsWorld>, code: String) {
    let world = world.lock().expect("world lock");
    assert_error(world.update.as_ref(), &code);
}

#[then("the user's full name is {full_name}")]
fn the_users_full_name_is(world: &Mutex<AccountsWorld>, full_name: String) {
    let world = world.lock().expect("world lock");
    let id = world.user.as_ref().expect("user registered").id;
    let stored = world
        .site
        .block_on(world.site.users().get(id))
        .expect("user stored");
    assert_eq!(stored.full_name, unquote(&full_name));
}

#[scenario(
    path = "tests/features/user_accounts.feature",
    name = "A malformed email is rejected"
)]
fn a_malformed_email_is_rejected(world: Mutex<AccountsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_accounts.feature",
    name = "A taken username is rejected"
)]
fn a_taken_username_is_rejected(world: Mutex<AccountsWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_accounts.feature",
    name = "An update with a stale revision is rejected"
)]
fn an_update_with_a_stale_revision_is_rejected(world: Mutex<AccountsWorld>) {
    drop(world);
}
