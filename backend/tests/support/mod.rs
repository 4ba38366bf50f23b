//! Shared world for the behaviour suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls this module in with `mod support;` and drives the domain
//! services over one shared in-memory store.

use std::future::Future;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use sitecraft::domain::{
    CatalogueService, ContentBlockService, Error, ErrorCode, NavigationService, PageService, User,
    UserCreate, UserService, Website, WebsiteCreate, WebsiteService,
};
use sitecraft::outbound::memory::InMemorySiteStore;
use tokio::runtime::Runtime;

/// Runtime plus the store every service in a scenario shares.
pub struct SiteWorld {
    runtime: Runtime,
    store: Arc<InMemorySiteStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SiteWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteWorld")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Default for SiteWorld {
    fn default() -> Self {
        Self {
            runtime: Runtime::new().expect("create runtime"),
            store: Arc::new(InMemorySiteStore::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

impl SiteWorld {
    /// Drive a service future to completion.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn users(&self) -> UserService<InMemorySiteStore> {
        UserService::new(self.store.clone(), self.clock.clone())
    }

    pub fn websites(&self) -> WebsiteService<InMemorySiteStore, InMemorySiteStore> {
        WebsiteService::new(self.store.clone(), self.store.clone(), self.clock.clone())
    }

    pub fn pages(&self) -> PageService<InMemorySiteStore> {
        PageService::new(self.store.clone(), self.clock.clone())
    }

    pub fn blocks(&self) -> ContentBlockService<InMemorySiteStore> {
        ContentBlockService::new(self.store.clone(), self.clock.clone())
    }

    pub fn navigation(&self) -> NavigationService<InMemorySiteStore> {
        NavigationService::new(self.store.clone(), self.clock.clone())
    }

    pub fn catalogue(&self) -> CatalogueService<InMemorySiteStore, InMemorySiteStore> {
        CatalogueService::new(self.store.clone(), self.store.clone(), self.clock.clone())
    }

    /// Register a user whose email derives from the username.
    pub fn register(&self, username: &str) -> User {
        let draft = UserCreate {
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            full_name: format!("{username} Example"),
        };
        self.block_on(self.users().register(draft))
            .expect("register user")
    }

    /// Create a website for a fresh owner.
    pub fn website(&self, owner: &str, domain: Option<&str>) -> Website {
        let owner = self.register(owner);
        let mut draft = WebsiteCreate::named(format!("{} site", owner.username));
        draft.domain = domain.map(str::to_owned);
        self.block_on(self.websites().create(owner.id, draft))
            .expect("create website")
    }
}

/// Strip the quotes Gherkin placeholders capture.
pub fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

/// Parse a comma-separated list of integers such as `3, 1, 2`.
pub fn parse_list(value: &str) -> Vec<i32> {
    unquote(value)
        .split(',')
        .map(|item| item.trim().parse().expect("integer list"))
        .collect()
}

/// Map the wire name used in feature files to an error code.
pub fn error_code(name: &str) -> ErrorCode {
    match unquote(name) {
        "validation" => ErrorCode::Validation,
        "unique_constraint" => ErrorCode::UniqueConstraint,
        "referential_integrity" => ErrorCode::ReferentialIntegrity,
        "consistency" => ErrorCode::Consistency,
        "revision_mismatch" => ErrorCode::RevisionMismatch,
        "not_found" => ErrorCode::NotFound,
        other => panic!("unknown error code: {other}"),
    }
}

/// Assert that an outcome failed with the named code.
pub fn assert_error<T: std::fmt::Debug>(outcome: Option<&Result<T, Error>>, expected: &str) {
    let outcome = outcome.expect("an operation should have run");
    let error = outcome.as_ref().expect_err("operation should fail");
    assert_eq!(error.code(), error_code(expected), "{error:?}");
}
