//! In-process storage adapter implementing every site repository port.
//!
//! All tables live behind one `tokio::sync::Mutex`, so a foreign key check,
//! a uniqueness check and the write that depends on them happen under the
//! same lock. Cascades follow the relational layout: deleting a user drops
//! its websites and AI sessions, deleting a website drops its pages, blocks
//! and navigation and detaches its AI sessions, deleting a page drops its
//! blocks.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sitecraft::outbound::memory::InMemorySiteStore;
//!
//! let store = Arc::new(InMemorySiteStore::new());
//! assert_eq!(Arc::strong_count(&store), 1);
//! ```

mod ai_sessions;
mod catalogue;
mod content_blocks;
mod navigation;
mod pages;
mod users;
mod websites;

use std::collections::BTreeMap;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    AiBuilderSession, AiSessionId, ContentBlock, ContentBlockId, Feature, FeatureId, NavigationItem,
    NavigationItemId, Page, PageId, Template, TemplateId, User, UserId, Website, WebsiteId,
};

/// Monotonic identifier source for one table.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct SiteState {
    users: BTreeMap<UserId, User>,
    websites: BTreeMap<WebsiteId, Website>,
    pages: BTreeMap<PageId, Page>,
    blocks: BTreeMap<ContentBlockId, ContentBlock>,
    navigation: BTreeMap<NavigationItemId, NavigationItem>,
    sessions: BTreeMap<AiSessionId, AiBuilderSession>,
    templates: BTreeMap<TemplateId, Template>,
    features: BTreeMap<FeatureId, Feature>,
    user_ids: Sequence,
    website_ids: Sequence,
    page_ids: Sequence,
    block_ids: Sequence,
    navigation_ids: Sequence,
    session_ids: Sequence,
    template_ids: Sequence,
    feature_ids: Sequence,
}

impl SiteState {
    fn remove_page(&mut self, id: PageId) -> bool {
        if self.pages.remove(&id).is_none() {
            return false;
        }
        self.blocks.retain(|_, block| block.page_id != id);
        true
    }

    fn remove_website(&mut self, id: WebsiteId) -> bool {
        if self.websites.remove(&id).is_none() {
            return false;
        }
        let pages: Vec<PageId> = self
            .pages
            .values()
            .filter(|page| page.website_id == id)
            .map(|page| page.id)
            .collect();
        for page in pages {
            self.remove_page(page);
        }
        self.navigation.retain(|_, item| item.website_id != id);
        for session in self.sessions.values_mut() {
            if session.website_id == Some(id) {
                session.website_id = None;
            }
        }
        true
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        let websites: Vec<WebsiteId> = self
            .websites
            .values()
            .filter(|website| website.owner_id == id)
            .map(|website| website.id)
            .collect();
        for website in websites {
            self.remove_website(website);
        }
        self.sessions.retain(|_, session| session.user_id != id);
        true
    }
}

/// Storage adapter that keeps every aggregate in memory.
///
/// Share one instance between services with `Arc` so they see the same
/// tables.
#[derive(Debug, Default)]
pub struct InMemorySiteStore {
    state: Mutex<SiteState>,
}

impl InMemorySiteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fail unless the stored revision still equals the one the caller read.
fn check_revision(stored: u32, expected: u32) -> Result<(), RepositoryError> {
    if stored == expected {
        Ok(())
    } else {
        debug!(expected, stored, "stale write rejected");
        Err(RepositoryError::revision_mismatch(expected, stored))
    }
}

fn unique_violation(constraint: &str) -> RepositoryError {
    RepositoryError::unique_violation(constraint)
}

fn missing_reference(reference: &str) -> RepositoryError {
    RepositoryError::missing_reference(reference)
}

#[cfg(test)]
mod tests;
