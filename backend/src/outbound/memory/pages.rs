//! `PageRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{PageRepository, RepositoryError, constraints, references};
use crate::domain::{NewPage, Page, PageId, WebsiteId};

use super::{InMemorySiteStore, SiteState, check_revision, missing_reference, unique_violation};

fn slug_taken(
    state: &SiteState,
    website_id: WebsiteId,
    slug: &str,
    except: Option<PageId>,
) -> bool {
    state
        .pages
        .values()
        .any(|p| Some(p.id) != except && p.website_id == website_id && p.slug == slug)
}

/// Clear the homepage flag on every page of `website_id` except `keep`.
fn demote_homepages(
    state: &mut SiteState,
    website_id: WebsiteId,
    keep: Option<PageId>,
    now: DateTime<Utc>,
) {
    for page in state.pages.values_mut() {
        if page.website_id == website_id && page.is_homepage && Some(page.id) != keep {
            *page = page.with_homepage(false, now);
        }
    }
}

#[async_trait]
impl PageRepository for InMemorySiteStore {
    async fn create(&self, page: &NewPage) -> Result<Page, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.websites.contains_key(&page.website_id) {
            return Err(missing_reference(references::PAGE_WEBSITE));
        }
        if slug_taken(&state, page.website_id, &page.slug, None) {
            return Err(unique_violation(constraints::PAGES_WEBSITE_SLUG));
        }
        if page.is_homepage {
            demote_homepages(&mut state, page.website_id, None, page.created_at);
        }
        let id = PageId::new(state.page_ids.next());
        let stored = page.clone().into_page(id);
        state.pages.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, RepositoryError> {
        Ok(self.state.lock().await.pages.get(&id).cloned())
    }

    async fn find_by_slug(
        &self,
        website_id: WebsiteId,
        slug: &str,
    ) -> Result<Option<Page>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .pages
            .values()
            .find(|p| p.website_id == website_id && p.slug == slug)
            .cloned())
    }

    async fn list_by_website(&self, website_id: WebsiteId) -> Result<Vec<Page>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .pages
            .values()
            .filter(|p| p.website_id == website_id)
            .cloned()
            .collect())
    }

    async fn update(&self, page: &Page, expected_revision: u32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        if slug_taken(&state, page.website_id, &page.slug, Some(page.id)) {
            return Err(unique_violation(constraints::PAGES_WEBSITE_SLUG));
        }
        let stored = state
            .pages
            .get_mut(&page.id)
            .ok_or_else(|| RepositoryError::not_found("page"))?;
        check_revision(stored.revision, expected_revision)?;
        let is_homepage = stored.is_homepage;
        *stored = page.clone();
        stored.is_homepage = is_homepage;
        Ok(())
    }

    async fn set_homepage(&self, id: PageId, now: DateTime<Utc>) -> Result<Page, RepositoryError> {
        let mut state = self.state.lock().await;
        let website_id = state
            .pages
            .get(&id)
            .map(|page| page.website_id)
            .ok_or_else(|| RepositoryError::not_found("page"))?;
        demote_homepages(&mut state, website_id, Some(id), now);
        let page = state
            .pages
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("page"))?;
        if !page.is_homepage {
            *page = page.with_homepage(true, now);
        }
        Ok(page.clone())
    }

    async fn delete(&self, id: PageId) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.remove_page(id))
    }
}
