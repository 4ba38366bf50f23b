//! `WebsiteRepository` over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{RepositoryError, WebsiteRepository, constraints, references};
use crate::domain::{NewWebsite, UserId, Website, WebsiteId};

use super::{InMemorySiteStore, SiteState, check_revision, missing_reference, unique_violation};

fn domain_taken(state: &SiteState, domain: Option<&str>, except: Option<WebsiteId>) -> bool {
    domain.is_some_and(|domain| {
        state
            .websites
            .values()
            .any(|w| Some(w.id) != except && w.domain.as_deref() == Some(domain))
    })
}

#[async_trait]
impl WebsiteRepository for InMemorySiteStore {
    async fn create(&self, website: &NewWebsite) -> Result<Website, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&website.owner_id) {
            return Err(missing_reference(references::WEBSITE_OWNER));
        }
        if domain_taken(&state, website.domain.as_deref(), None) {
            return Err(unique_violation(constraints::WEBSITES_DOMAIN));
        }
        let id = WebsiteId::new(state.website_ids.next());
        let stored = website.clone().into_website(id);
        state.websites.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: WebsiteId) -> Result<Option<Website>, RepositoryError> {
        Ok(self.state.lock().await.websites.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Website>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .websites
            .values()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        website: &Website,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        if domain_taken(&state, website.domain.as_deref(), Some(website.id)) {
            return Err(unique_violation(constraints::WEBSITES_DOMAIN));
        }
        let stored = state
            .websites
            .get_mut(&website.id)
            .ok_or_else(|| RepositoryError::not_found("website"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = website.clone();
        Ok(())
    }

    async fn delete(&self, id: WebsiteId) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.remove_website(id))
    }
}
