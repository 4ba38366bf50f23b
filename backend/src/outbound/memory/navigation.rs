//! `NavigationRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{NavigationRepository, RepositoryError, check_reparent, references};
use crate::domain::{NavigationItem, NavigationItemId, NewNavigationItem, WebsiteId};

use super::{InMemorySiteStore, SiteState, check_revision, missing_reference};

fn check_parent(
    state: &SiteState,
    website_id: WebsiteId,
    parent_id: Option<NavigationItemId>,
) -> Result<(), RepositoryError> {
    match parent_id {
        Some(parent) => {
            let same_site = state
                .navigation
                .get(&parent)
                .is_some_and(|item| item.website_id == website_id);
            if same_site {
                Ok(())
            } else {
                Err(missing_reference(references::NAVIGATION_PARENT))
            }
        }
        None => Ok(()),
    }
}

#[async_trait]
impl NavigationRepository for InMemorySiteStore {
    async fn create(&self, item: &NewNavigationItem) -> Result<NavigationItem, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.websites.contains_key(&item.website_id) {
            return Err(missing_reference(references::NAVIGATION_WEBSITE));
        }
        check_parent(&state, item.website_id, item.parent_id)?;
        let id = NavigationItemId::new(state.navigation_ids.next());
        let stored = item.clone().into_item(id);
        state.navigation.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: NavigationItemId,
    ) -> Result<Option<NavigationItem>, RepositoryError> {
        Ok(self.state.lock().await.navigation.get(&id).cloned())
    }

    async fn list_by_website(
        &self,
        website_id: WebsiteId,
    ) -> Result<Vec<NavigationItem>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .navigation
            .values()
            .filter(|item| item.website_id == website_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        item: &NavigationItem,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .navigation
            .get(&item.id)
            .ok_or_else(|| RepositoryError::not_found("navigation item"))?;
        check_revision(stored.revision, expected_revision)?;
        if stored.parent_id != item.parent_id {
            let siblings: Vec<NavigationItem> = state
                .navigation
                .values()
                .filter(|other| other.website_id == item.website_id)
                .cloned()
                .collect();
            check_reparent(&siblings, item.id, item.parent_id)?;
        }
        let Some(stored) = state.navigation.get_mut(&item.id) else {
            return Err(RepositoryError::not_found("navigation item"));
        };
        *stored = item.clone();
        Ok(())
    }

    async fn delete(
        &self,
        id: NavigationItemId,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().await;
        let Some(removed) = state.navigation.remove(&id) else {
            return Ok(false);
        };
        for child in state.navigation.values_mut() {
            if child.parent_id == Some(id) {
                child.parent_id = removed.parent_id;
                child.updated_at = now;
                child.revision = child.revision.saturating_add(1);
            }
        }
        Ok(true)
    }
}
