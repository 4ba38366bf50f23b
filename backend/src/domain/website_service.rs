//! Website lifecycle service.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{UserRepository, WebsiteRepository};
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{Error, NewWebsite, UserId, Website, WebsiteCreate, WebsiteId, WebsiteUpdate};

const ENTITY: &str = "website";

/// Creates, updates and removes websites on behalf of their owners.
#[derive(Clone)]
pub struct WebsiteService<W, U> {
    websites: Arc<W>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<W, U> WebsiteService<W, U> {
    /// Create a new service with the given repositories.
    pub fn new(websites: Arc<W>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            websites,
            users,
            clock,
        }
    }
}

impl<W, U> WebsiteService<W, U>
where
    W: WebsiteRepository,
    U: UserRepository,
{
    /// Create a website owned by `owner_id`.
    ///
    /// The owner must exist; a taken domain fails with
    /// [`ErrorCode::UniqueConstraint`](super::ErrorCode::UniqueConstraint).
    pub async fn create(&self, owner_id: UserId, draft: WebsiteCreate) -> Result<Website, Error> {
        let new_website = NewWebsite::try_new(owner_id, draft, self.clock.utc())?;
        let owner = self
            .users
            .find_by_id(owner_id)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        if owner.is_none() {
            return Err(Error::referential_integrity("website owner does not exist")
                .with_details(json!({ "ownerId": owner_id })));
        }
        let website = self
            .websites
            .create(&new_website)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(website_id = %website.id, owner_id = %owner_id, "website created");
        Ok(website)
    }

    /// Fetch a website.
    pub async fn get(&self, id: WebsiteId) -> Result<Website, Error> {
        self.websites
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// List an owner's websites.
    pub async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<Website>, Error> {
        self.websites
            .list_by_owner(owner_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))
    }

    /// Apply a partial update.
    ///
    /// Activating a website for the first time stamps `published_at`.
    pub async fn update(
        &self,
        id: WebsiteId,
        update: &WebsiteUpdate,
        expected_revision: Option<u32>,
    ) -> Result<Website, Error> {
        let current = self.get(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.websites
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Delete a website with its pages, blocks and navigation.
    pub async fn delete(&self, id: WebsiteId) -> Result<(), Error> {
        let deleted = self
            .websites
            .delete(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        if !deleted {
            return Err(not_found(ENTITY, id));
        }
        info!(website_id = %id, "website deleted with pages and navigation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Website service coverage.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::WebsiteStatus;
    use crate::domain::ports::{MockUserRepository, MockWebsiteRepository, RepositoryError};
    use crate::domain::service_test_support::{
        clock_start, fixture_clock, sample_user, sample_website,
    };
    use rstest::rstest;

    fn make_service(
        websites: MockWebsiteRepository,
        users: MockUserRepository,
    ) -> WebsiteService<MockWebsiteRepository, MockUserRepository> {
        WebsiteService::new(Arc::new(websites), Arc::new(users), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn create_requires_existing_owner() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let mut websites = MockWebsiteRepository::new();
        websites.expect_create().never();

        let error = make_service(websites, users)
            .create(UserId::new(4), WebsiteCreate::named("Bakery"))
            .await
            .expect_err("owner missing");

        assert_eq!(error.code(), ErrorCode::ReferentialIntegrity);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_domain_is_a_unique_violation() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(sample_user(4))));
        let mut websites = MockWebsiteRepository::new();
        websites
            .expect_create()
            .return_once(|_| Err(RepositoryError::unique_violation("websites_domain_key")));
        let mut draft = WebsiteCreate::named("Copycat");
        draft.domain = Some("example.com".to_owned());

        let error = make_service(websites, users)
            .create(UserId::new(4), draft)
            .await
            .expect_err("duplicate domain");

        assert_eq!(error.code(), ErrorCode::UniqueConstraint);
    }

    #[rstest]
    #[tokio::test]
    async fn activating_stamps_published_at() {
        let stored = sample_website(2, 4);
        let mut websites = MockWebsiteRepository::new();
        websites
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        websites
            .expect_update()
            .withf(|website, expected| website.published_at.is_some() && *expected == 1)
            .return_once(|_, _| Ok(()));
        let update = WebsiteUpdate {
            status: Some(WebsiteStatus::Active),
            ..WebsiteUpdate::default()
        };

        let website = make_service(websites, MockUserRepository::new())
            .update(WebsiteId::new(2), &update, None)
            .await
            .expect("updated");

        assert_eq!(website.published_at, Some(clock_start()));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_write_surfaces_revision_mismatch() {
        let stored = sample_website(2, 4);
        let mut websites = MockWebsiteRepository::new();
        websites
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        websites
            .expect_update()
            .return_once(|_, _| Err(RepositoryError::revision_mismatch(1_u32, 2_u32)));

        let error = make_service(websites, MockUserRepository::new())
            .update(WebsiteId::new(2), &WebsiteUpdate::default(), Some(1))
            .await
            .expect_err("lost race");

        assert_eq!(error.code(), ErrorCode::RevisionMismatch);
    }
}
