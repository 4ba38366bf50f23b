//! Page service: slugs, publication and the website homepage.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::PageRepository;
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{Error, NewPage, Page, PageCreate, PageId, PageUpdate, WebsiteId};

const ENTITY: &str = "page";

/// Manages the pages of a website.
#[derive(Clone)]
pub struct PageService<P> {
    pages: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> PageService<P> {
    /// Create a new service over the given repository.
    pub fn new(pages: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { pages, clock }
    }
}

impl<P> PageService<P>
where
    P: PageRepository,
{
    /// Add a page to a website.
    ///
    /// A new homepage demotes the previous one.
    pub async fn create(&self, website_id: WebsiteId, draft: PageCreate) -> Result<Page, Error> {
        let new_page = NewPage::try_new(website_id, draft, self.clock.utc())?;
        let page = self
            .pages
            .create(&new_page)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(page_id = %page.id, website_id = %website_id, slug = %page.slug, "page created");
        Ok(page)
    }

    /// Fetch a page.
    pub async fn get(&self, id: PageId) -> Result<Page, Error> {
        self.pages
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Fetch a page by slug within a website.
    pub async fn get_by_slug(&self, website_id: WebsiteId, slug: &str) -> Result<Page, Error> {
        self.pages
            .find_by_slug(website_id, slug)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, slug))
    }

    /// List a website's pages ordered by identifier.
    pub async fn list_for_website(&self, website_id: WebsiteId) -> Result<Vec<Page>, Error> {
        self.pages
            .list_by_website(website_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))
    }

    /// Apply a partial update.
    ///
    /// Publishing for the first time stamps `published_at`.
    pub async fn update(
        &self,
        id: PageId,
        update: &PageUpdate,
        expected_revision: Option<u32>,
    ) -> Result<Page, Error> {
        let current = self.get(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.pages
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Make `id` the only homepage of its website.
    pub async fn set_homepage(&self, id: PageId) -> Result<Page, Error> {
        let page = self
            .pages
            .set_homepage(id, self.clock.utc())
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(page_id = %id, website_id = %page.website_id, "homepage changed");
        Ok(page)
    }

    /// Delete a page and its content blocks.
    pub async fn delete(&self, id: PageId) -> Result<(), Error> {
        let deleted = self
            .pages
            .delete(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Page service coverage.
    use super::*;
    use crate::domain::ports::{MockPageRepository, RepositoryError};
    use crate::domain::service_test_support::{fixture_clock, sample_page};
    use crate::domain::{ErrorCode, JsonObject, PageStatus};
    use rstest::rstest;
    use serde_json::json;

    fn make_service(repo: MockPageRepository) -> PageService<MockPageRepository> {
        PageService::new(Arc::new(repo), fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn title_update_keeps_slug_content_and_status() {
        let mut stored = sample_page(3, 1, "home");
        stored.content = JsonObject::try_from(json!({"hero": "Hi"})).expect("object");
        let original = stored.clone();
        let mut repo = MockPageRepository::new();
        repo.expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));
        repo.expect_update().return_once(|_, _| Ok(()));
        let update = PageUpdate {
            title: Some("New".to_owned()),
            ..PageUpdate::default()
        };

        let page = make_service(repo)
            .update(PageId::new(3), &update, Some(1))
            .await
            .expect("updated");

        assert_eq!(page.title, "New");
        assert_eq!(page.slug, original.slug);
        assert_eq!(page.content, original.content);
        assert_eq!(page.status, PageStatus::Draft);
        assert!(page.updated_at > original.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_website_is_referential() {
        let mut repo = MockPageRepository::new();
        repo.expect_create()
            .return_once(|_| Err(RepositoryError::missing_reference("pages_website_id_fkey")));

        let error = make_service(repo)
            .create(WebsiteId::new(9), PageCreate::new("Home", "home"))
            .await
            .expect_err("no website");

        assert_eq!(error.code(), ErrorCode::ReferentialIntegrity);
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_slug_never_reaches_storage() {
        let mut repo = MockPageRepository::new();
        repo.expect_create().never();

        let error = make_service(repo)
            .create(WebsiteId::new(1), PageCreate::new("Home", "Home Page"))
            .await
            .expect_err("bad slug");

        assert_eq!(error.code(), ErrorCode::Validation);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let mut repo = MockPageRepository::new();
        repo.expect_find_by_slug().return_once(|_, _| Ok(None));

        let error = make_service(repo)
            .get_by_slug(WebsiteId::new(1), "missing")
            .await
            .expect_err("absent");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
