//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod ai_session_repository;
mod content_block_repository;
mod content_generator;
mod feature_repository;
mod navigation_repository;
mod page_repository;
mod repository_error;
mod template_repository;
mod user_repository;
mod website_repository;

#[cfg(test)]
pub use ai_session_repository::MockAiSessionRepository;
pub use ai_session_repository::AiSessionRepository;
#[cfg(test)]
pub use content_block_repository::MockContentBlockRepository;
pub use content_block_repository::ContentBlockRepository;
#[cfg(test)]
pub use content_generator::MockContentGenerator;
pub use content_generator::{
    ContentGenerator, ContentGeneratorError, FixtureContentGenerator, GenerationRequest,
};
#[cfg(test)]
pub use feature_repository::MockFeatureRepository;
pub use feature_repository::FeatureRepository;
#[cfg(test)]
pub use navigation_repository::MockNavigationRepository;
pub use navigation_repository::{NavigationRepository, check_reparent};
#[cfg(test)]
pub use page_repository::MockPageRepository;
pub use page_repository::PageRepository;
pub use repository_error::{RepositoryError, constraints, references};
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::TemplateRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use website_repository::MockWebsiteRepository;
pub use website_repository::WebsiteRepository;
