pub mod article;
pub mod user;

pub use article::PostgresArticleRepository;
pub use user::PostgresUserRepository;
