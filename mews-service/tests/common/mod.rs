use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyMaterial;
use auth::PasswordHasher;
use auth::StaticCredential;
use chrono::Utc;
use mews_service::domain::article::errors::ArticleError;
use mews_service::domain::article::models::Article;
use mews_service::domain::article::models::ArticleFilter;
use mews_service::domain::article::models::ArticleId;
use mews_service::domain::article::models::NewArticle;
use mews_service::domain::article::ports::ArticleRepository;
use mews_service::domain::article::service::ArticleService;
use mews_service::domain::user::errors::UserError;
use mews_service::domain::user::models::EmailAddress;
use mews_service::domain::user::models::NewUser;
use mews_service::domain::user::models::PersonName;
use mews_service::domain::user::models::RegisterCommand;
use mews_service::domain::user::models::User;
use mews_service::domain::user::models::UserId;
use mews_service::domain::user::ports::UserRepository;
use mews_service::domain::user::ports::UserServicePort;
use mews_service::domain::user::service::UserService;
use mews_service::inbound::http::router::create_router;
use serde_json::json;

pub const APPLICATION: &str = "DEVORIA";
pub const BASIC_USERNAME: &str = "user";
pub const BASIC_PASSWORD: &str = "password";

const PRIVATE_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/testdata/rsa_private.pem"
));
const PUBLIC_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/testdata/rsa_public.pem"
));

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let keys = KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to load test keys");
        let jwt_handler = JwtHandler::new(keys, APPLICATION);

        let authenticator = Arc::new(
            Authenticator::new(
                jwt_handler.clone(),
                StaticCredential::new(BASIC_USERNAME, BASIC_PASSWORD),
            )
            .with_password_hasher(PasswordHasher::with_cost(4)),
        );

        let users = Arc::new(InMemoryUserRepository::default());
        let articles = Arc::new(InMemoryArticleRepository::default());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&authenticator),
        ));
        let article_service = Arc::new(ArticleService::new(articles, Arc::clone(&users)));

        let router = create_router(user_service.clone(), article_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler,
            user_service,
            users,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make POST request through the basic gate
    pub fn post_basic(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client
            .post(self.url(path))
            .basic_auth(BASIC_USERNAME, Some(BASIC_PASSWORD))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a contributor and return the issued access token
    pub async fn register(&self, email: &str, first_name: &str) -> String {
        let response = self
            .post_basic("/api/v1/user/register")
            .json(&json!({
                "email": email,
                "password": "fahmi",
                "firstName": first_name,
                "lastName": "Tester",
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["accessToken"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Seed the admin account and return a token for it
    pub async fn admin_token(&self) -> String {
        let admin = self
            .user_service
            .ensure_admin(RegisterCommand::new(
                EmailAddress::new("admin@example.com".to_string()).unwrap(),
                "admin".to_string(),
                PersonName::new("Admin".to_string()).unwrap(),
                PersonName::new("User".to_string()).unwrap(),
            ))
            .await
            .expect("Failed to seed admin")
            .expect("Users already exist");

        self.jwt_handler
            .sign(&admin.id.to_string(), admin.first_name.as_str())
            .expect("Failed to sign token")
    }

    /// Create an article and return its id
    pub async fn create_article(&self, token: &str, title: &str, slug: &str) -> i64 {
        let response = self
            .post_authenticated("/api/v1/articles", token)
            .json(&json!({
                "title": title,
                "content": format!("Content of {title}"),
                "slug": slug,
                "status": "DRAFT",
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing article id")
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn remove(&self, id: &UserId) {
        self.users.lock().unwrap().retain(|user| user.id != *id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let now = Utc::now();
        let next_id = users.iter().map(|existing| existing.id.0).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId(next_id),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|user| user.email == *email))
    }

    async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: Mutex<Vec<Article>>,
}

fn matches_keyword(article: &Article, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    [
        article.title.as_str(),
        article.slug.as_str(),
        article.content.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&keyword))
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let mut articles = self.articles.lock().unwrap();
        if articles.iter().any(|existing| existing.slug == article.slug) {
            return Err(ArticleError::SlugAlreadyExists(article.slug.to_string()));
        }

        let now = Utc::now();
        let next_id = articles.iter().map(|existing| existing.id.0).max().unwrap_or(0) + 1;
        let created = Article {
            id: ArticleId(next_id),
            title: article.title,
            content: article.content,
            slug: article.slug,
            status: article.status,
            author_id: article.author_id,
            created_at: now,
            updated_at: now,
        };
        articles.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|article| article.id == *id)
            .cloned())
    }

    async fn search(&self, filter: &ArticleFilter) -> Result<(Vec<Article>, i64), ArticleError> {
        let articles = self.articles.lock().unwrap();
        let mut matching: Vec<&Article> = articles
            .iter()
            .filter(|article| filter.author_id.map_or(true, |id| article.author_id == id))
            .filter(|article| {
                filter
                    .keyword
                    .as_deref()
                    .map_or(true, |keyword| matches_keyword(article, keyword))
            })
            .collect();
        matching.sort_by_key(|article| article.id.0);

        let total = matching.len() as i64;
        let rows = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect();

        Ok((rows, total))
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let mut articles = self.articles.lock().unwrap();
        if articles
            .iter()
            .any(|existing| existing.slug == article.slug && existing.id != article.id)
        {
            return Err(ArticleError::SlugAlreadyExists(article.slug.to_string()));
        }

        let stored = articles
            .iter_mut()
            .find(|existing| existing.id == article.id)
            .ok_or_else(|| ArticleError::NotFound(article.id.to_string()))?;
        *stored = Article {
            updated_at: Utc::now(),
            ..article
        };

        Ok(stored.clone())
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|article| article.id != *id);

        if articles.len() == before {
            return Err(ArticleError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
