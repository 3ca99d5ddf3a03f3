//! Unit tests for Auth crate

#[cfg(test)]
mod service_tests {
    use std::sync::Arc;

    use kernel::id::UserId;
    use kernel::pagination::PageRequest;
    use platform::token::TokenService;

    use crate::application::{
        AuthConfig, CreateUserInput, LoginInput, LoginUseCase, UpdateUserInput, UserService,
    };
    use crate::error::AuthError;
    use crate::infra::memory::MemoryUserRepository;

    fn service(repo: &MemoryUserRepository) -> UserService<MemoryUserRepository> {
        UserService::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()))
    }

    fn login_use_case(
        repo: &MemoryUserRepository,
        tokens: &Arc<TokenService>,
    ) -> LoginUseCase<MemoryUserRepository> {
        LoginUseCase::new(
            Arc::new(repo.clone()),
            tokens.clone(),
            Arc::new(AuthConfig::default()),
        )
    }

    fn input(email: &str) -> CreateUserInput {
        CreateUserInput {
            full_name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "analytical-engine".to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let repo = MemoryUserRepository::new();
        let user = service(&repo).create(input("ada@example.com")).await.unwrap();

        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert!(user.updated_at.is_none());
        assert_ne!(user.password_hash.as_phc_string(), "analytical-engine");
        assert!(user.password_hash.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_create_user_validation_names_field() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);

        let mut blank_name = input("ada@example.com");
        blank_name.full_name = "   ".to_string();
        assert!(matches!(
            users.create(blank_name).await,
            Err(AuthError::Validation { field: "full_name", .. })
        ));

        assert!(matches!(
            users.create(input("not-an-email")).await,
            Err(AuthError::Validation { field: "email", .. })
        ));

        let mut short_password = input("ada@example.com");
        short_password.password = "short".to_string();
        assert!(matches!(
            users.create(short_password).await,
            Err(AuthError::Validation { field: "password", .. })
        ));

        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);

        users.create(input("ada@example.com")).await.unwrap();
        let result = users.create(input("ADA@example.com")).await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_email_one_wins() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);

        let (first, second) = tokio::join!(
            users.create(input("race@example.com")),
            users.create(input("race@example.com"))
        );

        let conflicts = [&first, &second]
            .iter()
            .filter(|r| matches!(r, Err(AuthError::EmailTaken)))
            .count();
        assert_eq!(conflicts, 1);
        assert!(first.is_ok() || second.is_ok());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let repo = MemoryUserRepository::new();
        let result = service(&repo).get(&UserId::new()).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_credentials() {
        let repo = MemoryUserRepository::new();
        let tokens = Arc::new(TokenService::new(b"test-secret"));
        let users = service(&repo);
        let created = users.create(input("ada@example.com")).await.unwrap();

        let updated = users
            .update(
                &created.id,
                UpdateUserInput {
                    full_name: "Augusta Ada King".to_string(),
                    email: "countess@example.com".to_string(),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name, "Augusta Ada King");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());

        let output = login_use_case(&repo, &tokens)
            .execute(login("countess@example.com", "analytical-engine"))
            .await
            .unwrap();
        assert_eq!(output.user_id, created.id);
    }

    #[tokio::test]
    async fn test_update_with_password_rehashes() {
        let repo = MemoryUserRepository::new();
        let tokens = Arc::new(TokenService::new(b"test-secret"));
        let users = service(&repo);
        let created = users.create(input("ada@example.com")).await.unwrap();

        users
            .update(
                &created.id,
                UpdateUserInput {
                    full_name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    password: Some("difference-engine".to_string()),
                },
            )
            .await
            .unwrap();

        let login_use_case = login_use_case(&repo, &tokens);
        assert!(matches!(
            login_use_case
                .execute(login("ada@example.com", "analytical-engine"))
                .await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(
            login_use_case
                .execute(login("ada@example.com", "difference-engine"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_not_found() {
        let repo = MemoryUserRepository::new();
        let result = service(&repo)
            .update(
                &UserId::new(),
                UpdateUserInput {
                    full_name: "Nobody".to_string(),
                    email: "nobody@example.com".to_string(),
                    password: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_conflict() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);
        users.create(input("ada@example.com")).await.unwrap();
        let other = users.create(input("grace@example.com")).await.unwrap();

        let result = users
            .update(
                &other.id,
                UpdateUserInput {
                    full_name: "Grace Hopper".to_string(),
                    email: "ada@example.com".to_string(),
                    password: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);
        let created = users.create(input("ada@example.com")).await.unwrap();

        users.delete(&created.id).await.unwrap();
        users.delete(&created.id).await.unwrap();
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_list_users_paginates() {
        let repo = MemoryUserRepository::new();
        let users = service(&repo);
        let mut created = Vec::new();
        for i in 0..3 {
            let user = users
                .create(input(&format!("user{i}@example.com")))
                .await
                .unwrap();
            created.push(user.id);
        }

        let page = users.list(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, created[2]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.next_page, None);
        assert_eq!(page.prev_page, Some(1));
    }

    #[tokio::test]
    async fn test_login_returns_token_for_subject() {
        let repo = MemoryUserRepository::new();
        let tokens = Arc::new(TokenService::new(b"test-secret"));
        let created = service(&repo).create(input("ada@example.com")).await.unwrap();

        let output = login_use_case(&repo, &tokens)
            .execute(login("Ada@Example.com", "analytical-engine"))
            .await
            .unwrap();

        assert_eq!(tokens.verify(&output.token).unwrap(), created.id.to_string());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let repo = MemoryUserRepository::new();
        let tokens = Arc::new(TokenService::new(b"test-secret"));
        service(&repo).create(input("ada@example.com")).await.unwrap();
        let use_case = login_use_case(&repo, &tokens);

        assert!(matches!(
            use_case.execute(login("ada@example.com", "wrong-password")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            use_case.execute(login("grace@example.com", "analytical-engine")).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            use_case.execute(login("not-an-email", "analytical-engine")).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            use_case.execute(login("", "analytical-engine")).await,
            Err(AuthError::Validation { field: "email", .. })
        ));
        assert!(matches!(
            use_case.execute(login("ada@example.com", "")).await,
            Err(AuthError::Validation { field: "password", .. })
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use platform::token::TokenService;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::AuthConfig;
    use crate::infra::memory::MemoryUserRepository;
    use crate::presentation::router::auth_router_generic;

    const SECRET: &[u8] = b"router-test-secret";

    fn app() -> Router {
        auth_router_generic(
            MemoryUserRepository::new(),
            AuthConfig::default(),
            Arc::new(TokenService::new(SECRET)),
        )
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Register a user and log in, returning (user id, token)
    async fn sign_up_and_login(app: &Router, email: &str) -> (String, String) {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({"full_name": "Ada Lovelace", "email": email, "password": "analytical-engine"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let user = body_json(response).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({"email": email, "password": "analytical-engine"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login = body_json(response).await;

        (
            user["id"].as_str().unwrap().to_string(),
            login["token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_created_user_body_has_no_password() {
        let app = app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({"full_name": "Ada Lovelace", "email": "ada@example.com", "password": "analytical-engine"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["email"], "ada@example.com");
        assert!(body["created_at"].is_string());
        assert!(body["updated_at"].is_null());
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({"email": "ada@example.com", "password": "analytical-engine"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("full_name"));
    }

    #[tokio::test]
    async fn test_login_status_codes() {
        let app = app();
        sign_up_and_login(&app, "ada@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({"email": "ada@example.com", "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({"email": "grace@example.com", "password": "analytical-engine"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let response = app().oneshot(get("/users", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let body = body_json(response).await;
        assert_eq!(body["title"], "Unauthorized");
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_all_token_rejections_look_the_same() {
        let app = app();
        let expired = TokenService::new(SECRET)
            .issue_at(&kernel::id::UserId::new().to_string(), Utc::now() - Duration::days(31))
            .unwrap();
        let foreign = TokenService::new(b"another-secret")
            .issue(&kernel::id::UserId::new().to_string())
            .unwrap();

        let mut bodies = Vec::new();
        for authorization in [
            None,
            Some("Token abc".to_string()),
            Some(format!("Bearer {expired}")),
            Some(format!("Bearer {foreign}")),
        ] {
            let response = app
                .clone()
                .oneshot(get("/users", authorization.as_deref()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_json(response).await);
        }

        assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_list_users_with_token() {
        let app = app();
        let (_, token) = sign_up_and_login(&app, "ada@example.com").await;

        let response = app
            .oneshot(get("/users?page=1&size=5", Some(format!("Bearer {token}").as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["totalItems"], 1);
        assert_eq!(body["pageSize"], 5);
        assert!(body["nextPage"].is_null());
        assert_eq!(body["data"][0]["full_name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_get_update_delete_user() {
        let app = app();
        let (id, token) = sign_up_and_login(&app, "ada@example.com").await;
        let bearer = format!("Bearer {token}");

        let response = app
            .clone()
            .oneshot(get(&format!("/users/{id}"), Some(bearer.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/users/{id}"),
                Some(&token),
                json!({"full_name": "Countess of Lovelace", "email": "ada@example.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["full_name"], "Countess of Lovelace");
        assert!(body["updated_at"].is_string());

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("DELETE")
                        .uri(format!("/users/{id}"))
                        .header(header::AUTHORIZATION, &bearer)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        let response = app
            .oneshot(get(&format!("/users/{id}"), Some(bearer.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_uuid_path_is_not_found() {
        let app = app();
        let (_, token) = sign_up_and_login(&app, "ada@example.com").await;

        let response = app
            .oneshot(get("/users/42", Some(format!("Bearer {token}").as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
