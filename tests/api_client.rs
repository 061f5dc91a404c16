use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use fox_reviews::api::{ApiRequest, FoxApi, HttpApi};
use fox_reviews::auth::{services as auth, ForgotPasswordForm, LoginForm, Session};
use fox_reviews::company::services as company;
use fox_reviews::config::ClientConfig;
use fox_reviews::contact::{services as contact, ContactForm};
use fox_reviews::submission::{Outcome, Submission};
use fox_reviews::{ApiError, AppContext};

const USER_ID: &str = "6f1c2a8e-3d4b-4c5a-9e7f-0a1b2c3d4e5f";
const COMPANY_ID: &str = "0b7e5d2c-1a3f-4e6d-8c9b-7a6f5e4d3c2b";

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "suspendu@fox-reviews.fr" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Compte suspendu"})),
        );
    }
    if body["password"] == "Secur3Pass" {
        let reply = json!({
            "access_token": "access-123",
            "refresh_token": "refresh-456",
            "user": {"id": USER_ID, "email": body["username"]}
        });
        (StatusCode::OK, Json(reply))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Identifiants incorrects"})),
        )
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer access-123") => (
            StatusCode::OK,
            Json(json!({"data": {"id": USER_ID, "email": "jean@fox-reviews.fr"}})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        ),
    }
}

async fn company_by_id(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id != COMPANY_ID {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Entreprise introuvable"})));
    }
    let reply = json!({
        "id": COMPANY_ID,
        "name": "Boulangerie du Port",
        "address": "12 quai des Pêcheurs",
        "postal_code": "13002",
        "city": "Marseille",
        "phone": "04 91 00 00 00",
        "category_id": "9d8c7b6a-5f4e-4d3c-8b2a-1f0e9d8c7b6a",
        "description": "Pain au levain et viennoiseries maison depuis 1987."
    });
    (StatusCode::OK, Json(reply))
}

async fn create_company() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [
                {"loc": ["body", "siret"], "msg": "SIRET déjà enregistré", "type": "value_error"}
            ]
        })),
    )
}

async fn spawn_server() -> Url {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route(
            "/auth/forgot-password",
            post(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Utilisateur inconnu"}))) }),
        )
        .route("/me", get(me))
        .route("/entreprises", post(create_company))
        .route("/entreprises/:id", get(company_by_id))
        .route("/contact/", post(|| async { StatusCode::NO_CONTENT }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn context() -> AppContext {
    let api_url = spawn_server().await;
    let config = ClientConfig {
        api_url: api_url.clone(),
        app_url: Url::parse("http://localhost:3000").unwrap(),
        timeout_secs: 5,
    };
    let api = HttpApi::new(api_url, Duration::from_secs(5)).unwrap();
    AppContext::from_parts(Arc::new(config), Arc::new(api) as Arc<dyn FoxApi>)
}

#[tokio::test]
async fn test_login_returns_session() {
    let ctx = context().await;
    let form = LoginForm {
        username: "Jean@Fox-Reviews.fr".into(),
        password: "Secur3Pass".into(),
    };

    let session = auth::login(&ctx, form).await.unwrap();
    assert_eq!(session.access_token, "access-123");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-456"));
    assert_eq!(session.user.as_ref().map(|u| u.email.as_str()), Some("jean@fox-reviews.fr"));
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let ctx = context().await;
    let mut submission = Submission::new();
    let form = LoginForm {
        username: "jean@fox-reviews.fr".into(),
        password: "wrong".into(),
    };

    let outcome = submission.run(form, |f| auth::login(&ctx, f)).await;
    match outcome {
        Outcome::Failed(ApiError::Rejected { status, message, .. }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Identifiants incorrects");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(submission.error_message(), Some("Identifiants incorrects"));
    assert!(submission.can_submit());
}

#[tokio::test]
async fn test_login_401_keeps_server_message() {
    let ctx = context().await;
    let mut submission = Submission::new();
    let form = LoginForm {
        username: "suspendu@fox-reviews.fr".into(),
        password: "Secur3Pass".into(),
    };

    let outcome = submission.run(form, |f| auth::login(&ctx, f)).await;
    match outcome {
        Outcome::Failed(ApiError::Rejected { status, message, .. }) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Compte suspendu");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(submission.error_message(), Some("Compte suspendu"));
    assert!(submission.can_submit());
}

#[tokio::test]
async fn test_bearer_and_data_envelope() {
    let ctx = context().await.with_session(Session::new("access-123"));
    let user = auth::me(&ctx).await.unwrap();
    assert_eq!(user.email, "jean@fox-reviews.fr");
    assert_eq!(user.id.to_string(), USER_ID);
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let ctx = context().await.with_session(Session::new("expired"));
    let err = auth::me(&ctx).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn test_forgot_password_unknown_email_is_generic_success() {
    let ctx = context().await;
    let form = ForgotPasswordForm {
        email: "personne@example.fr".into(),
    };
    let done = auth::request_password_reset(&ctx, form).await.unwrap();
    assert!(done.message().starts_with("Si un compte existe"));
}

#[tokio::test]
async fn test_unprocessable_detail_maps_to_fields() {
    let ctx = context().await;
    let err = ctx
        .api()
        .send(ApiRequest::post("/entreprises").json(&json!({})).unwrap())
        .await
        .unwrap_err();
    let fields = err.field_errors().expect("field errors");
    let siret: Vec<&str> = fields.messages_for("siret").collect();
    assert_eq!(siret, vec!["SIRET déjà enregistré"]);
}

#[tokio::test]
async fn test_get_company_and_not_found() {
    let ctx = context().await;
    let id = COMPANY_ID.parse().unwrap();
    let found = company::get_company(&ctx, id).await.unwrap();
    assert_eq!(found.city, "Marseille");

    let missing = company::get_company(&ctx, uuid::Uuid::new_v4()).await.unwrap_err();
    assert_eq!(missing.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn test_empty_response_body() {
    let ctx = context().await;
    let form = ContactForm {
        name: "Jean Dupont".into(),
        email: "jean@fox-reviews.fr".into(),
        subject: "Partenariat".into(),
        message: "Bonjour, je souhaite référencer ma boutique.".into(),
    };
    contact::send_message(&ctx, form).await.unwrap();
}
