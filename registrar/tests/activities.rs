use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::Value;

use registrar::proto::http::MessageBody;
use registrar::proto::{Activities, Error, ErrorBody};
use registrar::webserver::{self, AppState};
use registrar::RegistryExecutor;
use roster::{InMemoryRegistry, Seed};

// Every test builds its own registry from the seed, so mutations never leak
async fn service(
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let registry = RegistryExecutor::spawn(InMemoryRegistry::new(Seed::mergington().unwrap()));
    test::init_service(
        App::new()
            .app_data(AppState::new(registry))
            .configure(webserver::routes),
    )
    .await
}

fn post(uri: &str) -> actix_http::Request {
    test::TestRequest::post().uri(uri).to_request()
}

async fn activities<S>(app: &S) -> Activities
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get().uri("/activities").to_request();
    test::call_and_read_body_json(app, req).await
}

#[actix_web::test]
async fn get_activities() {
    let app = service().await;
    let req = test::TestRequest::get().uri("/activities").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let basketball = &body["Basketball"];
    assert!(basketball["participants"].is_array());
    assert!(basketball["description"].is_string());
    assert!(basketball["schedule"].is_string());
    assert!(basketball["max_participants"].is_number());
}

#[actix_web::test]
async fn listing_is_stable_without_mutation() {
    let app = service().await;
    assert_eq!(activities(&app).await, activities(&app).await);
}

#[actix_web::test]
async fn signup_reflects_in_activities() {
    let app = service().await;
    let email = "teststudent@mergington.edu";

    let resp = test::call_service(
        &app,
        post("/activities/Basketball/signup?email=teststudent@mergington.edu"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MessageBody = test::read_body_json(resp).await;
    assert!(body.message.contains(email));

    let listing = activities(&app).await;
    assert!(listing["Basketball"].participants.contains(email));
}

#[actix_web::test]
async fn double_signup_returns_400() {
    let app = service().await;
    let uri = "/activities/Soccer/signup?email=double@mergington.edu";

    let first = test::call_service(&app, post(uri)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let size = activities(&app).await["Soccer"].participants.len();

    let second = test::call_service(&app, post(uri)).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody<Error> = test::read_body_json(second).await;
    assert_eq!(
        body.error,
        Error::AlreadySignedUp {
            activity: "Soccer".into(),
            email: "double@mergington.edu".into(),
        }
    );

    assert_eq!(activities(&app).await["Soccer"].participants.len(), size);
}

#[actix_web::test]
async fn unregister_removes_participant() {
    let app = service().await;
    let before = activities(&app).await["Art Club"].participants.clone();

    let resp = test::call_service(
        &app,
        post("/activities/Art%20Club/signup?email=temp%40mergington.edu"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        post("/activities/Art%20Club/unregister?email=temp%40mergington.edu"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MessageBody = test::read_body_json(resp).await;
    assert!(body.message.contains("Unregistered"));

    let after = activities(&app).await["Art Club"].participants.clone();
    assert!(!after.contains("temp@mergington.edu"));
    assert!(after.same_members(&before));
}

#[actix_web::test]
async fn unregister_nonexistent_returns_400() {
    let app = service().await;
    let before = activities(&app).await;

    let resp = test::call_service(
        &app,
        post("/activities/Drama%20Club/unregister?email=nobody@mergington.edu"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "notSignedUp");
    assert_eq!(body["detail"], "Student is not signed up for this activity");

    assert_eq!(activities(&app).await, before);
}

#[actix_web::test]
async fn unknown_activity_returns_400() {
    let app = service().await;
    for action in &["signup", "unregister"] {
        let uri = format!("/activities/Quidditch/{}?email=michael@mergington.edu", action);
        let resp = test::call_service(&app, post(&uri)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody<Error> = test::read_body_json(resp).await;
        assert_eq!(
            body.error,
            Error::ActivityNotFound {
                activity: "Quidditch".into()
            }
        );
        assert_eq!(body.detail, "Activity not found");
    }
}

#[actix_web::test]
async fn missing_email_returns_400() {
    let app = service().await;
    let resp = test::call_service(&app, post("/activities/Soccer/signup")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "invalidQuery");
}

#[actix_web::test]
async fn empty_email_returns_400() {
    let app = service().await;
    let resp = test::call_service(&app, post("/activities/Soccer/signup?email=")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "invalidEmail");
}

#[actix_web::test]
async fn listing_uses_get_only() {
    let app = service().await;
    let resp = test::call_service(&app, post("/activities")).await;
    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn whitespace_email_is_accepted() {
    let app = service().await;
    let resp = test::call_service(&app, post("/activities/Soccer/signup?email=%20")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: MessageBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Signed up   for Soccer");
    assert!(activities(&app).await["Soccer"].participants.contains(" "));
}
