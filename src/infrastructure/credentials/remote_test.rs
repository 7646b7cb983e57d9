use super::LoginRequest;
use super::RemoteCredentials;
use super::SignupRequest;
use crate::domain::models::AuthError;
use crate::domain::models::CredentialService;

impl RemoteCredentials {
    fn with_url(url: String) -> RemoteCredentials {
        return RemoteCredentials { url };
    }
}

fn login_request_body() -> String {
    return serde_json::to_string(&LoginRequest {
        email: "ann@x.com".to_string(),
        password: "secret1".to_string(),
    })
    .unwrap();
}

#[tokio::test]
async fn it_logs_in_with_the_canonical_shape() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .match_body(mockito::Matcher::PartialJsonString(login_request_body()))
        .with_status(200)
        .with_body(
            r#"{"token": "a.b.c", "user": {"id": "u1", "name": "Ann", "email": "ann@x.com"}}"#,
        )
        .create();

    let creds = RemoteCredentials::with_url(server.url());
    let outcome = creds.login("ann@x.com", "secret1").await.unwrap();
    mock.assert();

    assert_eq!(outcome.token, "a.b.c");
    assert_eq!(outcome.profile.id, "u1");
    assert_eq!(outcome.profile.name, "Ann");
}

#[tokio::test]
async fn it_normalizes_aliased_response_shapes() {
    let bodies = [
        r#"{"accessToken": "a.b.c", "user": {"userId": "u1", "username": "Ann", "email": "ann@x.com"}}"#,
        r#"{"access_token": "a.b.c", "user": {"id": "u1", "name": "Ann", "email": "ann@x.com"}}"#,
    ];

    for body in bodies {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(body)
            .create();

        let creds = RemoteCredentials::with_url(server.url());
        let outcome = creds.login("ann@x.com", "secret1").await.unwrap();
        mock.assert();

        assert_eq!(outcome.token, "a.b.c");
        assert_eq!(outcome.profile.id, "u1");
        assert_eq!(outcome.profile.name, "Ann");
        assert_eq!(outcome.profile.email, "ann@x.com");
    }
}

#[tokio::test]
async fn it_rejects_unrecognized_response_shapes() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(r#"{"jwt": "a.b.c"}"#)
        .create();

    let creds = RemoteCredentials::with_url(server.url());
    let err = creds.login("ann@x.com", "secret1").await.unwrap_err();
    mock.assert();

    assert_eq!(err, AuthError::InvalidResponse);
}

#[tokio::test]
async fn it_maps_login_statuses() {
    let cases = [
        (401, AuthError::Unauthorized),
        (404, AuthError::NoSuchAccount),
        (500, AuthError::ServerError),
        (418, AuthError::Unknown),
    ];

    for (status, expected) in cases {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/login")
            .with_status(status)
            .create();

        let creds = RemoteCredentials::with_url(server.url());
        let err = creds.login("ann@x.com", "secret1").await.unwrap_err();
        mock.assert();

        assert_eq!(err, expected);
    }
}

#[tokio::test]
async fn it_surfaces_validation_messages() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(422)
        .with_body(r#"{"message": "email is malformed"}"#)
        .create();

    let creds = RemoteCredentials::with_url(server.url());
    let err = creds.login("ann@x.com", "secret1").await.unwrap_err();
    mock.assert();

    assert_eq!(err, AuthError::Validation("email is malformed".to_string()));
}

#[tokio::test]
async fn it_signs_up_without_a_session() {
    let body = serde_json::to_string(&SignupRequest {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        password: "secret1".to_string(),
    })
    .unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/signup")
        .match_body(mockito::Matcher::PartialJsonString(body))
        .with_status(201)
        .create();

    let creds = RemoteCredentials::with_url(server.url());
    creds.signup("Ann", "ann@x.com", "secret1").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn it_maps_signup_conflicts() {
    for status in [409, 422] {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/signup")
            .with_status(status)
            .create();

        let creds = RemoteCredentials::with_url(server.url());
        let err = creds.signup("Ann", "ann@x.com", "secret1").await.unwrap_err();
        mock.assert();

        assert_eq!(err, AuthError::AccountExists);
    }
}

#[tokio::test]
async fn it_maps_transport_failures_to_network_errors() {
    let creds = RemoteCredentials::with_url("http://127.0.0.1:1".to_string());
    let err = creds.login("ann@x.com", "secret1").await.unwrap_err();
    assert_eq!(err, AuthError::NetworkError);
}
