use super::BackendName;
use crate::domain::models::AuthServiceName;

#[test]
fn it_parses_backend_names() {
    assert_eq!(
        BackendName::parse("mock".to_string()),
        Some(BackendName::Mock)
    );
    assert_eq!(
        BackendName::parse("remote".to_string()),
        Some(BackendName::Remote)
    );
    assert_eq!(BackendName::parse("openai".to_string()), None);
}

#[test]
fn it_parses_auth_service_names() {
    assert_eq!(
        AuthServiceName::parse("mock".to_string()),
        Some(AuthServiceName::Mock)
    );
    assert_eq!(AuthServiceName::parse("ldap".to_string()), None);
}
