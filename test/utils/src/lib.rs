/// A mock token payload used across token and session tests. Claims carry
/// every optional field so decode paths are exercised end to end.
pub fn claims_fixture() -> &'static str {
    return r#"{
  "userId": "ann@example.com",
  "name": "Ann",
  "email": "ann@example.com",
  "iat": 1700000000,
  "exp": 1700086400,
  "iss": "tryit-demo",
  "aud": ["tryit"],
  "roles": ["user"]
}"#;
}

pub fn transcript_fixture() -> Vec<(&'static str, &'static str, &'static str)> {
    return vec![
        (
            "user",
            "What does the demo do?",
            "2023-11-14T22:13:20+00:00",
        ),
        (
            "assistant",
            "It echoes canned responses until you wire up a real backend.",
            "2023-11-14T22:13:25+00:00",
        ),
        (
            "user",
            "Can I export this chat, with \"quotes\" and\nnewlines?",
            "2023-11-14T22:14:02+00:00",
        ),
        (
            "assistant",
            "Yes. TXT, JSON, CSV, and HTML are supported.",
            "2023-11-14T22:14:06+00:00",
        ),
    ];
}
