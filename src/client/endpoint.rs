// File: src/client/endpoint.rs
use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// RFC 3986 unreserved characters stay literal, everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// What to do when a response body is not valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Fail the call with `MalformedResponse`.
    Required,
    /// Treat the body as `{}` and carry on with the status check.
    Lenient,
}

/// Static description of one backend operation.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub authenticated: bool,
    pub body_policy: BodyPolicy,
    /// Request body holds a password and must not be logged.
    pub sensitive_body: bool,
    pub default_error: &'static str,
}

pub const AUTHENTICATE: Endpoint = Endpoint {
    name: "Authenticate",
    method: Method::POST,
    path: "/api/v1/auth/authenticate",
    authenticated: false,
    body_policy: BodyPolicy::Required,
    sensitive_body: true,
    default_error: "Authentication failed. Please check your credentials.",
};

pub const REGISTER: Endpoint = Endpoint {
    name: "Register",
    method: Method::POST,
    path: "/api/v1/auth/register",
    authenticated: false,
    body_policy: BodyPolicy::Required,
    sensitive_body: true,
    default_error: "Registration failed.",
};

pub const FIND_DEVELOPERS: Endpoint = Endpoint {
    name: "Find Developers",
    method: Method::GET,
    path: "/api/v1/developers",
    authenticated: true,
    body_policy: BodyPolicy::Required,
    sensitive_body: false,
    default_error: "Failed to find developers.",
};

pub const GET_DEVELOPER: Endpoint = Endpoint {
    name: "Get Developer By ID",
    method: Method::GET,
    path: "/api/v1/developers",
    authenticated: true,
    body_policy: BodyPolicy::Required,
    sensitive_body: false,
    // Overridden per call with the requested id.
    default_error: "Failed to get developer.",
};

pub const GENERATE_QUESTIONS: Endpoint = Endpoint {
    name: "Generate Questions",
    method: Method::POST,
    path: "/api/v1/interviews/generate-questions",
    authenticated: true,
    body_policy: BodyPolicy::Required,
    sensitive_body: false,
    default_error: "Failed to generate interview questions.",
};

pub const GENERATE_FEEDBACK: Endpoint = Endpoint {
    name: "Generate Feedback",
    method: Method::POST,
    path: "/api/v1/interviews/generate-feedback",
    authenticated: true,
    body_policy: BodyPolicy::Lenient,
    sensitive_body: false,
    default_error: "Failed to generate feedback.",
};

pub const CREATE_INTERVIEW: Endpoint = Endpoint {
    name: "Create Interview",
    method: Method::POST,
    path: "/api/v1/interviews",
    authenticated: true,
    body_policy: BodyPolicy::Lenient,
    sensitive_body: false,
    default_error: "Failed to create interview.",
};

/// Cleans a free-text, comma-separated skill list.
pub fn normalize_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Path and query for a skill search. No skills means "every developer".
pub fn developers_path(skills: &[String]) -> String {
    if skills.is_empty() {
        return format!("{}/all", FIND_DEVELOPERS.path);
    }
    format!(
        "{}?skills={}&match=any",
        FIND_DEVELOPERS.path,
        encode_component(&skills.join(","))
    )
}

pub fn developer_path(id: &str) -> String {
    format!("{}/{}", GET_DEVELOPER.path, encode_component(id))
}

fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skills_drops_blanks() {
        assert_eq!(
            normalize_skills(" Java , ,React,, "),
            vec!["Java".to_string(), "React".to_string()]
        );
        assert!(normalize_skills("  , ").is_empty());
    }

    #[test]
    fn test_developers_path() {
        assert_eq!(developers_path(&[]), "/api/v1/developers/all");
        assert_eq!(
            developers_path(&["C++".into(), "Go".into()]),
            "/api/v1/developers?skills=C%2B%2B%2CGo&match=any"
        );
    }

    #[test]
    fn test_developer_path_escapes_id() {
        assert_eq!(developer_path("7"), "/api/v1/developers/7");
        assert_eq!(developer_path("a/b"), "/api/v1/developers/a%2Fb");
        assert_eq!(developer_path("dev-1.x_~"), "/api/v1/developers/dev-1.x_~");
        assert_eq!(developer_path("é"), "/api/v1/developers/%C3%A9");
    }

    #[test]
    fn test_only_auth_endpoints_are_public() {
        for ep in [&AUTHENTICATE, &REGISTER] {
            assert!(!ep.authenticated, "{}", ep.name);
        }
        for ep in [
            &FIND_DEVELOPERS,
            &GET_DEVELOPER,
            &GENERATE_QUESTIONS,
            &GENERATE_FEEDBACK,
            &CREATE_INTERVIEW,
        ] {
            assert!(ep.authenticated, "{}", ep.name);
        }
    }
}
