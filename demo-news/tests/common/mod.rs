//! In-process test harness: the real router over fresh in-memory stores.

#![allow(dead_code)]

use axum::{Router, body::Body, response::Response};
use http::{Request, header};
use tower::ServiceExt;

use owned_content::{
    Identity, SignupForm, Stores, get_user_and_csrf_token_from_session, new_session_header,
    register_user,
};

pub struct TestApp {
    pub app: Router,
    pub stores: Stores,
}

/// A logged-in browser
pub struct Client {
    pub identity: Identity,
    pub cookie: String,
    pub csrf_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let stores = Stores::in_memory().await.expect("in-memory stores");
        owned_content::init(&stores).await.expect("init stores");
        Self {
            app: demo_news::app(stores.clone()),
            stores,
        }
    }

    /// Register `username` and open a session for it
    pub async fn login(&self, username: &str) -> Client {
        let user = register_user(
            &self.stores,
            &SignupForm {
                username: username.to_string(),
                password1: "pw-123456".to_string(),
                password2: "pw-123456".to_string(),
            },
        )
        .await
        .expect("register user");

        let headers = new_session_header(&self.stores, &user.id)
            .await
            .expect("session");
        let set_cookie = headers[header::SET_COOKIE].to_str().expect("cookie");
        let cookie = set_cookie.split(';').next().expect("name=value").to_string();
        let session_id = cookie.split_once('=').expect("cookie value").1;

        let (_, csrf_token) = get_user_and_csrf_token_from_session(&self.stores, session_id)
            .await
            .expect("session lookup");

        Client {
            identity: Identity::user(user.id),
            cookie,
            csrf_token: csrf_token.as_str().to_string(),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.expect("response")
    }

    pub async fn get(&self, uri: &str, client: Option<&Client>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(client) = client {
            builder = builder.header(header::COOKIE, &client.cookie);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    /// Form post carrying the client's CSRF token in the body
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        client: Option<&Client>,
    ) -> Response {
        let mut pairs: Vec<String> = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(client) = client {
            pairs.push(format!("csrf_token={}", client.csrf_token));
            builder = builder.header(header::COOKIE, &client.cookie);
        }
        self.send(builder.body(Body::from(pairs.join("&"))).expect("request"))
            .await
    }

    /// Scripted DELETE with the token in `X-CSRF-Token`
    pub async fn delete(&self, uri: &str, client: Option<&Client>) -> Response {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(client) = client {
            builder = builder
                .header(header::COOKIE, &client.cookie)
                .header("X-CSRF-Token", &client.csrf_token);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
