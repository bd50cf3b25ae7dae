mod common;

use chrono::NaiveDate;
use http::StatusCode;

use common::{Client, TestApp, body_text, location};
use owned_content::{Comment, CommentForm, News, NewsStore, add_comment};

const COMMENT_TEXT: &str = "Текст комментария";
const NEW_COMMENT_TEXT: &str = "Обновленный комментарий";

async fn news(app: &TestApp) -> News {
    NewsStore::create_news(
        &app.stores,
        "Заголовок",
        "Текст",
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
    .await
    .unwrap()
}

async fn comment_by(app: &TestApp, client: &Client, news: &News) -> Comment {
    add_comment(
        &app.stores,
        &client.identity,
        news.id,
        &CommentForm {
            text: "Comment Text".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn comment_count(app: &TestApp, news: &News) -> usize {
    NewsStore::list_comments(&app.stores, news.id)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn test_anonymous_user_cant_create_comment() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let url = format!("/news/{}/", news.id);

    let response = app.post_form(&url, &[("text", COMMENT_TEXT)], None).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/auth/login/?next={url}"));
    assert_eq!(comment_count(&app, &news).await, 0);
}

#[tokio::test]
async fn test_user_can_create_comment() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let url = format!("/news/{}/", news.id);

    let response = app
        .post_form(&url, &[("text", COMMENT_TEXT)], Some(&author))
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("{url}#comments"));

    let comments = NewsStore::list_comments(&app.stores, news.id).await.unwrap();
    assert_eq!(comments.len(), 1);
    let comment = &comments[0].comment;
    assert_eq!(comment.text, COMMENT_TEXT);
    assert_eq!(comment.news_id, news.id);
    assert_eq!(Some(comment.author.as_str()), author.identity.user_id());
}

#[tokio::test]
async fn test_user_cant_use_bad_words() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let url = format!("/news/{}/", news.id);

    let response = app
        .post_form(
            &url,
            &[("text", "Какой-то текст, редиска, еще текст")],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("use offensive language!"));
    assert!(body.contains("id=\"comment-form\""));
    assert_eq!(comment_count(&app, &news).await, 0);
}

#[tokio::test]
async fn test_form_post_without_csrf_token_is_forbidden() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let url = format!("/news/{}/", news.id);

    let request = http::Request::builder()
        .method("POST")
        .uri(&url)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(http::header::COOKIE, &author.cookie)
        .body(axum::body::Body::from("text=hello&csrf_token=wrong"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(comment_count(&app, &news).await, 0);
}

#[tokio::test]
async fn test_author_can_delete_comment() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .delete(&format!("/delete_comment/{}/", comment.id), Some(&author))
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/news/{}/#comments", news.id));
    assert_eq!(comment_count(&app, &news).await, 0);
}

#[tokio::test]
async fn test_author_can_delete_comment_with_form() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .post_form(
            &format!("/delete_comment/{}/", comment.id),
            &[],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(comment_count(&app, &news).await, 0);
}

#[tokio::test]
async fn test_user_cant_delete_comment_of_another_user() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let reader = app.login("Читатель").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .delete(&format!("/delete_comment/{}/", comment.id), Some(&reader))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(comment_count(&app, &news).await, 1);
}

#[tokio::test]
async fn test_author_can_edit_comment() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .post_form(
            &format!("/edit_comment/{}/", comment.id),
            &[("text", NEW_COMMENT_TEXT)],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/news/{}/#comments", news.id));
    let stored = NewsStore::get_comment(&app.stores, comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, NEW_COMMENT_TEXT);
}

#[tokio::test]
async fn test_user_cant_edit_comment_of_another_user() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let reader = app.login("Читатель").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .post_form(
            &format!("/edit_comment/{}/", comment.id),
            &[("text", NEW_COMMENT_TEXT)],
            Some(&reader),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let stored = NewsStore::get_comment(&app.stores, comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, "Comment Text");
}

#[tokio::test]
async fn test_anonymous_cant_delete_comment() {
    let app = TestApp::new().await;
    let news = news(&app).await;
    let author = app.login("Автор").await;
    let comment = comment_by(&app, &author, &news).await;

    let response = app
        .delete(&format!("/delete_comment/{}/", comment.id), None)
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(comment_count(&app, &news).await, 1);
}
