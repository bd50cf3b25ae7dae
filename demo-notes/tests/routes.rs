mod common;

use http::StatusCode;

use common::{Client, TestApp, location};
use owned_content::{Note, NoteForm, create_note};

async fn setup(app: &TestApp) -> (Note, Client, Client) {
    let author = app.login("Лев_Толстой").await;
    let reader = app.login("Читатель").await;
    let note = create_note(
        &app.stores,
        &author.identity,
        &NoteForm {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: Some("a".to_string()),
        },
    )
    .await
    .unwrap();
    (note, author, reader)
}

#[tokio::test]
async fn test_pages_availability() {
    let app = TestApp::new().await;

    for uri in ["/", "/auth/login/", "/auth/logout/", "/auth/signup/"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_edit_detail_delete() {
    let app = TestApp::new().await;
    let (note, author, reader) = setup(&app).await;

    let urls = [
        format!("/note/{}/", note.slug),
        format!("/edit/{}/", note.slug),
        format!("/delete/{}/", note.slug),
    ];
    for (client, status) in [(&author, StatusCode::OK), (&reader, StatusCode::NOT_FOUND)] {
        for url in &urls {
            let response = app.get(url, Some(client)).await;
            assert_eq!(response.status(), status, "{url}");
        }
    }
}

#[tokio::test]
async fn test_redirect_for_anonymous_client() {
    let app = TestApp::new().await;
    let (note, _, _) = setup(&app).await;

    let urls = [
        "/notes/".to_string(),
        "/add/".to_string(),
        "/done/".to_string(),
        format!("/note/{}/", note.slug),
        format!("/edit/{}/", note.slug),
        format!("/delete/{}/", note.slug),
    ];
    for url in urls {
        let response = app.get(&url, None).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{url}");
        assert_eq!(location(&response), format!("/auth/login/?next={url}"));
    }
}

#[tokio::test]
async fn test_list_add_done() {
    let app = TestApp::new().await;
    let (_, author, _) = setup(&app).await;

    for url in ["/notes/", "/add/", "/done/"] {
        let response = app.get(url, Some(&author)).await;
        assert_eq!(response.status(), StatusCode::OK, "{url}");
    }
}

#[tokio::test]
async fn test_missing_note_is_404() {
    let app = TestApp::new().await;
    let (_, author, _) = setup(&app).await;

    let response = app.get("/note/no-such-note/", Some(&author)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
