mod common;

use http::StatusCode;

use common::{Client, TestApp, body_text, location};
use owned_content::{Note, NoteForm, NoteStore, create_note};

const NOTE_TEXT: &str = "Текст заметки";
const NEW_NOTE_TEXT: &str = "Обновлённый текст заметки";

async fn note_count(app: &TestApp) -> usize {
    NoteStore::list_all(&app.stores).await.unwrap().len()
}

async fn note_by(app: &TestApp, client: &Client) -> Note {
    create_note(
        &app.stores,
        &client.identity,
        &NoteForm {
            title: "Заголовок".to_string(),
            text: NOTE_TEXT.to_string(),
            slug: None,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_anonymous_user_cant_create_note() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/add/",
            &[("title", "Anonymus"), ("text", "Anonymus text")],
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login/?next=/add/");
    assert_eq!(note_count(&app).await, 0);
}

#[tokio::test]
async fn test_auth_user_can_create_note() {
    let app = TestApp::new().await;
    let author = app.login("Лев_Толстой").await;

    let response = app
        .post_form(
            "/add/",
            &[("title", "Anonymus"), ("text", "Anonymus text")],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");

    let notes = NoteStore::list_all(&app.stores).await.unwrap();
    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.title, "Anonymus");
    assert_eq!(note.text, "Anonymus text");
    assert_eq!(note.slug, "anonymus");
    assert_eq!(Some(note.author.as_str()), author.identity.user_id());
}

#[tokio::test]
async fn test_explicit_empty_slug_is_derived() {
    let app = TestApp::new().await;
    let author = app.login("author").await;

    app.post_form(
        "/add/",
        &[("title", "Лев Толстой"), ("text", "t"), ("slug", "")],
        Some(&author),
    )
    .await;

    let notes = NoteStore::list_all(&app.stores).await.unwrap();
    assert_eq!(notes[0].slug, "lev-tolstoj");
}

#[tokio::test]
async fn test_unique_slug() {
    let app = TestApp::new().await;
    let author = app.login("Автор").await;
    let note = note_by(&app, &author).await;

    let response = app
        .post_form(
            "/add/",
            &[("title", "Заголовок"), ("text", NEW_NOTE_TEXT)],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(&format!("{} - this slug already exists", note.slug)));
    assert_eq!(note_count(&app).await, 1);
}

#[tokio::test]
async fn test_author_can_delete_note() {
    let app = TestApp::new().await;
    let author = app.login("Автор").await;
    let note = note_by(&app, &author).await;

    let response = app
        .delete(&format!("/delete/{}/", note.slug), Some(&author))
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");
    assert_eq!(note_count(&app).await, 0);
}

#[tokio::test]
async fn test_user_cant_delete_note_of_another_user() {
    let app = TestApp::new().await;
    let author = app.login("Автор").await;
    let reader = app.login("Читатель").await;
    let note = note_by(&app, &author).await;

    let response = app
        .delete(&format!("/delete/{}/", note.slug), Some(&reader))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(note_count(&app).await, 1);
}

#[tokio::test]
async fn test_author_can_edit_note() {
    let app = TestApp::new().await;
    let author = app.login("Автор").await;
    let note = note_by(&app, &author).await;

    let response = app
        .post_form(
            &format!("/edit/{}/", note.slug),
            &[("title", "Заголовок"), ("text", NEW_NOTE_TEXT)],
            Some(&author),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/done/");
    let stored = NoteStore::get_by_slug(&app.stores, &note.slug)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, NEW_NOTE_TEXT);
    assert_eq!(stored.title, note.title);
    assert_eq!(stored.author, note.author);
}

#[tokio::test]
async fn test_user_cant_edit_note_of_another_user() {
    let app = TestApp::new().await;
    let author = app.login("Автор").await;
    let reader = app.login("Читатель").await;
    let note = note_by(&app, &author).await;

    let response = app
        .post_form(
            &format!("/edit/{}/", note.slug),
            &[("title", "Заголовок"), ("text", NEW_NOTE_TEXT)],
            Some(&reader),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let stored = NoteStore::get_by_slug(&app.stores, &note.slug)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.text, NOTE_TEXT);
}
