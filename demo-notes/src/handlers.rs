use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use owned_content::{ContentError, FormErrors, NoteForm, Stores};
use owned_content_axum::{AuthUser, IntoResponseError, found, verify_form_csrf};

use crate::templates::{
    DeleteTemplate, DetailTemplate, DoneTemplate, FormTemplate, HomeTemplate, ListTemplate, Nav,
    NoteFormView,
};

type HandlerResult = Result<Response, (StatusCode, String)>;

const DONE_URL: &str = "/done/";

#[derive(Deserialize)]
pub(crate) struct NotePayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    csrf_token: String,
}

impl NotePayload {
    fn into_form(self) -> NoteForm {
        NoteForm {
            title: self.title,
            text: self.text,
            slug: self.slug,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct CsrfPayload {
    #[serde(default)]
    csrf_token: String,
}

fn html(template: impl Template) -> HandlerResult {
    Ok(Html(template.render().into_response_error()?).into_response())
}

fn form_page(
    user: &AuthUser,
    heading: &'static str,
    action: String,
    form: NoteForm,
    errors: FormErrors,
) -> HandlerResult {
    html(FormTemplate {
        nav: Nav::new(Some(user)),
        heading,
        action,
        form: NoteFormView {
            title: form.title,
            text: form.text,
            slug: form.slug.unwrap_or_default(),
            errors,
            csrf_token: user.csrf_token.clone(),
        },
    })
}

pub(crate) async fn home(user: Option<AuthUser>) -> HandlerResult {
    html(HomeTemplate {
        nav: Nav::new(user.as_ref()),
    })
}

pub(crate) async fn list(State(stores): State<Stores>, user: AuthUser) -> HandlerResult {
    let notes = owned_content::list_notes(&stores, &user.identity())
        .await
        .into_response_error()?;
    html(ListTemplate {
        nav: Nav::new(Some(&user)),
        notes,
    })
}

pub(crate) async fn done(user: AuthUser) -> HandlerResult {
    html(DoneTemplate {
        nav: Nav::new(Some(&user)),
    })
}

pub(crate) async fn add_form(user: AuthUser) -> HandlerResult {
    form_page(
        &user,
        "New note",
        "/add/".to_string(),
        NoteForm::default(),
        FormErrors::new(),
    )
}

pub(crate) async fn add(
    State(stores): State<Stores>,
    user: AuthUser,
    Form(payload): Form<NotePayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;

    let form = payload.into_form();
    match owned_content::create_note(&stores, &user.identity(), &form).await {
        Ok(_) => Ok(found(DONE_URL)),
        Err(ContentError::Validation(errors)) => {
            form_page(&user, "New note", "/add/".to_string(), form, errors)
        }
        Err(e) => Err::<Response, _>(e).into_response_error(),
    }
}

pub(crate) async fn detail(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
) -> HandlerResult {
    let note = owned_content::get_note(&stores, &user.identity(), &slug)
        .await
        .into_response_error()?;
    html(DetailTemplate {
        nav: Nav::new(Some(&user)),
        note,
    })
}

pub(crate) async fn edit_form(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
) -> HandlerResult {
    let note = owned_content::get_note_for_edit(&stores, &user.identity(), &slug)
        .await
        .into_response_error()?;
    form_page(
        &user,
        "Edit note",
        format!("/edit/{}/", note.slug),
        NoteForm::from_note(&note),
        FormErrors::new(),
    )
}

pub(crate) async fn edit(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
    Form(payload): Form<NotePayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;

    let form = payload.into_form();
    match owned_content::update_note(&stores, &user.identity(), &slug, &form).await {
        Ok(_) => Ok(found(DONE_URL)),
        Err(ContentError::Validation(errors)) => form_page(
            &user,
            "Edit note",
            format!("/edit/{slug}/"),
            form,
            errors,
        ),
        Err(e) => Err::<Response, _>(e).into_response_error(),
    }
}

pub(crate) async fn delete_confirm(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
) -> HandlerResult {
    let note = owned_content::get_note_for_edit(&stores, &user.identity(), &slug)
        .await
        .into_response_error()?;
    html(DeleteTemplate {
        nav: Nav::new(Some(&user)),
        note,
        csrf_token: user.csrf_token.clone(),
    })
}

pub(crate) async fn delete_form(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
    Form(payload): Form<CsrfPayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;
    delete_and_redirect(&stores, &user, &slug).await
}

pub(crate) async fn delete(
    State(stores): State<Stores>,
    Path(slug): Path<String>,
    user: AuthUser,
) -> HandlerResult {
    delete_and_redirect(&stores, &user, &slug).await
}

async fn delete_and_redirect(stores: &Stores, user: &AuthUser, slug: &str) -> HandlerResult {
    owned_content::delete_note(stores, &user.identity(), slug)
        .await
        .into_response_error()?;
    Ok(found(DONE_URL))
}
