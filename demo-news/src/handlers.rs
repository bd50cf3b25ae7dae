use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use owned_content::{Comment, CommentForm, ContentError, FormErrors, Identity, NewsDetail, Stores};
use owned_content_axum::{AuthUser, IntoResponseError, found, identity_of, verify_form_csrf};

use crate::templates::{
    CommentDeleteTemplate, CommentEditTemplate, CommentFormView, CommentRow, DetailTemplate,
    HomeTemplate, Nav,
};

type HandlerResult = Result<Response, (StatusCode, String)>;

#[derive(Deserialize)]
pub(crate) struct CommentPayload {
    #[serde(default)]
    text: String,
    #[serde(default)]
    csrf_token: String,
}

#[derive(Deserialize)]
pub(crate) struct CsrfPayload {
    #[serde(default)]
    csrf_token: String,
}

fn html(template: impl Template) -> HandlerResult {
    Ok(Html(template.render().into_response_error()?).into_response())
}

fn comments_anchor(news_id: i64) -> String {
    format!("/news/{news_id}/#comments")
}

fn detail_page(
    detail: NewsDetail,
    user: Option<&AuthUser>,
    text: String,
    errors: FormErrors,
) -> HandlerResult {
    let viewer = user.map(|u| u.id.as_str());
    let comments = detail
        .comments
        .into_iter()
        .map(|view| CommentRow {
            editable: viewer == Some(view.comment.author.as_str()),
            view,
        })
        .collect();

    let form = match (detail.can_comment, user) {
        (true, Some(user)) => Some(CommentFormView {
            text,
            errors,
            csrf_token: user.csrf_token.clone(),
        }),
        _ => None,
    };

    html(DetailTemplate {
        nav: Nav::new(user),
        news: detail.news,
        comments,
        form,
    })
}

pub(crate) async fn home(State(stores): State<Stores>, user: Option<AuthUser>) -> HandlerResult {
    let news_list = owned_content::home_news(&stores).await.into_response_error()?;
    html(HomeTemplate {
        nav: Nav::new(user.as_ref()),
        news_list,
    })
}

pub(crate) async fn detail(
    State(stores): State<Stores>,
    Path(news_id): Path<i64>,
    user: Option<AuthUser>,
) -> HandlerResult {
    let identity = identity_of(user.as_ref());
    let detail = owned_content::news_detail(&stores, &identity, news_id)
        .await
        .into_response_error()?;
    detail_page(detail, user.as_ref(), String::new(), FormErrors::new())
}

pub(crate) async fn add_comment(
    State(stores): State<Stores>,
    Path(news_id): Path<i64>,
    user: AuthUser,
    Form(payload): Form<CommentPayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;

    let identity = user.identity();
    let form = CommentForm { text: payload.text };
    match owned_content::add_comment(&stores, &identity, news_id, &form).await {
        Ok(_) => Ok(found(&comments_anchor(news_id))),
        Err(ContentError::Validation(errors)) => {
            let detail = owned_content::news_detail(&stores, &identity, news_id)
                .await
                .into_response_error()?;
            detail_page(detail, Some(&user), form.text, errors)
        }
        Err(e) => Err::<Response, _>(e).into_response_error(),
    }
}

async fn own_comment(
    stores: &Stores,
    identity: &Identity,
    comment_id: i64,
) -> Result<Comment, (StatusCode, String)> {
    owned_content::get_comment_for_edit(stores, identity, comment_id)
        .await
        .into_response_error()
}

pub(crate) async fn edit_form(
    State(stores): State<Stores>,
    Path(comment_id): Path<i64>,
    user: AuthUser,
) -> HandlerResult {
    let comment = own_comment(&stores, &user.identity(), comment_id).await?;
    let form = CommentForm::from_comment(&comment);

    html(CommentEditTemplate {
        nav: Nav::new(Some(&user)),
        form: CommentFormView {
            text: form.text,
            errors: FormErrors::new(),
            csrf_token: user.csrf_token.clone(),
        },
        comment,
    })
}

pub(crate) async fn edit(
    State(stores): State<Stores>,
    Path(comment_id): Path<i64>,
    user: AuthUser,
    Form(payload): Form<CommentPayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;

    let identity = user.identity();
    let form = CommentForm { text: payload.text };
    match owned_content::edit_comment(&stores, &identity, comment_id, &form).await {
        Ok(comment) => Ok(found(&comments_anchor(comment.news_id))),
        Err(ContentError::Validation(errors)) => {
            let comment = own_comment(&stores, &identity, comment_id).await?;
            html(CommentEditTemplate {
                nav: Nav::new(Some(&user)),
                form: CommentFormView {
                    text: form.text,
                    errors,
                    csrf_token: user.csrf_token.clone(),
                },
                comment,
            })
        }
        Err(e) => Err::<Response, _>(e).into_response_error(),
    }
}

pub(crate) async fn delete_confirm(
    State(stores): State<Stores>,
    Path(comment_id): Path<i64>,
    user: AuthUser,
) -> HandlerResult {
    let comment = own_comment(&stores, &user.identity(), comment_id).await?;

    html(CommentDeleteTemplate {
        nav: Nav::new(Some(&user)),
        comment,
        csrf_token: user.csrf_token.clone(),
    })
}

/// Confirmation form submitted from the delete page
pub(crate) async fn delete_form(
    State(stores): State<Stores>,
    Path(comment_id): Path<i64>,
    user: AuthUser,
    Form(payload): Form<CsrfPayload>,
) -> HandlerResult {
    verify_form_csrf(&user, &payload.csrf_token)?;
    delete_and_redirect(&stores, &user, comment_id).await
}

/// Scripted delete; the extractor already checked the header token
pub(crate) async fn delete(
    State(stores): State<Stores>,
    Path(comment_id): Path<i64>,
    user: AuthUser,
) -> HandlerResult {
    delete_and_redirect(&stores, &user, comment_id).await
}

async fn delete_and_redirect(stores: &Stores, user: &AuthUser, comment_id: i64) -> HandlerResult {
    let comment = owned_content::delete_comment(stores, &user.identity(), comment_id)
        .await
        .into_response_error()?;
    Ok(found(&comments_anchor(comment.news_id)))
}
