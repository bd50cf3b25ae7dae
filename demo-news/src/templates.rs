use askama::Template;

use owned_content::{Comment, CommentView, FormErrors, News};
use owned_content_axum::{AuthUser, OC_LOGIN_URL, OC_LOGOUT_URL, OC_SIGNUP_URL};

/// Header links shared by every page
pub(crate) struct Nav {
    pub(crate) username: Option<String>,
    pub(crate) login_url: &'static str,
    pub(crate) logout_url: &'static str,
    pub(crate) signup_url: &'static str,
}

impl Nav {
    pub(crate) fn new(user: Option<&AuthUser>) -> Self {
        Self {
            username: user.map(|u| u.username.clone()),
            login_url: OC_LOGIN_URL.as_str(),
            logout_url: OC_LOGOUT_URL.as_str(),
            signup_url: OC_SIGNUP_URL.as_str(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.j2")]
pub(crate) struct HomeTemplate {
    pub(crate) nav: Nav,
    pub(crate) news_list: Vec<News>,
}

/// A comment plus whether the viewer may change it
pub(crate) struct CommentRow {
    pub(crate) view: CommentView,
    pub(crate) editable: bool,
}

/// The comment form, only present for logged-in viewers
pub(crate) struct CommentFormView {
    pub(crate) text: String,
    pub(crate) errors: FormErrors,
    pub(crate) csrf_token: String,
}

#[derive(Template)]
#[template(path = "detail.j2")]
pub(crate) struct DetailTemplate {
    pub(crate) nav: Nav,
    pub(crate) news: News,
    pub(crate) comments: Vec<CommentRow>,
    pub(crate) form: Option<CommentFormView>,
}

#[derive(Template)]
#[template(path = "comment_edit.j2")]
pub(crate) struct CommentEditTemplate {
    pub(crate) nav: Nav,
    pub(crate) comment: Comment,
    pub(crate) form: CommentFormView,
}

#[derive(Template)]
#[template(path = "comment_delete.j2")]
pub(crate) struct CommentDeleteTemplate {
    pub(crate) nav: Nav,
    pub(crate) comment: Comment,
    pub(crate) csrf_token: String,
}
