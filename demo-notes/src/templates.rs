use askama::Template;

use owned_content::{FormErrors, Note};
use owned_content_axum::{AuthUser, OC_LOGIN_URL, OC_LOGOUT_URL, OC_SIGNUP_URL};

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

/// Values shown in the add and edit forms
pub(crate) struct NoteFormView {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) slug: String,
    pub(crate) errors: FormErrors,
    pub(crate) csrf_token: String,
}

#[derive(Template)]
#[template(path = "home.j2")]
pub(crate) struct HomeTemplate {
    pub(crate) nav: Nav,
}

#[derive(Template)]
#[template(path = "list.j2")]
pub(crate) struct ListTemplate {
    pub(crate) nav: Nav,
    pub(crate) notes: Vec<Note>,
}

#[derive(Template)]
#[template(path = "form.j2")]
pub(crate) struct FormTemplate {
    pub(crate) nav: Nav,
    pub(crate) heading: &'static str,
    pub(crate) action: String,
    pub(crate) form: NoteFormView,
}

#[derive(Template)]
#[template(path = "done.j2")]
pub(crate) struct DoneTemplate {
    pub(crate) nav: Nav,
}

#[derive(Template)]
#[template(path = "detail.j2")]
pub(crate) struct DetailTemplate {
    pub(crate) nav: Nav,
    pub(crate) note: Note,
}

#[derive(Template)]
#[template(path = "delete.j2")]
pub(crate) struct DeleteTemplate {
    pub(crate) nav: Nav,
    pub(crate) note: Note,
    pub(crate) csrf_token: String,
}
