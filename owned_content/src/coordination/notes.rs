use crate::notes::{Note, NoteForm, NoteStore};
use crate::policy::{AccessPolicy, Action, Identity};
use crate::storage::Stores;
use crate::validation::ValidationError;

use super::errors::ContentError;

const NOTE: &str = "Note";

/// The caller's own notes. Anonymous callers must log in.
pub async fn list_notes(stores: &Stores, identity: &Identity) -> Result<Vec<Note>, ContentError> {
    let Some(user_id) = identity.user_id() else {
        return Err(ContentError::Unauthenticated);
    };

    let notes = NoteStore::list_by_author(stores, user_id).await?;
    Ok(AccessPolicy::visible(identity, notes))
}

pub async fn get_note(
    stores: &Stores,
    identity: &Identity,
    slug: &str,
) -> Result<Note, ContentError> {
    load_note(stores, identity, slug, Action::Read).await
}

/// Load a note for its edit or delete page
pub async fn get_note_for_edit(
    stores: &Stores,
    identity: &Identity,
    slug: &str,
) -> Result<Note, ContentError> {
    load_note(stores, identity, slug, Action::Edit).await
}

/// Create a note owned by the caller.
///
/// The slug is derived from the title when the form leaves it empty. A slug
/// already used by any note, whoever owns it, is rejected on the `slug` field.
#[tracing::instrument(skip(stores, form))]
pub async fn create_note(
    stores: &Stores,
    identity: &Identity,
    form: &NoteForm,
) -> Result<Note, ContentError> {
    AccessPolicy::check_create(identity)
        .into_result()
        .map_err(|denial| ContentError::denied(denial, NOTE, ""))?;
    let Some(author) = identity.user_id() else {
        return Err(ContentError::Unauthenticated);
    };

    let fields = form.validate()?;
    if NoteStore::slug_taken(stores, &fields.slug, None).await? {
        return Err(ValidationError::DuplicateSlug { slug: fields.slug }.into());
    }

    Ok(NoteStore::create(stores, author, fields).await?)
}

/// Replace a note's title, text and slug. Only its author may do this.
#[tracing::instrument(skip(stores, form))]
pub async fn update_note(
    stores: &Stores,
    identity: &Identity,
    slug: &str,
    form: &NoteForm,
) -> Result<Note, ContentError> {
    let note = load_note(stores, identity, slug, Action::Edit).await?;

    let fields = form.validate()?;
    if NoteStore::slug_taken(stores, &fields.slug, Some(note.id)).await? {
        return Err(ValidationError::DuplicateSlug { slug: fields.slug }.into());
    }

    Ok(NoteStore::update(stores, note.id, fields).await?)
}

#[tracing::instrument(skip(stores))]
pub async fn delete_note(
    stores: &Stores,
    identity: &Identity,
    slug: &str,
) -> Result<Note, ContentError> {
    let note = load_note(stores, identity, slug, Action::Delete).await?;
    NoteStore::delete(stores, note.id).await?;
    Ok(note)
}

async fn load_note(
    stores: &Stores,
    identity: &Identity,
    slug: &str,
    action: Action,
) -> Result<Note, ContentError> {
    // Private resources: ask anonymous callers to log in before looking anything up
    if !identity.is_authenticated() {
        return Err(ContentError::Unauthenticated);
    }

    let note = NoteStore::get_by_slug(stores, slug)
        .await?
        .ok_or_else(|| ContentError::not_found(NOTE, slug))?;

    AccessPolicy::check(identity, &note, action)
        .into_result()
        .map_err(|denial| ContentError::denied(denial, NOTE, slug))?;

    Ok(note)
}
