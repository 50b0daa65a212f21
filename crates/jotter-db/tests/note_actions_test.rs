//! Note action behavior against the in-memory repository.
//!
//! Covers validation ordering, owner scoping, not-found handling for update
//! and delete, and the documented last-write-wins race.

use jotter_core::{
    dispatch, load, FormData, MutationOutcome, MutationRequest, NoteInput, UserId,
};
use jotter_db::{Error, MemoryNoteRepository, NoteRepository, RepoCall};

fn create_form(title: &str, body: &str) -> FormData {
    FormData::new()
        .with("intent", "create")
        .with("title", title)
        .with("body", body)
}

async fn seed(repo: &MemoryNoteRepository, owner: UserId) -> jotter_core::Note {
    let note = repo
        .create_note(owner, "Seed", "seed body")
        .await
        .expect("seed note");
    repo.clear_calls();
    note
}

#[tokio::test]
async fn test_create_passes_owner_title_and_body_to_repository() {
    let repo = MemoryNoteRepository::new();
    let u1 = UserId::new();

    let request = MutationRequest::from_form(&create_form("Groceries", "Milk, eggs"), None).unwrap();
    let outcome = dispatch(&repo, u1, request).await.unwrap();

    assert_eq!(
        repo.calls(),
        vec![RepoCall::CreateNote {
            owner: u1,
            title: "Groceries".to_string(),
            body: "Milk, eggs".to_string(),
        }]
    );
    match &outcome {
        MutationOutcome::Created(note) => {
            assert_eq!(note.owner_id, u1);
            assert_eq!(outcome.redirect_location(), format!("/notes/{}", note.id));
        }
        other => panic!("Expected Created, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_with_empty_title_never_reaches_repository() {
    let repo = MemoryNoteRepository::new();

    let request = MutationRequest::from_form(&create_form("", "body"), None).unwrap();
    let err = dispatch(&repo, UserId::new(), request).await.unwrap_err();

    match err {
        Error::ValidationFailed(errors) => {
            assert_eq!(errors.title.as_deref(), Some("Title is required"));
            assert_eq!(errors.body, None);
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_create_with_empty_body_reports_body_only() {
    let repo = MemoryNoteRepository::new();

    let request = MutationRequest::from_form(&create_form("Title", ""), None).unwrap();
    let err = dispatch(&repo, UserId::new(), request).await.unwrap_err();

    match err {
        Error::ValidationFailed(errors) => {
            assert_eq!(errors.title, None);
            assert_eq!(errors.body.as_deref(), Some("Body is required"));
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_titles_are_allowed() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();

    for _ in 0..2 {
        let request = MutationRequest::Create {
            input: NoteInput::new("Same", "body"),
        };
        dispatch(&repo, owner, request).await.unwrap();
    }

    assert_eq!(repo.get_note_list_items(owner).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_replaces_title_and_body() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let note = seed(&repo, owner).await;

    let request = MutationRequest::Update {
        note_id: note.id,
        input: NoteInput::new("New title", "New body"),
    };
    let outcome = dispatch(&repo, owner, request).await.unwrap();

    assert_eq!(outcome.redirect_location(), format!("/notes/{}", note.id));
    let stored = load(&repo, owner, note.id).await.unwrap();
    assert_eq!(stored.title, "New title");
    assert_eq!(stored.body, "New body");
    assert!(stored.updated_at >= note.updated_at);
}

#[tokio::test]
async fn test_update_validation_runs_before_repository() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let note = seed(&repo, owner).await;

    let request = MutationRequest::Update {
        note_id: note.id,
        input: NoteInput::new("", "body"),
    };
    let err = dispatch(&repo, owner, request).await.unwrap_err();

    assert!(matches!(err, Error::ValidationFailed(_)));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_update_of_foreign_note_is_not_found() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let intruder = UserId::new();
    let note = seed(&repo, owner).await;

    let request = MutationRequest::Update {
        note_id: note.id,
        input: NoteInput::new("Hijacked", "x"),
    };
    let err = dispatch(&repo, intruder, request).await.unwrap_err();

    assert!(matches!(err, Error::NoteNotFound(id) if id == note.id));
    assert_eq!(
        repo.calls(),
        vec![RepoCall::EditNote {
            id: note.id,
            owner: intruder,
            title: "Hijacked".to_string(),
            body: "x".to_string(),
        }]
    );
    assert_eq!(load(&repo, owner, note.id).await.unwrap().title, "Seed");
}

#[tokio::test]
async fn test_delete_of_foreign_note_is_not_found() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let note = seed(&repo, owner).await;

    let err = dispatch(
        &repo,
        UserId::new(),
        MutationRequest::Delete { note_id: note.id },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::NoteNotFound(_)));
    assert!(load(&repo, owner, note.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let repo = MemoryNoteRepository::new();
    let u1 = UserId::new();
    let n1 = seed(&repo, u1).await;

    let outcome = dispatch(&repo, u1, MutationRequest::Delete { note_id: n1.id })
        .await
        .unwrap();

    assert_eq!(outcome, MutationOutcome::Deleted(n1.id));
    assert_eq!(outcome.redirect_location(), "/notes");
    assert!(matches!(
        load(&repo, u1, n1.id).await,
        Err(Error::NoteNotFound(id)) if id == n1.id
    ));
}

#[tokio::test]
async fn test_second_delete_is_not_a_silent_success() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let note = seed(&repo, owner).await;

    dispatch(&repo, owner, MutationRequest::Delete { note_id: note.id })
        .await
        .unwrap();
    let again = dispatch(&repo, owner, MutationRequest::Delete { note_id: note.id }).await;

    assert!(matches!(again, Err(Error::NoteNotFound(_))));
}

#[tokio::test]
async fn test_unknown_intent_never_reaches_repository() {
    let repo = MemoryNoteRepository::new();
    let form = FormData::new()
        .with("intent", "publish")
        .with("title", "t")
        .with("body", "b");

    let result = MutationRequest::from_form(&form, None);

    assert!(matches!(result, Err(Error::BadRequest(_))));
    assert!(repo.calls().is_empty());
}

/// Concurrent updates are not coordinated: the last write to land wins and
/// the earlier one is silently overwritten. This is an accepted limitation.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_racing_updates_are_last_write_wins() {
    let repo = MemoryNoteRepository::new();
    let owner = UserId::new();
    let note = seed(&repo, owner).await;

    let first = MutationRequest::Update {
        note_id: note.id,
        input: NoteInput::new("From tab A", "a"),
    };
    let second = MutationRequest::Update {
        note_id: note.id,
        input: NoteInput::new("From tab B", "b"),
    };

    let (repo_a, repo_b) = (repo.clone(), repo.clone());
    let tab_a = tokio::spawn(async move { dispatch(&repo_a, owner, first).await });
    let tab_b = tokio::spawn(async move { dispatch(&repo_b, owner, second).await });
    let (a, b) = tokio::join!(tab_a, tab_b);

    // Neither submission sees a conflict.
    assert!(matches!(a.unwrap(), Ok(MutationOutcome::Updated(_))));
    assert!(matches!(b.unwrap(), Ok(MutationOutcome::Updated(_))));

    let edits = repo
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RepoCall::EditNote { .. }))
        .count();
    assert_eq!(edits, 2);

    // Whichever landed last is stored whole; fields are never mixed.
    let stored = load(&repo, owner, note.id).await.unwrap();
    let pair = (stored.title.as_str(), stored.body.as_str());
    assert!(
        pair == ("From tab A", "a") || pair == ("From tab B", "b"),
        "unexpected stored note: {:?}",
        pair
    );
}
