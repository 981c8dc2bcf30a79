mod common;

use bookshelf_app::books::models::{BookFilter, BookPayload};
use bookshelf_app::books::repository::BookRepository;
use bookshelf_app::editorials::repository::EditorialRepository;
use bookshelf_http::AppError;
use common::{book, described_book, editorial, memory_db};

fn by_name(name: &str) -> BookFilter {
    BookFilter {
        name: Some(name.to_string()),
        description: None,
    }
}

fn names(books: &[bookshelf_app::books::models::Book]) -> Vec<&str> {
    books.iter().map(|b| b.name.as_str()).collect()
}

#[tokio::test]
async fn list_on_empty_store_is_not_found() {
    let repo = BookRepository::new(memory_db().await);

    let err = repo.list(BookFilter::default()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn list_without_filters_returns_every_book() {
    let repo = BookRepository::new(memory_db().await);
    repo.bulk_create(vec![book("Rayuela"), book("Ficciones"), book("Aura")])
        .await
        .unwrap();

    let books = repo.list(BookFilter::default()).await.unwrap();
    assert_eq!(names(&books), vec!["Aura", "Ficciones", "Rayuela"]);
}

#[tokio::test]
async fn list_filters_by_name_or_description_ignoring_case() {
    let repo = BookRepository::new(memory_db().await);
    repo.bulk_create(vec![
        described_book("El Aleph", "cuentos"),
        described_book("Cien años de soledad", "novela sobre Macondo"),
        described_book("Pedro Páramo", "novela breve"),
    ])
    .await
    .unwrap();

    let books = repo.list(by_name("ALEPH")).await.unwrap();
    assert_eq!(names(&books), vec!["El Aleph"]);

    let books = repo
        .list(BookFilter {
            name: Some("aleph".to_string()),
            description: Some("MACONDO".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(names(&books), vec!["Cien años de soledad", "El Aleph"]);

    let books = repo
        .list(BookFilter {
            name: None,
            description: Some("novela".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(names(&books), vec!["Cien años de soledad", "Pedro Páramo"]);
}

#[tokio::test]
async fn list_with_no_match_is_not_found() {
    let repo = BookRepository::new(memory_db().await);
    repo.create(book("Rayuela")).await.unwrap();

    let err = repo.list(by_name("quijote")).await.unwrap_err();
    match err {
        AppError::NotFound { message, .. } => {
            assert_eq!(message, "Books not found for name: quijote, description: none")
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn list_matches_wildcards_literally() {
    let repo = BookRepository::new(memory_db().await);
    repo.bulk_create(vec![book("100% Rust"), book("1000 Rust tips")])
        .await
        .unwrap();

    let books = repo.list(by_name("100%")).await.unwrap();
    assert_eq!(names(&books), vec!["100% Rust"]);
}

#[tokio::test]
async fn get_returns_current_values() {
    let repo = BookRepository::new(memory_db().await);
    let created = repo
        .create(BookPayload {
            author: Some("Julio Cortázar".to_string()),
            genre: Some("novela".to_string()),
            price: Some(19.9),
            ..book("Rayuela")
        })
        .await
        .unwrap();

    let fetched = repo.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.author.as_deref(), Some("Julio Cortázar"));
    assert_eq!(fetched.price, Some(19.9));

    let err = repo.get("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn single_create_rejects_case_insensitive_duplicate() {
    let repo = BookRepository::new(memory_db().await);
    repo.create(book("Rayuela")).await.unwrap();

    let err = repo.create(book("RAYUELA")).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate { .. }));
    assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn single_create_rejects_name_contained_in_existing_name() {
    let repo = BookRepository::new(memory_db().await);
    repo.create(book("El Aleph y otros cuentos")).await.unwrap();

    let err = repo.create(book("aleph")).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate { .. }));
}

#[tokio::test]
async fn bulk_create_skips_duplicate_check() {
    let repo = BookRepository::new(memory_db().await);
    repo.create(book("Rayuela")).await.unwrap();

    let created = repo
        .bulk_create(vec![book("rayuela"), book("Rayuela")])
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_ne!(created[0].id, created[1].id);

    let books = repo.list(by_name("rayuela")).await.unwrap();
    assert_eq!(books.len(), 3);
}

#[tokio::test]
async fn bulk_create_with_no_items_is_a_no_op() {
    let repo = BookRepository::new(memory_db().await);
    assert!(repo.bulk_create(Vec::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn single_create_requires_known_editorial() {
    let db = memory_db().await;
    let editorials = EditorialRepository::new(db.clone());
    let repo = BookRepository::new(db);

    let err = repo
        .create(BookPayload {
            editorial_id: Some("nope".to_string()),
            ..book("Rayuela")
        })
        .await
        .unwrap_err();
    match err {
        AppError::NotFound { message, .. } => assert_eq!(message, "Editorial not found"),
        other => panic!("expected not found, got {other:?}"),
    }

    let planeta = editorials.create(editorial("Planeta")).await.unwrap();
    let created = repo
        .create(BookPayload {
            editorial_id: Some(planeta.id.clone()),
            ..book("Rayuela")
        })
        .await
        .unwrap();
    assert_eq!(created.editorial_id, Some(planeta.id));
}

#[tokio::test]
async fn bulk_create_does_not_check_editorial() {
    let repo = BookRepository::new(memory_db().await);

    let created = repo
        .bulk_create(vec![BookPayload {
            editorial_id: Some("unknown".to_string()),
            ..book("Rayuela")
        }])
        .await
        .unwrap();
    assert_eq!(created[0].editorial_id.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn update_replaces_every_field_and_returns_the_same_row() {
    let db = memory_db().await;
    let editorials = EditorialRepository::new(db.clone());
    let repo = BookRepository::new(db);
    let alfaguara = editorials.create(editorial("Alfaguara")).await.unwrap();

    let target = repo
        .create(BookPayload {
            author: Some("Anon".to_string()),
            description: Some("draft".to_string()),
            ..book("Borrador")
        })
        .await
        .unwrap();
    // A second row already carrying the new name: re-reading by name would
    // return this one.
    let twin = repo.bulk_create(vec![book("Rayuela")]).await.unwrap().remove(0);

    let updated = repo
        .update(
            &target.id,
            BookPayload {
                name: "Rayuela".to_string(),
                author: Some("Julio Cortázar".to_string()),
                description: None,
                genre: Some("novela".to_string()),
                image: Some("http://x/rayuela.png".to_string()),
                price: Some(25.0),
                editorial_id: Some(alfaguara.id.clone()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, target.id);
    assert_ne!(updated.id, twin.id);
    assert_eq!(updated.name, "Rayuela");
    assert_eq!(updated.author.as_deref(), Some("Julio Cortázar"));
    assert_eq!(updated.description, None);
    assert_eq!(updated.genre.as_deref(), Some("novela"));
    assert_eq!(updated.image.as_deref(), Some("http://x/rayuela.png"));
    assert_eq!(updated.price, Some(25.0));
    assert_eq!(updated.editorial_id, Some(alfaguara.id));

    assert_eq!(repo.get(&target.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_of_missing_book_is_not_found() {
    let repo = BookRepository::new(memory_db().await);

    let err = repo.update("missing", book("Rayuela")).await.unwrap_err();
    match err {
        AppError::NotFound { message, .. } => assert_eq!(message, "Book not found"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn update_rejects_unknown_editorial() {
    let repo = BookRepository::new(memory_db().await);
    let created = repo.create(book("Rayuela")).await.unwrap();

    let err = repo
        .update(
            &created.id,
            BookPayload {
                editorial_id: Some("unknown".to_string()),
                ..book("Rayuela")
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(repo.get(&created.id).await.unwrap().editorial_id, None);
}

#[tokio::test]
async fn delete_twice_fails_the_second_time() {
    let repo = BookRepository::new(memory_db().await);
    let created = repo.create(book("Rayuela")).await.unwrap();

    repo.delete(&created.id).await.unwrap();
    let err = repo.delete(&created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(matches!(
        repo.get(&created.id).await.unwrap_err(),
        AppError::NotFound { .. }
    ));
}

#[tokio::test]
async fn non_ascii_names_match_in_any_case() {
    let repo = BookRepository::new(memory_db().await);
    let created = repo
        .create(described_book("Ética", "ENSAYO SOBRE LA FELICIDAD"))
        .await
        .unwrap();

    for needle in ["Ética", "ÉTICA", "ética"] {
        let books = repo.list(by_name(needle)).await.unwrap();
        assert_eq!(names(&books), vec!["Ética"], "searching {needle}");
    }

    let books = repo
        .list(BookFilter {
            name: None,
            description: Some("felicidad".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(books[0].id, created.id);
}

#[tokio::test]
async fn single_create_rejects_non_ascii_duplicate() {
    let repo = BookRepository::new(memory_db().await);
    repo.create(book("Ética")).await.unwrap();

    for candidate in ["Ética", "ética", "ÉTICA"] {
        let err = repo.create(book(candidate)).await.unwrap_err();
        assert!(
            matches!(err, AppError::Duplicate { .. }),
            "{candidate} was accepted"
        );
    }
    assert_eq!(repo.list(BookFilter::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_keeps_search_in_step_with_the_new_name() {
    let repo = BookRepository::new(memory_db().await);
    let created = repo.create(book("Borrador")).await.unwrap();

    repo.update(&created.id, book("Óyeme")).await.unwrap();

    let books = repo.list(by_name("ÓYEME")).await.unwrap();
    assert_eq!(books[0].id, created.id);
    assert!(matches!(
        repo.list(by_name("borrador")).await.unwrap_err(),
        AppError::NotFound { .. }
    ));
}

#[tokio::test]
async fn bulk_create_stores_batches_larger_than_one_statement() {
    let repo = BookRepository::new(memory_db().await);
    let payloads: Vec<BookPayload> = (0..500)
        .map(|i| described_book(&format!("Tomo {i:03}"), "colección completa"))
        .collect();

    let created = repo.bulk_create(payloads).await.unwrap();
    assert_eq!(created.len(), 500);

    let stored = repo.list(BookFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 500);
    assert_eq!(stored[0].name, "Tomo 000");
    assert_eq!(stored[499].name, "Tomo 499");
    assert_eq!(repo.list(by_name("tomo 123")).await.unwrap().len(), 1);
}
