use std::collections::HashSet;

use services::{AppServices, ErrorKind, QuizStep};
use trivia_core::filter::SearchTerm;
use trivia_core::model::{CategoryId, QuestionDraft};
use trivia_core::{CategorySelector, PageNumber, QuizSelectionRequest};

fn draft(text: &str, category_id: CategoryId, difficulty: i64) -> QuestionDraft {
    QuestionDraft {
        text: text.to_owned(),
        answer: "answer".to_owned(),
        category_id,
        difficulty,
        rating: None,
    }
}

#[tokio::test]
async fn browse_search_and_quiz_over_sqlite() {
    let services = AppServices::new_sqlite("sqlite:file:memdb_trivia_flow?mode=memory&cache=shared", 2)
        .await
        .expect("connect sqlite");
    let categories = services.categories();
    let questions = services.questions();
    let quiz = services.quiz();

    let science = categories.create_category("Science".into()).await.unwrap();
    let art = categories.create_category("Art".into()).await.unwrap();
    let sports = categories.create_category("Sports".into()).await.unwrap();

    questions
        .create_question(draft("What is the chemical symbol for gold?", science, 2))
        .await
        .unwrap();
    questions
        .create_question(draft("Which planet is known as the Red Planet?", science, 1))
        .await
        .unwrap();
    questions
        .create_question(draft("Who painted the Starry Night?", art, 3))
        .await
        .unwrap();

    // Browsing: three questions over two pages of two.
    let first = questions.list_page(PageNumber::FIRST).await.unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(first.questions.len(), 2);
    let second = questions.list_page(PageNumber::new(2).unwrap()).await.unwrap();
    assert_eq!(second.questions.len(), 1);
    let err = questions
        .list_page(PageNumber::new(3).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Search.
    let found = questions
        .search(&SearchTerm::new("PLANET").unwrap(), PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(found.total, 1);

    // Category listing, including an existing but empty category.
    let empty = questions
        .list_by_category(sports, PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(empty.total, 0);

    // Quiz over the science pool.
    let mut request = QuizSelectionRequest::new(CategorySelector::Category(science), Vec::new());
    let mut seen = HashSet::new();
    while let QuizStep::Question(q) = quiz.next_question(&request).await.unwrap() {
        assert_eq!(q.category_id(), Some(science));
        assert!(seen.insert(q.id()), "question {} repeated", q.id());
        request.excluded_ids.insert(q.id());
    }
    assert_eq!(seen.len(), 2);

    // Deleting shrinks the quiz pool.
    let victim = *seen.iter().next().unwrap();
    questions.delete_question(victim).await.unwrap();
    let again = questions.delete_question(victim).await.unwrap_err();
    assert_eq!(again.kind(), ErrorKind::Unprocessable);

    let mut request = QuizSelectionRequest::new(CategorySelector::All, Vec::new());
    let mut remaining = 0;
    while let QuizStep::Question(q) = quiz.next_question(&request).await.unwrap() {
        request.excluded_ids.insert(q.id());
        remaining += 1;
    }
    assert_eq!(remaining, 2);
}

#[tokio::test]
async fn unrepresentable_category_id_is_not_found_over_sqlite() {
    let services = AppServices::new_sqlite("sqlite:file:memdb_trivia_huge_id?mode=memory&cache=shared", 10)
        .await
        .expect("connect sqlite");
    let huge = CategoryId::new(u64::MAX);

    let err = services
        .questions()
        .list_by_category(huge, PageNumber::FIRST)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let request = QuizSelectionRequest::new(CategorySelector::Category(huge), Vec::new());
    let err = services.quiz().next_question(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
