use delfos_core::bank::QuestionBank;
use delfos_core::evaluate::evaluate;
use delfos_core::select::select_question_ids;
use delfos_core::store::SessionStore;
use delfos_core::winner::WinnerLedger;
use delfos_model::session::Submission;
use indexmap::IndexMap;
use test_log::test;

fn credit_bank() -> QuestionBank {
    let questions = IndexMap::from([
        (
            "CRD0001".to_string(),
            delfos_config::bank::Question {
                id: "CRD0001".into(),
                question: "first credit question".into(),
                options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
                answer: "a".into(),
                description: Some("one".into()),
            },
        ),
        (
            "CRD0002".to_string(),
            delfos_config::bank::Question {
                id: "CRD0002".into(),
                question: "second credit question".into(),
                options: vec!["one".into(), "two".into(), "three".into(), "four".into()],
                answer: "d".into(),
                description: Some("four".into()),
            },
        ),
    ]);
    let profiles = IndexMap::from([(
        "credit".to_string(),
        delfos_config::bank::Profile {
            id: "credit".into(),
            prefix: "CRD".into(),
            questions,
        },
    )]);
    QuestionBank::from(delfos_config::bank::BankConfig { profiles })
}

/// One full participant round trip over the core operations: session
/// creation, question selection, grading, durable append, winner tally.
#[test(tokio::test)]
async fn full_participant_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let bank = credit_bank();
    let store = SessionStore::open(dir.path()).await.unwrap();
    let ledger = WinnerLedger::new(dir.path());

    let session = store.create("a@x.com", "s1").await.unwrap();
    assert_eq!(session.session_id, "s1");

    let profile = bank.profile("credit").unwrap();
    let question_ids =
        select_question_ids(profile, 2, &mut rand::thread_rng()).unwrap();
    assert_eq!(question_ids.len(), 2);
    for id in &question_ids {
        assert!(bank.lookup_question(id).is_some(), "{id} not in bank");
    }

    let user_answers = vec!["a".to_string(), "c".to_string()];
    let graded = evaluate(
        &bank,
        &["CRD0001".to_string(), "CRD0002".to_string()],
        &user_answers,
    )
    .unwrap();
    assert_eq!(graded.total_questions, 2);
    assert_eq!(graded.correct_answers, 1);
    assert_eq!(graded.incorrect_answers, 1);
    assert!((graded.score_percentage - 50.0).abs() < f64::EPSILON);

    store
        .append(
            "a@x.com",
            "s1",
            &Submission {
                question_ids: vec!["CRD0001".to_string(), "CRD0002".to_string()],
                answers: user_answers,
            },
        )
        .await
        .unwrap();
    let record = store.read("a@x.com", "s1").await.unwrap();
    assert_eq!(record.submissions.len(), 1);
    assert_eq!(record.submissions[0].answers, vec!["A", "C"]);

    assert_eq!(ledger.increment().await.unwrap(), 1);
    assert_eq!(ledger.read().await.unwrap(), 1);
}
