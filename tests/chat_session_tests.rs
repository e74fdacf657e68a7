mod common;

use std::sync::Arc;

use common::{CountingReporter, GatedClient, StaticClient};
use knowledge_chat::message::{Message, Sender, greeting};
use knowledge_chat::services::chat_session::{ChatSession, ReplyOutcome};

fn session_with(client: Arc<StaticClient>) -> (ChatSession, Arc<CountingReporter>) {
    let reporter = Arc::new(CountingReporter::default());
    (ChatSession::new(client, reporter.clone()), reporter)
}

#[tokio::test]
async fn gravity_scenario() {
    let client = Arc::new(StaticClient::answering("Gravity is a fundamental force..."));
    let (session, reporter) = session_with(client.clone());
    assert_eq!(session.transcript().await, greeting());

    session.update_input("What is gravity?").await;
    let pending = session.submit().await.expect("submission accepted");

    // The user message and the cleared input are visible before the reply.
    let transcript = session.transcript().await;
    assert!(transcript.len() >= 3);
    assert_eq!(transcript[2], Message::user("What is gravity?"));
    assert_eq!(session.input().await, "");

    let outcome = pending.wait().await;
    assert_eq!(outcome, ReplyOutcome::Answered(Message::bot("Gravity is a fundamental force...")));

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[3], Message::bot("Gravity is a fundamental force..."));
    assert_eq!(client.prompts(), vec!["What is gravity?".to_string()]);
    assert_eq!(reporter.count(), 0);
}

#[tokio::test]
async fn answer_is_appended_after_user_message() {
    let (session, _) = session_with(Arc::new(StaticClient::answering("42")));
    session.update_input("meaning of life").await;
    session.submit().await.unwrap().wait().await;

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[2].sender(), Sender::User);
    assert_eq!(transcript[3], Message::bot("42"));
}

#[tokio::test]
async fn failed_request_keeps_user_message_and_reports_once() {
    let (session, reporter) = session_with(Arc::new(StaticClient::failing()));
    session.update_input("anyone there?").await;
    let outcome = session.submit().await.unwrap().wait().await;

    assert!(matches!(outcome, ReplyOutcome::Failed(_)));
    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2], Message::user("anyone there?"));
    assert!(transcript.iter().skip(2).all(|m| m.sender() == Sender::User));
    assert_eq!(session.input().await, "");
    assert_eq!(reporter.count(), 1);
    assert_eq!(*reporter.prompts.lock().unwrap(), vec!["anyone there?".to_string()]);
}

#[tokio::test]
async fn empty_and_whitespace_input_do_nothing() {
    let client = Arc::new(StaticClient::answering("unused"));
    let (session, reporter) = session_with(client.clone());

    for input in ["", " ", "\t", "\n  \r\n"] {
        session.update_input(input).await;
        assert!(session.submit().await.is_none());
        assert_eq!(session.len().await, 2);
        assert_eq!(session.input().await, input);
    }
    assert!(client.prompts().is_empty());
    assert_eq!(reporter.count(), 0);
}

#[tokio::test]
async fn repeated_input_updates_append_once() {
    let client = Arc::new(StaticClient::answering("ok"));
    let (session, _) = session_with(client.clone());

    for _ in 0..3 {
        session.update_input("same text").await;
    }
    session.submit().await.unwrap().wait().await;

    // Input was cleared, so a second submit is a no-op.
    assert!(session.submit().await.is_none());

    let users = session
        .transcript()
        .await
        .into_iter()
        .filter(|m| m.text() == "same text")
        .count();
    assert_eq!(users, 1);
    assert_eq!(session.len().await, 4);
    assert_eq!(client.prompts().len(), 1);
}

#[tokio::test]
async fn update_input_replaces_previous_text() {
    let (session, _) = session_with(Arc::new(StaticClient::answering("ok")));
    session.update_input("first").await;
    session.update_input("second").await;
    assert_eq!(session.input().await, "second");

    session.submit().await.unwrap().wait().await;
    assert_eq!(session.transcript().await[2], Message::user("second"));
}

#[tokio::test]
async fn replies_land_in_completion_order() {
    let client = Arc::new(GatedClient::default());
    let reporter = Arc::new(CountingReporter::default());
    let session = ChatSession::new(client.clone(), reporter.clone());

    let slow_gate = client.gate("slow question");
    let fast_gate = client.gate("fast question");

    session.update_input("slow question").await;
    let slow = session.submit().await.unwrap();
    session.update_input("fast question").await;
    let fast = session.submit().await.unwrap();

    fast_gate.send(Ok("fast answer".to_string())).unwrap();
    fast.wait().await;
    slow_gate.send(Ok("slow answer".to_string())).unwrap();
    slow.wait().await;

    let texts: Vec<String> = session
        .transcript()
        .await
        .iter()
        .skip(2)
        .map(|m| m.text().to_string())
        .collect();
    assert_eq!(texts, vec!["slow question", "fast question", "fast answer", "slow answer"]);
    assert_eq!(reporter.count(), 0);
}

#[tokio::test]
async fn one_failure_does_not_affect_other_in_flight_reply() {
    let client = Arc::new(GatedClient::default());
    let reporter = Arc::new(CountingReporter::default());
    let session = ChatSession::new(client.clone(), reporter.clone());

    let first_gate = client.gate("first");
    let second_gate = client.gate("second");

    session.update_input("first").await;
    let first = session.submit().await.unwrap();
    session.update_input("second").await;
    let second = session.submit().await.unwrap();

    drop(first_gate);
    assert!(matches!(first.wait().await, ReplyOutcome::Failed(_)));
    second_gate.send(Ok("answer two".to_string())).unwrap();
    second.wait().await;

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 5);
    assert_eq!(transcript[4], Message::bot("answer two"));
    assert_eq!(reporter.count(), 1);
}

#[tokio::test]
async fn dropped_handle_still_appends_reply() {
    let (session, _) = session_with(Arc::new(StaticClient::answering("late")));
    let mut changes = session.subscribe();

    session.update_input("fire and forget").await;
    drop(session.submit().await.unwrap());

    while *changes.borrow_and_update() < 4 {
        changes.changed().await.unwrap();
    }
    assert_eq!(session.transcript().await[3], Message::bot("late"));
}
