// Integration tests for ChatController
// Drive full exchanges against the mock HTTP client: ordering, cancellation,
// the single in-flight session rule and failure handling.

mod common;

use std::time::Duration;

use bytes::Bytes;
use common::*;
use lexa::chat::{ChatUpdate, RejectReason, SendOutcome, Termination};

#[tokio::test]
async fn test_tokens_assembled_in_arrival_order() {
    let body = answer_body(&["Der ", "Vert", "rag ", "ist ", "gültig."]);
    // Deliver in awkward pieces, splitting records and multi-byte characters
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::Stream(
        body.as_bytes().chunks(7).map(Bytes::copy_from_slice).collect(),
    ));
    let mut chat = controller(&mock);

    assert_eq!(chat.send("Ist der Vertrag gültig?"), SendOutcome::Started(1));
    let updates = run_to_end(&mut chat).await;

    let tokens: Vec<&str> = updates
        .iter()
        .filter_map(|u| match u {
            ChatUpdate::Token(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(tokens, vec!["Der ", "Vert", "rag ", "ist ", "gültig."]);
    assert_eq!(updates[0], ChatUpdate::Sources(2));

    let last = chat.state().last().unwrap();
    assert_eq!(last.content, "Der Vertrag ist gültig.");
    assert_eq!(last.source_count(), 2);
    assert!(!last.streaming);
}

#[tokio::test]
async fn test_exactly_one_terminal_update() {
    let mock = MockHttpConfig::new()
        .with_stream(&[format!("{}{}", token_frame("a"), done_frame()).as_str()])
        .build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    let updates = run_to_end(&mut chat).await;
    let finished = updates
        .iter()
        .filter(|u| matches!(u, ChatUpdate::Finished(_)))
        .count();
    assert_eq!(finished, 1);

    // The session's own end of stream never reaches the conversation
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(chat.drain().is_empty());
    assert!(chat.recv().await.is_none());
}

#[tokio::test]
async fn test_frames_after_done_are_not_applied() {
    let body = format!("{}{}{}", token_frame("vorher"), done_frame(), token_frame("nachher"));
    let mock = MockHttpConfig::new().with_stream(&[body.as_str()]).build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    run_to_end(&mut chat).await;
    assert_eq!(chat.state().last().unwrap().content, "vorher");
}

#[tokio::test]
async fn test_cancel_preserves_partial_content() {
    let mock = MockHttpConfig::new()
        .with_hanging_stream(&[token_frame("Der ").as_str(), token_frame("Vertrag").as_str()])
        .build();
    let mut chat = controller(&mock);

    chat.send("Ist der Vertrag gültig?");
    assert_eq!(chat.recv().await, Some(ChatUpdate::Token("Der ".to_string())));
    assert_eq!(chat.recv().await, Some(ChatUpdate::Token("Vertrag".to_string())));

    assert!(chat.stop());

    let last = chat.state().last().unwrap();
    assert_eq!(last.content, "Der Vertrag");
    assert!(!last.streaming);
    assert!(!chat.is_streaming());
    assert!(chat.state().error().is_none());
    assert!(chat.recv().await.is_none());

    // Stopping again does nothing
    assert!(!chat.stop());
}

#[tokio::test]
async fn test_stop_applies_queued_events_first() {
    let mock = MockHttpConfig::new()
        .with_hanging_stream(&[format!("{}{}", token_frame("eins "), token_frame("zwei")).as_str()])
        .build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    assert_eq!(chat.recv().await, Some(ChatUpdate::Token("eins ".to_string())));
    // Give the session time to queue the second token
    tokio::time::sleep(Duration::from_millis(50)).await;

    chat.stop();
    assert_eq!(chat.state().last().unwrap().content, "eins zwei");
}

#[tokio::test]
async fn test_send_while_streaming_is_rejected() {
    let mock = MockHttpConfig::new()
        .with_hanging_stream(&[token_frame("läuft").as_str()])
        .build();
    let mut chat = controller(&mock);

    assert_eq!(chat.send("Erste Frage"), SendOutcome::Started(1));
    assert_eq!(chat.recv().await, Some(ChatUpdate::Token("läuft".to_string())));

    let before = chat.state().messages().len();
    assert_eq!(
        chat.send("Zweite Frage"),
        SendOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(chat.state().messages().len(), before);
    assert_eq!(mock.get_requests().len(), 1);
    assert_eq!(chat.active_session(), Some(1));

    chat.stop();
}

#[tokio::test]
async fn test_malformed_sources_does_not_abort_stream() {
    let body = format!(
        "{}{}{}",
        sources_frame("[{kaputt"),
        token_frame("weiter"),
        done_frame()
    );
    let mock = MockHttpConfig::new().with_stream(&[body.as_str()]).build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    let updates = run_to_end(&mut chat).await;
    assert_eq!(
        updates,
        vec![
            ChatUpdate::Token("weiter".to_string()),
            ChatUpdate::Finished(Termination::Completed),
        ]
    );

    let last = chat.state().last().unwrap();
    assert_eq!(last.content, "weiter");
    assert!(last.sources.is_none());
}

#[tokio::test]
async fn test_transport_error_keeps_partial_content() {
    let mock = MockHttpConfig::new()
        .with_stream_error(
            &[token_frame("Die Haft ung ").as_str()],
            HttpError::Io("connection reset by peer".to_string()),
        )
        .build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    let updates = run_to_end(&mut chat).await;
    assert!(matches!(
        updates.last(),
        Some(ChatUpdate::Finished(Termination::Failed(_)))
    ));

    let last = chat.state().last().unwrap();
    // Not normalized on failure
    assert_eq!(last.content, "Die Haft ung ");
    assert!(!last.streaming);
    let error = chat.state().error().unwrap();
    assert!(error.contains("connection reset by peer"), "{}", error);
}

#[tokio::test]
async fn test_error_status_surfaces_detail() {
    let mock = MockHttpConfig::new()
        .with_json_response(503, r#"{"detail": "LLM provider unavailable"}"#)
        .build();
    let mut chat = controller(&mock);

    chat.send("Frage");
    let updates = run_to_end(&mut chat).await;
    assert_eq!(
        updates,
        vec![ChatUpdate::Finished(Termination::Failed(
            "LLM provider unavailable".to_string()
        ))]
    );
    assert_eq!(chat.state().error(), Some("LLM provider unavailable"));
    assert_eq!(chat.state().messages().len(), 2);
    assert!(chat.state().last().unwrap().content.is_empty());
}

#[tokio::test]
async fn test_new_send_clears_previous_error() {
    let mock = MockHttpConfig::new()
        .with_json_response(500, r#"{"detail": "Interner Fehler"}"#)
        .build();
    let mut chat = controller(&mock);

    chat.send("Erste");
    run_to_end(&mut chat).await;
    assert!(chat.state().error().is_some());

    mock.set_default_response(MockResponse::Stream(to_bytes(&[answer_body(&["Gut."]).as_str()])));
    chat.send("Zweite");
    assert!(chat.state().error().is_none());
    run_to_end(&mut chat).await;
    assert!(chat.state().error().is_none());

    // The failed exchange stays in the history
    let body = mock.get_requests()[1].json_body().unwrap();
    assert_eq!(body["conversation_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_late_events_after_clear_are_ignored() {
    let mock = MockHttpConfig::new()
        .with_hanging_stream(&[token_frame("alt").as_str()])
        .build();
    let mut chat = controller(&mock);

    chat.send("Alte Frage");
    assert_eq!(chat.recv().await, Some(ChatUpdate::Token("alt".to_string())));

    chat.clear();
    assert!(chat.state().is_empty());
    assert!(!chat.is_streaming());

    // Let the cancelled session deliver its terminal message
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(chat.drain().is_empty());
    assert!(chat.state().is_empty());

    mock.set_default_response(MockResponse::Stream(to_bytes(&[answer_body(&["neu"]).as_str()])));
    assert_eq!(chat.send("Neue Frage"), SendOutcome::Started(2));
    run_to_end(&mut chat).await;

    let messages = chat.state().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "Neue Frage");
    assert_eq!(messages[1].content, "neu");

    let body = mock.get_requests()[1].json_body().unwrap();
    assert!(body["conversation_history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_completed_answer_is_normalized() {
    let mock = MockHttpConfig::new()
        .with_stream(&[answer_body(&[
            "⚖️ Die ",
            "straf recht lichen ",
            "Folgen : ** wichtig **  ",
            "Siehe Art .  5 ",
            "Hinweis: Dieser Chat ersetzt keine Rechts beratung.",
        ]).as_str()])
        .build();
    let mut chat = controller(&mock);

    chat.send("Welche Folgen?");
    run_to_end(&mut chat).await;

    assert_eq!(
        chat.state().last().unwrap().content,
        "Die strafrechtlichen Folgen: **wichtig** Siehe Art. 5\n\nHinweis: Dieser Chat ersetzt keine Rechtsberatung."
    );
}
