//! `Workspace` driven over the real HTTP gateway against a mock backend.

use desk_config::ApiConfig;
use desk_core::enums::{SuggestionPart, TicketPriority};
use desk_engine::{ClipboardChain, Outcome, Phase, Workspace};
use desk_gateway::HttpGateway;
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ticket(priority: &str) -> String {
    json!({
        "id": 7,
        "subject": "Can't log in",
        "requesterEmail": "a@b.com",
        "body": "Reset link expired.",
        "status": "OPEN",
        "priority": priority,
        "category": null,
        "tags": ["login"],
        "createdAt": "2025-01-08T10:15:30Z",
        "updatedAt": "2025-01-08T10:15:30Z"
    })
    .to_string()
}

fn workspace(server: &ServerGuard) -> Workspace<HttpGateway> {
    let config = ApiConfig {
        base_url: format!("{}/api", server.url()),
        ..Default::default()
    };
    Workspace::new(
        HttpGateway::new(&config).unwrap(),
        ClipboardChain::new(Vec::new()),
    )
}

async fn mock_load(server: &mut ServerGuard) {
    server
        .mock("GET", "/api/tickets/7")
        .with_header("content-type", "application/json")
        .with_body(ticket("MEDIUM"))
        .create_async()
        .await;
    server
        .mock("GET", "/api/tickets/7/notes")
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;
}

#[tokio::test]
async fn apply_priority_sends_only_priority() {
    let mut server = Server::new_async().await;
    mock_load(&mut server).await;
    server
        .mock("POST", "/api/ai/triage")
        .match_body(Matcher::Json(json!({ "ticketId": 7 })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "category": "AUTH",
                "priority": "URGENT",
                "tags": ["password-reset"],
                "rationale": "Locked out.",
                "aiRunId": 900
            })
            .to_string(),
        )
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/api/tickets/7")
        .match_body(Matcher::Json(json!({ "priority": "URGENT" })))
        .with_header("content-type", "application/json")
        .with_body(ticket("URGENT"))
        .create_async()
        .await;

    let ws = workspace(&server);
    assert_eq!(ws.load(7).await, Outcome::Applied);
    assert_eq!(ws.view().phase, Phase::Ready);
    assert_eq!(ws.run_triage().await, Outcome::Applied);
    assert_eq!(
        ws.apply_suggestion(SuggestionPart::Priority).await,
        Outcome::Applied
    );

    patch.assert_async().await;
    let view = ws.view();
    assert_eq!(view.ticket.unwrap().priority, TicketPriority::Urgent);
    assert_eq!(view.buffer.priority(), TicketPriority::Urgent);
    assert_eq!(view.buffer.tags_text(), "login");
}

#[tokio::test]
async fn ai_failure_surfaces_backend_message() {
    let mut server = Server::new_async().await;
    mock_load(&mut server).await;
    server
        .mock("POST", "/api/ai/triage")
        .with_status(502)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"AI_FAILED","message":"AI provider unavailable"}"#)
        .create_async()
        .await;

    let ws = workspace(&server);
    ws.load(7).await;
    assert_eq!(ws.run_triage().await, Outcome::Failed);

    let view = ws.view();
    assert_eq!(
        view.ai.triage().error(),
        Some("AI triage failed: 502: AI provider unavailable")
    );
    assert!(view.error.is_none());
}
