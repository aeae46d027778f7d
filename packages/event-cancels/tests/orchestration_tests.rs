//! Accepter dispatch, result merging and failure precedence.

mod common;

use common::*;
use event_cancels::common::{CancelFlag, EntityKind};
use event_cancels::domains::cancels::{handle_request, run_cascade, Campaign, Game};

fn campaign_and_game_request() -> event_cancels::domains::cancels::CancelRequest {
    let mut request = dependent_request("Campaign").with_accepters(["Campaign", "Game"]);
    request.header.campaign = vec![Campaign::new(0, 1, CancelFlag::Cancelled)];
    request.header.game = vec![Game::new(0, 7, CancelFlag::Cancelled)];
    request
}

#[tokio::test]
async fn accepters_run_in_request_order() {
    let deps = with_header();
    let mut request = campaign_and_game_request().with_accepters(["Game", "Campaign"]);
    request.header.campaign.push(Campaign::new(0, 2, CancelFlag::Cancelled));

    let outcome = run_cascade(&request, &deps.deps()).await;

    assert_eq!(
        deps.written_functions(),
        vec!["EventGame", "EventCampaign", "EventCampaign"]
    );
    assert_eq!(outcome.message.game.len(), 1);
    assert_eq!(outcome.message.campaign.len(), 2);
    assert_eq!(outcome.failure, None);
}

#[tokio::test]
async fn unknown_accepters_are_ignored() {
    let deps = with_header();
    let request = campaign_and_game_request().with_accepters(["Item", "Game", "header"]);

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventGame"]);
    assert!(output.is_success());
}

#[tokio::test]
async fn later_accepters_run_after_a_failure() {
    let deps = with_header();
    deps.reject(EntityKind::Campaign);

    let output = handle_request(&campaign_and_game_request(), &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventCampaign", "EventGame"]);
    assert_eq!(output.sql_update_error, "Event Campaign Data cannot cancel");

    let message = output.message.unwrap();
    assert!(message.campaign.is_empty());
    assert_eq!(message.game, vec![Game::new(EVENT, 7, CancelFlag::Cancelled)]);
}

#[tokio::test]
async fn first_failure_wins() {
    let deps = with_header();
    deps.reject(EntityKind::Campaign).reject(EntityKind::Game);

    let outcome = run_cascade(&campaign_and_game_request(), &deps.deps()).await;

    let failure = outcome.failure.expect("both handlers failed");
    assert_eq!(failure.kind, EntityKind::Campaign);
    assert_eq!(failure.message, "Event Campaign Data cannot cancel");
}

#[tokio::test]
async fn later_success_keeps_earlier_failure() {
    let deps = with_event();
    deps.reject(EntityKind::Game);
    let mut request = campaign_and_game_request().with_accepters(["Game", "Header"]);
    request.header.is_cancelled = CancelFlag::Reversed;

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(output.sql_update_result, Some(false));
    assert_eq!(output.sql_update_error, "Event Game Data cannot cancel");
    assert!(output.message.unwrap().header.is_some());
}

#[tokio::test]
async fn header_and_dependents_merge_into_one_message() {
    let deps = with_event();
    let mut request = campaign_and_game_request().with_accepters(["Header", "Campaign"]);
    request.header.is_cancelled = CancelFlag::Cancelled;
    request.header.campaign = vec![Campaign::new(0, 5, CancelFlag::Cancelled)];

    let output = handle_request(&request, &deps.deps()).await;

    let message = output.message.unwrap();
    assert!(message.header.is_some());
    // Two persisted campaigns from the cascade, then the requested one
    assert_eq!(
        message.campaign.iter().map(|c| c.campaign).collect::<Vec<_>>(),
        vec![1, 2, 5]
    );
    assert_eq!(message.game.len(), 2);
}

#[tokio::test]
async fn unknown_api_type_produces_no_message() {
    let deps = with_event();
    let mut request = header_request(CancelFlag::Cancelled);
    request.api_type = "reads".to_string();

    let output = handle_request(&request, &deps.deps()).await;

    assert!(deps.written().is_empty());
    assert_eq!(output.message, None);
    assert!(!output.api_processing_result);
    assert_eq!(output.api_processing_error, "unknown api type reads");
    assert!(!output.is_success());
}

#[tokio::test]
async fn output_echoes_request_routing_fields() {
    let deps = with_header();
    let mut request = campaign_and_game_request();
    request.service_label = "EVENT".to_string();

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(output.runtime_session_id, SESSION);
    assert_eq!(output.service_label, "EVENT");
    assert_eq!(output.api_type, "cancels");
    assert_eq!(output.accepter, vec!["Campaign", "Game"]);
}
