//! Campaign, game and point transaction cancellation, including the upward
//! reversal of the header.

mod common;

use common::*;
use event_cancels::common::{CancelFlag, EntityKind};
use event_cancels::domains::cancels::{handle_request, Campaign, Game};
use serde_json::json;

#[tokio::test]
async fn reversed_game_reverses_header_without_returning_it() {
    let deps = with_header();
    let mut request = dependent_request("Game");
    request.header.game = vec![Game::new(0, 7, CancelFlag::Reversed)];

    let output = handle_request(&request, &deps.deps()).await;

    let written = deps.written();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].function, "EventGame");
    assert_eq!(
        written[0].message,
        json!({"Event": EVENT, "Game": 7, "IsCancelled": false})
    );
    assert_eq!(written[1].function, "EventHeader");
    assert_eq!(written[1].is_cancelled(), Some(false));

    let message = output.message.as_ref().unwrap();
    assert_eq!(message.game, vec![Game::new(EVENT, 7, CancelFlag::Reversed)]);
    assert_eq!(message.header, None);
    assert!(output.is_success());
}

#[tokio::test]
async fn cancelled_campaigns_do_not_touch_header() {
    let deps = with_header();
    let mut request = dependent_request("Campaign");
    request.header.campaign = vec![
        Campaign::new(0, 1, CancelFlag::Cancelled),
        Campaign::new(0, 2, CancelFlag::Reversed),
    ];

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventCampaign", "EventCampaign"]);
    assert_eq!(
        output.message.unwrap().campaign,
        vec![
            Campaign::new(EVENT, 1, CancelFlag::Cancelled),
            Campaign::new(EVENT, 2, CancelFlag::Reversed),
        ]
    );
}

#[tokio::test]
async fn only_first_record_decides_header_reversal() {
    let deps = with_header();
    let mut request = dependent_request("Campaign");
    request.header.campaign = vec![
        Campaign::new(0, 1, CancelFlag::Reversed),
        Campaign::new(0, 2, CancelFlag::Cancelled),
    ];

    handle_request(&request, &deps.deps()).await;

    assert_eq!(
        deps.written_functions(),
        vec!["EventCampaign", "EventCampaign", "EventHeader"]
    );
}

#[tokio::test]
async fn point_transaction_payload_carries_all_keys() {
    let deps = with_header();
    let mut request = dependent_request("PointTransaction");
    request.header.point_transaction = vec![point_transaction(0, CancelFlag::Cancelled)];

    let output = handle_request(&request, &deps.deps()).await;

    let written = deps.written();
    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].message,
        json!({
            "Event": EVENT,
            "Sender": 100,
            "Receiver": 200,
            "PointConditionRecord": 3,
            "PointConditionSequentialNumber": 1,
            "IsCancelled": true,
        })
    );
    assert_eq!(output.message.unwrap().point_transaction.len(), 1);
}

#[tokio::test]
async fn rejected_record_discards_the_whole_list() {
    let deps = with_header();
    deps.reject_after(EntityKind::Campaign, 1);
    let mut request = dependent_request("Campaign");
    request.header.campaign = vec![
        Campaign::new(0, 1, CancelFlag::Reversed),
        Campaign::new(0, 2, CancelFlag::Reversed),
        Campaign::new(0, 3, CancelFlag::Reversed),
    ];

    let output = handle_request(&request, &deps.deps()).await;

    // The first campaign stays written, the third is never sent and the
    // header is not reversed
    assert_eq!(deps.written_functions(), vec!["EventCampaign", "EventCampaign"]);
    assert_eq!(output.sql_update_result, Some(false));
    assert_eq!(output.sql_update_error, "Event Campaign Data cannot cancel");
    assert!(output.message.unwrap().campaign.is_empty());
}

#[tokio::test]
async fn failed_header_reversal_discards_written_records() {
    let deps = with_header();
    deps.reject(EntityKind::Header);
    let mut request = dependent_request("Game");
    request.header.game = vec![Game::new(0, 7, CancelFlag::Reversed)];

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventGame", "EventHeader"]);
    assert_eq!(output.sql_update_result, Some(false));
    assert_eq!(output.sql_update_error, "Header Data cannot cancel");
    assert!(output.message.unwrap().game.is_empty());
}

#[tokio::test]
async fn dropped_connection_fails_the_dependent_list() {
    let deps = with_header();
    deps.drop_connection(EntityKind::Game);
    let mut request = dependent_request("Game");
    request.header.game = vec![
        Game::new(0, 7, CancelFlag::Cancelled),
        Game::new(0, 8, CancelFlag::Cancelled),
    ];

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventGame"]);
    assert_eq!(output.sql_update_result, Some(false));
    assert_eq!(output.sql_update_error, "Event Game Data cannot cancel");
    assert!(output.message.unwrap().game.is_empty());
}

#[tokio::test]
async fn dropped_connection_during_header_reversal() {
    let deps = with_header();
    deps.drop_connection(EntityKind::Header);
    let mut request = dependent_request("Campaign");
    request.header.campaign = vec![Campaign::new(0, 1, CancelFlag::Reversed)];

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventCampaign", "EventHeader"]);
    assert_eq!(output.sql_update_result, Some(false));
    assert_eq!(output.sql_update_error, "Header Data cannot cancel");

    let message = output.message.unwrap();
    assert!(message.campaign.is_empty());
    assert_eq!(message.header, None);
}

#[tokio::test]
async fn empty_list_is_a_no_op() {
    let deps = with_header();

    let output = handle_request(&dependent_request("PointTransaction"), &deps.deps()).await;

    assert!(deps.written().is_empty());
    assert!(output.message.as_ref().unwrap().point_transaction.is_empty());
    assert!(output.is_success());
}

#[tokio::test]
async fn unset_records_are_skipped_but_still_decide_reversal() {
    let deps = with_header();
    let mut request = dependent_request("Game");
    request.header.game = vec![
        Game::new(0, 7, CancelFlag::Unset),
        Game::new(0, 8, CancelFlag::Reversed),
    ];

    let output = handle_request(&request, &deps.deps()).await;

    // First record is unset, so the header is not reversed
    assert_eq!(deps.written_functions(), vec!["EventGame"]);
    assert_eq!(
        output.message.unwrap().game,
        vec![Game::new(EVENT, 8, CancelFlag::Reversed)]
    );
}

#[tokio::test]
async fn missing_header_during_reversal_aborts_silently() {
    init_tracing();
    let deps = event_cancels::kernel::TestDependencies::new();
    let mut request = dependent_request("Campaign");
    request.header.campaign = vec![Campaign::new(0, 1, CancelFlag::Reversed)];

    let output = handle_request(&request, &deps.deps()).await;

    assert_eq!(deps.written_functions(), vec!["EventCampaign"]);
    assert_eq!(output.sql_update_result, None);
    assert!(output.message.unwrap().campaign.is_empty());
}
