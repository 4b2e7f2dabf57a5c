use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::adapter::SimulatedChain;
use crate::events::{
    BridgeRequested, ConsoleEvent, ContributionRecorded, LiquidityLocked, OwnershipRenounced,
    ProjectCreated, TokenActivated, TokensBurned, TokensMinted, TokensSwapped,
};
use crate::launchpad::ProjectTerms;
use crate::{
    Action, Chain, Console, ConsoleConfig, CreateTokenRequest, NetworkMode, SwapDirection, TokenStatus,
    RENOUNCE_PHRASE,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn setup() -> (Console, String) {
    let mut console = Console::new(ConsoleConfig::default().with_seed(11)).unwrap();
    let token = console
        .create_token_at(CreateTokenRequest::new("Gem", "GEM", Chain::Bnb, NetworkMode::Testnet, 1_000.0), t0())
        .unwrap();
    console.confirm_deployments_at(t0() + Duration::seconds(2));
    (console, token.id)
}

fn last(console: &Console) -> &ConsoleEvent {
    console.events().last().expect("No events found")
}

#[test]
fn test_created_and_activated_events() {
    let (console, token_id) = setup();
    let events = console.events().all();
    assert_eq!(events.len(), 2);

    match &events[0] {
        ConsoleEvent::Created(e) => {
            assert_eq!(e.token_id, token_id);
            assert_eq!(e.symbol, "GEM");
            assert_eq!(e.supply, 1_000.0);
            assert_eq!(e.status, TokenStatus::Deploying);
        }
        other => panic!("expected created event, got {other:?}"),
    }
    let token = console.token(&token_id).unwrap();
    assert_eq!(
        events[1],
        ConsoleEvent::Activated(TokenActivated {
            token_id: token_id.clone(),
            contract_address: token.contract_address.clone(),
        })
    );
}

#[test]
fn test_deploy_emits_created_then_activated() {
    let mut console = Console::new(ConsoleConfig::default().with_seed(5)).unwrap();
    let mut chain = SimulatedChain::new(Chain::Ton, NetworkMode::Mainnet, 5);
    console
        .deploy_token_at(
            &mut chain,
            CreateTokenRequest::new("Ton Gem", "TGEM", Chain::Ton, NetworkMode::Mainnet, 10.0),
            t0(),
        )
        .unwrap();

    let topics: Vec<&str> = console.events().all().iter().map(ConsoleEvent::topic).collect();
    assert_eq!(topics, vec!["created", "activated"]);
}

#[test]
fn test_minted_event() {
    let (mut console, token_id) = setup();
    console.execute_at(&token_id, Action::Mint { amount: 500.0 }, t0()).unwrap();

    let event = last(&console);
    assert_eq!(event.topic(), "minted");
    assert_eq!(event.subject(), token_id);
    assert_eq!(
        event,
        &ConsoleEvent::Minted(TokensMinted {
            token_id: token_id.clone(),
            amount: 500.0,
            total_supply: 1_500.0,
        })
    );
}

#[test]
fn test_burned_event() {
    let (mut console, token_id) = setup();
    console.execute_at(&token_id, Action::Burn { amount: 250.0 }, t0()).unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Burned(TokensBurned {
            token_id,
            amount: 250.0,
            total_supply: 750.0,
        })
    );
}

#[test]
fn test_locked_event() {
    let (mut console, token_id) = setup();
    console
        .execute_at(&token_id, Action::Lock { amount: 100.0, duration_days: 90 }, t0())
        .unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Locked(LiquidityLocked {
            token_id,
            amount: 100.0,
            locked_amount: 100.0,
            unlock_date: t0() + Duration::days(90),
        })
    );
}

#[test]
fn test_swapped_event() {
    let (mut console, token_id) = setup();
    console.set_native_balance(Chain::Bnb, NetworkMode::Testnet, 1.0).unwrap();
    console
        .execute_at(&token_id, Action::Swap { direction: SwapDirection::Sell, input_amount: 500.0 }, t0())
        .unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Swapped(TokensSwapped {
            token_id,
            direction: SwapDirection::Sell,
            input_amount: 500.0,
            output_amount: 0.1,
        })
    );
}

#[test]
fn test_bridged_and_renounced_events() {
    let (mut console, token_id) = setup();
    console.set_native_balance(Chain::Bnb, NetworkMode::Testnet, 1.0).unwrap();

    console
        .execute_at(&token_id, Action::Bridge { amount: 10.0, destination: Chain::Ton }, t0())
        .unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Bridged(BridgeRequested {
            token_id: token_id.clone(),
            amount: 10.0,
            destination: Chain::Ton,
        })
    );

    console
        .execute_at(&token_id, Action::RenounceOwnership { confirmation: RENOUNCE_PHRASE.into() }, t0())
        .unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Renounced(OwnershipRenounced { token_id, fee: 0.01 })
    );
}

#[test]
fn test_rejected_transition_emits_nothing() {
    let (mut console, token_id) = setup();
    let before = console.events().len();

    assert!(console.execute_at(&token_id, Action::Burn { amount: 5_000.0 }, t0()).is_err());
    assert!(console.execute_at(&token_id, Action::Faucet, t0()).is_ok());
    assert!(console
        .execute_at(&token_id, Action::RenounceOwnership { confirmation: "no".into() }, t0())
        .is_err());

    assert_eq!(console.events().len(), before + 1);
    assert_eq!(last(&console).topic(), "faucet");
}

#[test]
fn test_launchpad_events() {
    let (mut console, token_id) = setup();
    let terms = ProjectTerms {
        soft_cap: 1.0,
        hard_cap: 2.0,
        rate: 100.0,
        duration_days: 3,
    };
    let project = console.create_project_at(&token_id, terms, t0()).unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::ProjectCreated(ProjectCreated {
            project_id: project.id.clone(),
            token_id,
            soft_cap: 1.0,
            hard_cap: 2.0,
        })
    );

    console.record_contribution_at(&project.id, 0.5, t0()).unwrap();
    assert_eq!(
        last(&console),
        &ConsoleEvent::Contributed(ContributionRecorded {
            project_id: project.id.clone(),
            amount: 0.5,
            raised_amount: 0.5,
            participants: 1,
        })
    );
    assert_eq!(console.events().with_topic("contributed").count(), 1);
}

#[test]
fn test_event_json_shape() {
    let (mut console, token_id) = setup();
    console.execute_at(&token_id, Action::Mint { amount: 1.0 }, t0()).unwrap();

    let json = serde_json::to_value(last(&console)).unwrap();
    assert_eq!(json["topic"], "minted");
    assert_eq!(json["data"]["tokenId"], token_id.as_str());
    assert_eq!(json["data"]["totalSupply"], 1_001.0);
}
