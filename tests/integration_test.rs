use mafilia::config::AppConfig;
use mafilia::content::WordRepository;
use mafilia::game::impostor::{ImpostorView, RoleCard};
use mafilia::game::taboo::TabooView;
use mafilia::handlers::handle_message;
use mafilia::protocol::{ClientMessage, ServerMessage};
use mafilia::setup::{ImpostorDraft, TabooDraft};
use mafilia::state::{ActiveGame, AppState};
use mafilia::types::{Difficulty, Role, Winner};
use std::sync::Arc;

fn new_state() -> Arc<AppState> {
    let config = AppConfig {
        countdown_secs: 3,
        seed: Some(2024),
        ..AppConfig::default()
    };
    Arc::new(AppState::new(config, WordRepository::builtin()))
}

async fn send(state: &Arc<AppState>, msg: ClientMessage) -> ServerMessage {
    handle_message(msg, state)
        .await
        .expect("Every message gets a reply")
}

async fn impostor_view(state: &Arc<AppState>, msg: ClientMessage) -> ImpostorView {
    match send(state, msg).await {
        ServerMessage::Impostor { view, .. } => view,
        other => panic!("Expected impostor view, got {:?}", other),
    }
}

async fn taboo_view(state: &Arc<AppState>, msg: ClientMessage) -> TabooView {
    match send(state, msg).await {
        ServerMessage::Taboo { view, .. } => view,
        other => panic!("Expected taboo view, got {:?}", other),
    }
}

fn error_code(msg: ServerMessage) -> String {
    match msg {
        ServerMessage::Error { code, .. } => code,
        other => panic!("Expected error, got {:?}", other),
    }
}

async fn roles(state: &Arc<AppState>) -> Vec<Role> {
    match state.get_session().await.map(|s| s.game) {
        Some(ActiveGame::Impostor(game)) => game.roles().to_vec(),
        _ => panic!("Expected impostor session"),
    }
}

/// Reveal every card, run the countdown and open a vote
async fn reveal_and_vote(state: &Arc<AppState>, players: usize) {
    for i in 0..players {
        let view = impostor_view(state, ClientMessage::RevealRole).await;
        let ImpostorView::Reveal { index, card, .. } = view else {
            panic!("Expected reveal view");
        };
        assert_eq!(index, i);
        assert!(card.is_some());
        impostor_view(state, ClientMessage::NextPlayer).await;
    }

    for remaining in (0..3).rev() {
        let view = impostor_view(state, ClientMessage::Tick).await;
        if remaining > 0 {
            assert!(matches!(view, ImpostorView::Countdown { remaining: r, .. } if r == remaining));
        } else {
            assert!(matches!(view, ImpostorView::Playing { voting: false, .. }));
        }
    }

    let view = impostor_view(state, ClientMessage::CallVote).await;
    assert!(matches!(view, ImpostorView::Playing { voting: true, .. }));
}

/// End-to-end impostor game won by the civils
#[tokio::test]
async fn test_impostor_civils_win() {
    let state = new_state();

    // 1. Build a config from the setup draft
    let mut draft = ImpostorDraft::default();
    draft.add_player();
    draft.set_impostor_count(2).unwrap();
    draft.set_difficulty(Difficulty::Medium);
    let config = draft.build(&state.content).unwrap();

    // 2. Start
    let view = impostor_view(&state, ClientMessage::StartImpostor { config }).await;
    assert!(matches!(view, ImpostorView::Reveal { index: 0, total: 5, revealed: false, card: None, .. }));

    let roles = roles(&state).await;
    assert_eq!(roles.iter().filter(|r| **r == Role::Impostor).count(), 2);

    // 3. Reveal, countdown, vote
    reveal_and_vote(&state, 5).await;

    // 4. Eliminate both impostors
    let impostors: Vec<usize> = (0..5).filter(|i| roles[*i] == Role::Impostor).collect();
    let view = impostor_view(&state, ClientMessage::Eliminate { player: impostors[0] }).await;
    let ImpostorView::Playing { eliminated, active, voting, .. } = view else {
        panic!("Expected game to continue");
    };
    assert!(voting);
    assert_eq!(active.len(), 4);
    assert_eq!(eliminated[0].role, Role::Impostor);

    let view = impostor_view(&state, ClientMessage::Eliminate { player: impostors[1] }).await;
    let ImpostorView::Resolved { result } = view else {
        panic!("Expected resolved game");
    };
    assert_eq!(result.winner, Winner::Civil);
    assert_eq!(result.eliminated_players.len(), 2);
    assert_eq!(result.players.len(), 5);
}

#[tokio::test]
async fn test_impostor_wins_on_parity() {
    let state = new_state();
    let config = ImpostorDraft::default().build(&state.content).unwrap();
    impostor_view(&state, ClientMessage::StartImpostor { config }).await;

    let roles = roles(&state).await;
    reveal_and_vote(&state, 4).await;

    let civils: Vec<usize> = (0..4).filter(|i| roles[*i] == Role::Civil).collect();
    impostor_view(&state, ClientMessage::Eliminate { player: civils[0] }).await;

    // Eliminating the same player again is rejected
    let code = error_code(send(&state, ClientMessage::Eliminate { player: civils[0] }).await);
    assert_eq!(code, "NOT_ACTIVE");

    let view = impostor_view(&state, ClientMessage::Eliminate { player: civils[1] }).await;
    let ImpostorView::Resolved { result } = view else {
        panic!("Expected resolved game");
    };
    assert_eq!(result.winner, Winner::Impostor);
}

#[tokio::test]
async fn test_only_own_card_is_visible() {
    let state = new_state();
    let mut draft = ImpostorDraft::default();
    draft.show_hint = false;
    let config = draft.build(&state.content).unwrap();
    impostor_view(&state, ClientMessage::StartImpostor { config }).await;
    let roles = roles(&state).await;

    for role in roles {
        let ImpostorView::Reveal { card, .. } =
            impostor_view(&state, ClientMessage::RevealRole).await
        else {
            panic!("Expected reveal view");
        };
        match (role, card) {
            (Role::Civil, Some(RoleCard::Civil { word })) => assert!(!word.is_empty()),
            (Role::Impostor, Some(RoleCard::Impostor { hint })) => assert!(hint.is_none()),
            other => panic!("Card does not match role: {:?}", other),
        }
        impostor_view(&state, ClientMessage::NextPlayer).await;
    }
}

#[tokio::test]
async fn test_cancel_vote_and_manual_end_then_replay() {
    let state = new_state();
    let config = ImpostorDraft::default().build(&state.content).unwrap();
    impostor_view(&state, ClientMessage::StartImpostor { config: config.clone() }).await;
    reveal_and_vote(&state, 4).await;

    let view = impostor_view(&state, ClientMessage::CancelVote).await;
    assert!(matches!(view, ImpostorView::Playing { voting: false, .. }));

    let code = error_code(send(&state, ClientMessage::Eliminate { player: 0 }).await);
    assert_eq!(code, "INVALID_ACTION");

    let view = impostor_view(&state, ClientMessage::TogglePause).await;
    let ImpostorView::Playing { clock, .. } = view else {
        panic!("Expected playing view");
    };
    assert!(!clock.running);
    assert_eq!(clock.label, "5:00");

    let ImpostorView::Resolved { result } = impostor_view(&state, ClientMessage::EndGame).await
    else {
        panic!("Expected resolved game");
    };
    assert_eq!(result.winner, Winner::None);
    assert_eq!(result.carry_over, config);

    let view = impostor_view(&state, ClientMessage::ReplayImpostor).await;
    assert!(matches!(view, ImpostorView::Reveal { index: 0, .. }));
}

#[tokio::test]
async fn test_rejected_config_keeps_running_game() {
    let state = new_state();
    let config = ImpostorDraft::default().build(&state.content).unwrap();
    impostor_view(&state, ClientMessage::StartImpostor { config: config.clone() }).await;
    impostor_view(&state, ClientMessage::RevealRole).await;
    let before = send(&state, ClientMessage::GetState).await;

    let mut bad = config;
    bad.impostor_count = 2;
    let code = error_code(send(&state, ClientMessage::StartImpostor { config: bad }).await);
    assert_eq!(code, "INVALID_CONFIG");

    let mut empty = TabooDraft::default().build(&state.content).unwrap();
    empty.selected_categories = vec![404];
    let code = error_code(send(&state, ClientMessage::StartTaboo { config: empty }).await);
    assert_eq!(code, "INVALID_CONFIG");

    assert_eq!(send(&state, ClientMessage::GetState).await, before);
}

#[tokio::test]
async fn test_wrong_game_actions() {
    let state = new_state();
    let config = TabooDraft::default().build(&state.content).unwrap();
    taboo_view(&state, ClientMessage::StartTaboo { config }).await;

    let code = error_code(send(&state, ClientMessage::RevealRole).await);
    assert_eq!(code, "WRONG_GAME");
    let code = error_code(send(&state, ClientMessage::ReplayImpostor).await);
    assert_eq!(code, "WRONG_GAME");

    assert_eq!(send(&state, ClientMessage::ExitToMenu).await, ServerMessage::Menu);
    let code = error_code(send(&state, ClientMessage::Correct).await);
    assert_eq!(code, "NO_SESSION");
}

/// End-to-end taboo game: two teams, two rounds
#[tokio::test]
async fn test_taboo_full_game() {
    let state = new_state();

    let mut draft = TabooDraft::default();
    draft.rename_team(1, "Rojos").unwrap();
    draft.rename_team(2, "Azules").unwrap();
    draft.toggle_category(2).unwrap();
    draft.set_total_rounds(2).unwrap();
    let config = draft.build(&state.content).unwrap();

    let view = taboo_view(&state, ClientMessage::StartTaboo { config }).await;
    let TabooView::PreTurn { team, round, last_turn, .. } = view else {
        panic!("Expected pre-turn view");
    };
    assert_eq!(team.name, "Rojos");
    assert_eq!(round, 1);
    assert!(last_turn.is_none());

    // Scoring before the turn starts is rejected
    let code = error_code(send(&state, ClientMessage::Correct).await);
    assert_eq!(code, "INVALID_ACTION");

    // (correct, forbidden) per team per round
    let plan = [[(3, 1), (1, 0)], [(0, 2), (2, 0)]];
    for (round_index, round_plan) in plan.iter().enumerate() {
        for (correct, forbidden) in round_plan {
            taboo_view(&state, ClientMessage::BeginTurn).await;
            for _ in 0..3 {
                taboo_view(&state, ClientMessage::Tick).await;
            }
            for _ in 0..*correct {
                taboo_view(&state, ClientMessage::Correct).await;
            }
            for _ in 0..*forbidden {
                taboo_view(&state, ClientMessage::Forbidden).await;
            }
            let view = taboo_view(&state, ClientMessage::Skip).await;
            let TabooView::InTurn { delta, stats, clock, .. } = view else {
                panic!("Expected in-turn view");
            };
            assert_eq!(delta, *correct - *forbidden);
            assert_eq!(stats.skipped, 1);
            assert_eq!(clock.label, "1:00");
            taboo_view(&state, ClientMessage::EndTurn).await;
        }

        if round_index == 0 {
            let view = taboo_view(&state, ClientMessage::GetState).await;
            let TabooView::Standings { leaderboard, rounds_left, .. } = view else {
                panic!("Expected standings");
            };
            assert_eq!(rounds_left, 1);
            assert_eq!(leaderboard[0].name, "Rojos");
            assert_eq!(leaderboard[0].score, 2);
            taboo_view(&state, ClientMessage::NextRound).await;
        }
    }

    let view = taboo_view(&state, ClientMessage::GetState).await;
    let TabooView::Final { result, last_turn } = view else {
        panic!("Expected final results");
    };
    // Rojos: 2, then -2 clamps to 0. Azules: 1 + 2 = 3
    let scores: Vec<_> = result.teams.iter().map(|t| (t.name.as_str(), t.score)).collect();
    assert_eq!(scores, vec![("Azules", 3), ("Rojos", 0)]);
    assert_eq!(last_turn.unwrap().team_name, "Azules");

    let code = error_code(send(&state, ClientMessage::NextRound).await);
    assert_eq!(code, "INVALID_ACTION");
}

#[tokio::test]
async fn test_list_categories_matches_content() {
    let state = new_state();
    let ServerMessage::Categories { impostor, taboo } =
        send(&state, ClientMessage::ListCategories).await
    else {
        panic!("Expected categories");
    };
    assert_eq!(impostor, state.content.impostor_categories());
    assert_eq!(taboo, state.content.taboo_categories());
}
