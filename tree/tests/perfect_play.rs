//! Whole-game properties of the built and evaluated tree

use gridlock_engine::{Board, Engine, Error, Mark, MoveKind, Outcome};
use gridlock_tree::{build_tree, initialize_with};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

/// Outcome ordered from `mark`'s point of view: loss < draw < win
fn rank(outcome: Outcome, mark: Mark) -> u8 {
    match outcome {
        Outcome::Win(winner) if winner == mark => 2,
        Outcome::Draw => 1,
        Outcome::Win(_) => 0,
    }
}

#[test]
fn test_empty_board_is_a_draw_for_either_opener() {
    for first in [Mark::X, Mark::O] {
        let tree = build_tree(first).unwrap();
        assert_eq!(tree.root().unwrap().value(), Some(Outcome::Draw));
    }
}

#[test]
fn test_values_satisfy_backward_induction() {
    let tree = build_tree(Mark::X).unwrap();
    for node in tree.nodes() {
        let value = node.value().unwrap();
        let Some(mover) = node.mover() else {
            let expected = node.board().winner().map_or(Outcome::Draw, Outcome::Win);
            assert_eq!(value, expected, "terminal {}", node.board());
            continue;
        };
        let best = tree
            .children_of(node)
            .map(|child| rank(child.value().unwrap(), mover))
            .max()
            .unwrap();
        assert_eq!(rank(value, mover), best, "node {}", node.board());
    }
}

#[test]
fn test_values_are_a_function_of_the_board() {
    let a = build_tree(Mark::X).unwrap();
    let b = build_tree(Mark::X).unwrap();
    for node in a.nodes() {
        let other = b.find(node.board()).unwrap();
        assert_eq!(node.value(), other.value());
    }
}

#[test]
fn test_siblings_are_distinct_and_diff_round_trips() {
    let tree = build_tree(Mark::X).unwrap();
    for node in tree.nodes() {
        let mut boards: Vec<Board> = Vec::new();
        for child in tree.children_of(node) {
            assert!(!boards.contains(child.board()));
            boards.push(*child.board());

            let cell = node.board().diff_cell(child.board()).unwrap();
            let replayed = node.board().place(cell, node.mover().unwrap()).unwrap();
            assert_eq!(&replayed, child.board());
        }
    }
}

#[test]
fn test_scenario_opening_then_perfect_play_draws() {
    let engine_x = initialize_with(Mark::X, Mark::X).unwrap();
    let engine_o = initialize_with(Mark::X, Mark::O).unwrap();
    assert_eq!(engine_x.root_value(), Some(Outcome::Draw));

    for seed in 0..16 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut current = Board::new();
        let mut mover = Mark::X;
        while !current.is_terminal() {
            let engine = if mover == Mark::X { &engine_x } else { &engine_o };
            let cell = engine.choose_move(&current, &mut rng).unwrap();
            current = current.place(cell, mover).unwrap();
            mover = mover.opponent();
        }
        assert!(current.is_draw(), "self-play ended in {current}");
    }
}

#[test]
fn test_scenario_completes_open_row() {
    let engine = initialize_with(Mark::X, Mark::X).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let selection = engine.choose(&board("XX.OO...."), &mut rng).unwrap();
    assert_eq!(selection.cell, 2);
    assert_eq!(selection.kind, MoveKind::ImmediateWin);
}

#[test]
fn test_scenario_never_picks_a_losing_child_when_better_exists() {
    let engine = initialize_with(Mark::X, Mark::X).unwrap();
    let live = board("XOXOXO...");
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let cell = engine.choose_move(&live, &mut rng).unwrap();
        let after = live.place(cell, Mark::X).unwrap();
        let value = engine.value_of(&after).unwrap();
        assert!(rank(value, Mark::X) >= 1, "cell {cell} leads to {value}");
    }
}

#[test]
fn test_selection_is_optimal_on_every_reachable_board() {
    for bot in [Mark::X, Mark::O] {
        let engine = initialize_with(Mark::X, bot).unwrap();
        let tree = engine.tree();
        let mut rng = StdRng::seed_from_u64(11);
        for node in tree.nodes().iter().filter(|n| n.mover() == Some(bot)) {
            let selection = engine.choose(node.board(), &mut rng).unwrap();
            let after = node.board().place(selection.cell, bot).unwrap();
            let chosen = engine.value_of(&after).unwrap();
            assert_eq!(
                rank(chosen, bot),
                rank(node.value().unwrap(), bot),
                "board {} cell {}",
                node.board(),
                selection.cell
            );
            if after.line_of(bot).is_some() {
                assert_eq!(selection.kind, MoveKind::ImmediateWin);
            }
        }
    }
}

#[test]
fn test_scenario_full_board_is_draw_and_not_queried() {
    let engine = initialize_with(Mark::X, Mark::O).unwrap();
    let full = board("XOXXOOOXX");
    assert!(full.is_draw());
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        engine.choose(&full, &mut rng),
        Err(Error::GameOver { .. })
    ));
}

#[test]
fn test_malformed_boards_are_reported() {
    let engine = initialize_with(Mark::X, Mark::O).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        engine.choose(&board("XX......."), &mut rng),
        Err(Error::UnreachableBoard { .. })
    ));
    assert!(matches!(
        engine.choose(&board("XXXOO...."), &mut rng),
        Err(Error::GameOver { .. })
    ));
    assert!(matches!(
        engine.choose(&board("X.......O"), &mut rng),
        Err(Error::NotBotsTurn { .. })
    ));
}

/// Play every possible opponent reply against the engine and report the
/// worst result for the engine.
fn worst_case(engine: &Engine, current: Board, mover: Mark, rng: &mut StdRng) -> u8 {
    let bot = engine.config().bot_mark;
    if current.is_terminal() {
        return rank(current.winner().map_or(Outcome::Draw, Outcome::Win), bot);
    }
    if mover == bot {
        let cell = engine.choose_move(&current, rng).unwrap();
        let next = current.place(cell, mover).unwrap();
        return worst_case(engine, next, mover.opponent(), rng);
    }
    current
        .empty_cells()
        .collect::<Vec<_>>()
        .into_iter()
        .map(|cell| {
            let next = current.place(cell, mover).unwrap();
            worst_case(engine, next, mover.opponent(), rng)
        })
        .min()
        .unwrap()
}

#[test]
fn test_engine_never_loses_against_any_opponent() {
    for first in [Mark::X, Mark::O] {
        for bot in [Mark::X, Mark::O] {
            let engine = initialize_with(first, bot).unwrap();
            let mut rng = StdRng::seed_from_u64(5);
            let worst = worst_case(&engine, Board::new(), first, &mut rng);
            assert!(worst >= 1, "first={first} bot={bot} can lose");
        }
    }
}

#[test]
fn test_concurrent_queries_share_one_engine() {
    let engine = initialize_with(Mark::X, Mark::X).unwrap();
    let live = board("XX.OO....");
    std::thread::scope(|scope| {
        for seed in 0..4 {
            let engine = &engine;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                assert_eq!(engine.choose_move(&live, &mut rng).unwrap(), 2);
            });
        }
    });
}
