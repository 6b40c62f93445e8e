use minesweeper::{random_board, Board};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy)]
enum Op {
    Dig(i64, i64),
    Flag(i64, i64),
    Deflag(i64, i64),
}

fn apply(board: &mut Board, op: Op) {
    match op {
        Op::Dig(x, y) => {
            board.dig(x, y);
        }
        Op::Flag(x, y) => board.flag(x, y),
        Op::Deflag(x, y) => board.deflag(x, y),
    }
}

// Coordinates straddle the board edges so out-of-bounds no-ops get hit too.
fn op_strategy() -> impl Strategy<Value = Op> {
    let coord = || (-2i64..12, -2i64..12);
    prop_oneof![
        coord().prop_map(|(x, y)| Op::Dig(x, y)),
        coord().prop_map(|(x, y)| Op::Flag(x, y)),
        coord().prop_map(|(x, y)| Op::Deflag(x, y)),
    ]
}

fn seeded_board(seed: u64, width: usize, height: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    random_board(&mut rng, width, height)
}

/// Per-cell characters of the render, stripped of the separator columns.
fn cell_chars(board: &Board) -> Vec<Vec<char>> {
    board
        .render()
        .iter()
        .map(|row| row.chars().step_by(2).collect())
        .collect()
}

fn dug_cells(board: &Board) -> Vec<(usize, usize)> {
    let mut dug = Vec::new();
    for (y, row) in cell_chars(board).iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            if ch == ' ' || ch.is_ascii_digit() {
                dug.push((x, y));
            }
        }
    }
    dug
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn render_keeps_shape(
        seed in any::<u64>(),
        width in 1usize..9,
        height in 1usize..9,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut board = seeded_board(seed, width, height);
        for op in ops {
            apply(&mut board, op);
        }
        let rows = board.render();
        prop_assert_eq!(rows.len(), height);
        for row in &rows {
            prop_assert_eq!(row.chars().count(), 2 * width - 1);
            for (i, ch) in row.chars().enumerate() {
                if i % 2 == 1 {
                    prop_assert_eq!(ch, ' ');
                } else {
                    prop_assert!(matches!(ch, '-' | 'F' | ' ' | '1'..='8'));
                }
            }
        }
    }

    #[test]
    fn dug_cells_never_revert(
        seed in any::<u64>(),
        width in 1usize..9,
        height in 1usize..9,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut board = seeded_board(seed, width, height);
        let mut dug = dug_cells(&board);
        for op in ops {
            apply(&mut board, op);
            let now = dug_cells(&board);
            for cell in &dug {
                prop_assert!(now.contains(cell));
            }
            dug = now;
        }
    }

    #[test]
    fn flag_deflag_roundtrip_is_identity(
        seed in any::<u64>(),
        width in 1usize..9,
        height in 1usize..9,
        digs in prop::collection::vec((-2i64..12, -2i64..12), 0..10),
        x in -2i64..12,
        y in -2i64..12,
    ) {
        let mut board = seeded_board(seed, width, height);
        for (dx, dy) in digs {
            board.dig(dx, dy);
        }
        let before = board.render();
        board.flag(x, y);
        board.deflag(x, y);
        prop_assert_eq!(board.render(), before);
    }

    #[test]
    fn look_is_pure(
        seed in any::<u64>(),
        width in 1usize..9,
        height in 1usize..9,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut board = seeded_board(seed, width, height);
        for op in ops {
            apply(&mut board, op);
        }
        prop_assert_eq!(board.render(), board.render());
    }

    // Without deflags in the mix, a revealed zero-count cell can never
    // have an untouched neighbor: the dig that revealed it flooded them.
    #[test]
    fn zero_regions_are_closed_after_digs(
        seed in any::<u64>(),
        width in 1usize..9,
        height in 1usize..9,
        ops in prop::collection::vec(
            prop_oneof![
                (-2i64..12, -2i64..12).prop_map(|(x, y)| Op::Dig(x, y)),
                (-2i64..12, -2i64..12).prop_map(|(x, y)| Op::Flag(x, y)),
            ],
            0..40,
        ),
    ) {
        let mut board = seeded_board(seed, width, height);
        for op in ops {
            apply(&mut board, op);
        }
        let cells = cell_chars(&board);
        for y in 0..height {
            for x in 0..width {
                if cells[y][x] != ' ' {
                    continue;
                }
                for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                    for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                        prop_assert_ne!(
                            cells[ny][nx], '-',
                            "untouched neighbor ({}, {}) of revealed empty cell ({}, {})",
                            nx, ny, x, y
                        );
                    }
                }
            }
        }
    }
}
