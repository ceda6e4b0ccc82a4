use lcdtris_engine::{
    AnalogInput as _, Board, Button, Cell, Console, Family, Framebuffer, GameConfig, GameSession,
    GravityOutcome, InputBands, LadderSimulator, PieceController, PlayerName, Screen, ShapeCode,
    StepOutcome,
};

// Every sample below is a multiple of 7, so each new piece is a square.
const IDLE: u16 = 700;
const LEFT: u16 = 1701;
const RIGHT: u16 = 2506;

fn drop_square(session: &mut GameSession, x: i16) -> StepOutcome {
    assert_eq!(session.controller().piece().shape, ShapeCode::SQUARE);
    let moves = (x - 81) / 6;
    let sample = if moves < 0 { LEFT } else { RIGHT };
    for _ in 0..moves.abs() {
        assert!(session.step(sample).gravity.is_fell());
    }
    loop {
        let outcome = session.step(IDLE);
        if !outcome.gravity.is_fell() {
            return outcome;
        }
    }
}

#[test]
fn every_shape_comes_to_rest_on_the_floor() {
    for shape in ShapeCode::all() {
        let mut board = Board::new();
        let mut controller = PieceController::new(&GameConfig::default(), shape);
        let mut ticks = 0;
        loop {
            match controller.gravity_tick(&mut board, IDLE) {
                GravityOutcome::Fell => ticks += 1,
                GravityOutcome::Locked { locked, .. } => {
                    assert_eq!((locked.x, locked.y), (81, 126), "{shape:?}");
                    break;
                }
                outcome => panic!("{shape:?}: unexpected {outcome:?}"),
            }
        }
        assert_eq!(ticks, 21, "{shape:?}");
        assert!(board.is_blocked_below(shape, 81, 126));
        for (dx, dy) in shape.cells() {
            let cell = board.cell(81 + dx, 126 - dy);
            assert_eq!(cell, Some(shape.locked_color()), "{shape:?}");
        }
    }
}

#[test]
fn paint_then_erase_restores_board() {
    let mut board = Board::new();
    let before: Vec<_> = board.rows().map(|row| row.to_vec()).collect();
    for shape in ShapeCode::all() {
        board.paint_shape(shape, 81, 60, shape.falling_cell());
        board.erase_shape(shape, 81, 60);
    }
    let after: Vec<_> = board.rows().map(|row| row.to_vec()).collect();
    assert_eq!(before, after);
}

#[test]
fn rotation_cycles_close() {
    for shape in ShapeCode::all() {
        let period = match shape.family() {
            Family::Square => 1,
            Family::Bar | Family::Z | Family::S => 2,
            Family::L | Family::T | Family::J => 4,
        };
        let mut rotated = shape;
        for _ in 0..period {
            rotated = rotated.rotated();
        }
        assert_eq!(rotated, shape);
    }
}

#[test]
fn full_rows_are_removed_and_rows_above_shift() {
    let mut board = Board::new();
    for x in (57..=105).step_by(12) {
        board.lock_shape(ShapeCode::SQUARE, x, 126);
    }
    board.lock_shape(ShapeCode::SQUARE, 57, 114);
    assert_eq!(board.solid_count(126), 60);

    assert_eq!(board.clear_full_rows(), 12);
    for y in 115..=126 {
        assert_eq!(board.solid_count(y), 12, "row {y}");
    }
    for y in 103..=114 {
        assert_eq!(board.solid_count(y), 0, "row {y}");
    }
    assert_eq!(board.cell(57, 126), Some(Cell::Locked(Family::Square)));
    assert_eq!(board.clear_full_rows(), 0);
}

#[test]
fn session_clears_two_lines_with_squares() {
    let mut session = GameSession::new(GameConfig::default(), PlayerName::default(), IDLE);
    for x in [57, 69, 93, 105] {
        let outcome = drop_square(&mut session, x);
        assert!(outcome.gravity.is_locked());
        assert_eq!(outcome.lines, 0);
    }
    assert_eq!(session.board().solid_count(126), 48);

    let outcome = drop_square(&mut session, 81);
    assert_eq!(outcome.lines, 2);
    assert_eq!(outcome.points, 200);
    assert_eq!(session.score().score(), 200);
    assert_eq!(session.score().lines_cleared(), 2);
    for y in 103..=126 {
        assert_eq!(session.board().solid_count(y), 0, "row {y}");
    }
}

#[test]
fn noisy_ladder_drives_the_console() {
    let mut ladder = LadderSimulator::new(InputBands::default(), 7);
    let mut console = Console::new(GameConfig::default()).unwrap();
    let mut lcd = Framebuffer::new();

    console.step(ladder.read(), &mut lcd);
    assert_eq!(console.screen(), Screen::Menu);
    ladder.press(Button::Rotate);
    console.step(ladder.read(), &mut lcd);
    assert_eq!(console.screen(), Screen::Playing);

    ladder.release();
    for _ in 0..10 {
        console.step(ladder.read(), &mut lcd);
    }
    assert_eq!(console.session().controller().piece().y, 60);
    assert!(console.session().score().state().elapsed_seconds > 7.9);
}
