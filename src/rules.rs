use thiserror::Error;

use crate::board::{self, Board};
use crate::movegen;
use crate::types::{Move, Piece, Player, Point};

/// Why a proposed move was refused. Variants are listed in the order the
/// checks run; the first failing check is reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("square index out of range")]
    OutOfRange,
    #[error("start and end are the same square")]
    SameSquare,
    #[error("capture must continue from square {0}")]
    MustContinueFrom(usize),
    #[error("destination is occupied")]
    Occupied,
    #[error("no piece of the moving player on the start square")]
    NotOwnPiece,
    #[error("jumped square does not hold an opposing piece")]
    NothingToCapture,
    #[error("not a one or two square diagonal")]
    NotDiagonal,
    #[error("men cannot move backward")]
    WrongDirection,
    #[error("a capture is available and must be taken")]
    CaptureRequired,
}

/// Shape of a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Step,
    Capture { captured: usize },
}

/// Returns true when `player` may move from `start` to `end`.
pub fn is_legal_move(
    board: &Board,
    player: Player,
    start: usize,
    end: usize,
    active_capture: Option<usize>,
) -> bool {
    check_move(board, player, start, end, active_capture).is_ok()
}

/// Validates a move without touching the board.
pub fn check_move(
    board: &Board,
    player: Player,
    start: usize,
    end: usize,
    active_capture: Option<usize>,
) -> Result<MoveKind, IllegalMove> {
    let (Some(from), Some(to)) = (board::to_point(start), board::to_point(end)) else {
        return Err(IllegalMove::OutOfRange);
    };
    if start == end {
        return Err(IllegalMove::SameSquare);
    }
    if let Some(required) = active_capture
        && board::is_valid_index(required)
        && required != start
    {
        return Err(IllegalMove::MustContinueFrom(required));
    }

    if board.get(end) != Some(Piece::Empty) {
        return Err(IllegalMove::Occupied);
    }
    let piece = board.get(start).unwrap_or_default();
    if piece.color() != Some(player.color()) {
        return Err(IllegalMove::NotOwnPiece);
    }

    let mid = board::middle_index(start, end);
    if let Some(mid) = mid {
        let captured = board.get(mid).and_then(Piece::color);
        if captured != Some(player.color().opponent()) {
            return Err(IllegalMove::NothingToCapture);
        }
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() != dy.abs() || dx.abs() > 2 || dx == 0 {
        return Err(IllegalMove::NotDiagonal);
    }
    if !piece.moves_along(dy) {
        return Err(IllegalMove::WrongDirection);
    }

    match mid {
        Some(captured) => Ok(MoveKind::Capture { captured }),
        None if movegen::has_capture(board, player.color()) => Err(IllegalMove::CaptureRequired),
        None => Ok(MoveKind::Step),
    }
}

/// Enumerates every legal move for `player`, ascending by start square with
/// captures listed before steps.
pub fn legal_moves(board: &Board, player: Player, active_capture: Option<usize>) -> Vec<Move> {
    let mut moves = Vec::new();
    for start in board.pieces(player.color()) {
        let ends = movegen::capture_candidates(board, start)
            .into_iter()
            .chain(movegen::move_candidates(board, start));
        for end in ends {
            if is_legal_move(board, player, start, end, active_capture) {
                moves.push(Move::new(start, end));
            }
        }
    }
    moves
}

/// Returns true when no opposing piece could capture the piece on `point`
/// with its next move. Empty or invalid squares are trivially safe.
pub fn is_safe(board: &Board, point: Point) -> bool {
    let Some(target) = board.get_at(point).and_then(Piece::color) else {
        return true;
    };

    for (dx, dy) in movegen::DIRECTIONS {
        let attacker_at = point.offset(dx, dy);
        let Some(attacker) = board.get_at(attacker_at) else {
            continue;
        };
        if attacker.color() != Some(target.opponent()) {
            continue;
        }

        // The attacker jumps from its square through `point`.
        let (jump_dx, jump_dy) = (-2 * dx, -2 * dy);
        if !attacker.moves_along(jump_dy) {
            continue;
        }
        let start = board::point_to_index(attacker_at);
        let end = board::point_to_index(attacker_at.offset(jump_dx, jump_dy));
        if let (Some(start), Some(end)) = (start, end)
            && movegen::is_valid_capture(board, start, end)
        {
            return false;
        }
    }

    true
}
