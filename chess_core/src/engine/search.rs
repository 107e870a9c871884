use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{Evaluator, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::Board;
use crate::logic::moves::Move;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;

const INFINITY: i32 = i32::MAX;

/// Depth-bounded minimax over immutable boards. White maximises, Black
/// minimises, and the first move reaching the best score is kept.
pub struct MiniMax {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    last_stats: SearchStats,
}

impl MiniMax {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(Arc::clone(&config)),
            config,
            last_stats: SearchStats::default(),
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = SimpleEvaluator::new(Arc::clone(&config));
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub const fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    /// Searches `depth` plies (at least one at the root) and then up to
    /// `quiescence` extra plies of captures and promotions. Returns `None` when
    /// the side to move has no legal move.
    pub fn search(&mut self, board: &Board, depth: u8, quiescence: u8) -> Option<SearchOutcome> {
        let start = Instant::now();
        let moves = self.ordered(board.current_player().legal_moves());
        if moves.is_empty() {
            log::warn!("search called on a finished game ({} to move)", board.next_move_maker());
            return None;
        }

        let depth = depth.max(1);
        let maximizing = board.next_move_maker().is_white();
        let (best_move, score, nodes) = if self.config.parallel_root {
            self.search_root_parallel(board, &moves, depth, quiescence, maximizing)?
        } else {
            self.search_root(board, &moves, depth, quiescence, maximizing)?
        };

        #[allow(clippy::cast_possible_truncation)]
        let stats = SearchStats {
            depth,
            nodes,
            time_ms: start.elapsed().as_millis() as u64,
        };
        self.last_stats = stats;
        log::debug!(
            "depth {depth}: best {best_move} score {score} nodes {nodes} in {}ms",
            stats.time_ms
        );

        Some(SearchOutcome {
            best_move,
            score,
            stats,
        })
    }

    fn search_root(
        &self,
        board: &Board,
        moves: &[Move],
        depth: u8,
        quiescence: u8,
        maximizing: bool,
    ) -> Option<(Move, i32, u64)> {
        let mut nodes = 1;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let next = mv.apply(board);
            let score = self.minimax(&next, depth - 1, quiescence, 1, alpha, beta, &mut nodes);
            log::trace!("root {mv}: {score}");
            if improves(best.map(|(_, s)| s), score, maximizing) {
                best = Some((*mv, score));
            }
            if self.config.use_alpha_beta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }

        best.map(|(best_move, score)| (best_move, score, nodes))
    }

    /// Every root move gets its own full window, so the reduction in
    /// generation order gives the sequential answer.
    fn search_root_parallel(
        &self,
        board: &Board,
        moves: &[Move],
        depth: u8,
        quiescence: u8,
        maximizing: bool,
    ) -> Option<(Move, i32, u64)> {
        let scored: Vec<(Move, i32, u64)> = moves
            .par_iter()
            .map(|mv| {
                let mut nodes = 0;
                let next = mv.apply(board);
                let score =
                    self.minimax(&next, depth - 1, quiescence, 1, -INFINITY, INFINITY, &mut nodes);
                (*mv, score, nodes)
            })
            .collect();

        let mut nodes = 1;
        let mut best: Option<(Move, i32)> = None;
        for (mv, score, branch_nodes) in scored {
            log::trace!("root {mv}: {score}");
            nodes += branch_nodes;
            if improves(best.map(|(_, s)| s), score, maximizing) {
                best = Some((mv, score));
            }
        }

        best.map(|(best_move, score)| (best_move, score, nodes))
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        depth: u8,
        quiescence: u8,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;
        let player = board.current_player();
        let legal = player.legal_moves();
        if legal.is_empty() {
            return self.terminal_score(board, ply);
        }
        if depth == 0 {
            return self.quiescence(board, quiescence, ply, alpha, beta, nodes);
        }

        let maximizing = board.next_move_maker().is_white();
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in self.ordered(legal) {
            let next = mv.apply(board);
            let score = self.minimax(&next, depth - 1, quiescence, ply + 1, alpha, beta, nodes);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.config.use_alpha_beta && alpha >= beta {
                break;
            }
        }
        best
    }

    /// Stands pat on the static score and keeps following captures and
    /// promotions (every move while in check) until the budget runs out.
    fn quiescence(
        &self,
        board: &Board,
        budget: u8,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        let stand_pat = self.evaluator.evaluate(board, 0);
        if budget == 0 {
            return stand_pat;
        }

        let player = board.current_player();
        let in_check = player.is_in_check();
        let candidates: Vec<Move> = self
            .ordered(player.legal_moves())
            .into_iter()
            .filter(|mv| in_check || mv.is_attack() || mv.is_promotion())
            .collect();
        if candidates.is_empty() {
            return stand_pat;
        }

        let maximizing = board.next_move_maker().is_white();
        let mut best = match (in_check, maximizing) {
            (false, _) => stand_pat,
            (true, true) => -INFINITY,
            (true, false) => INFINITY,
        };
        if maximizing {
            alpha = alpha.max(best);
        } else {
            beta = beta.min(best);
        }
        if self.config.use_alpha_beta && alpha >= beta {
            return best;
        }

        for mv in candidates {
            let next = mv.apply(board);
            *nodes += 1;
            let score = if next.current_player().legal_moves().is_empty() {
                self.terminal_score(&next, ply + 1)
            } else {
                self.quiescence(&next, budget - 1, ply + 1, alpha, beta, nodes)
            };
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.config.use_alpha_beta && alpha >= beta {
                break;
            }
        }
        best
    }

    /// Mate in fewer plies scores further from zero.
    fn terminal_score(&self, board: &Board, ply: i32) -> i32 {
        let player = board.current_player();
        if player.is_in_check() {
            let magnitude = self.config.mate_score - ply;
            -magnitude * player.alliance().score_sign()
        } else {
            0
        }
    }

    /// Generation order, or captures first by victim value then cheapest
    /// attacker when sorting is enabled. The sort is stable.
    fn ordered(&self, moves: &[Move]) -> Vec<Move> {
        let mut moves = moves.to_vec();
        if self.config.sort_moves {
            moves.sort_by_key(|mv| Reverse(self.order_score(mv)));
        }
        moves
    }

    fn order_score(&self, mv: &Move) -> i32 {
        let promotion = mv
            .upgrade()
            .map_or(0, |upgrade| self.config.piece_value(upgrade));
        let capture = mv.attacked_piece().map_or(0, |victim| {
            self.config.piece_value(victim.piece_type) * 10
                - self.config.piece_value(mv.piece.piece_type)
        });
        promotion + capture
    }
}

impl Searcher for MiniMax {
    fn execute(&mut self, board: &Board) -> Option<Move> {
        let depth = self.config.search_depth;
        let quiescence = self.config.quiescence;
        self.search(board, depth, quiescence)
            .map(|outcome| outcome.best_move)
    }
}

fn improves(best: Option<i32>, score: i32, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best,
        Some(best) => score < best,
    }
}
