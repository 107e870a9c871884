use crate::logic::eval_constants::{
    CHECKMATE_BONUS, CHECK_BONUS, DEPTH_BONUS, MATE_SCORE, VAL_BISHOP, VAL_KING, VAL_KNIGHT,
    VAL_PAWN, VAL_QUEEN, VAL_ROOK, WEIGHT_MOBILITY,
};
use crate::logic::piece::PieceType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    pub mobility_weight: i32,
    pub check_bonus: i32,
    pub checkmate_bonus: i32,
    pub depth_bonus: i32, // Checkmate bonus multiplier per remaining ply

    // Search Parameters
    pub mate_score: i32,
    pub search_depth: u8,
    pub quiescence: u8,
    pub use_alpha_beta: bool,
    pub sort_moves: bool,
    pub parallel_root: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,
            mobility_weight: WEIGHT_MOBILITY,
            check_bonus: CHECK_BONUS,
            checkmate_bonus: CHECKMATE_BONUS,
            depth_bonus: DEPTH_BONUS,

            mate_score: MATE_SCORE,
            search_depth: 3,
            quiescence: 2,
            use_alpha_beta: true,
            sort_moves: false,
            parallel_root: false,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,
    val_king: Option<f32>,
    mobility_weight: Option<f32>,
    check_bonus: Option<f32>,
    checkmate_bonus: Option<f32>,
    depth_bonus: Option<f32>,

    mate_score: Option<i32>,
    search_depth: Option<u8>,
    quiescence: Option<u8>,
    use_alpha_beta: Option<bool>,
    sort_moves: Option<bool>,
    parallel_root: Option<bool>,
}

impl EngineConfig {
    /// Reads a tuning file. Evaluation values are scale factors over the
    /// defaults; search parameters are taken as given.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: apply_scale(default.val_king, json_config.val_king),
            mobility_weight: apply_scale(default.mobility_weight, json_config.mobility_weight),
            check_bonus: apply_scale(default.check_bonus, json_config.check_bonus),
            checkmate_bonus: apply_scale(default.checkmate_bonus, json_config.checkmate_bonus),
            depth_bonus: apply_scale(default.depth_bonus, json_config.depth_bonus),

            mate_score: json_config.mate_score.unwrap_or(default.mate_score),
            search_depth: json_config.search_depth.unwrap_or(default.search_depth),
            quiescence: json_config.quiescence.unwrap_or(default.quiescence),
            use_alpha_beta: json_config.use_alpha_beta.unwrap_or(default.use_alpha_beta),
            sort_moves: json_config.sort_moves.unwrap_or(default.sort_moves),
            parallel_root: json_config.parallel_root.unwrap_or(default.parallel_root),
        })
    }

    #[must_use]
    pub const fn piece_value(&self, piece_type: PieceType) -> i32 {
        match piece_type {
            PieceType::Pawn => self.val_pawn,
            PieceType::Knight => self.val_knight,
            PieceType::Bishop => self.val_bishop,
            PieceType::Rook => self.val_rook,
            PieceType::Queen => self.val_queen,
            PieceType::King => self.val_king,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
