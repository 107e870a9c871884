pub mod board;
pub mod coordinate;
pub mod eval_constants;
pub mod generator;
pub mod layouts;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod player;
pub mod rules;
