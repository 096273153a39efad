// Engine modules: physics and the fixed-step loop

pub mod game_loop;
pub mod physics;
