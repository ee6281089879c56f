use crate::*;
pub use safe_zone::*;

mod safe_zone;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
