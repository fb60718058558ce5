//! Character level and experience.
mod experience;
mod level;

pub use experience::{Experience, ExperienceError, LevelUp, balance_experience_reward};
pub use level::Level;
