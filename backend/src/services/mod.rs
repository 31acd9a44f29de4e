pub mod logs;
pub mod roster;
pub mod soldiers;
pub mod system;
