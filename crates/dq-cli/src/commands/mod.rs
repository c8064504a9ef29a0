pub mod play;
pub mod saves;
