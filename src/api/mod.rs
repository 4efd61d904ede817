pub mod assets;
pub mod handlers;
pub mod router;
