pub mod history;
pub mod intent;
pub mod models;
pub mod parser;
pub mod reducer;
pub mod state;
