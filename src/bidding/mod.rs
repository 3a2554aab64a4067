pub mod commands;
pub mod countdown;
pub mod model;
