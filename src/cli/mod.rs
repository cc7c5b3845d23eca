pub mod args;
pub mod io;
pub mod run;
pub mod specials;
pub mod turn;

pub use run::run;
