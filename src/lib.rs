// Homework: a collection of small, independent exercises.
//
// This is the library root. Each module is one self-contained exercise;
// none of them share state. The CLI in main.rs exposes them as subcommands.

pub mod advert;
pub mod clock;
pub mod color;
pub mod config;
pub mod features;
pub mod lazy;
pub mod output;
pub mod pokemon;
pub mod salary;
pub mod stamp;
pub mod worker;
