//! File helpers shared by the recorder, player and front end.

pub mod lock;
