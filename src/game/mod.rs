//! Pure game engines. No I/O, no clocks; randomness is injected.

pub mod clock;
pub mod impostor;
pub mod score;
pub mod taboo;
