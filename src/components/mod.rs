//! UI components.

pub mod disintegration;
