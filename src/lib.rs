//! Wrap-around terminal Snake.
//!
//! The engine ([`game`], [`snake`], [`food`], [`geometry`]) is pure and
//! deterministic for a given seed. [`input`], [`renderer`], [`ui`] and
//! [`terminal_runtime`] adapt it to a crossterm/ratatui terminal.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
