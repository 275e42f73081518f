//! UI components.

pub mod particle_network;
