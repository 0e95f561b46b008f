//! Time-boxed outing planner.
//!
//! Picks nearby places worth visiting from a starting point and orders them
//! into a route that fits the hours available, splitting the time between
//! travel and dwell at each stop.

pub mod cache;
pub mod domain;
pub mod geo;
pub mod mapbox;
pub mod places;
pub mod planner;
pub mod routing;
pub mod web;
