#![cfg_attr(not(test), no_std)]

//! Scroll-driven feed core: active-item tracking, watch-time rewards and ad cadence.

pub mod ad;
pub mod app;
pub mod cadence;
pub mod feed;
pub mod input;
pub mod ledger;
pub mod render;
pub mod reward;
pub mod tracker;
