//! onboard: ClothBuddy seller onboarding
//!
//! A terminal wizard that registers a store in three steps (GST number,
//! PAN number, store and address details), validating each step before
//! moving on.

pub mod cli;
pub mod core;
pub mod wizard;
