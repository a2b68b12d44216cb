//! PrayerGlow - Subscription-aware feature gating
//!
//! Decides, per request, which variant of a prayer feature a caller may use.
//! Core spiritual features degrade to their basic version instead of being
//! withheld; premium-only features answer with a friendly upgrade offer.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
