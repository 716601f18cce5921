//! API routes
//!
//! - [`health`] - liveness
//! - [`auth`] - role sessions and navigation
//! - [`upload`] - profile / staff-card images
//! - [`registration`] - public club and program sign-up
//! - [`verification`] - membership lookup
//! - [`usage_logs`] - partner benefit usage
//! - [`dashboard`] - statistics and AI summary
//! - [`members`] - member administration, e-card
//! - [`clubs`] - club administration
//! - [`partners`] - partners, programs and enrollments

pub mod auth;
pub mod health;
pub mod upload;

pub mod registration;
pub mod verification;

pub mod clubs;
pub mod dashboard;
pub mod members;
pub mod partners;
pub mod usage_logs;
