// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Scroll-triggered count-up animation for numeric counter displays.
//!
//! A counter is an element whose `data-target` attribute holds an integer.
//! When it first scrolls at least 30% into view its text counts up from
//! zero to the target over two seconds on an ease-out curve, then snaps to
//! the exact target. Each counter animates once.
//!
//! # Key entry points
//!
//! - [`watcher::VisibilityWatcher`] - one-shot trigger policy fed by the
//!   host's intersection notifications
//! - [`animation::CountUpAnimator`] - drives [`animation::AnimationRun`]s
//!   through a [`animation::FrameScheduler`]
//! - [`options::Options`] - threshold, selection and timing (TOML/JSON)
//! - [`page::Page`] - headless host with a document, viewport and frame loop
//!
//! # Hosts
//!
//! The core never touches a platform API. A host supplies elements through
//! [`element::CounterElement`] and frames through
//! [`animation::FrameScheduler`], and forwards visibility changes to the
//! watcher. [`page`] is the in-process host; the `web` feature adds a
//! browser host on `web-sys`.

pub mod animation;
pub mod element;
pub mod error;
pub mod options;
pub mod page;
pub mod selector;
pub mod util;
pub mod watcher;
#[cfg(feature = "web")]
pub mod web;

pub use animation::{CountUpAnimator, CountValue};
pub use error::CountUpError;
pub use options::Options;
pub use watcher::{Reaction, VisibilityWatcher};
