// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod error;
mod state;
mod sync;

pub use apply::{apply_price, link_to_package, reset_to_calculated, set_manual_price};
pub use error::CoreError;
pub use state::{QuotePriceState, TransitionResult};
pub use sync::{PriceComparison, Recalculation, SyncStatus, evaluate, recalculate};
