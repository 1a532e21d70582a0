//! Actor Model: Threaded clocks for animated reveals.
//!
//! Hosts that own an event loop can tick a [`RevealRun`](crate::reveal::RevealRun)
//! themselves. Everyone else uses these actors:
//! - **Ticker Actor**: Calls a callback at a fixed interval on its own thread
//! - **Animator**: One reveal run bound to one ticker
//! - **Driver**: Keeps at most one animator alive and collects events
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   start / stop    ┌──────────────┐
//! │  Main Loop   │ ────────────────▶ │    Driver    │
//! │              │                   └──────┬───────┘
//! │              │                          │ owns
//! │              │                   ┌──────▼───────┐
//! │              │   RevealEvent     │   Animator   │
//! │              │ ◀──────────────── │ (tick thread)│
//! └──────────────┘                   └──────────────┘
//! ```

mod animator;
mod driver;
mod ticker;

pub use animator::Animator;
pub use driver::RevealDriver;
pub use ticker::{Tick, TickerActor};
