//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for the path engine.
//!
//! ## Design
//!
//! - **Reproducibility**: every generator is seeded explicitly; there is no
//!   global generator
//! - **Substreams**: [`SimRng::for_stream`] derives an independent generator
//!   per path from the run seed, so paths can be simulated in any order or
//!   on any thread with identical results
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use folio_engine::rng::SimRng;
//!
//! let mut rng = SimRng::from_seed(12345);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//!
//! // Path 7 of the run seeded with 12345
//! let mut path_rng = SimRng::for_stream(12345, 7);
//! let mut buffer = vec![0.0; 8];
//! path_rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{substream_seed, SimRng};
