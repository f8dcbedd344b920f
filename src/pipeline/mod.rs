//! Query pipeline shared by every strategy.
//!
//! ```text
//! reactions ─simplify─▶ aggregate edges (weight ≥ h) ─count─▶ motif edges ─label─▶ components
//! ```

pub mod simplify;
pub mod counter;
pub mod components;

pub use simplify::simplify;
pub use counter::{count_edge, count_motifs, count_windows, WindowSpec};
pub use components::{weak_components, Components};
