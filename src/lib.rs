//! Split violin plots comparing USER and API image-quality metrics (IQMs).
//!
//! The crate does one thing: given the combined observation table and a
//! list of metric names, it renders one interactive split-violin figure
//! per metric, USER cohort on the negative half and API cohort on the
//! positive half, coloured by metric family.
//!
//! ```text
//!   IqmTable (wide)          descriptors.csv
//!        │                         │
//!   validate requested names       │
//!        │                         ▼
//!        ▼                    Descriptors
//!   melt → LongTable               │
//!        │                         │
//!        ▼                         │
//!   per metric: KDE outline + summary stats
//!        │
//!        ▼
//!   plotly figure (600×600, white) → show()
//! ```
//!
//! ```no_run
//! use iqm_violin::{make_violin_plots, data::loader::load_iqm_csv};
//! use std::path::Path;
//!
//! # fn main() -> iqm_violin::Result<()> {
//! let table = load_iqm_csv(Path::new("group_bold.csv"))?;
//! make_violin_plots(&table, &["snr", "tsnr"], Path::new("descriptors.csv"))?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod metrics;
pub mod stats;
pub mod violin;

pub use data::model::{Descriptors, IqmRecord, IqmTable, Source};
pub use error::{Error, Result};
pub use violin::{make_violin_plots, violin_figure};
