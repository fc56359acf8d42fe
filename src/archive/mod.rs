//! # PDS archive fetch layer
//!
//! Downloads Cassini RADAR products for one flyby observation from the PDS imaging node:
//! the volume's `AAREADME.TXT`, the BIDR image products matching a segment and resolution
//! selection (`.LBL` labels plus `.ZIP` images, extracted in place), and the SBDR tables
//! (`.TAB` data plus the `.FMT` format files required to read them).
//!
//! The identifier codec resolves which archive directory to fetch from (designator →
//! observation number → canonical CORADR version); this layer only deals with listings and
//! transfers. Fetched products land under `tidar_results/{CORADR}_{segment}/` in the working
//! directory.

pub mod fetch;
pub mod listing;

pub use fetch::{fetch_flyby_products, FetchOptions};
