//! Output generation for cleaned life expectancy tables.
//!
//! - **csv**: render a [`FinalTable`](lifexp_model::FinalTable) as CSV and
//!   write it in one step
//! - **hash**: SHA-256 digests of rendered or written output

pub mod csv;
pub mod hash;

pub use csv::{WrittenFile, ensure_parent_dir, render_csv, write_final_table};
pub use hash::{compute_file_hash, sha256_hex};
