//! Comic book document backend
//!
//! Turns a comic book archive (CBZ, CBR, CB7, CBT or their generic ZIP /
//! RAR / 7Z / TAR equivalents) into an ordered, stable list of image pages
//! and decodes individual pages on demand: either just far enough to learn
//! a page's dimensions, or fully into a rotated pixel buffer.
//!
//! # Features
//!
//! - **Page catalog**: one sequential pass lists the archive, keeps entries
//!   with a decodable image extension and sorts them naturally
//!   (`page2.jpg` before `page10.jpg`)
//! - **Dimension probe**: chunked partial decode that stops once width and
//!   height are known
//! - **Rendering**: full decode with optional pre-scaling and right-angle
//!   rotation
//! - **Specific load errors**: wrong content type, missing codec support,
//!   corrupt archive and image-free archive are distinct failure kinds
//! - **Per-page resilience**: a missing, truncated or corrupt page yields no
//!   dimensions / no image for that page and never fails the document
//!
//! # Usage
//!
//! ```no_run
//! use comicdoc_backend::{ComicDocument, RenderContext, Rotation};
//!
//! # fn main() -> Result<(), comicdoc_backend::ComicError> {
//! let mut document = ComicDocument::load_from_path("book.cbz")?;
//! println!("{} pages", document.page_count());
//!
//! if let Some(dims) = document.page_size(0) {
//!     println!("first page is {}x{}", dims.width, dims.height);
//! }
//!
//! let context = RenderContext::new(0).with_rotation(Rotation::Quarter);
//! if let Some(image) = document.render_page(&context) {
//!     image.save("page0.png").ok();
//! }
//! # Ok(())
//! # }
//! ```

pub mod decode;
pub mod document;
pub mod error;
pub mod extensions;
pub mod sort;

pub use decode::{PageDimensions, Rotation};
pub use document::{ComicDocument, RenderContext};
pub use error::{ComicError, Result};
pub use extensions::supported_extensions;
pub use sort::{collation_key, natural_cmp, FilenameKey};

// Re-exported so hosts can name the container family in their own error
// reporting without depending on the archive crate directly
pub use comicdoc_archive::ArchiveFlavor;
