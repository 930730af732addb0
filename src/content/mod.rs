//! Content module - static records, the registry and the body micro-syntax

mod html;
mod markup;
mod record;
mod registry;

pub use html::{html_escape, render_blocks};
pub use markup::{
    classify_line, render_body, split_emphasis, Block, BlockKind, LineKind, Segment,
};
pub use record::{
    AboutContent, ContactContent, ContentRecord, CvContent, CvSection, HomeContent, Profile,
    QuickLink, RecordLink, TimelineEntry,
};
pub use registry::{Content, ContentRegistry, RegistryError};
