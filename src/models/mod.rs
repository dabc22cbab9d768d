pub mod block;
pub mod category;
pub mod document;
pub mod hierarchy;
pub mod page;
pub mod record;

pub use block::{BlockType, NamePositionPair, TextBlock};
pub use category::DocCategory;
pub use document::{Document, FileKind};
pub use hierarchy::HierarchyNode;
pub use page::{OrgChartResult, PageImage, PageResult};
pub use record::{AnalysisResult, ExtractionMethod, FilenameCheck, ProcessingRecord};
