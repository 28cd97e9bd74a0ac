//! The restitching pipeline and its stages.
//!
//! Detection-side stages (reading-order sorting, cropping) prepare crops and
//! the mapping artifact; reconstruction-side stages (fragment collection,
//! line clustering, word merging, emission) turn collaborator output back
//! into ordered phrase records. [`RestitchPipeline`] wires the stages to a
//! detector and a recognizer.

pub mod cropping;
pub mod emit;
pub mod fragments;
pub mod line_cluster;
pub mod orchestration;
pub mod reading_order;
pub mod result;
pub mod word_merge;

pub use cropping::{Crop, CropExtractor};
pub use emit::RecordEmitter;
pub use fragments::{CollectionStats, Fragment, FragmentCollector};
pub use line_cluster::{LineClusterer, Row};
pub use orchestration::{RestitchPipeline, collect_records};
pub use reading_order::ReadingOrderSorter;
pub use result::{ImageStitchResult, Record, StitchMetrics};
pub use word_merge::{Group, WordMerger};
