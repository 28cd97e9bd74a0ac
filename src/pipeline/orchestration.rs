//! The end-to-end restitching pipeline.
//!
//! Ties the stages together: detection, reading-order sorting, cropping,
//! recognition, fragment collection, line clustering, word merging, and
//! emission. Detection and recognition are pluggable collaborators; the
//! reconstruction half of the pipeline is pure and can also be driven
//! directly from previously produced artifacts via
//! [`RestitchPipeline::process_mapped_image`].

use image::RgbImage;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::artifacts::{CropMapping, RecognitionResults};
use crate::core::config::StitchConfig;
use crate::core::errors::{PipelineStage, StitchError, StitchResult};
use crate::core::traits::{TextDetector, TextRecognizer};
use crate::pipeline::cropping::CropExtractor;
use crate::pipeline::emit::RecordEmitter;
use crate::pipeline::fragments::FragmentCollector;
use crate::pipeline::line_cluster::LineClusterer;
use crate::pipeline::reading_order::ReadingOrderSorter;
use crate::pipeline::result::{ImageStitchResult, Record, StitchMetrics};
use crate::pipeline::word_merge::WordMerger;
use crate::utils::visualization::VisualizationConfig;

/// The full restitching pipeline over pluggable detection and recognition
/// collaborators.
///
/// Each image is processed independently; results never accumulate inside
/// the pipeline. Batch output is the vector of per-image results, and a run's
/// record set is the caller's explicit aggregation (see [`collect_records`]).
pub struct RestitchPipeline<D, R> {
    detector: D,
    recognizer: R,
    config: StitchConfig,
    sorter: ReadingOrderSorter,
    extractor: CropExtractor,
    collector: FragmentCollector,
    clusterer: LineClusterer,
    merger: WordMerger,
    emitter: RecordEmitter,
}

impl<D: TextDetector, R: TextRecognizer> RestitchPipeline<D, R> {
    /// Creates a pipeline with default visualization settings.
    pub fn new(detector: D, recognizer: R, config: StitchConfig) -> StitchResult<Self> {
        Self::with_visualization(detector, recognizer, config, VisualizationConfig::default())
    }

    /// Creates a pipeline with the given visualization settings.
    pub fn with_visualization(
        detector: D,
        recognizer: R,
        config: StitchConfig,
        viz: VisualizationConfig,
    ) -> StitchResult<Self> {
        config.validate()?;

        Ok(Self {
            sorter: ReadingOrderSorter::new(config.reading_order.clone()),
            extractor: CropExtractor::new(config.min_box_size),
            collector: FragmentCollector::new(),
            clusterer: LineClusterer::new(config.line_clustering.clone()),
            merger: WordMerger::new(config.word_merge.clone()),
            emitter: RecordEmitter::new(viz),
            detector,
            recognizer,
            config,
        })
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Processes one image end to end.
    ///
    /// Runs detection, sorts the boxes into reading order, cuts crops, runs
    /// recognition per crop, then hands the collaborator output to the pure
    /// reconstruction path.
    pub fn process_image(
        &self,
        image_name: &str,
        image: &RgbImage,
    ) -> StitchResult<ImageStitchResult> {
        let start = Instant::now();

        let polygons = self
            .detector
            .detect(image)
            .map_err(|e| StitchError::stage(PipelineStage::Detection, image_name, e))?;
        let ordered = self.sorter.sort(polygons);
        debug!(image = image_name, boxes = ordered.len(), "detection done");

        let (crops, mapping) = self.extractor.extract(image_name, image, &ordered)?;

        let mut recognition = RecognitionResults::new();
        for crop in &crops {
            let spans = self
                .recognizer
                .recognize(&crop.image)
                .map_err(|e| StitchError::stage(PipelineStage::Recognition, &crop.file, e))?;
            recognition.insert(crop.file.clone(), spans);
        }

        let result = self.process_mapped_image(image, &mapping, &recognition)?;
        info!(
            image = image_name,
            records = result.records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "image processed"
        );
        Ok(result)
    }

    /// Reconstructs one image from collaborator artifacts.
    ///
    /// Pure per-image function over the source raster, its crop mapping and
    /// its recognition results: no filesystem access, no shared state, no
    /// collaborator calls. The same inputs always yield the same records.
    pub fn process_mapped_image(
        &self,
        image: &RgbImage,
        mapping: &CropMapping,
        recognition: &RecognitionResults,
    ) -> StitchResult<ImageStitchResult> {
        let image_id = mapping.image_stem().to_string();

        let (fragments, stats) = self.collector.collect(mapping, recognition)?;
        let mut metrics = StitchMetrics::new();
        metrics.absorb_collection(stats);

        let rows = self.clusterer.cluster(fragments);
        metrics.rows = rows.len();

        let groups: Vec<_> = rows
            .into_iter()
            .flat_map(|row| self.merger.merge(row))
            .collect();
        metrics.groups = groups.len();

        let (records, annotated_image) = self.emitter.emit(&image_id, &groups, image);

        Ok(ImageStitchResult {
            image_id,
            records,
            annotated_image,
            metrics,
        })
    }

    /// Processes a batch of named images.
    ///
    /// Output order matches input order. Images above the parallelism
    /// threshold are processed on the rayon pool; each image's failure is
    /// its own `Err` entry and never aborts the rest of the batch. When a
    /// collaborator budget is configured, images whose turn comes after the
    /// budget has elapsed are skipped with a [`StitchError::BudgetExhausted`]
    /// entry; an image already underway is never interrupted.
    pub fn process_batch(&self, images: &[(String, RgbImage)]) -> Vec<StitchResult<ImageStitchResult>>
    where
        D: Sync,
        R: Sync,
    {
        let deadline = self
            .config
            .collaborator_budget
            .map(|budget| (Instant::now(), budget));

        let process = |(name, image): &(String, RgbImage)| {
            if let Some((start, budget)) = deadline
                && start.elapsed() > budget
            {
                warn!(image = name.as_str(), "collaborator budget exhausted, skipping");
                return Err(StitchError::budget_exhausted(name.as_str()));
            }
            self.process_image(name, image)
        };

        if !self.config.parallel.should_parallelize(images.len()) {
            return images.iter().map(process).collect();
        }

        debug!(images = images.len(), "processing batch in parallel");
        let run = || images.par_iter().map(process).collect();
        match self.config.parallel.max_threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    warn!(error = %e, "failed to build sized thread pool, using default");
                    run()
                }
            },
            None => run(),
        }
    }
}

/// Aggregates the records of a batch run, in batch order.
///
/// Per-image results are independent by construction; this is the one place
/// a run-level record set is assembled.
pub fn collect_records(results: &[ImageStitchResult]) -> Vec<Record> {
    results
        .iter()
        .flat_map(|result| result.records.iter().cloned())
        .collect()
}
